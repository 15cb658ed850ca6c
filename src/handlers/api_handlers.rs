use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RelayError;
use crate::form::FormController;
use crate::models::{Field, FormData, FormErrors};
use crate::relay::{RelayResponse, RelayService, malformed_payload};

/// CSRF protection for the JSON endpoints.
///
/// Rejects POST/PUT/DELETE requests that don't have Content-Type: application/json.
/// Browsers cannot send cross-origin JSON via a simple form POST, so the
/// Content-Type check stands in for a token.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PUT
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = RelayResponse::failure("Content-Type must be application/json");
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// POST /api/save - the relay endpoint.
///
/// A body that is not JSON at all is a 500, as is any other unexpected failure.
/// JSON of the wrong shape is the sender's to fix and gets a 400.
pub async fn save(relay: web::Data<RelayService>, body: web::Bytes) -> HttpResponse {
    let json: Value = match serde_json::from_slice(&body) {
        Ok(json) => json,
        Err(e) => {
            return relay_error_response(&RelayError::Internal(format!(
                "unreadable request body: {e}"
            )));
        }
    };
    // serde would read a positional array into the struct; only objects are payloads
    let parsed = if json.is_object() {
        FormData::deserialize(&json)
    } else {
        Err(serde::de::Error::custom("payload is not a JSON object"))
    };
    let payload = match parsed {
        Ok(payload) => payload,
        Err(e) => {
            log::debug!("Payload shape rejected: {e}");
            return relay_error_response(&RelayError::Validation(malformed_payload(&json)));
        }
    };

    match relay.accept(payload).await {
        Ok(_) => HttpResponse::Ok().json(RelayResponse::ok()),
        Err(e) => relay_error_response(&e),
    }
}

fn relay_error_response(err: &RelayError) -> HttpResponse {
    match err {
        RelayError::Validation(e) => log::info!("Relay rejected payload: {e}"),
        RelayError::Internal(e) => log::error!("API Error: {e}"),
    }
    HttpResponse::build(err.status()).json(RelayResponse::failure(err.public_message()))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiveValidationRequest {
    pub form: FormData,
    pub other_interest: String,
    /// Fields the user has edited; only these report errors.
    pub touched: Vec<Field>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveValidationResponse {
    pub errors: FormErrors,
    pub can_submit: bool,
    pub other_selected: bool,
}

/// POST /api/validate - per-keystroke validation for the signup page.
pub async fn validate(body: web::Json<LiveValidationRequest>) -> HttpResponse {
    let LiveValidationRequest {
        form,
        other_interest,
        touched,
    } = body.into_inner();

    let mut controller = FormController::new();
    controller.prefill(form.clone(), &other_interest);
    for field in touched {
        controller.set_field(field, form.text(field));
    }

    HttpResponse::Ok().json(LiveValidationResponse {
        errors: controller.errors().clone(),
        can_submit: controller.is_valid(),
        other_selected: controller.other_selected(),
    })
}

/// Configure the /api routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("/save", web::post().to(save))
            .route("/validate", web::post().to(validate)),
    );
}

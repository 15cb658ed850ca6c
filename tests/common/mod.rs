//! Shared test infrastructure for the integration tests.
//!
//! # Mock downstream services
//! - `MockServer::start()` - an in-process actix server on a random port that
//!   records every request and answers with a fixed status and JSON body.
//!   Stands in for the coupon API, the Google Form and a remote relay.

#![allow(dead_code)]

use std::sync::Mutex;

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, http::StatusCode, web};
use serde_json::Value;

use hpworld_signup::models::FormData;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TEST_NAME: &str = "Asha Rao";
pub const TEST_MOBILE: &str = "9876543210";
pub const TEST_REFERRER: &str = "9123456789";

pub fn valid_form() -> FormData {
    FormData {
        name: TEST_NAME.to_string(),
        mobile: TEST_MOBILE.to_string(),
        ..Default::default()
    }
}

// ============================================================================
// MOCK HTTP SERVER
// ============================================================================

/// One request seen by a mock server.
#[derive(Debug, Clone)]
pub struct Captured {
    pub path: String,
    pub content_type: String,
    pub body: String,
}

impl Captured {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("captured body is JSON")
    }

    pub fn form_pairs(&self) -> Vec<(String, String)> {
        serde_urlencoded::from_str(&self.body).expect("captured body is urlencoded")
    }
}

struct MockState {
    status: u16,
    body: Value,
    hits: Mutex<Vec<Captured>>,
}

pub struct MockServer {
    pub base_url: String,
    state: web::Data<MockState>,
}

async fn record(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    state.hits.lock().unwrap().push(Captured {
        path: req.path().to_string(),
        content_type,
        body: String::from_utf8_lossy(&body).into_owned(),
    });
    let status = StatusCode::from_u16(state.status).expect("valid status");
    HttpResponse::build(status).json(&state.body)
}

impl MockServer {
    /// Start a mock answering every request with `status` and `body`.
    pub fn start(status: u16, body: Value) -> MockServer {
        let state = web::Data::new(MockState {
            status,
            body,
            hits: Mutex::new(Vec::new()),
        });
        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .default_service(web::to(record))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind mock server");
        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());
        MockServer {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn hits(&self) -> Vec<Captured> {
        self.state.hits.lock().unwrap().clone()
    }
}

/// A coupon service that always issues `code`.
pub fn coupon_service(code: &str) -> MockServer {
    MockServer::start(
        200,
        serde_json::json!({ "data": { "couponCode": code }, "responseMessage": "Success" }),
    )
}

/// A URL nothing is listening on.
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let addr = listener.local_addr().expect("free port addr");
    drop(listener);
    format!("http://{addr}/")
}

/// HTTP client configured the way the binary configures it.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build HTTP client")
}

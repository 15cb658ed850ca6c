use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::coupon::CouponIssuer;
use crate::csrf;
use crate::errors::{AppError, render};
use crate::form::FormController;
use crate::models::Field;
use crate::orchestrator::{Relay, SubmissionOrchestrator};
use crate::templates_structs::{SignupTemplate, ThankYouTemplate};

/// A posted signup form. Interests arrive as repeated `interests` keys, so the
/// body is read as raw pairs rather than a struct.
#[derive(Debug, Default)]
pub struct SignupPost {
    pub csrf_token: String,
    pub fields: Vec<(Field, String)>,
    pub interests: Vec<String>,
    pub other_interest: String,
}

impl SignupPost {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut post = SignupPost::default();
        for (key, value) in pairs {
            match key.as_str() {
                "csrf_token" => post.csrf_token = value,
                "otherInterest" => post.other_interest = value,
                "interests" => post.interests.push(value),
                _ => match Field::from_name(&key) {
                    Some(field) => post.fields.push((field, value)),
                    None => log::debug!("Ignoring unknown form key {key:?}"),
                },
            }
        }
        post
    }

    /// Replay the post as input events on a fresh controller.
    pub fn into_controller(self) -> FormController {
        let mut controller = FormController::new();
        for interest in &self.interests {
            controller.select_interest(interest, true);
        }
        controller.set_other_interest(&self.other_interest);
        for (field, value) in &self.fields {
            controller.set_field(*field, value);
        }
        controller
    }
}

pub async fn form_page(session: Session) -> Result<HttpResponse, AppError> {
    let csrf_token = csrf::form_token(&session);
    render(SignupTemplate::from_controller(&FormController::new(), csrf_token))
}

pub async fn submit<R, C>(
    orchestrator: web::Data<SubmissionOrchestrator<R, C>>,
    session: Session,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError>
where
    R: Relay + 'static,
    C: CouponIssuer + 'static,
{
    let post = SignupPost::from_pairs(form.into_inner());
    csrf::verify(&session, &post.csrf_token)?;
    let csrf_token = csrf::form_token(&session);

    let mut controller = post.into_controller();
    let draft = match controller.begin_submit() {
        Ok(draft) => draft,
        Err(blocked) => {
            log::info!("Signup not submitted: {blocked:?}");
            return render(SignupTemplate::from_controller(&controller, csrf_token));
        }
    };

    let result = orchestrator.submit(&draft).await;
    controller.complete(&result);

    match result {
        Ok(outcome) => {
            csrf::rotate(&session);
            render(ThankYouTemplate::from_outcome(&outcome))
        }
        Err(_) => render(SignupTemplate::from_controller(&controller, csrf_token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn repeated_interests_are_collected() {
        let post = SignupPost::from_pairs(pairs(&[
            ("csrf_token", "t"),
            ("name", "Asha Rao"),
            ("interests", "Printers"),
            ("interests", "Other"),
            ("otherInterest", "Monitors"),
            ("unexpected", "x"),
        ]));
        assert_eq!(post.csrf_token, "t");
        assert_eq!(post.interests, vec!["Printers", "Other"]);
        assert_eq!(post.fields, vec![(Field::Name, "Asha Rao".to_string())]);
    }

    #[test]
    fn other_text_survives_key_order() {
        let controller = SignupPost::from_pairs(pairs(&[
            ("otherInterest", "Monitors"),
            ("interests", "Other"),
        ]))
        .into_controller();
        assert!(controller.other_selected());
        assert_eq!(controller.other_interest(), "Monitors");
    }
}

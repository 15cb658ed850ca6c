// Template context structures for the Askama templates.

use askama::Template;

use crate::form::FormController;
use crate::models::form_data::{AGE_GROUPS, INTEREST_OPTIONS};
use crate::models::{Beneficiary, CouponAttempt, Field, FormData, FormErrors};
use crate::orchestrator::SubmissionOutcome;

/// A checkbox or select option and whether it is currently chosen.
pub struct Choice {
    pub value: &'static str,
    pub checked: bool,
}

/// Inline messages, one slot per validated input.
#[derive(Default)]
pub struct FieldMessages {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub pin_code: Option<String>,
    pub referred_by: Option<String>,
}

impl From<&FormErrors> for FieldMessages {
    fn from(errors: &FormErrors) -> Self {
        let get = |field| errors.get(field).map(str::to_string);
        Self {
            name: get(Field::Name),
            mobile: get(Field::Mobile),
            email: get(Field::Email),
            pin_code: get(Field::PinCode),
            referred_by: get(Field::ReferredBy),
        }
    }
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub csrf_token: String,
    pub form: FormData,
    pub other_interest: String,
    pub other_selected: bool,
    pub interests: Vec<Choice>,
    pub age_groups: Vec<Choice>,
    pub errors: FieldMessages,
    pub alert: Option<String>,
    pub can_submit: bool,
}

impl SignupTemplate {
    pub fn from_controller(controller: &FormController, csrf_token: String) -> Self {
        let data = controller.data();
        Self {
            csrf_token,
            form: data.clone(),
            other_interest: controller.other_interest().to_string(),
            other_selected: controller.other_selected(),
            interests: INTEREST_OPTIONS
                .iter()
                .map(|&value| Choice { value, checked: data.has_interest(value) })
                .collect(),
            age_groups: AGE_GROUPS
                .iter()
                .map(|&value| Choice { value, checked: data.age_group == value })
                .collect(),
            errors: FieldMessages::from(controller.errors()),
            alert: controller.alert().map(str::to_string),
            can_submit: controller.is_valid(),
        }
    }
}

/// One line of the coupon summary on the thank-you page.
pub struct CouponLine {
    pub label: String,
    pub code: Option<String>,
}

impl From<&CouponAttempt> for CouponLine {
    fn from(attempt: &CouponAttempt) -> Self {
        let interest = attempt.interest.as_deref().unwrap_or("Welcome offer");
        let label = match attempt.beneficiary {
            Beneficiary::Submitter => interest.to_string(),
            Beneficiary::Referrer => format!("Referral reward for {}", attempt.request.issuer_mobile_no),
        };
        Self {
            label,
            code: attempt.coupon_code().map(str::to_string),
        }
    }
}

#[derive(Template)]
#[template(path = "thank_you.html")]
pub struct ThankYouTemplate {
    pub name: String,
    pub coupons: Vec<CouponLine>,
    pub referral: Option<CouponLine>,
}

impl ThankYouTemplate {
    pub fn from_outcome(outcome: &SubmissionOutcome) -> Self {
        Self {
            name: outcome.payload.name.trim().to_string(),
            coupons: outcome.coupons.iter().map(CouponLine::from).collect(),
            referral: outcome.referral.as_ref().map(CouponLine::from),
        }
    }
}

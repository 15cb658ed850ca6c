pub mod coupon;
pub mod form_data;
pub mod user_entry;

pub use coupon::{Beneficiary, CouponAttempt, CouponRequest, campaign_for};
pub use form_data::{Field, FormData, FormErrors, SubmissionDraft};
pub use user_entry::UserEntry;

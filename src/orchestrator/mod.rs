//! Submission workflow: relay first, then coupons.
//!
//! The relay result decides success. Coupon calls run one after another in
//! interest-selection order; a failed coupon is recorded and the next one is
//! still attempted.

pub mod relay_client;

use crate::config::CouponConfig;
use crate::coupon::CouponIssuer;
use crate::errors::SubmitError;
use crate::models::form_data::{OTHER_INTEREST, normalize_interests};
use crate::models::{Beneficiary, CouponAttempt, CouponRequest, FormData, SubmissionDraft, campaign_for};

pub use relay_client::{HttpRelay, LocalRelay, RelayClient};

/// Where submissions are relayed to.
pub trait Relay {
    fn relay(&self, payload: &FormData) -> impl Future<Output = Result<(), SubmitError>>;
}

/// Result of a submission whose relay step succeeded.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    /// What was relayed, with "Other" replaced by the free text.
    pub payload: FormData,
    /// One attempt per selected interest (or one default), in selection order.
    pub coupons: Vec<CouponAttempt>,
    pub referral: Option<CouponAttempt>,
}

impl SubmissionOutcome {
    /// Every attempt, submitter coupons first.
    pub fn attempts(&self) -> impl Iterator<Item = &CouponAttempt> {
        self.coupons.iter().chain(self.referral.iter())
    }

    pub fn failed_attempts(&self) -> usize {
        self.attempts().filter(|a| a.result.is_err()).count()
    }
}

pub struct SubmissionOrchestrator<R, C> {
    relay: R,
    issuer: C,
    coupon: CouponConfig,
}

impl<R: Relay, C: CouponIssuer> SubmissionOrchestrator<R, C> {
    pub fn new(relay: R, issuer: C, coupon: CouponConfig) -> Self {
        Self { relay, issuer, coupon }
    }

    pub async fn submit(&self, draft: &SubmissionDraft) -> Result<SubmissionOutcome, SubmitError> {
        let payload = build_payload(&draft.form, &draft.other_interest);
        log::info!(
            "Submitting signup with {} interest(s)",
            payload.interests.len()
        );

        if let Err(e) = self.relay.relay(&payload).await {
            log::error!("Submission relay failed: {e}");
            return Err(e);
        }

        let custom = draft.other_interest.trim();
        let selections: Vec<Option<&str>> = if draft.form.interests.is_empty() {
            vec![None]
        } else {
            draft.form.interests.iter().map(|i| Some(i.as_str())).collect()
        };

        let mut coupons = Vec::with_capacity(selections.len());
        for selected in selections {
            let label = selected.map(|s| {
                if s == OTHER_INTEREST && !custom.is_empty() {
                    custom.to_string()
                } else {
                    s.to_string()
                }
            });
            let attempt = self
                .issue(Beneficiary::Submitter, label, campaign_for(selected), &payload.mobile)
                .await;
            coupons.push(attempt);
        }

        let referral = if payload.referred_by.is_empty() {
            None
        } else {
            let first = draft.form.interests.first().map(String::as_str);
            let label = coupons.first().and_then(|a| a.interest.clone());
            Some(
                self.issue(Beneficiary::Referrer, label, campaign_for(first), &payload.referred_by)
                    .await,
            )
        };

        let outcome = SubmissionOutcome {
            payload,
            coupons,
            referral,
        };
        if outcome.failed_attempts() > 0 {
            log::warn!(
                "Submission relayed, {} coupon call(s) failed",
                outcome.failed_attempts()
            );
        }
        Ok(outcome)
    }

    async fn issue(
        &self,
        beneficiary: Beneficiary,
        interest: Option<String>,
        campaign_id: &str,
        mobile: &str,
    ) -> CouponAttempt {
        let request = CouponRequest::new(
            &self.coupon.channel_id,
            &self.coupon.program_id,
            campaign_id,
            mobile,
        );
        let result = self.issuer.issue(&request).await;
        match &result {
            Ok(code) => log::info!("Coupon issued ({beneficiary:?}, {campaign_id}): {code}"),
            Err(e) => log::warn!("Coupon not issued ({beneficiary:?}, {campaign_id}): {e}"),
        }
        CouponAttempt {
            beneficiary,
            interest,
            request,
            result,
        }
    }
}

/// Replace "Other" in place with the free text; blank free text drops it.
pub fn build_payload(form: &FormData, other_interest: &str) -> FormData {
    let custom = other_interest.trim();
    let interests = form.interests.iter().filter_map(|interest| {
        if interest == OTHER_INTEREST {
            (!custom.is_empty()).then(|| custom.to_string())
        } else {
            Some(interest.clone())
        }
    });
    FormData {
        interests: normalize_interests(interests),
        ..form.clone()
    }
}

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::errors::DownstreamError;

/// Campaign used when no interest was selected or the interest is not in the table.
pub const DEFAULT_CAMPAIGN_ID: &str = "C100183";

const CAMPAIGNS: [(&str, &str); 4] = [
    ("Desktop & Laptops", "C100190"),
    ("Printers", "C100182"),
    ("Accessories", "C100184"),
    ("Other", "C100184"),
];

/// Resolve the coupon campaign for a selected interest.
pub fn campaign_for(interest: Option<&str>) -> &'static str {
    interest
        .and_then(|i| CAMPAIGNS.iter().find(|(name, _)| *name == i))
        .map(|(_, id)| *id)
        .unwrap_or(DEFAULT_CAMPAIGN_ID)
}

static REQUEST_SEQ: AtomicU32 = AtomicU32::new(0);

/// Millisecond timestamp followed by a 4-digit process-wide sequence number.
pub fn generate_request_id() -> String {
    let seq = REQUEST_SEQ.fetch_add(1, Ordering::Relaxed) % 10_000;
    format!("{}{:04}", Utc::now().timestamp_millis(), seq)
}

/// Body of one issueCoupon call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouponRequest {
    #[serde(rename = "channelID")]
    pub channel_id: String,
    #[serde(rename = "requestID")]
    pub request_id: String,
    #[serde(rename = "campaignID")]
    pub campaign_id: String,
    #[serde(rename = "issuerMobileNo")]
    pub issuer_mobile_no: String,
    #[serde(rename = "programID")]
    pub program_id: String,
}

impl CouponRequest {
    pub fn new(channel_id: &str, program_id: &str, campaign_id: &str, mobile: &str) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            request_id: generate_request_id(),
            campaign_id: campaign_id.to_string(),
            issuer_mobile_no: mobile.to_string(),
            program_id: program_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponData {
    #[serde(default)]
    pub coupon_code: Option<String>,
}

/// The parts of the coupon service's answer we look at.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponApiResponse {
    #[serde(default)]
    pub data: Option<CouponData>,
    #[serde(default)]
    pub response_message: Option<String>,
}

impl CouponApiResponse {
    pub fn coupon_code(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.coupon_code.as_deref())
            .filter(|code| !code.trim().is_empty())
    }
}

/// Who a coupon was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beneficiary {
    Submitter,
    Referrer,
}

/// One coupon call and what came of it.
#[derive(Debug, Clone)]
pub struct CouponAttempt {
    pub beneficiary: Beneficiary,
    /// Interest as relayed ("Other" already replaced), None for the default placeholder.
    pub interest: Option<String>,
    pub request: CouponRequest,
    pub result: Result<String, DownstreamError>,
}

impl CouponAttempt {
    pub fn coupon_code(&self) -> Option<&str> {
        self.result.as_deref().ok()
    }
}

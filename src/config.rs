use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DATA_FILE: &str = "data/submissions.json";
pub const DEFAULT_COUPON_API_URL: &str = "https://test-cms.apeirosai.com/cms/api/v1/issueCoupon";
pub const DEFAULT_GOOGLE_FORM_BASE_URL: &str = "https://docs.google.com/forms/d/e";

/// Process configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_file: PathBuf,
    pub session_key: Option<String>,
    /// When set, the orchestrator relays over HTTP instead of in-process.
    pub relay_url: Option<String>,
    pub coupon: CouponConfig,
    /// None when the form id or a required entry id is missing.
    pub google_form: Option<GoogleFormConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponConfig {
    pub api_url: String,
    pub channel_id: String,
    pub program_id: String,
}

impl Default for CouponConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_COUPON_API_URL.to_string(),
            channel_id: "WEB".to_string(),
            program_id: "81".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleFormConfig {
    pub base_url: String,
    pub form_id: String,
    pub entries: FormEntryIds,
}

/// Google Form entry ids (the `N` in `entry.N`) per form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormEntryIds {
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub occupation: Option<String>,
    pub interests: Option<String>,
    pub age_group: Option<String>,
    pub pin_code: Option<String>,
    pub referred_by: Option<String>,
}

impl GoogleFormConfig {
    pub fn form_url(&self) -> String {
        format!(
            "{}/{}/formResponse",
            self.base_url.trim_end_matches('/'),
            self.form_id
        )
    }

    fn from_lookup(get: &impl Fn(&str) -> Option<String>) -> Option<Self> {
        let form_id = get("GOOGLE_FORM_ID")?;
        let name = get("GOOGLE_ENTRY_NAME")?;
        let mobile = get("GOOGLE_ENTRY_MOBILE")?;
        Some(Self {
            base_url: get("GOOGLE_FORM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GOOGLE_FORM_BASE_URL.to_string()),
            form_id,
            entries: FormEntryIds {
                name,
                mobile,
                email: get("GOOGLE_ENTRY_EMAIL"),
                occupation: get("GOOGLE_ENTRY_OCCUPATION"),
                interests: get("GOOGLE_ENTRY_INTERESTS"),
                age_group: get("GOOGLE_ENTRY_AGEGROUP"),
                pin_code: get("GOOGLE_ENTRY_PINCODE"),
                referred_by: get("GOOGLE_ENTRY_REFERRED_BY"),
            },
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let coupon_defaults = CouponConfig::default();
        Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            data_file: PathBuf::from(
                get("DATA_FILE").unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()),
            ),
            session_key: get("SESSION_KEY"),
            relay_url: get("RELAY_URL"),
            coupon: CouponConfig {
                api_url: get("COUPON_API_URL").unwrap_or(coupon_defaults.api_url),
                channel_id: get("COUPON_CHANNEL_ID").unwrap_or(coupon_defaults.channel_id),
                program_id: get("COUPON_PROGRAM_ID").unwrap_or(coupon_defaults.program_id),
            },
            google_form: GoogleFormConfig::from_lookup(&get),
        }
    }
}

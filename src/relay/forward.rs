use crate::best_effort::{self, SideEffect};
use crate::config::{FormEntryIds, GoogleFormConfig};
use crate::models::{FormData, UserEntry};

const FORWARD_LABEL: &str = "Google Form forward";

/// Posts accepted entries to the configured Google Form.
pub struct GoogleFormForwarder {
    client: reqwest::Client,
    config: GoogleFormConfig,
}

impl GoogleFormForwarder {
    /// `client` should not follow redirects: Google answers a good submission
    /// with a 302 and we only want to log it.
    pub fn new(client: reqwest::Client, config: GoogleFormConfig) -> Self {
        Self { client, config }
    }

    pub async fn forward(&self, entry: &UserEntry) -> SideEffect {
        let params = form_params(&self.config.entries, &entry.data);
        let result = self
            .client
            .post(self.config.form_url())
            .form(&params)
            .send()
            .await;

        match result {
            Ok(resp) => {
                let status = resp.status();
                log::info!("Google Forms submission status: {status}");
                if status.is_success() || status.is_redirection() {
                    best_effort::done(FORWARD_LABEL)
                } else {
                    best_effort::failed(FORWARD_LABEL, format!("status {status}"))
                }
            }
            Err(e) => best_effort::failed(FORWARD_LABEL, e),
        }
    }
}

/// `entry.<id>=value` pairs for every populated field that has an entry id.
/// Each interest gets its own pair, which is how checkbox questions are filled.
pub fn form_params(ids: &FormEntryIds, data: &FormData) -> Vec<(String, String)> {
    let mut params = vec![
        (entry_key(&ids.name), data.name.clone()),
        (entry_key(&ids.mobile), data.mobile.clone()),
    ];
    let optional = [
        (&ids.email, &data.email),
        (&ids.occupation, &data.occupation),
        (&ids.age_group, &data.age_group),
        (&ids.pin_code, &data.pin_code),
        (&ids.referred_by, &data.referred_by),
    ];
    for (id, value) in optional {
        if let Some(id) = id {
            if !value.is_empty() {
                params.push((entry_key(id), value.clone()));
            }
        }
    }
    if let Some(id) = &ids.interests {
        for interest in &data.interests {
            params.push((entry_key(id), interest.clone()));
        }
    }
    params
}

fn entry_key(id: &str) -> String {
    format!("entry.{id}")
}

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::FormData;

/// The stored record of one accepted submission. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntry {
    pub id: String,
    #[serde(flatten)]
    pub data: FormData,
    pub timestamp: DateTime<Utc>,
}

impl UserEntry {
    pub fn new(data: FormData) -> Self {
        Self {
            id: generate_entry_id(),
            data,
            timestamp: Utc::now(),
        }
    }
}

/// Random 16-char hex identifier.
fn generate_entry_id() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 8] = rng.random();
    hex::encode(bytes)
}

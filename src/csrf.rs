//! Form token for the signup page.
//!
//! The token lives in the cookie session and is echoed back as the hidden
//! `csrf_token` input. A successful signup rotates it, so replaying the same
//! post (back button, double click that slipped through) is refused.

use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const SESSION_KEY: &str = "signup_form_token";

/// The session's current form token, minting one on first use.
pub fn form_token(session: &Session) -> String {
    match session.get::<String>(SESSION_KEY) {
        Ok(Some(token)) if !token.is_empty() => token,
        _ => rotate(session),
    }
}

/// Replace the session's token with a fresh one and return it.
pub fn rotate(session: &Session) -> String {
    let token = new_token();
    if let Err(e) = session.insert(SESSION_KEY, &token) {
        log::error!("Could not store form token in session: {e}");
    }
    token
}

/// Check a posted token against the session.
pub fn verify(session: &Session, submitted: &str) -> Result<(), AppError> {
    let stored = session.get::<String>(SESSION_KEY).ok().flatten();
    match stored {
        Some(stored) if !stored.is_empty() && tokens_match(&stored, submitted) => Ok(()),
        Some(_) => {
            log::warn!("Signup post carried a stale or forged form token");
            Err(AppError::Csrf)
        }
        None => {
            log::warn!("Signup post without a session form token");
            Err(AppError::Csrf)
        }
    }
}

fn new_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

/// Compares every byte regardless of where the first mismatch is.
fn tokens_match(stored: &str, submitted: &str) -> bool {
    stored.len() == submitted.len()
        && stored
            .bytes()
            .zip(submitted.bytes())
            .map(|(a, b)| a ^ b)
            .fold(0, |acc, diff| acc | diff)
            == 0
}

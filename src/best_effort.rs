//! Fire-and-forget side effects with a logged outcome.
//!
//! The local snapshot write and the Google Form forward run under this policy:
//! whatever happens is logged and reported back as a [`SideEffect`], and never
//! turns into an error for the caller.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    Done,
    Skipped(String),
    Failed(String),
}

impl SideEffect {
    pub fn is_done(&self) -> bool {
        matches!(self, SideEffect::Done)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, SideEffect::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SideEffect::Failed(_))
    }
}

pub fn done(label: &str) -> SideEffect {
    log::info!("{label}: done");
    SideEffect::Done
}

pub fn skipped(label: &str, reason: impl Into<String>) -> SideEffect {
    let reason = reason.into();
    log::info!("{label}: skipped ({reason})");
    SideEffect::Skipped(reason)
}

pub fn failed(label: &str, reason: impl fmt::Display) -> SideEffect {
    let reason = reason.to_string();
    log::warn!("{label} failed (non-critical): {reason}");
    SideEffect::Failed(reason)
}

pub fn from_result<E: fmt::Display>(label: &str, result: Result<(), E>) -> SideEffect {
    match result {
        Ok(()) => done(label),
        Err(e) => failed(label, e),
    }
}

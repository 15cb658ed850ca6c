use crate::errors::SubmitError;
use crate::models::form_data::{INTEREST_OPTIONS, OTHER_INTEREST};
use crate::models::{Field, FormData, FormErrors, SubmissionDraft};

use super::validate::validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Editing,
    Submitting,
    /// Terminal. The confirmation view is shown and further input is ignored.
    Submitted,
}

/// Why `begin_submit` refused to start a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    Invalid,
    InFlight,
    AlreadySubmitted,
}

/// Field values, the derived error map, and the submit state machine.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    data: FormData,
    errors: FormErrors,
    other_interest: String,
    state: FormState,
    alert: Option<String>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load values without raising errors for fields the user has not touched.
    pub fn prefill(&mut self, data: FormData, other_interest: &str) {
        if self.state == FormState::Submitted {
            return;
        }
        let interests = data.interests.clone();
        self.data = FormData { interests: Vec::new(), ..data };
        for interest in &interests {
            self.select_interest(interest, true);
        }
        self.set_other_interest(other_interest);
    }

    /// Apply a text input change and merge that field's error.
    pub fn set_field(&mut self, field: Field, value: &str) {
        if self.state == FormState::Submitted {
            return;
        }
        let Some(slot) = self.data.text_mut(field) else {
            log::debug!("Ignoring text input for {field}");
            return;
        };
        *slot = value.to_string();
        self.errors.set(field, validate(field, value));
    }

    /// Tick or untick an interest. Options outside the picker are ignored.
    pub fn select_interest(&mut self, option: &str, selected: bool) {
        if self.state == FormState::Submitted {
            return;
        }
        if !INTEREST_OPTIONS.contains(&option) {
            log::debug!("Ignoring unknown interest option {option:?}");
            return;
        }
        if selected {
            self.data.add_interest(option);
        } else {
            self.data.remove_interest(option);
            if option == OTHER_INTEREST {
                self.other_interest.clear();
            }
        }
        self.errors.set(Field::Interests, validate(Field::Interests, option));
    }

    /// Free text for the "Other" interest. Not validated.
    pub fn set_other_interest(&mut self, value: &str) {
        if self.state == FormState::Submitted {
            return;
        }
        self.other_interest = value.to_string();
    }

    pub fn other_selected(&self) -> bool {
        self.data.has_interest(OTHER_INTEREST)
    }

    /// Required fields are filled and valid, and no field holds an error.
    pub fn is_valid(&self) -> bool {
        let required_ok = [Field::Name, Field::Mobile].into_iter().all(|field| {
            let value = self.data.text(field);
            !value.trim().is_empty() && validate(field, value).is_none()
        });
        required_ok && self.errors.is_empty()
    }

    /// Submit attempt. Revalidates every field; on success moves to Submitting
    /// and returns what the orchestrator needs.
    pub fn begin_submit(&mut self) -> Result<SubmissionDraft, SubmitBlocked> {
        match self.state {
            FormState::Submitting => return Err(SubmitBlocked::InFlight),
            FormState::Submitted => return Err(SubmitBlocked::AlreadySubmitted),
            FormState::Editing => {}
        }
        for field in Field::ALL {
            let message = validate(field, self.data.text(field));
            self.errors.set(field, message);
        }
        if !self.is_valid() {
            return Err(SubmitBlocked::Invalid);
        }
        self.alert = None;
        self.state = FormState::Submitting;
        let other_interest = if self.other_selected() {
            self.other_interest.clone()
        } else {
            String::new()
        };
        Ok(SubmissionDraft {
            form: self.data.clone(),
            other_interest,
        })
    }

    /// Finish an in-flight submission.
    pub fn complete<T>(&mut self, result: &Result<T, SubmitError>) {
        if self.state != FormState::Submitting {
            return;
        }
        match result {
            Ok(_) => self.state = FormState::Submitted,
            Err(e) => {
                self.alert = Some(e.alert());
                self.state = FormState::Editing;
            }
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn other_interest(&self) -> &str {
        &self.other_interest
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }
}

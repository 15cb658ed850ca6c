use crate::models::Field;

pub const NAME_REQUIRED: &str = "Full Name is required";
pub const NAME_FORMAT: &str = "Full Name can only contain letters and spaces";
pub const MOBILE_REQUIRED: &str = "Mobile number is required";
pub const MOBILE_FORMAT: &str = "Enter valid 10-digit mobile number starting with 6-9";
pub const EMAIL_FORMAT: &str = "Enter a valid email address";
pub const PIN_CODE_FORMAT: &str = "Enter a valid 6-digit PIN code";

/// Validate one form field. Returns the message to show under the input, or None.
pub fn validate(field: Field, value: &str) -> Option<String> {
    match field {
        Field::Name => validate_name(value),
        Field::Mobile => validate_mobile(value),
        Field::Email => validate_email(value),
        Field::PinCode => validate_pin_code(value),
        Field::ReferredBy => validate_referred_by(value),
        Field::Interests | Field::AgeGroup | Field::Occupation => None,
    }
}

/// Validate a full name: required, letters and whitespace only.
pub fn validate_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some(NAME_REQUIRED.to_string());
    }
    if !name.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        return Some(NAME_FORMAT.to_string());
    }
    None
}

/// Validate the submitter's mobile number: required, Indian 10-digit format.
pub fn validate_mobile(mobile: &str) -> Option<String> {
    if mobile.is_empty() {
        return Some(MOBILE_REQUIRED.to_string());
    }
    if !is_valid_mobile(mobile) {
        return Some(MOBILE_FORMAT.to_string());
    }
    None
}

/// Validate an optional email (empty is OK).
pub fn validate_email(email: &str) -> Option<String> {
    if !email.is_empty() && !is_valid_email(email) {
        return Some(EMAIL_FORMAT.to_string());
    }
    None
}

/// Validate an optional PIN code (empty is OK).
pub fn validate_pin_code(pin_code: &str) -> Option<String> {
    if !pin_code.is_empty() && !is_valid_pin_code(pin_code) {
        return Some(PIN_CODE_FORMAT.to_string());
    }
    None
}

/// Validate an optional referrer mobile number (empty is OK).
pub fn validate_referred_by(referred_by: &str) -> Option<String> {
    if !referred_by.is_empty() && !is_valid_mobile(referred_by) {
        return Some(MOBILE_FORMAT.to_string());
    }
    None
}

/// Exactly 10 ASCII digits, the first one 6-9.
pub fn is_valid_mobile(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().all(u8::is_ascii_digit)
        && matches!(bytes[0], b'6'..=b'9')
}

/// Exactly 6 ASCII digits.
pub fn is_valid_pin_code(value: &str) -> bool {
    value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Loose `local@domain.tld` shape: no whitespace, one '@', a non-empty local
/// part, and a '.' inside the domain that is neither its first nor last char.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Options offered by the interests picker, in display order.
pub const INTEREST_OPTIONS: [&str; 4] = ["Desktop & Laptops", "Printers", "Accessories", "Other"];

/// The interest option that reveals a free-text input.
pub const OTHER_INTEREST: &str = "Other";

pub const AGE_GROUPS: [&str; 5] = ["0-12", "12-18", "18-35", "35-60", "60+"];

/// A field of the signup form. Serialized with the same camelCase names the
/// HTML inputs and JSON payloads use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Mobile,
    Email,
    Interests,
    AgeGroup,
    Occupation,
    PinCode,
    ReferredBy,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Mobile,
        Field::Email,
        Field::Interests,
        Field::AgeGroup,
        Field::Occupation,
        Field::PinCode,
        Field::ReferredBy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Mobile => "mobile",
            Field::Email => "email",
            Field::Interests => "interests",
            Field::AgeGroup => "ageGroup",
            Field::Occupation => "occupation",
            Field::PinCode => "pinCode",
            Field::ReferredBy => "referredBy",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact and demographic details captured by the signup form.
///
/// On the JSON wire `interests` may be a single string (single-select) or an
/// array, and `null` text fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub mobile: String,
    #[serde(deserialize_with = "text")]
    pub email: String,
    #[serde(deserialize_with = "one_or_many")]
    pub interests: Vec<String>,
    #[serde(deserialize_with = "text")]
    pub age_group: String,
    #[serde(deserialize_with = "text")]
    pub occupation: String,
    #[serde(deserialize_with = "text")]
    pub pin_code: String,
    #[serde(deserialize_with = "text")]
    pub referred_by: String,
}

impl FormData {
    /// Raw value of a text field. Interests are not a text field and read as "".
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Mobile => &self.mobile,
            Field::Email => &self.email,
            Field::AgeGroup => &self.age_group,
            Field::Occupation => &self.occupation,
            Field::PinCode => &self.pin_code,
            Field::ReferredBy => &self.referred_by,
            Field::Interests => "",
        }
    }

    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Mobile => Some(&mut self.mobile),
            Field::Email => Some(&mut self.email),
            Field::AgeGroup => Some(&mut self.age_group),
            Field::Occupation => Some(&mut self.occupation),
            Field::PinCode => Some(&mut self.pin_code),
            Field::ReferredBy => Some(&mut self.referred_by),
            Field::Interests => None,
        }
    }

    pub fn has_interest(&self, interest: &str) -> bool {
        self.interests.iter().any(|i| i == interest)
    }

    /// Add an interest, keeping selection order and ignoring duplicates.
    pub fn add_interest(&mut self, interest: &str) {
        let interest = interest.trim();
        if !interest.is_empty() && !self.has_interest(interest) {
            self.interests.push(interest.to_string());
        }
    }

    pub fn remove_interest(&mut self, interest: &str) {
        self.interests.retain(|i| i != interest);
    }
}

/// Per-field error messages. An absent field is a valid field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<Field, String>);

impl FormErrors {
    /// Merge the result of validating one field.
    pub fn set(&mut self, field: Field, message: Option<String>) {
        match message {
            Some(msg) => {
                self.0.insert(field, msg);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// What the form hands to the orchestrator: the selections as made plus the
/// free text typed for "Other".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub form: FormData,
    pub other_interest: String,
}

/// Trim, drop blanks, and remove duplicates while keeping the first occurrence.
pub fn normalize_interests(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let trimmed = item.trim();
        if !trimmed.is_empty() && !out.iter().any(|i| i == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}

/// A JSON scalar read as text. Numbers and booleans keep their JSON spelling,
/// so `"mobile": 9876543210` reads the same as `"mobile": "9876543210"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        }
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_text)
        .unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Scalar),
    Many(Vec<Option<Scalar>>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let items = match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s.into_text()],
        // null elements are dropped
        Some(OneOrMany::Many(v)) => v.into_iter().flatten().map(Scalar::into_text).collect(),
    };
    Ok(normalize_interests(items))
}

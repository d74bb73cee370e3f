use serde::Deserialize;
use validator::Validate;

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

/// Canonical form used for storing and comparing emails.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn deserialize_normalized_email<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_email(&raw))
}

//! Field rules shared by the request DTOs.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use brainbox_core::error::AppError;

/// Symbols a password may (and must at least once) contain.
pub const PASSWORD_SYMBOLS: &str = "!&$@#%()*+-/<=>?_^~";

/// Minimum password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Password strength rule used for registration and account creation.
///
/// At least eight characters with a lowercase letter, an uppercase letter,
/// a digit and a symbol from [`PASSWORD_SYMBOLS`]; nothing else allowed.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let is_symbol = |c: char| PASSWORD_SYMBOLS.contains(c);

    let message = if password.chars().count() < PASSWORD_MIN_LENGTH {
        "Password must be at least 8 characters long"
    } else if let Some(bad) = password
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !is_symbol(*c))
    {
        return Err(weak_password(format!(
            "Password may not contain '{bad}'; use letters, digits and {PASSWORD_SYMBOLS}"
        )));
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        "Password must contain at least one lowercase letter"
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        "Password must contain at least one uppercase letter"
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        "Password must contain at least one digit"
    } else if !password.chars().any(is_symbol) {
        "Password must contain at least one symbol from !&$@#%()*+-/<=>?_^~"
    } else {
        return Ok(());
    };

    Err(weak_password(message))
}

fn weak_password(message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new("weak_password").with_message(message.into())
}

/// Convert validator output into a `Validation` error whose details hold
/// the per-field messages, shaped like the backend's own field errors.
pub fn into_app_error(errors: ValidationErrors) -> AppError {
    let mut fields = serde_json::Map::new();
    for (field, errs) in errors.field_errors() {
        let messages: Vec<serde_json::Value> = errs
            .iter()
            .map(|e| {
                let text = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                serde_json::Value::String(text)
            })
            .collect();
        fields.insert(field.to_string(), serde_json::Value::Array(messages));
    }

    AppError::validation("Request failed validation").with_details(serde_json::Value::Object(fields))
}

/// Validate a DTO, mapping failures through [`into_app_error`].
pub fn check(dto: &impl Validate) -> Result<(), AppError> {
    dto.validate().map_err(into_app_error)
}

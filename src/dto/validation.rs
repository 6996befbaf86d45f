//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates a string-encoded question count.
///
/// Only the shape is checked; whether the trivia service accepts the value is its call.
/// An empty value is accepted (the default amount is substituted later).
///
/// # Examples
///
/// ```ignore
/// validate_amount("10")  // Ok
/// validate_amount("")    // Ok - default applies
/// validate_amount("500") // Ok - forwarded as-is
/// validate_amount("ten") // Err - not a number
/// ```
pub fn validate_amount(raw: &str) -> Result<(), ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    if trimmed.parse::<u32>().is_err() {
        let mut err = ValidationError::new("amount_format");
        err.message = Some(format!("amount must be a whole number (got `{raw}`)").into());
        return Err(err);
    }

    Ok(())
}

/// Rejects empty or whitespace-only strings.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("value must not be blank".into());
        return Err(err);
    }
    Ok(())
}

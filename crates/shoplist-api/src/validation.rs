//! Input validation shared by the service and the in-memory backend

use crate::error::{ApiResult, ValidationError};

/// Trimmed list name, or `BlankListName`
pub fn list_name(raw: &str) -> ApiResult<String> {
    non_blank(raw, ValidationError::BlankListName)
}

/// Trimmed item name, or `BlankItemName`
pub fn item_name(raw: &str) -> ApiResult<String> {
    non_blank(raw, ValidationError::BlankItemName)
}

fn non_blank(raw: &str, err: ValidationError) -> ApiResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(err.into());
    }
    Ok(trimmed.to_string())
}

/// Trimmed email address
///
/// Accepts `local@domain.tld`: exactly one `@`, no whitespace, and a domain
/// of at least two dot-separated labels, none of them empty.
pub fn email(raw: &str) -> ApiResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmailRequired.into());
    }

    let invalid = || ValidationError::EmailInvalid(trimmed.to_string());
    if trimmed.chars().any(char::is_whitespace) {
        return Err(invalid().into());
    }
    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid().into());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid().into());
    }
    Ok(trimmed.to_string())
}

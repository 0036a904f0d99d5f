//! Broadcast group label validation.
//!
//! Target groups are named by the convention `"Grupo <n>"` (e.g.
//! `"Grupo 3"`). The workflow engine resolves the label to a contact
//! sheet, so anything that does not match the convention is rejected
//! before the submission leaves this server.

use crate::error::CoreError;

/// Required label prefix, including the trailing space.
const GROUP_PREFIX: &str = "Grupo ";

/// Validate a group label and return it trimmed.
///
/// Accepts `"Grupo " + one-or-more digits` after trimming surrounding
/// whitespace; the prefix is case-sensitive. Everything else fails with
/// a `Validation` error carrying a human-readable reason.
pub fn validate_group(raw: &str) -> Result<&str, CoreError> {
    let group = raw.trim();

    if group.is_empty() {
        return Err(CoreError::Validation(
            "Group is required and must not be empty".to_string(),
        ));
    }

    let digits = group.strip_prefix(GROUP_PREFIX).ok_or_else(|| {
        CoreError::Validation(format!(
            "Group '{group}' is invalid: expected the form 'Grupo <number>'"
        ))
    })?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "Group '{group}' is invalid: expected the form 'Grupo <number>'"
        )));
    }

    Ok(group)
}

//! Input validation shared by the write endpoints.
//!
//! Failures are `Error::InvalidInput` with a message naming the field, which
//! the API surfaces as 400.

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::uuid_utils::parse_id;

/// Require a text field to be present and not blank.
///
/// Returns the value unchanged (no trimming) when it passes.
pub fn require_non_empty(field: &str, value: Option<&str>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => {
            reject_nul(field, Some(v))?;
            Ok(v.to_string())
        }
        _ => Err(Error::InvalidInput(format!(
            "Missing `{}` in request body",
            field
        ))),
    }
}

/// Reject text the store cannot hold. PostgreSQL `text` has no NUL.
pub fn reject_nul(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if v.contains('\0') => Err(Error::InvalidInput(format!(
            "The `{}` must not contain NUL characters",
            field
        ))),
        _ => Ok(()),
    }
}

/// Validate an optional reference to another entity.
///
/// Absent and empty values mean "no reference". Anything else must be a
/// syntactically valid id; existence of the target is not checked.
pub fn validate_reference_id(field: &str, value: Option<&str>) -> Result<Option<Uuid>> {
    match value {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) => parse_id(v)
            .map(Some)
            .ok_or_else(|| Error::InvalidInput(format!("The `{}` is not valid", field))),
    }
}

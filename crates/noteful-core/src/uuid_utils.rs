//! Identifier utilities.
//!
//! Folders and notes are keyed by UUIDv7, which embeds a millisecond Unix
//! timestamp in its first 48 bits so ids sort by creation time.

use uuid::Uuid;

/// Generate a new UUIDv7 identifier.
///
/// # Example
///
/// ```
/// use noteful_core::uuid_utils::{is_v7, new_v7};
///
/// assert!(is_v7(&new_v7()));
/// ```
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

/// Check if a UUID is version 7.
#[inline]
pub fn is_v7(uuid: &Uuid) -> bool {
    uuid.get_version_num() == 7
}

/// Parse a client-supplied identifier.
///
/// Returns `None` when the input is not a syntactically valid UUID. Only the
/// format is checked; whether anything exists under the id is up to the caller.
///
/// ```
/// use noteful_core::uuid_utils::parse_id;
///
/// assert!(parse_id("0190a3c4-7b1e-7cc1-9e2b-5d4c3b2a1f00").is_some());
/// assert!(parse_id("000000000000000000000099").is_none());
/// ```
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

//! Point identifiers and their metadata store key form.
//!
//! Identifiers are positive integers appended to question lines
//! (`What is 2+2?? 17`). The store keys records by the decimal string.

/// Identifier of a point, unique across the whole corpus and the store.
pub type PointId = u64;

/// Parse a metadata store key back into an identifier.
///
/// Only canonical decimal forms are accepted: no sign, no leading zeros, and
/// never zero. Anything else would not survive a write/read cycle unchanged.
#[must_use]
pub fn parse_store_key(key: &str) -> Option<PointId> {
    parse_canonical(key)
}

/// Parse a canonical positive decimal identifier.
#[must_use]
pub fn parse_canonical(digits: &str) -> Option<PointId> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.starts_with('0') {
        return None;
    }
    digits.parse::<PointId>().ok()
}

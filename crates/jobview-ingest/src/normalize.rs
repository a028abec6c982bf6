//! Column header normalization

/// Reduce a column header to its lookup key: trimmed, spaces removed, lowercased.
///
/// Two columns from different sheets are the same field iff their keys are equal.
pub fn normalize_key(header: &str) -> String {
    header.trim().replace(' ', "").to_lowercase()
}

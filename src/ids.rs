//! Notion identifier normalization.

use crate::error::{McpError, Result};

/// Normalize a Notion identifier to its dashed, lowercase form.
///
/// Accepts 32 hex characters with any dash placement, any case, and
/// surrounding whitespace or quotes. Returns
/// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`, or [`McpError::InvalidId`] naming
/// the original input.
pub fn normalize_id(raw: &str) -> Result<String> {
    let hex: String = raw
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace())
        .chars()
        .filter(|c| *c != '-')
        .collect();

    if hex.len() != 32 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(McpError::InvalidId(raw.to_string()));
    }

    let hex = hex.to_ascii_lowercase();
    Ok(format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    ))
}

use crate::types::Result;
use anyhow::anyhow;

/// Split a `key=value` CLI argument into its parts.
pub fn parse_var(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(anyhow!("expected KEY=VALUE, got '{raw}'")),
    }
}

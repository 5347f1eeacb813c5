use std::fs;
use std::path::Path;

use anyhow::Context;
use domain::session::Message;
use shared::types::Result;

/// Load a saved transcript; a missing file is an empty history.
pub fn load_history(path: &Path) -> Result<Vec<Message>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read chat history from {:?}", path))?;
    let history = serde_json::from_str(&data)
        .with_context(|| format!("chat history at {:?} is not valid JSON", path))?;
    Ok(history)
}

pub fn save_history(path: &Path, history: &[Message]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let serialized = serde_json::to_string_pretty(history)?;
    fs::write(path, serialized)
        .with_context(|| format!("failed to write chat history to {:?}", path))?;
    Ok(())
}

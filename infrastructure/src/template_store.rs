use std::fs;
use std::path::Path;

use anyhow::Context;
use domain::prompt::PromptTemplate;
use shared::types::Result;

/// Save a template as pretty JSON, creating parent directories as needed.
pub fn save_prompt(path: &Path, template: &PromptTemplate) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let serialized = serde_json::to_string_pretty(template)?;
    fs::write(path, serialized).with_context(|| format!("failed to write template to {:?}", path))?;
    Ok(())
}

/// Load a template from JSON and validate it before use.
pub fn load_prompt(path: &Path) -> Result<PromptTemplate> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read template from {:?}", path))?;
    let template: PromptTemplate = serde_json::from_str(&data)
        .with_context(|| format!("template at {:?} is not valid JSON", path))?;
    template.validate()?;
    Ok(template)
}

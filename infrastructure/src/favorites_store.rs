use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use shared::types::Result;

/// Persisted set of favorite recipe ids, stored as a sorted JSON array.
pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<HashSet<u32>> {
        if !self.path.exists() {
            return Ok(HashSet::new());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read favorites from {:?}", self.path))?;
        Ok(serde_json::from_str(&data).unwrap_or_default())
    }

    pub fn save(&self, favorites: &HashSet<u32>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut ids: Vec<u32> = favorites.iter().copied().collect();
        ids.sort_unstable();
        fs::write(&self.path, serde_json::to_string_pretty(&ids)?)
            .with_context(|| format!("failed to write favorites to {:?}", self.path))?;
        Ok(())
    }
}

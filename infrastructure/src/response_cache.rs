use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shared::types::Result;

// Cache entries expire after 7 days.
const CACHE_TTL_SECONDS: u64 = 604_800;

// Token-overlap threshold for treating two prompts as the same question.
const SIMILARITY_THRESHOLD: f64 = 0.7;

#[derive(Serialize, Deserialize, Default)]
struct CacheFile {
    entries: Vec<CacheEntry>,
}

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    prompt: String,
    answer: String,
    timestamp: u64,
}

/// Prompt-to-answer cache for one-shot questions. Expired entries are pruned
/// on read; lookups try an exact prompt match first, then token overlap.
pub struct ResponseCache {
    path: PathBuf,
}

impl ResponseCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn lookup(&self, prompt: &str) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read cache file at {:?}", self.path))?;
        let mut cache: CacheFile = serde_json::from_str(&data).unwrap_or_default();

        let before = cache.entries.len();
        let now = unix_now();
        cache
            .entries
            .retain(|entry| now.saturating_sub(entry.timestamp) < CACHE_TTL_SECONDS);
        if cache.entries.len() != before {
            self.write(&cache)?;
        }

        for entry in &cache.entries {
            if entry.prompt == prompt {
                return Ok(Some(entry.answer.clone()));
            }
        }

        let mut best: Option<&CacheEntry> = None;
        let mut best_similarity = 0.0;
        for entry in &cache.entries {
            let similarity = prompt_similarity(prompt, &entry.prompt);
            if similarity > best_similarity && similarity >= SIMILARITY_THRESHOLD {
                best_similarity = similarity;
                best = Some(entry);
            }
        }
        Ok(best.map(|entry| entry.answer.clone()))
    }

    pub fn store(&self, prompt: &str, answer: &str) -> Result<()> {
        let mut cache = if self.path.exists() {
            let data = fs::read_to_string(&self.path).unwrap_or_default();
            serde_json::from_str::<CacheFile>(&data).unwrap_or_default()
        } else {
            CacheFile::default()
        };
        cache.entries.push(CacheEntry {
            prompt: prompt.to_string(),
            answer: answer.to_string(),
            timestamp: unix_now(),
        });
        self.write(&cache)
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn write(&self, cache: &CacheFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(cache)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Lowercase, strip punctuation, collapse whitespace.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Jaccard overlap of the normalized token sets.
fn prompt_similarity(a: &str, b: &str) -> f64 {
    let norm_a = normalize(a);
    let norm_b = normalize(b);
    if norm_a == norm_b {
        return 1.0;
    }

    let words_a: HashSet<&str> = norm_a.split_whitespace().collect();
    let words_b: HashSet<&str> = norm_b.split_whitespace().collect();
    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_punctuation_and_case() {
        assert_eq!(normalize("  List   ALL files?! "), "list all files");
    }

    #[test]
    fn similarity_ranges_from_disjoint_to_identical() {
        assert_eq!(prompt_similarity("list files", "List FILES."), 1.0);
        assert_eq!(prompt_similarity("alpha beta", "gamma delta"), 0.0);
        let partial = prompt_similarity("show disk usage", "show disk space");
        assert!(partial > 0.0 && partial < 1.0);
    }

    #[test]
    fn store_then_lookup_round_trips() {
        let mut path = std::env::temp_dir();
        path.push(format!("sage_cli_cache_test_{}.json", std::process::id()));
        let cache = ResponseCache::new(path.clone());
        cache.clear().unwrap();

        assert!(cache.lookup("what is cosine similarity").unwrap().is_none());
        cache
            .store("what is cosine similarity", "a direction-only measure")
            .unwrap();
        assert_eq!(
            cache.lookup("what is cosine similarity").unwrap().as_deref(),
            Some("a direction-only measure")
        );
        // Near-identical phrasing hits through token overlap.
        assert_eq!(
            cache
                .lookup("What is cosine similarity?")
                .unwrap()
                .as_deref(),
            Some("a direction-only measure")
        );

        cache.clear().unwrap();
        assert!(!path.exists());
    }
}

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Runtime configuration, read once from the environment (with `.env` support).
#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_base_url: String,
    pub chat_model: String,
    pub embed_model: String,
    pub system_prompt: String,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();
        Self {
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            chat_model: env::var("SAGE_CHAT_MODEL")
                .unwrap_or_else(|_| "qwen2.5:1.5b-instruct".to_string()),
            embed_model: env::var("SAGE_EMBED_MODEL")
                .unwrap_or_else(|_| "nomic-embed-text".to_string()),
            system_prompt: env::var("SAGE_SYSTEM_PROMPT")
                .unwrap_or_else(|_| "You are a helpful assistant.".to_string()),
            data_dir: env::var("SAGE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_data_dir()),
        }
    }

    pub fn cache_path(&self) -> PathBuf {
        self.data_dir.join("cache.json")
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history.json")
    }

    pub fn favorites_path(&self) -> PathBuf {
        self.data_dir.join("favorites.json")
    }
}

fn default_data_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(home);
    path.push(".local");
    path.push("share");
    path.push("sage_cli");
    path
}

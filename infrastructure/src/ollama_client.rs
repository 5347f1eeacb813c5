use std::sync::Arc;

use anyhow::anyhow;
use domain::session::Message;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::types::Result;

use crate::config::Config;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Message,
    #[serde(default)]
    done: bool,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Thin client for a local Ollama server: chat completions and embeddings.
#[derive(Clone)]
pub struct OllamaClient {
    client: Arc<Client>,
    base_url: String,
    chat_model: String,
    embed_model: String,
}

impl OllamaClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: config.ollama_base_url.clone(),
            chat_model: config.chat_model.clone(),
            embed_model: config.embed_model.clone(),
        }
    }

    /// Send a full message history and return the assistant's reply.
    pub async fn chat(&self, messages: &[Message]) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: &self.chat_model,
            messages,
            stream: false,
        };
        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(anyhow!("Ollama chat request failed ({status}): {body}"));
        }

        // The server answers with one JSON object, or NDJSON lines when it
        // streams anyway.
        let mut content = String::new();
        for line in body.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Ok(chunk) = serde_json::from_str::<ChatResponse>(line) {
                content.push_str(&chunk.message.content);
                if chunk.done {
                    break;
                }
            }
        }
        if content.is_empty() {
            if let Ok(single) = serde_json::from_str::<ChatResponse>(&body) {
                content = single.message.content;
            }
        }

        let content = content.trim();
        if content.is_empty() {
            return Err(anyhow!("Ollama returned no assistant message: {body}"));
        }
        Ok(content.to_string())
    }

    /// Embed one text with the configured embedding model.
    pub async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: &self.embed_model,
            prompt: text,
        };
        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(anyhow!("Ollama embedding request failed ({status}): {body}"));
        }
        let embedding_response: EmbeddingResponse = response.json().await?;
        if embedding_response.embedding.is_empty() {
            return Err(anyhow!(
                "embedding model '{}' returned an empty vector",
                self.embed_model
            ));
        }
        Ok(embedding_response.embedding)
    }
}

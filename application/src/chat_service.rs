use std::collections::HashMap;
use std::path::PathBuf;

use domain::prompt::{self, ChatPromptTemplate};
use domain::session::{Message, Role};
use infrastructure::config::Config;
use infrastructure::history_store;
use infrastructure::ollama_client::OllamaClient;
use shared::types::Result;

/// Drives chat turns: prompt assembly around the running history, the model
/// call, and history persistence between runs.
pub struct ChatService {
    client: OllamaClient,
    prompt: ChatPromptTemplate,
    history_path: PathBuf,
}

impl ChatService {
    pub fn new(client: OllamaClient, config: &Config, history_path: Option<PathBuf>) -> Self {
        Self {
            client,
            prompt: prompt::chat_prompt(&config.system_prompt),
            history_path: history_path.unwrap_or_else(|| config.history_path()),
        }
    }

    /// Saved transcript from previous runs; empty when none exists.
    pub fn load_history(&self) -> Result<Vec<Message>> {
        history_store::load_history(&self.history_path)
    }

    pub fn save_history(&self, history: &[Message]) -> Result<()> {
        history_store::save_history(&self.history_path, history)
    }

    /// One turn: render the chat prompt with the history spliced in, ask the
    /// model, then append both sides to the history.
    pub async fn turn(&self, history: &mut Vec<Message>, input: &str) -> Result<String> {
        let mut values = HashMap::new();
        values.insert("query".to_string(), input.to_string());
        let mut histories = HashMap::new();
        histories.insert("chat_history".to_string(), history.clone());

        let messages = self.prompt.render(&values, &histories)?;
        let reply = self.client.chat(&messages).await?;

        history.push(Message::new(Role::User, input));
        history.push(Message::new(Role::Assistant, reply.clone()));
        Ok(reply)
    }
}

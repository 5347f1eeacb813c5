use std::collections::HashMap;

use domain::prompt::PromptTemplate;
use domain::session::{Message, Role};
use infrastructure::ollama_client::OllamaClient;
use shared::types::Result;

/// Renders a prompt template and sends the result to the chat model as a
/// single user message.
pub struct SummarizeService {
    client: OllamaClient,
}

impl SummarizeService {
    pub fn new(client: OllamaClient) -> Self {
        Self { client }
    }

    pub async fn run(
        &self,
        template: &PromptTemplate,
        values: &HashMap<String, String>,
    ) -> Result<String> {
        let prompt = template.render(values)?;
        let messages = vec![Message::new(Role::User, prompt)];
        self.client.chat(&messages).await
    }
}

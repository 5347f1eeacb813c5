use domain::models::DocumentEmbedding;
use futures::stream::{self, StreamExt};
use shared::types::Result;

use crate::ollama_client::OllamaClient;

const BATCH_SIZE: usize = 32;
const CONCURRENT_REQUESTS: usize = 8;

/// Turns document sets and queries into embedding vectors via the Ollama API.
/// Output order always matches input order: a vector's position is the
/// document's index.
pub struct Embedder {
    client: OllamaClient,
}

impl Embedder {
    pub fn new(client: OllamaClient) -> Self {
        Self { client }
    }

    pub async fn embed_documents(&self, documents: &[String]) -> Result<Vec<DocumentEmbedding>> {
        let mut embeddings = Vec::with_capacity(documents.len());
        for batch in documents.chunks(BATCH_SIZE) {
            let offset = embeddings.len();
            let batch_embeddings = self.embed_batch(batch, offset).await?;
            embeddings.extend(batch_embeddings);
        }
        Ok(embeddings)
    }

    pub async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        self.client.generate_embedding(query).await
    }

    async fn embed_batch(&self, batch: &[String], offset: usize) -> Result<Vec<DocumentEmbedding>> {
        let futures: Vec<_> = batch
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let client = &self.client;
                async move {
                    let vector = client.generate_embedding(text).await?;
                    Ok::<_, anyhow::Error>(DocumentEmbedding {
                        index: offset + i,
                        text: text.clone(),
                        vector,
                    })
                }
            })
            .collect();

        // buffered, not buffer_unordered: positions are document indexes.
        let results = stream::iter(futures)
            .buffered(CONCURRENT_REQUESTS)
            .collect::<Vec<_>>()
            .await;

        results.into_iter().collect()
    }
}

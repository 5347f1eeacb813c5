use anyhow::Context;
use domain::models::{BestMatch, DocumentEmbedding};
use domain::similarity::{self, RankedMatch};
use infrastructure::embedder::Embedder;
use serde::Serialize;
use shared::telemetry::Stopwatch;
use shared::types::Result;

/// Outcome of a similarity search: the winner plus the full ranking.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityReport {
    pub query: String,
    pub best: BestMatch,
    pub ranking: Vec<BestMatch>,
}

/// Embeds a document set and a query, then ranks the documents by cosine
/// similarity. Vectors live in memory for the duration of the call only.
pub struct SimilarityService {
    embedder: Embedder,
}

impl SimilarityService {
    pub fn new(embedder: Embedder) -> Self {
        Self { embedder }
    }

    pub async fn search(&self, documents: &[String], query: &str) -> Result<SimilarityReport> {
        let watch = Stopwatch::start();
        eprintln!("Embedding {} documents...", documents.len());
        let embedded = self.embedder.embed_documents(documents).await?;
        let query_vector = self.embedder.embed_query(query).await?;
        eprintln!("Embeddings ready in {}", watch.summary());

        let vectors: Vec<Vec<f32>> = embedded.iter().map(|d| d.vector.clone()).collect();
        let ranking = similarity::rank(&query_vector, &vectors)
            .context("ranking documents against the query")?;

        let ranking: Vec<BestMatch> = ranking
            .into_iter()
            .map(|m| to_best_match(&embedded, m))
            .collect();
        let best = ranking
            .first()
            .cloned()
            .context("ranking produced no results")?;

        Ok(SimilarityReport {
            query: query.to_string(),
            best,
            ranking,
        })
    }
}

fn to_best_match(embedded: &[DocumentEmbedding], m: RankedMatch) -> BestMatch {
    BestMatch {
        index: m.index,
        text: embedded[m.index].text.clone(),
        score: m.score,
    }
}

use serde::{Deserialize, Serialize};

/// One document from the input set together with its embedding.
/// The index is the document's position in the caller-supplied list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEmbedding {
    pub index: usize,
    pub text: String,
    pub vector: Vec<f32>,
}

/// A ranked document as surfaced to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestMatch {
    pub index: usize,
    pub text: String,
    pub score: f32,
}

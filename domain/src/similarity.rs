use thiserror::Error;

/// Errors raised when ranking candidate vectors against a query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimilarityError {
    #[error("dimension mismatch: query has {expected} dims, candidate {index} has {actual}")]
    DimensionMismatch {
        expected: usize,
        index: usize,
        actual: usize,
    },

    #[error("no candidate vectors supplied")]
    EmptyInput,
}

/// A candidate's position in the input set together with its cosine score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedMatch {
    pub index: usize,
    pub score: f32,
}

/// Cosine similarity between two equal-length vectors, in [-1, 1].
/// A zero-magnitude side yields 0.0 so the result is always a real number.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    dot / denom
}

fn check_dimensions(query: &[f32], candidates: &[Vec<f32>]) -> Result<(), SimilarityError> {
    if candidates.is_empty() {
        return Err(SimilarityError::EmptyInput);
    }
    for (index, candidate) in candidates.iter().enumerate() {
        if candidate.len() != query.len() {
            return Err(SimilarityError::DimensionMismatch {
                expected: query.len(),
                index,
                actual: candidate.len(),
            });
        }
    }
    Ok(())
}

/// Index and score of the candidate closest to the query.
/// Ties resolve to the earliest candidate.
pub fn best_match(query: &[f32], candidates: &[Vec<f32>]) -> Result<RankedMatch, SimilarityError> {
    check_dimensions(query, candidates)?;
    let mut best = RankedMatch {
        index: 0,
        score: cosine_similarity(query, &candidates[0]),
    };
    for (index, candidate) in candidates.iter().enumerate().skip(1) {
        let score = cosine_similarity(query, candidate);
        if score > best.score {
            best = RankedMatch { index, score };
        }
    }
    Ok(best)
}

/// Every candidate scored against the query, highest first.
/// Equal scores keep their input order.
pub fn rank(query: &[f32], candidates: &[Vec<f32>]) -> Result<Vec<RankedMatch>, SimilarityError> {
    check_dimensions(query, candidates)?;
    let mut ranked: Vec<RankedMatch> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| RankedMatch {
            index,
            score: cosine_similarity(query, candidate),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}

use domain::models::{BestMatch, DocumentEmbedding};
use domain::similarity::{best_match, cosine_similarity, rank, SimilarityError};

fn embedded_corpus() -> Vec<DocumentEmbedding> {
    // Hand-built vectors standing in for an embedding provider: each document
    // leans toward one axis, the way topical embeddings cluster.
    let texts = [
        "Harry Potter is a wizard and Hermione Granger is a witch",
        "Superman and Batman are DC characters",
        "A mobile phone makes calls and sends messages",
    ];
    let vectors = [
        vec![0.9, 0.1, 0.0],
        vec![0.2, 0.9, 0.1],
        vec![0.0, 0.1, 0.9],
    ];
    texts
        .iter()
        .zip(vectors)
        .enumerate()
        .map(|(index, (text, vector))| DocumentEmbedding {
            index,
            text: text.to_string(),
            vector,
        })
        .collect()
}

#[test]
fn best_match_picks_the_topically_aligned_document() {
    let corpus = embedded_corpus();
    let vectors: Vec<Vec<f32>> = corpus.iter().map(|d| d.vector.clone()).collect();

    // A query about wizards points along the first axis.
    let query = vec![1.0, 0.2, 0.0];
    let best = best_match(&query, &vectors).unwrap();
    assert_eq!(best.index, 0);
    assert!(corpus[best.index].text.contains("Harry Potter"));

    let report = BestMatch {
        index: best.index,
        text: corpus[best.index].text.clone(),
        score: best.score,
    };
    let recomputed = cosine_similarity(&query, &vectors[report.index]);
    assert!((report.score - recomputed).abs() < 1e-6);
}

#[test]
fn ranking_covers_every_document_exactly_once() {
    let corpus = embedded_corpus();
    let vectors: Vec<Vec<f32>> = corpus.iter().map(|d| d.vector.clone()).collect();
    let ranked = rank(&[0.0, 1.0, 0.0], &vectors).unwrap();

    assert_eq!(ranked.len(), vectors.len());
    let mut indexes: Vec<usize> = ranked.iter().map(|m| m.index).collect();
    indexes.sort_unstable();
    assert_eq!(indexes, vec![0, 1, 2]);
    assert_eq!(ranked[0].index, 1);
}

#[test]
fn ranker_and_best_match_agree_on_the_winner() {
    let corpus = embedded_corpus();
    let vectors: Vec<Vec<f32>> = corpus.iter().map(|d| d.vector.clone()).collect();
    let query = vec![0.4, 0.4, 0.6];

    let best = best_match(&query, &vectors).unwrap();
    let ranked = rank(&query, &vectors).unwrap();
    assert_eq!(best.index, ranked[0].index);
    assert!((best.score - ranked[0].score).abs() < 1e-6);
}

#[test]
fn caller_errors_surface_before_any_scoring() {
    assert_eq!(
        best_match(&[1.0, 0.0, 0.0], &[]).unwrap_err(),
        SimilarityError::EmptyInput
    );
    assert!(matches!(
        rank(&[1.0, 0.0, 0.0], &[vec![1.0, 0.0]]).unwrap_err(),
        SimilarityError::DimensionMismatch {
            expected: 3,
            index: 0,
            actual: 2
        }
    ));
}

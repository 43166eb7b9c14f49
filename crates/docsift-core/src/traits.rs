use crate::types::RankedSentence;

/// Linguistic sentence boundary detection.
///
/// Implementations return sentences in document order with surrounding
/// whitespace trimmed and never return empty strings.
pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

/// A bag-of-words relevance model built once over a tokenized corpus.
pub trait Ranker: Send + Sync {
    /// Number of documents the model was built from.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool { self.len() == 0 }

    /// One score per corpus document, in corpus order.
    fn score(&self, query_tokens: &[&str]) -> anyhow::Result<Vec<f64>>;

    /// Corpus positions of the best `n` documents, by descending score.
    ///
    /// Equal scores keep corpus order, so an all-zero query returns the
    /// first `n` documents.
    fn top_n(&self, query_tokens: &[&str], n: usize) -> anyhow::Result<Vec<usize>> {
        let scores = self.score(query_tokens)?;
        Ok(rank_positions(&scores, n))
    }
}

/// Sort positions by descending score, ties by ascending position, and keep `n`.
pub fn rank_positions(scores: &[f64], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
    order.truncate(n);
    order
}

pub trait Retriever: Send + Sync {
    fn predict(&self, query: &str, top_n: usize) -> anyhow::Result<Vec<RankedSentence>>;
}

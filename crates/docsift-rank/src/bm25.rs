//! BM25 Okapi scoring over an in-memory tokenized corpus.
//!
//! IDF is `ln(N - n + 0.5) - ln(n + 0.5)`. Terms whose IDF comes out
//! negative (present in more than half the corpus) are floored to
//! `epsilon * mean_idf` instead. The mean is summed in term order so the
//! same corpus always yields bit-identical scores.
//!
//! Empty query tokens (from leading, trailing or doubled spaces) never match.

use std::collections::{BTreeMap, HashMap};

use docsift_core::config::RankingConfig;
use docsift_core::traits::Ranker;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
    pub epsilon: f64,
}

impl Default for Bm25Params {
    fn default() -> Self { Self { k1: 1.5, b: 0.75, epsilon: 0.25 } }
}

impl From<&RankingConfig> for Bm25Params {
    fn from(c: &RankingConfig) -> Self { Self { k1: c.k1, b: c.b, epsilon: c.epsilon } }
}

#[derive(Debug, Clone)]
pub struct Bm25Okapi {
    params: Bm25Params,
    /// Per document: term → frequency.
    doc_freqs: Vec<HashMap<String, u32>>,
    doc_lengths: Vec<f64>,
    avgdl: f64,
    idf: HashMap<String, f64>,
}

impl Bm25Okapi {
    pub fn new<D, T>(tokenized_corpus: &[D], params: Bm25Params) -> Self
    where
        D: AsRef<[T]>,
        T: AsRef<str>,
    {
        let mut doc_freqs = Vec::with_capacity(tokenized_corpus.len());
        let mut doc_lengths = Vec::with_capacity(tokenized_corpus.len());
        // term → number of documents containing it
        let mut nd: BTreeMap<String, u32> = BTreeMap::new();
        let mut total_tokens = 0usize;

        for doc in tokenized_corpus {
            let tokens = doc.as_ref();
            total_tokens += tokens.len();
            doc_lengths.push(tokens.len() as f64);
            let mut freqs: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *freqs.entry(token.as_ref().to_string()).or_insert(0) += 1;
            }
            for term in freqs.keys() {
                *nd.entry(term.clone()).or_insert(0) += 1;
            }
            doc_freqs.push(freqs);
        }

        let corpus_size = doc_freqs.len();
        let avgdl = if corpus_size == 0 { 0.0 } else { total_tokens as f64 / corpus_size as f64 };
        let idf = compute_idf(&nd, corpus_size, params.epsilon);
        info!(documents = corpus_size, vocabulary = idf.len(), avgdl, "built BM25 Okapi model");
        Self { params, doc_freqs, doc_lengths, avgdl, idf }
    }

    pub fn params(&self) -> Bm25Params { self.params }

    pub fn idf(&self, term: &str) -> Option<f64> { self.idf.get(term).copied() }

    pub fn average_doc_length(&self) -> f64 { self.avgdl }

    /// Scores of every document for `query_tokens`, in corpus order.
    pub fn scores(&self, query_tokens: &[&str]) -> Vec<f64> {
        let Bm25Params { k1, b, .. } = self.params;
        let mut scores = vec![0.0; self.doc_freqs.len()];
        for q in query_tokens.iter().filter(|q| !q.is_empty()) {
            let Some(&idf) = self.idf.get(*q) else { continue };
            for (i, freqs) in self.doc_freqs.iter().enumerate() {
                let tf = f64::from(freqs.get(*q).copied().unwrap_or(0));
                if tf == 0.0 { continue; }
                let norm = k1 * (1.0 - b + b * self.doc_lengths[i] / self.avgdl);
                scores[i] += idf * (tf * (k1 + 1.0)) / (tf + norm);
            }
        }
        scores
    }
}

fn compute_idf(nd: &BTreeMap<String, u32>, corpus_size: usize, epsilon: f64) -> HashMap<String, f64> {
    let n = corpus_size as f64;
    let mut idf = HashMap::with_capacity(nd.len());
    let mut idf_sum = 0.0;
    let mut negative = Vec::new();
    for (term, &freq) in nd {
        let freq = f64::from(freq);
        let value = (n - freq + 0.5).ln() - (freq + 0.5).ln();
        idf_sum += value;
        if value < 0.0 { negative.push(term.clone()); }
        idf.insert(term.clone(), value);
    }
    if !idf.is_empty() {
        let floor = epsilon * (idf_sum / idf.len() as f64);
        for term in negative { idf.insert(term, floor); }
    }
    idf
}

impl Ranker for Bm25Okapi {
    fn len(&self) -> usize { self.doc_freqs.len() }

    fn score(&self, query_tokens: &[&str]) -> anyhow::Result<Vec<f64>> { Ok(self.scores(query_tokens)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(docs: &[&str]) -> Bm25Okapi {
        let tokenized: Vec<Vec<&str>> = docs.iter().map(|d| d.split(' ').collect()).collect();
        Bm25Okapi::new(&tokenized, Bm25Params::default())
    }

    #[test]
    fn idf_matches_okapi_formula() {
        let m = model(&["the cat sat", "the dog ran", "birds fly high"]);
        let expected = (3.0f64 - 1.0 + 0.5).ln() - (1.0f64 + 0.5).ln();
        assert!((m.idf("cat").unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn negative_idf_is_floored_to_epsilon_mean() {
        let m = model(&["the cat sat", "the dog ran", "birds fly high"]);
        // 7 terms with df=1 and "the" with df=2.
        let single = (2.5f64).ln() - (1.5f64).ln();
        let negative = (1.5f64).ln() - (2.5f64).ln();
        let mean = (7.0 * single + negative) / 8.0;
        assert!((m.idf("the").unwrap() - 0.25 * mean).abs() < 1e-12);
    }

    #[test]
    fn hand_computed_score() {
        let m = model(&["the cat sat", "the dog ran", "birds fly high"]);
        let idf = m.idf("cat").unwrap();
        // tf = 1, |D| = avgdl = 3 → tf_norm = 2.5 / 2.5 = 1
        let scores = m.scores(&["cat"]);
        assert!((scores[0] - idf).abs() < 1e-12);
        assert_eq!(scores[1], 0.0);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn higher_term_frequency_scores_higher() {
        let m = model(&["rust rust rust", "rust programming language", "python scripting easy", "java enterprise code", "go concurrency channels"]);
        let scores = m.scores(&["rust"]);
        assert!(scores[0] > scores[1]);
        assert!(scores[1] > 0.0);
    }

    #[test]
    fn repeated_query_terms_count_each_time() {
        let m = model(&["the cat sat", "the dog ran", "birds fly high"]);
        let once = m.scores(&["cat"])[0];
        let twice = m.scores(&["cat", "cat"])[0];
        assert!((twice - 2.0 * once).abs() < 1e-12);
    }

    #[test]
    fn unknown_and_empty_queries_score_zero() {
        let m = model(&["the cat sat", "the dog ran"]);
        assert_eq!(m.scores(&["zebra"]), vec![0.0, 0.0]);
        assert_eq!(m.scores(&[""]), vec![0.0, 0.0]);
    }

    #[test]
    fn empty_query_ignores_empty_tokens_in_the_corpus() {
        let m = model(&["the  cat sat", "the dog ran", "birds fly high"]);
        assert!(m.idf("").is_some());
        assert_eq!(m.scores(&[""]), vec![0.0, 0.0, 0.0]);
        assert_eq!(m.scores(&["cat", ""]), m.scores(&["cat"]));
    }

    #[test]
    fn rebuilding_gives_bit_identical_idf() {
        let docs: Vec<String> = (0..40).map(|i| format!("shared common t{} t{} w{}", i % 7, i % 3, i)).collect();
        let refs: Vec<&str> = docs.iter().map(String::as_str).collect();
        let first = model(&refs);
        for _ in 0..50 {
            let again = model(&refs);
            for term in ["shared", "common", "t0", "t1", "w5"] {
                assert_eq!(again.idf(term).unwrap().to_bits(), first.idf(term).unwrap().to_bits(), "{}", term);
            }
            let q = ["shared", "t2", "w9"];
            let bits = |m: &Bm25Okapi| m.scores(&q).iter().map(|s| s.to_bits()).collect::<Vec<_>>();
            assert_eq!(bits(&again), bits(&first));
        }
    }

    #[test]
    fn empty_corpus_has_no_scores() {
        let m = model(&[]);
        assert!(m.is_empty());
        assert!(m.scores(&["anything"]).is_empty());
    }
}

//! TF-IDF text vectorizer.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{PipelineError, Result};
use crate::text::tokenize;

/// Largest n-gram size a vectorizer may use.
pub const MAX_NGRAM: usize = 8;

/// Fitting parameters for [`TfIdfVectorizer::fit`].
#[derive(Debug, Clone)]
pub struct VectorizerOptions {
    /// Inclusive n-gram range, e.g. `(1, 2)` for unigrams and bigrams.
    pub ngram_range: (usize, usize),
    /// Keep at most this many terms, ranked by corpus frequency.
    pub max_features: usize,
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in.
    pub max_df: f32,
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            max_features: 5000,
            min_df: 1,
            max_df: 0.9,
        }
    }
}

/// A fitted TF-IDF vectorizer: vocabulary plus smoothed idf weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    pub ngram_range: (usize, usize),
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f32>,
}

impl TfIdfVectorizer {
    /// Number of features produced by [`transform`](Self::transform).
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Fit vocabulary and idf on a corpus.
    pub fn fit<S: AsRef<str>>(documents: &[S], options: &VectorizerOptions) -> Result<Self> {
        let (min_n, max_n) = options.ngram_range;
        if min_n == 0 || min_n > max_n || max_n > MAX_NGRAM {
            return Err(PipelineError::Config(format!(
                "Invalid ngram_range ({min_n}, {max_n}), expected 1 <= min <= max <= {MAX_NGRAM}"
            )));
        }
        if documents.is_empty() {
            return Err(PipelineError::Dataset(
                "Cannot fit a vectorizer on an empty corpus".into(),
            ));
        }

        let docs: Vec<Vec<String>> = documents
            .iter()
            .map(|d| ngrams(&tokenize(d.as_ref()), options.ngram_range))
            .collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        for doc in &docs {
            let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
            for term in doc {
                *term_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n_docs = docs.len();
        let max_count = (options.max_df * n_docs as f32).floor() as usize;
        let within_df = |df: usize, max: usize| df >= options.min_df && df <= max;

        let mut kept: Vec<(&str, usize)> = doc_freq
            .iter()
            .filter(|(_, &df)| within_df(df, max_count))
            .map(|(&term, _)| (term, term_freq[term]))
            .collect();
        if kept.is_empty() {
            // Tiny corpora: every term may exceed max_df, so ignore it.
            kept = doc_freq
                .iter()
                .filter(|(_, &df)| within_df(df, n_docs))
                .map(|(&term, _)| (term, term_freq[term]))
                .collect();
        }
        if kept.is_empty() {
            return Err(PipelineError::Dataset(
                "Corpus produced an empty vocabulary".into(),
            ));
        }

        kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        kept.truncate(options.max_features.max(1));

        // Alphabetical indices for a stable artifact.
        let terms: BTreeMap<&str, usize> = kept
            .into_iter()
            .map(|(term, _)| (term, doc_freq[term]))
            .collect();

        let n = n_docs as f32;
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (idx, (term, df)) in terms.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), idx);
            idf.push(((1.0 + n) / (1.0 + df as f32)).ln() + 1.0);
        }

        Ok(Self {
            ngram_range: options.ngram_range,
            vocabulary,
            idf,
        })
    }

    /// L2-normalized TF-IDF vector for `text`.
    ///
    /// Text with no known terms maps to the zero vector.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.idf.len()];
        for term in ngrams(&tokenize(text), self.ngram_range) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                vector[idx] += 1.0;
            }
        }

        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in vector.iter_mut() {
                *x /= norm;
            }
        }
        vector
    }

    /// Check internal consistency of a deserialized vectorizer.
    pub fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n || max_n > MAX_NGRAM {
            return Err(PipelineError::Schema(format!(
                "vectorizer.ngram_range ({min_n}, {max_n}) is outside 1 <= min <= max <= {MAX_NGRAM}"
            )));
        }
        if self.idf.is_empty() {
            return Err(PipelineError::Schema("vectorizer vocabulary is empty".into()));
        }
        if self.vocabulary.len() != self.idf.len() {
            return Err(PipelineError::Schema(format!(
                "vectorizer has {} vocabulary terms but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        let mut seen = vec![false; self.idf.len()];
        for (term, &idx) in &self.vocabulary {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(PipelineError::Schema(format!(
                        "vectorizer term '{term}' has duplicate or out-of-range index {idx}"
                    )))
                }
            }
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(PipelineError::Schema(
                "vectorizer idf contains non-finite values".into(),
            ));
        }
        Ok(())
    }
}

/// Space-joined n-grams of `tokens` for every `n` in `range`.
fn ngrams(tokens: &[String], (min_n, max_n): (usize, usize)) -> Vec<String> {
    let mut out = Vec::new();
    for n in min_n.max(1)..=max_n.min(tokens.len()) {
        out.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    out
}

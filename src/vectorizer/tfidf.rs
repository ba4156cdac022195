use indexmap::IndexMap;
use num::Num;

use crate::config::IdfPolicy;
use crate::vectorizer::{corpus::DocumentFrequency, signature::FeatureSignature, term::TermVector};

/// Turns a feature signature into a term vector.
///
/// Implementations must be `Sync`: one engine is shared by every scoring
/// worker of a request.
pub trait VectorizeEngine<N>
where
    N: Num + Copy,
{
    fn vectorize(&self, signature: &FeatureSignature) -> TermVector<N>;
}

/// Occurrence count of each distinct token, in first-seen order.
fn token_counts(signature: &FeatureSignature) -> IndexMap<&str, u32> {
    let mut counts: IndexMap<&str, u32> = IndexMap::new();
    for token in signature.tokens() {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// TF-IDF weighting against a frozen document frequency table.
///
/// weight(t) = count(t in signature) * ln(N / df(t)), where df defaults to 1
/// for tokens the table has never seen.
#[derive(Debug, Clone, Copy)]
pub struct TfIdfEngine<'a> {
    df: &'a DocumentFrequency,
    policy: IdfPolicy,
}

impl<'a> TfIdfEngine<'a> {
    pub fn new(df: &'a DocumentFrequency) -> Self {
        Self { df, policy: IdfPolicy::Signed }
    }

    pub fn with_policy(df: &'a DocumentFrequency, policy: IdfPolicy) -> Self {
        Self { df, policy }
    }

    /// `ln(N / df)`; negative only when df > N, see [`IdfPolicy`]
    pub fn idf(&self, token: &str) -> f64 {
        let doc_num = self.df.doc_num() as f64;
        let doc_freq = self.df.get(token).unwrap_or(1) as f64;
        let idf = (doc_num / doc_freq).ln();
        match self.policy {
            IdfPolicy::Signed => idf,
            IdfPolicy::ClampZero => idf.max(0.0),
        }
    }
}

impl VectorizeEngine<f64> for TfIdfEngine<'_> {
    fn vectorize(&self, signature: &FeatureSignature) -> TermVector<f64> {
        // ln(0 / df) is -inf; an empty corpus yields no vectors
        if self.df.doc_num() == 0 {
            return TermVector::new();
        }
        let counts = token_counts(signature);
        let mut vec = TermVector::with_capacity(counts.len());
        for (token, count) in counts {
            vec.insert(token, count as f64 * self.idf(token));
        }
        vec
    }
}

/// Bag-of-words baseline: raw occurrence counts, no idf.
#[derive(Debug, Clone, Copy, Default)]
pub struct BagOfWordsEngine;

impl BagOfWordsEngine {
    pub fn new() -> Self {
        BagOfWordsEngine
    }
}

impl VectorizeEngine<u32> for BagOfWordsEngine {
    fn vectorize(&self, signature: &FeatureSignature) -> TermVector<u32> {
        token_counts(signature)
            .into_iter()
            .map(|(token, count)| (Box::<str>::from(token), count))
            .collect()
    }
}

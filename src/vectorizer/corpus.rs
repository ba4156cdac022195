use indexmap::{IndexMap, IndexSet};

use crate::vectorizer::signature::{FeatureSignature, FeatureSource};

/// Document frequency table for one catalog snapshot.
///
/// Holds the number of documents and, per token, how many documents contain
/// it at least once. Tokens never seen have no entry.
/// Build a fresh table per request; it is never updated after vectorization
/// has started.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFrequency {
    /// token -> number of documents containing it
    counts: IndexMap<Box<str>, u64>,
    doc_num: u64,
}

impl DocumentFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from every source in `corpus`.
    pub fn from_sources<'a, S, I>(corpus: I) -> Self
    where
        S: FeatureSource + ?Sized + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        let mut df = Self::new();
        for source in corpus {
            df.add_signature(&FeatureSignature::from_source(source));
        }
        df
    }

    /// Count one document. Repeated tokens within it count once.
    pub fn add_signature(&mut self, signature: &FeatureSignature) {
        self.doc_num += 1;
        let unique: IndexSet<&str> = signature.tokens().collect();
        for token in unique {
            *self.counts.entry(token.into()).or_insert(0) += 1;
        }
    }

    /// Number of documents containing `token`, `None` if it never occurred.
    #[inline]
    pub fn get(&self, token: &str) -> Option<u64> {
        self.counts.get(token).copied()
    }

    /// corpus size `N`
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(token, count)| (token.as_ref(), *count))
    }

    #[cfg(test)]
    pub(crate) fn with_doc_num(mut self, doc_num: u64) -> Self {
        self.doc_num = doc_num;
        self
    }
}

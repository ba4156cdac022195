use std::cmp::Ordering;
use std::fmt::{self, Debug};

use num::Num;
use rayon::prelude::*;

use crate::catalog::CatalogItem;
use crate::vectorizer::{cosine_similarity, FeatureSignature, TermVector, VectorizeEngine};

/// One scored candidate
#[derive(Debug, Clone, Copy)]
pub struct HitEntry<'a> {
    pub item: &'a CatalogItem,
    pub score: f64,
}

/// Scored candidates of one ranking call.
pub struct Hits<'a> {
    pub list: Vec<HitEntry<'a>>,
}

impl<'a> Hits<'a> {
    pub fn new(list: Vec<HitEntry<'a>>) -> Self {
        Hits { list }
    }

    /// Score every candidate against `query` with `engine`.
    /// Scoring runs in parallel; the list keeps the candidates' input order.
    pub fn score<N, E>(engine: &E, query: &TermVector<N>, candidates: &[&'a CatalogItem]) -> Self
    where
        N: Num + Copy + Into<f64> + Send + Sync,
        E: VectorizeEngine<N> + Sync,
    {
        let list = candidates
            .par_iter()
            .map(|item| {
                let vec = engine.vectorize(&FeatureSignature::from_source(*item));
                HitEntry { item: *item, score: cosine_similarity(query, &vec) }
            })
            .collect();
        Hits { list }
    }

    /// Sort by descending score. The sort is stable: equal scores keep their
    /// input order, and `-0.0` ties with `0.0`.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|hit| !hit.score.is_nan());
        self.list
            .sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        self
    }

    pub fn truncate(&mut self, len: usize) -> &mut Self {
        self.list.truncate(len);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn items(&self) -> Vec<&'a CatalogItem> {
        self.list.iter().map(|hit| hit.item).collect()
    }
}

impl Debug for Hits<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // one hit per line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {:?}: {:.6}", hit.item.id, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|hit| (&hit.item.id, hit.score)))
                .finish()
        }
    }
}

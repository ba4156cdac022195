use serde::Serialize;

use crate::catalog::{CatalogItem, Gender};
use crate::recommend::hits::Hits;

/// Ranking algorithm shown in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    BagOfWords,
    TfIdf,
}

impl Algorithm {
    /// label attached to every recommendation
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::BagOfWords => "bag-of-words",
            Algorithm::TfIdf => "tf-idf",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::BagOfWords => "Bag-of-Words",
            Algorithm::TfIdf => "TF-IDF",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::BagOfWords => "Simple frequency-based vectorization",
            Algorithm::TfIdf => "Term Frequency-Inverse Document Frequency vectorization",
        }
    }
}

/// Feature fields of the compared product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub material: Option<String>,
    pub gender: Option<Gender>,
    pub sizes: Vec<String>,
}

impl From<&CatalogItem> for ProductSummary {
    fn from(item: &CatalogItem) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.clone(),
            brand: item.brand.clone(),
            material: item.material.clone(),
            gender: item.gender,
            sizes: item.sizes.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecommendation<'a> {
    #[serde(flatten)]
    pub product: &'a CatalogItem,
    pub similarity_score: f64,
    pub algorithm: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmResult<'a> {
    pub name: &'static str,
    pub description: &'static str,
    pub recommendations: Vec<ScoredRecommendation<'a>>,
}

impl<'a> AlgorithmResult<'a> {
    pub fn from_hits(algorithm: Algorithm, hits: &Hits<'a>) -> Self {
        Self {
            name: algorithm.display_name(),
            description: algorithm.description(),
            recommendations: hits
                .list
                .iter()
                .map(|hit| ScoredRecommendation {
                    product: hit.item,
                    similarity_score: hit.score,
                    algorithm: algorithm.label(),
                })
                .collect(),
        }
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.recommendations.iter().map(|r| r.product.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Disagreement {
    /// ranks at which the two lists hold different products
    pub differences: usize,
    pub total_recommendations: usize,
}

/// Side-by-side result of the bag-of-words baseline and TF-IDF.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport<'a> {
    pub selected_product: ProductSummary,
    pub old_algorithm: AlgorithmResult<'a>,
    pub new_algorithm: AlgorithmResult<'a>,
    pub comparison: Disagreement,
}

/// Count the ranks where `new` and `old` differ, comparing by position.
/// A rank present in `new` but missing from `old` counts as a difference.
pub fn rank_differences(new: &[&str], old: &[&str]) -> usize {
    new.iter()
        .enumerate()
        .filter(|(i, id)| old.get(*i) != Some(*id))
        .count()
}

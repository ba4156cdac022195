//! This crate is a content-based product recommender using a TF-IDF vectorizer.
pub mod catalog;
pub mod config;
pub mod error;
pub mod recommend;
pub mod vectorizer;

/// Recommender
/// The top-level struct of this crate. It ranks catalog items by the cosine
/// similarity of their TF-IDF feature vectors.
///
/// It offers three entry points sharing one pipeline:
/// - `similar_products`: items like a given product, same gender and category
/// - `cart_recommendations`: "you may also like" for the current cart
/// - `compare`: bag-of-words baseline vs TF-IDF for one product
///
/// Every call rebuilds its document frequency table from the catalog snapshot
/// it receives; nothing is cached between calls.
pub use recommend::Recommender;

/// Recommender settings (top-N limits, negative idf policy).
/// Defaults match the storefront routes and can be overridden from the
/// environment.
pub use config::{IdfPolicy, RecommenderConfig};

/// Catalog snapshot
/// An ordered, read-only list of products supplied by the storage layer.
/// Catalog order breaks ranking ties.
///
/// # Serialization
/// JSON and CBOR, camelCase field names.
pub use catalog::{Catalog, CatalogItem, Gender, ProductImage};

/// Catalog listing filter and sort order
pub use catalog::listing::{ProductFilter, SortBy};

/// Feature signature and its sources
/// A `FeatureSignature` is the lowercased text
/// `category brand sizes material gender` of one item, used as its document.
pub use vectorizer::{FeatureSignature, FeatureSource};

/// Document Frequency
/// For each token, the number of documents containing it, plus the document
/// count `N`. This is the base data for IDF calculation.
pub use vectorizer::DocumentFrequency;

/// Vectorize engines
/// `TfIdfEngine` weights tokens by `count * ln(N / df)`; `BagOfWordsEngine`
/// uses raw counts. Both implement `VectorizeEngine<N>`.
pub use vectorizer::{BagOfWordsEngine, TermVector, TfIdfEngine, VectorizeEngine};

/// Cosine similarity between two term vectors
pub use vectorizer::cosine_similarity;

/// Search Hits and Hit Entry structures
/// - `Hits`: scored candidates, with a stable sort by score
/// - `HitEntry`: one candidate and its score
pub use recommend::hits::{HitEntry, Hits};

/// Cart basket builder and payload parsing
pub use recommend::basket::{parse_cart_ids, BasketBuilder, BasketProfile};

/// Comparison payload
pub use recommend::comparison::{Algorithm, AlgorithmResult, ComparisonReport, Disagreement, ProductSummary, ScoredRecommendation};

pub use error::{RecommendError, Result};

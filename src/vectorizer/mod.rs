pub mod signature;
pub mod corpus;
pub mod term;
pub mod tfidf;
pub mod compare;

pub use compare::cosine_similarity;
pub use corpus::DocumentFrequency;
pub use signature::{FeatureSignature, FeatureSource};
pub use term::TermVector;
pub use tfidf::{BagOfWordsEngine, TfIdfEngine, VectorizeEngine};

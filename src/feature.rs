//! Feature representation shared by both learners.
//!
//! Parsing and aggregation are separate steps: [`FeatureExtractor`] turns a
//! raw document into an immutable [`FeatureVector`], and [`Vocabulary`] (like
//! the per-class statistics in [`crate::ml::naive_bayes`]) is folded from
//! finished vectors afterwards.

pub mod extractor;
pub mod vector;
pub mod vocabulary;

pub use extractor::FeatureExtractor;
pub use vector::FeatureVector;
pub use vocabulary::Vocabulary;

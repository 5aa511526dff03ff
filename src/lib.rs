//! # Spamsift
//!
//! Two-class spam/ham text classification with multinomial Naive Bayes and
//! L2-regularized logistic regression.
//!
//! ## Features
//!
//! - Configurable text analysis pipeline (regex tokenizer, lowercasing, stop words)
//! - Sparse bag-of-words feature vectors with an explicit bias feature
//! - Laplace-smoothed Naive Bayes in log space
//! - Batch gradient ascent logistic regression, optionally parallel
//! - Command line interface for training and evaluation

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod feature;
pub mod ml;

pub mod prelude {
    pub use crate::corpus::{ClassLabel, Corpus, build_corpus};
    pub use crate::error::{Result, SpamsiftError};
    pub use crate::feature::{FeatureExtractor, FeatureVector};
    pub use crate::ml::{DocumentClassifier, LogisticRegressionModel, NaiveBayesModel};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Learners for two-class spam filtering.
//!
//! Both models consume [`Corpus`](crate::corpus::Corpus) values produced by
//! the feature extraction layer and implement [`DocumentClassifier`], so
//! they can be evaluated and driven by the CLI the same way.

pub mod classifier;
pub mod evaluation;
pub mod logistic_regression;
pub mod naive_bayes;

pub use classifier::{DocumentClassifier, TieBreak};
pub use evaluation::{EvaluationReport, evaluate};
pub use logistic_regression::{
    DeltaPolicy, LogisticRegressionConfig, LogisticRegressionModel, TrainingStats, WeightVector,
};
pub use naive_bayes::{NaiveBayesConfig, NaiveBayesModel};

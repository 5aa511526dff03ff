//! Configuration for analysis and both learners.
//!
//! Every section has sensible defaults, so a configuration file only needs
//! to name the values it changes:
//!
//! ```json
//! {
//!   "iterations": 500,
//!   "logistic_regression": { "lambda": 0.5 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::regex::DEFAULT_TOKEN_PATTERN;
use crate::error::{Result, SpamsiftError};
use crate::ml::logistic_regression::LogisticRegressionConfig;
use crate::ml::naive_bayes::NaiveBayesConfig;

/// Default number of gradient ascent rounds.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Text analysis settings used to build a
/// [`FeatureExtractor`](crate::feature::FeatureExtractor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Regex that matches a single token.
    pub token_pattern: String,
    /// Lowercase tokens before stop-word removal.
    pub lowercase: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            lowercase: true,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpamsiftConfig {
    /// Tokenization settings.
    pub analysis: AnalysisConfig,
    /// Naive Bayes settings.
    pub naive_bayes: NaiveBayesConfig,
    /// Logistic regression hyperparameters.
    pub logistic_regression: LogisticRegressionConfig,
    /// Number of gradient ascent rounds for logistic regression.
    pub iterations: usize,
}

impl Default for SpamsiftConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            naive_bayes: NaiveBayesConfig::default(),
            logistic_regression: LogisticRegressionConfig::default(),
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl SpamsiftConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SpamsiftConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that hyperparameters are usable.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.token_pattern.is_empty() {
            return Err(SpamsiftError::config("token_pattern must not be empty"));
        }
        self.logistic_regression.validate()
    }
}

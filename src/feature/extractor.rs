//! Document parsing: raw text to [`FeatureVector`].

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::{LowercaseFilter, StopFilter};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::feature::vector::FeatureVector;

/// Turns raw documents into feature vectors.
///
/// The same extractor is used for training corpora and for ad-hoc
/// classification of a single document, so both see identical features.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use spamsift::feature::FeatureExtractor;
///
/// let stop_words: HashSet<String> = ["the".to_string()].into_iter().collect();
/// let extractor = FeatureExtractor::new(stop_words).unwrap();
///
/// let doc = extractor.parse_document("The FREE offer: free, FREE!").unwrap();
/// assert_eq!(doc.count("free"), 3);
/// assert_eq!(doc.count("the"), 0);
/// ```
#[derive(Clone)]
pub struct FeatureExtractor {
    analyzer: Arc<dyn Analyzer>,
}

impl FeatureExtractor {
    /// Create an extractor with the default analysis settings and the given
    /// stop words. Stop words must already be lowercase.
    pub fn new(stop_words: HashSet<String>) -> Result<Self> {
        Self::from_config(&AnalysisConfig::default(), stop_words)
    }

    /// Create an extractor that keeps every token.
    pub fn without_stop_words() -> Result<Self> {
        Self::new(HashSet::new())
    }

    /// Create an extractor from analysis configuration.
    pub fn from_config(config: &AnalysisConfig, stop_words: HashSet<String>) -> Result<Self> {
        let tokenizer = RegexTokenizer::with_pattern(&config.token_pattern)?;
        let mut analyzer = PipelineAnalyzer::new(Arc::new(tokenizer));
        if config.lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }
        analyzer = analyzer.add_filter(Arc::new(StopFilter::with_stop_words(stop_words)));

        Ok(Self::with_analyzer(Arc::new(analyzer)))
    }

    /// Create an extractor around a custom analyzer.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        FeatureExtractor { analyzer }
    }

    /// Parse one raw document into its feature vector.
    ///
    /// Tokens that the analyzer marked as stopped, and empty tokens, are not
    /// counted.
    pub fn parse_document(&self, raw: &str) -> Result<FeatureVector> {
        let terms = self
            .analyzer
            .analyze(raw)?
            .filter(|token| !token.is_stopped() && !token.is_empty())
            .map(|token| token.text);

        Ok(FeatureVector::from_terms(terms))
    }
}

impl std::fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureExtractor")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

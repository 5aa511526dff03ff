//! Multinomial Naive Bayes with add-one smoothing.
//!
//! Training folds the two class corpora into [`ClassStatistics`], unions
//! their terms into a [`Vocabulary`], and derives one
//! [`ConditionalProbabilityTable`] per class:
//!
//! ```text
//! log P(w | c) = ln((count(w, c) + 1) / (total_words(c) + |V|))
//! ```
//!
//! Scoring stays in log space, `log_prior(c) + Σ count(w) × log P(w | c)`,
//! so long documents cannot underflow.

use ahash::AHashMap;
use log::info;
use serde::{Deserialize, Serialize};

use crate::corpus::{ClassLabel, Corpus};
use crate::error::{Result, SpamsiftError};
use crate::feature::{FeatureVector, Vocabulary};
use crate::ml::classifier::{DocumentClassifier, TieBreak};
use crate::ml::evaluation::{self, EvaluationReport};

/// Naive Bayes settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    /// Class chosen when both scores are equal.
    pub tie_break: TieBreak,
}

/// Aggregate counts of one class's training corpus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassStatistics {
    term_counts: AHashMap<String, u64>,
    total_words: u64,
    document_count: usize,
    log_prior: f64,
}

impl ClassStatistics {
    /// Sum the feature vectors of `corpus`.
    ///
    /// `total_documents` is the number of training documents across both
    /// classes; the log-prior is `ln(|corpus| / total_documents)`, which is
    /// `-inf` for an empty corpus.
    pub fn from_corpus(corpus: &Corpus, total_documents: usize) -> Self {
        let mut term_counts: AHashMap<String, u64> = AHashMap::new();
        let mut total_words = 0;
        for document in corpus {
            for (term, count) in document.terms() {
                *term_counts.entry(term.to_string()).or_insert(0) += count;
                total_words += count;
            }
        }

        ClassStatistics {
            term_counts,
            total_words,
            document_count: corpus.len(),
            log_prior: log_prior(corpus.len(), total_documents),
        }
    }

    /// Total occurrences of `term` in the class.
    pub fn count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Total occurrences of all terms in the class.
    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    /// Number of training documents in the class.
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of distinct terms seen in the class.
    pub fn distinct_terms(&self) -> usize {
        self.term_counts.len()
    }

    /// Natural log of the class prior.
    pub fn log_prior(&self) -> f64 {
        self.log_prior
    }
}

fn log_prior(class_documents: usize, total_documents: usize) -> f64 {
    if total_documents == 0 {
        return f64::NEG_INFINITY;
    }
    (class_documents as f64 / total_documents as f64).ln()
}

/// Smoothed log conditional probabilities of one class over the vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionalProbabilityTable {
    log_probabilities: AHashMap<String, f64>,
}

impl ConditionalProbabilityTable {
    /// Compute `ln((count + 1) / (total_words + |V|))` for every vocabulary
    /// term.
    pub fn build(statistics: &ClassStatistics, vocabulary: &Vocabulary) -> Self {
        let denominator = (statistics.total_words() + vocabulary.len() as u64) as f64;
        let log_probabilities = vocabulary
            .iter()
            .map(|term| {
                let numerator = (statistics.count(term) + 1) as f64;
                (term.to_string(), (numerator / denominator).ln())
            })
            .collect();

        ConditionalProbabilityTable { log_probabilities }
    }

    /// `log P(term | class)`, or `None` for a term outside the vocabulary.
    pub fn log_probability(&self, term: &str) -> Option<f64> {
        self.log_probabilities.get(term).copied()
    }

    /// Number of terms in the table.
    pub fn len(&self) -> usize {
        self.log_probabilities.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.log_probabilities.is_empty()
    }
}

#[derive(Debug, Clone)]
struct ClassModel {
    statistics: ClassStatistics,
    table: ConditionalProbabilityTable,
}

impl ClassModel {
    fn score(&self, document: &FeatureVector) -> f64 {
        document
            .terms()
            .filter_map(|(term, count)| {
                self.table
                    .log_probability(term)
                    .map(|log_p| count as f64 * log_p)
            })
            .fold(self.statistics.log_prior(), |acc, term_score| acc + term_score)
    }
}

#[derive(Debug, Clone)]
struct TrainedNaiveBayes {
    vocabulary: Vocabulary,
    spam: ClassModel,
    ham: ClassModel,
}

impl TrainedNaiveBayes {
    fn class(&self, label: ClassLabel) -> &ClassModel {
        match label {
            ClassLabel::Spam => &self.spam,
            ClassLabel::Ham => &self.ham,
        }
    }
}

/// Multinomial Naive Bayes classifier.
///
/// # Examples
///
/// ```
/// use spamsift::corpus::{ClassLabel, Corpus};
/// use spamsift::feature::FeatureVector;
/// use spamsift::ml::naive_bayes::NaiveBayesModel;
///
/// let spam = Corpus::new(ClassLabel::Spam, vec![FeatureVector::from_terms(["win", "cash"])]);
/// let ham = Corpus::new(ClassLabel::Ham, vec![FeatureVector::from_terms(["team", "meeting"])]);
///
/// let mut model = NaiveBayesModel::new();
/// model.train(&spam, &ham).unwrap();
///
/// let doc = FeatureVector::from_terms(["cash", "cash"]);
/// assert_eq!(model.classify(&doc).unwrap(), ClassLabel::Spam);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NaiveBayesModel {
    config: NaiveBayesConfig,
    state: Option<TrainedNaiveBayes>,
}

impl NaiveBayesModel {
    /// Create an untrained model with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an untrained model with the given settings.
    pub fn with_config(config: NaiveBayesConfig) -> Self {
        NaiveBayesModel {
            config,
            state: None,
        }
    }

    /// The model settings.
    pub fn config(&self) -> &NaiveBayesConfig {
        &self.config
    }

    /// Whether [`train`](Self::train) has completed.
    pub fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    /// Estimate priors and conditional probabilities from the two training
    /// corpora, replacing any previous training.
    ///
    /// An empty corpus is not an error: its class gets a log-prior of
    /// `-inf` and can never win a classification.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error when `spam` is not labelled spam or
    /// `ham` is not labelled ham.
    pub fn train(&mut self, spam: &Corpus, ham: &Corpus) -> Result<()> {
        check_label(spam, ClassLabel::Spam)?;
        check_label(ham, ClassLabel::Ham)?;

        let total_documents = spam.len() + ham.len();
        let spam_statistics = ClassStatistics::from_corpus(spam, total_documents);
        let ham_statistics = ClassStatistics::from_corpus(ham, total_documents);
        let vocabulary = Vocabulary::from_corpora([spam, ham]);

        let spam_table = ConditionalProbabilityTable::build(&spam_statistics, &vocabulary);
        let ham_table = ConditionalProbabilityTable::build(&ham_statistics, &vocabulary);

        info!(
            "Trained naive bayes on {} spam / {} ham documents, vocabulary size {}",
            spam.len(),
            ham.len(),
            vocabulary.len()
        );

        self.state = Some(TrainedNaiveBayes {
            vocabulary,
            spam: ClassModel {
                statistics: spam_statistics,
                table: spam_table,
            },
            ham: ClassModel {
                statistics: ham_statistics,
                table: ham_table,
            },
        });

        Ok(())
    }

    fn trained(&self) -> Result<&TrainedNaiveBayes> {
        self.state
            .as_ref()
            .ok_or_else(|| SpamsiftError::not_trained("naive_bayes"))
    }

    /// Log-space score of `document` under `class`.
    ///
    /// Terms outside the training vocabulary contribute nothing.
    pub fn score(&self, document: &FeatureVector, class: ClassLabel) -> Result<f64> {
        Ok(self.trained()?.class(class).score(document))
    }

    /// Normalized `P(spam | document)` derived from both class scores.
    ///
    /// Returns `0.5` when neither class can explain the document, i.e. both
    /// scores are `-inf`.
    pub fn posterior_spam(&self, document: &FeatureVector) -> Result<f64> {
        let state = self.trained()?;
        let spam = state.spam.score(document);
        let ham = state.ham.score(document);

        let max = spam.max(ham);
        if max == f64::NEG_INFINITY {
            return Ok(0.5);
        }
        let spam_weight = (spam - max).exp();
        let ham_weight = (ham - max).exp();
        Ok(spam_weight / (spam_weight + ham_weight))
    }

    /// Class with the strictly greater score; ties follow the configured
    /// [`TieBreak`].
    pub fn classify(&self, document: &FeatureVector) -> Result<ClassLabel> {
        let state = self.trained()?;
        let spam = state.spam.score(document);
        let ham = state.ham.score(document);
        Ok(self.config.tie_break.decide(spam, ham))
    }

    /// Percentage of test documents classified correctly.
    pub fn evaluate(&self, test_spam: &Corpus, test_ham: &Corpus) -> Result<f64> {
        Ok(self.evaluation_report(test_spam, test_ham)?.accuracy())
    }

    /// Per-class hit counts on the test corpora.
    pub fn evaluation_report(&self, test_spam: &Corpus, test_ham: &Corpus) -> Result<EvaluationReport> {
        self.trained()?;
        evaluation::evaluate(self, test_spam, test_ham)
    }

    /// The training vocabulary.
    pub fn vocabulary(&self) -> Result<&Vocabulary> {
        Ok(&self.trained()?.vocabulary)
    }

    /// Aggregate statistics of one class.
    pub fn statistics(&self, class: ClassLabel) -> Result<&ClassStatistics> {
        Ok(&self.trained()?.class(class).statistics)
    }

    /// Log-prior of one class.
    pub fn log_prior(&self, class: ClassLabel) -> Result<f64> {
        Ok(self.statistics(class)?.log_prior())
    }

    /// `log P(term | class)`, `None` for a term outside the vocabulary.
    pub fn log_probability(&self, term: &str, class: ClassLabel) -> Result<Option<f64>> {
        Ok(self.trained()?.class(class).table.log_probability(term))
    }
}

fn check_label(corpus: &Corpus, expected: ClassLabel) -> Result<()> {
    if corpus.label() != expected {
        return Err(SpamsiftError::invalid_argument(format!(
            "expected a {expected} corpus, got a {} corpus",
            corpus.label()
        )));
    }
    Ok(())
}

impl DocumentClassifier for NaiveBayesModel {
    fn classify(&self, document: &FeatureVector) -> Result<ClassLabel> {
        NaiveBayesModel::classify(self, document)
    }

    fn name(&self) -> &str {
        "naive_bayes"
    }
}

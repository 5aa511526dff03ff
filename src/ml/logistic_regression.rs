//! L2-regularized logistic regression trained by batch gradient ascent.
//!
//! Weights are sparse: only the bias and terms observed in the training
//! corpora get an entry, so one gradient round costs time proportional to
//! the number of term occurrences in the training set.
//!
//! Each round computes, against the weights as they stood at the start of
//! the round,
//!
//! ```text
//! e_d      = y_d − σ(w · x_d)
//! Δ_k      = Σ_d x_dk × e_d
//! w_k     ← w_k + η (Δ_k − λ w_k)
//! ```
//!
//! and only then updates every weight. The bias is updated (and
//! regularized) like any other weight.

use std::time::Instant;

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corpus::{ClassLabel, Corpus};
use crate::error::{Result, SpamsiftError};
use crate::feature::FeatureVector;
use crate::ml::classifier::{DocumentClassifier, TieBreak};
use crate::ml::evaluation::percentage;

/// Decision threshold on the sigmoid output.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// How the gradient accumulator behaves between rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaPolicy {
    /// Start every round from a zero gradient (true batch gradient ascent).
    #[default]
    ResetEachRound,
    /// Keep adding each round's gradient onto the previous rounds' sums.
    ///
    /// Reproduces the behavior of the historical implementation, where the
    /// accumulator was never cleared.
    Accumulate,
}

/// Logistic regression hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticRegressionConfig {
    /// Step size η.
    pub learning_rate: f64,
    /// L2 regularization strength λ; `0` disables regularization.
    pub lambda: f64,
    /// Initial value of every weight, bias included.
    pub init_value: f64,
    /// Gradient accumulator behavior between rounds.
    pub delta_policy: DeltaPolicy,
    /// Compute per-document gradient contributions on the rayon pool.
    pub parallel: bool,
    /// Class chosen when the sigmoid is exactly at the threshold.
    pub tie_break: TieBreak,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            lambda: 100.0,
            init_value: 1.0,
            delta_policy: DeltaPolicy::default(),
            parallel: false,
            tie_break: TieBreak::default(),
        }
    }
}

impl LogisticRegressionConfig {
    /// Reject hyperparameters that can only produce NaN or diverge by
    /// construction.
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(SpamsiftError::config(format!(
                "learning_rate must be a finite non-negative number, got {}",
                self.learning_rate
            )));
        }
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(SpamsiftError::config(format!(
                "lambda must be a finite non-negative number, got {}",
                self.lambda
            )));
        }
        if !self.init_value.is_finite() {
            return Err(SpamsiftError::config(format!(
                "init_value must be finite, got {}",
                self.init_value
            )));
        }
        Ok(())
    }
}

/// The logistic function `1 / (1 + e^-z)`.
pub fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Sparse weights: an explicit intercept plus one weight per known term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightVector {
    bias: f64,
    weights: AHashMap<String, f64>,
}

impl WeightVector {
    /// Give the bias and every term of every document in `corpora` the
    /// weight `init_value`.
    pub fn initialize<'a, I>(corpora: I, init_value: f64) -> Self
    where
        I: IntoIterator<Item = &'a Corpus>,
    {
        let mut weights: AHashMap<String, f64> = AHashMap::new();
        for corpus in corpora {
            for document in corpus {
                for (term, _) in document.terms() {
                    if !weights.contains_key(term) {
                        weights.insert(term.to_string(), init_value);
                    }
                }
            }
        }

        WeightVector {
            bias: init_value,
            weights,
        }
    }

    /// The intercept w0.
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Weight of `term`, `None` if the term was never observed in training.
    pub fn weight(&self, term: &str) -> Option<f64> {
        self.weights.get(term).copied()
    }

    /// Number of term weights, bias excluded.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether there are no term weights.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterate over `(term, weight)` pairs, bias excluded.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.weights.iter().map(|(term, &weight)| (term.as_str(), weight))
    }

    /// Linear score `w0 × x0 + Σ count × weight` over the known terms of
    /// `document`.
    pub fn linear_score(&self, document: &FeatureVector) -> f64 {
        document
            .terms()
            .filter_map(|(term, count)| self.weight(term).map(|w| count as f64 * w))
            .fold(self.bias * document.bias() as f64, |acc, x| acc + x)
    }

    fn apply(&mut self, delta: &Gradient, learning_rate: f64, lambda: f64) {
        self.bias += learning_rate * (delta.bias - lambda * self.bias);
        for (term, weight) in self.weights.iter_mut() {
            let step = delta.terms.get(term).copied().unwrap_or(0.0);
            *weight += learning_rate * (step - lambda * *weight);
        }
    }
}

/// Per-feature sums of `count × error` plus the data log-likelihood.
#[derive(Debug, Clone, Default)]
struct Gradient {
    bias: f64,
    terms: AHashMap<String, f64>,
    log_likelihood: f64,
}

impl Gradient {
    fn add_document(&mut self, weights: &WeightVector, document: &FeatureVector, label: ClassLabel) {
        let probability = logistic(weights.linear_score(document));
        let error = label.target() - probability;

        self.bias += document.bias() as f64 * error;
        for (term, count) in document.terms() {
            let contribution = count as f64 * error;
            match self.terms.get_mut(term) {
                Some(sum) => *sum += contribution,
                None => {
                    self.terms.insert(term.to_string(), contribution);
                }
            }
        }

        self.log_likelihood += match label {
            ClassLabel::Spam => probability.ln(),
            ClassLabel::Ham => (1.0 - probability).ln(),
        };
    }

    fn merge(mut self, other: Gradient) -> Gradient {
        self.bias += other.bias;
        self.log_likelihood += other.log_likelihood;
        for (term, sum) in other.terms {
            *self.terms.entry(term).or_insert(0.0) += sum;
        }
        self
    }

    fn sequential(weights: &WeightVector, corpora: [&Corpus; 2]) -> Gradient {
        let mut gradient = Gradient::default();
        for corpus in corpora {
            for document in corpus {
                gradient.add_document(weights, document, corpus.label());
            }
        }
        gradient
    }

    fn parallel(weights: &WeightVector, corpora: [&Corpus; 2]) -> Gradient {
        corpora
            .into_iter()
            .map(|corpus| {
                let label = corpus.label();
                corpus
                    .documents()
                    .par_iter()
                    .fold(Gradient::default, |mut acc, document| {
                        acc.add_document(weights, document, label);
                        acc
                    })
                    .reduce(Gradient::default, Gradient::merge)
            })
            .fold(Gradient::default(), Gradient::merge)
    }
}

/// Summary of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Gradient rounds performed.
    pub iterations: usize,
    /// Log-likelihood of the training data at the start of each round.
    pub log_likelihoods: Vec<f64>,
    /// Training documents across both corpora.
    pub documents: usize,
    /// Term weights learned, bias excluded.
    pub features: usize,
    /// Wall-clock training time in milliseconds.
    pub training_time_ms: u64,
    /// When training finished.
    pub trained_at: DateTime<Utc>,
}

/// Binary logistic regression classifier over sparse word counts.
///
/// # Examples
///
/// ```
/// use spamsift::corpus::{ClassLabel, Corpus};
/// use spamsift::feature::FeatureVector;
/// use spamsift::ml::logistic_regression::LogisticRegressionModel;
///
/// let spam = Corpus::new(ClassLabel::Spam, vec![FeatureVector::from_terms(["win", "cash"])]);
/// let ham = Corpus::new(ClassLabel::Ham, vec![FeatureVector::from_terms(["team", "meeting"])]);
///
/// let mut model = LogisticRegressionModel::new(0.1, 0.0, 0.0);
/// model.train(&ham, &spam, 100).unwrap();
///
/// let p = model.sigmoid(&FeatureVector::from_terms(["cash"])).unwrap();
/// assert!(p > 0.5 && p < 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogisticRegressionModel {
    config: LogisticRegressionConfig,
    weights: Option<WeightVector>,
}

impl LogisticRegressionModel {
    /// Create an untrained model from the three core hyperparameters.
    pub fn new(learning_rate: f64, lambda: f64, init_value: f64) -> Self {
        Self::with_config(LogisticRegressionConfig {
            learning_rate,
            lambda,
            init_value,
            ..LogisticRegressionConfig::default()
        })
    }

    /// Create an untrained model from a full configuration.
    pub fn with_config(config: LogisticRegressionConfig) -> Self {
        LogisticRegressionModel {
            config,
            weights: None,
        }
    }

    /// The model hyperparameters.
    pub fn config(&self) -> &LogisticRegressionConfig {
        &self.config
    }

    /// Whether [`train`](Self::train) has completed.
    pub fn is_trained(&self) -> bool {
        self.weights.is_some()
    }

    /// The learned weights, `None` before training.
    pub fn weights(&self) -> Option<&WeightVector> {
        self.weights.as_ref()
    }

    fn trained(&self) -> Result<&WeightVector> {
        self.weights
            .as_ref()
            .ok_or_else(|| SpamsiftError::not_trained("logistic_regression"))
    }

    /// `P(spam | document) = σ(w0 + Σ count × weight)`.
    ///
    /// Terms without a weight are left out of the sum.
    pub fn sigmoid(&self, document: &FeatureVector) -> Result<f64> {
        Ok(logistic(self.trained()?.linear_score(document)))
    }

    /// Re-initialize all weights to `init_value` and run exactly
    /// `iterations` rounds of gradient ascent over both corpora.
    ///
    /// Each corpus contributes its own label as the regression target.
    /// `iterations == 0` leaves every weight at `init_value`.
    pub fn train(&mut self, ham: &Corpus, spam: &Corpus, iterations: usize) -> Result<TrainingStats> {
        self.config.validate()?;

        let start_time = Instant::now();
        let LogisticRegressionConfig {
            learning_rate,
            lambda,
            init_value,
            delta_policy,
            parallel,
            ..
        } = self.config;

        let corpora = [ham, spam];
        let mut weights = WeightVector::initialize(corpora, init_value);
        let mut delta = Gradient::default();
        let mut log_likelihoods = Vec::with_capacity(iterations);

        for round in 0..iterations {
            let gradient = if parallel {
                Gradient::parallel(&weights, corpora)
            } else {
                Gradient::sequential(&weights, corpora)
            };
            log_likelihoods.push(gradient.log_likelihood);

            delta = match delta_policy {
                DeltaPolicy::ResetEachRound => gradient,
                DeltaPolicy::Accumulate => delta.merge(gradient),
            };
            weights.apply(&delta, learning_rate, lambda);

            debug!(
                "round {}/{}: log-likelihood {:.6}, bias {:.6}",
                round + 1,
                iterations,
                log_likelihoods[round],
                weights.bias()
            );
        }

        let stats = TrainingStats {
            iterations,
            log_likelihoods,
            documents: ham.len() + spam.len(),
            features: weights.len(),
            training_time_ms: start_time.elapsed().as_millis() as u64,
            trained_at: Utc::now(),
        };

        info!(
            "Trained logistic regression on {} documents, {} features, {} rounds in {}ms",
            stats.documents, stats.features, stats.iterations, stats.training_time_ms
        );

        self.weights = Some(weights);
        Ok(stats)
    }

    /// Number of documents of `corpus` on the correct side of the threshold.
    ///
    /// A sigmoid of exactly `0.5` is a miss for either label.
    pub fn predict(&self, corpus: &Corpus) -> Result<usize> {
        let weights = self.trained()?;
        let hits = corpus
            .iter()
            .filter(|document| {
                let output = logistic(weights.linear_score(document));
                match corpus.label() {
                    ClassLabel::Spam => output > DECISION_THRESHOLD,
                    ClassLabel::Ham => output < DECISION_THRESHOLD,
                }
            })
            .count();
        Ok(hits)
    }

    /// Percentage of documents of both corpora predicted correctly, `0.0`
    /// when both are empty.
    pub fn accuracy(&self, ham: &Corpus, spam: &Corpus) -> Result<f64> {
        let hits = self.predict(ham)? + self.predict(spam)?;
        Ok(percentage(hits, ham.len() + spam.len()))
    }

    /// Spam above the threshold, ham below it, tie-break at exactly `0.5`.
    pub fn classify(&self, document: &FeatureVector) -> Result<ClassLabel> {
        let output = self.sigmoid(document)?;
        Ok(self.config.tie_break.decide(output, DECISION_THRESHOLD))
    }
}

impl DocumentClassifier for LogisticRegressionModel {
    fn classify(&self, document: &FeatureVector) -> Result<ClassLabel> {
        LogisticRegressionModel::classify(self, document)
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(label: ClassLabel, docs: &[&[(&str, u64)]]) -> Corpus {
        Corpus::new(
            label,
            docs.iter()
                .map(|terms| FeatureVector::from_counts(terms.iter().copied()))
                .collect(),
        )
    }

    fn separable() -> (Corpus, Corpus) {
        let ham = corpus(
            ClassLabel::Ham,
            &[&[("meeting", 1), ("notes", 1)], &[("meeting", 2), ("lunch", 1)]],
        );
        let spam = corpus(
            ClassLabel::Spam,
            &[&[("win", 2), ("cash", 1)], &[("win", 1), ("prize", 1)]],
        );
        (ham, spam)
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_default_hyperparameters() {
        let model = LogisticRegressionModel::default();
        assert_eq!(model.config().learning_rate, 0.001);
        assert_eq!(model.config().lambda, 100.0);
        assert_eq!(model.config().init_value, 1.0);
        assert_eq!(model.config().delta_policy, DeltaPolicy::ResetEachRound);
        assert!(!model.config().parallel);
    }

    #[test]
    fn test_logistic_function() {
        assert_eq!(logistic(0.0), 0.5);
        assert_close(logistic(2.0), 1.0 / (1.0 + (-2.0f64).exp()));
        assert_close(logistic(-3.0) + logistic(3.0), 1.0);
    }

    #[test]
    fn test_weight_initialization() {
        let (ham, spam) = separable();
        let weights = WeightVector::initialize([&ham, &spam], 0.25);

        assert_eq!(weights.bias(), 0.25);
        assert_eq!(weights.len(), 6);
        assert!(weights.iter().all(|(_, w)| w == 0.25));
        assert_eq!(weights.weight("unseen"), None);
    }

    #[test]
    fn test_learns_separable_data() {
        let (ham, spam) = separable();
        let mut model = LogisticRegressionModel::new(0.1, 0.0, 0.0);
        let stats = model.train(&ham, &spam, 200).unwrap();

        assert_eq!(stats.iterations, 200);
        assert_eq!(stats.log_likelihoods.len(), 200);
        assert_eq!(stats.documents, 4);
        assert_eq!(stats.features, 6);
        assert!(stats.log_likelihoods[199] > stats.log_likelihoods[0]);

        assert_eq!(model.accuracy(&ham, &spam).unwrap(), 100.0);
        let weights = model.weights().unwrap();
        assert!(weights.weight("win").unwrap() > 0.0);
        assert!(weights.weight("meeting").unwrap() < 0.0);
        assert_eq!(
            model.classify(&FeatureVector::from_terms(["win"])).unwrap(),
            ClassLabel::Spam
        );
    }

    #[test]
    fn test_sigmoid_ignores_unknown_terms() {
        let (ham, spam) = separable();
        let mut model = LogisticRegressionModel::new(0.1, 0.0, 0.0);
        model.train(&ham, &spam, 10).unwrap();

        let known = FeatureVector::from_terms(["win", "meeting"]);
        let with_unknown = FeatureVector::from_terms(["win", "meeting", "zebra"]);
        assert_eq!(
            model.sigmoid(&known).unwrap(),
            model.sigmoid(&with_unknown).unwrap()
        );
    }

    #[test]
    fn test_sigmoid_stays_in_open_interval() {
        let (ham, spam) = separable();
        let mut model = LogisticRegressionModel::new(0.05, 0.5, -0.5);
        model.train(&ham, &spam, 50).unwrap();

        for document in ham.iter().chain(spam.iter()) {
            let p = model.sigmoid(document).unwrap();
            assert!(p > 0.0 && p < 1.0);
        }
        let p = model.sigmoid(&FeatureVector::empty()).unwrap();
        assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    fn test_zero_learning_rate_keeps_initial_weights() {
        let (ham, spam) = separable();
        let mut model = LogisticRegressionModel::new(0.0, 100.0, 0.7);
        model.train(&ham, &spam, 25).unwrap();

        let weights = model.weights().unwrap();
        assert_eq!(weights.bias(), 0.7);
        assert!(weights.iter().all(|(_, w)| w == 0.7));
    }

    #[test]
    fn test_zero_iterations_is_noop() {
        let spam = corpus(ClassLabel::Spam, &[&[("free", 1)]]);
        let ham = Corpus::empty(ClassLabel::Ham);
        let mut model = LogisticRegressionModel::new(0.001, 100.0, 1.0);
        let stats = model.train(&ham, &spam, 0).unwrap();

        assert_eq!(stats.iterations, 0);
        assert!(stats.log_likelihoods.is_empty());

        // z = w0 × 1 + 1 × w_free = 2
        let expected = 1.0 / (1.0 + (-2.0f64).exp());
        assert_close(model.sigmoid(&spam.documents()[0]).unwrap(), expected);
        assert_eq!(model.predict(&spam).unwrap(), 1);
        assert_eq!(model.accuracy(&ham, &spam).unwrap(), 100.0);
    }

    #[test]
    fn test_single_round_matches_hand_computation() {
        let spam = corpus(ClassLabel::Spam, &[&[("free", 2)]]);
        let ham = corpus(ClassLabel::Ham, &[&[("hello", 1)]]);
        let (eta, lambda, init) = (0.1, 0.5, 0.0);
        let mut model = LogisticRegressionModel::new(eta, lambda, init);
        model.train(&ham, &spam, 1).unwrap();

        // All weights zero: σ = 0.5 for both documents.
        let spam_error = 1.0 - 0.5;
        let ham_error = 0.0 - 0.5;
        let weights = model.weights().unwrap();
        assert_close(weights.bias(), eta * (spam_error + ham_error));
        assert_close(weights.weight("free").unwrap(), eta * 2.0 * spam_error);
        assert_close(weights.weight("hello").unwrap(), eta * ham_error);
    }

    #[test]
    fn test_two_rounds_match_hand_computation() {
        let spam = corpus(ClassLabel::Spam, &[&[("free", 2)]]);
        let ham = corpus(ClassLabel::Ham, &[&[("hello", 1)]]);
        let (eta, lambda) = (0.1, 0.5);
        let sigma = |z: f64| 1.0 / (1.0 + (-z).exp());

        // Round one starts from zero weights.
        let (b1, f1, h1) = (0.0, eta * 2.0 * 0.5, eta * -0.5);
        // Round two recomputes errors with the round-one weights and a fresh delta.
        let spam_error = 1.0 - sigma(b1 + 2.0 * f1);
        let ham_error = 0.0 - sigma(b1 + h1);
        let b2 = b1 + eta * ((spam_error + ham_error) - lambda * b1);
        let f2 = f1 + eta * (2.0 * spam_error - lambda * f1);
        let h2 = h1 + eta * (ham_error - lambda * h1);

        let mut model = LogisticRegressionModel::new(eta, lambda, 0.0);
        model.train(&ham, &spam, 2).unwrap();
        let weights = model.weights().unwrap();
        assert_close(weights.bias(), b2);
        assert_close(weights.weight("free").unwrap(), f2);
        assert_close(weights.weight("hello").unwrap(), h2);
        assert!((weights.bias() - -0.0037336600828).abs() < 1e-12);
        assert!((weights.weight("free").unwrap() - 0.1850332005375).abs() < 1e-12);

        // Carrying the round-one delta over adds its 2 * 0.5 to the free term.
        let accumulate = LogisticRegressionConfig {
            learning_rate: eta,
            lambda,
            init_value: 0.0,
            delta_policy: DeltaPolicy::Accumulate,
            ..LogisticRegressionConfig::default()
        };
        let mut stale = LogisticRegressionModel::with_config(accumulate);
        stale.train(&ham, &spam, 2).unwrap();
        let stale_free = stale.weights().unwrap().weight("free").unwrap();
        assert_close(stale_free, f1 + eta * (2.0 * 0.5 + 2.0 * spam_error - lambda * f1));
        assert!(stale_free > f2);
    }

    #[test]
    fn test_regularization_shrinks_weights() {
        let (ham, spam) = separable();

        let mut plain = LogisticRegressionModel::new(0.001, 0.0, 1.0);
        plain.train(&ham, &spam, 50).unwrap();
        let mut ridge = LogisticRegressionModel::new(0.001, 10.0, 1.0);
        ridge.train(&ham, &spam, 50).unwrap();

        let plain_weights = plain.weights().unwrap();
        let ridge_weights = ridge.weights().unwrap();
        for (term, plain_weight) in plain_weights.iter() {
            let ridge_weight = ridge_weights.weight(term).unwrap();
            assert!(
                ridge_weight.abs() < plain_weight.abs(),
                "{term}: {ridge_weight} vs {plain_weight}"
            );
        }
    }

    #[test]
    fn test_single_document_update_includes_decay() {
        let spam = corpus(ClassLabel::Spam, &[&[("ghost", 1)]]);
        let ham = Corpus::empty(ClassLabel::Ham);
        let mut model = LogisticRegressionModel::new(0.01, 1.0, 1.0);
        model.train(&ham, &spam, 1).unwrap();

        // z = w0 + w_ghost = 2
        let z: f64 = 2.0;
        let error = 1.0 - 1.0 / (1.0 + (-z).exp());
        let expected = 1.0 + 0.01 * (error - 1.0);
        assert_close(model.weights().unwrap().weight("ghost").unwrap(), expected);
    }

    #[test]
    fn test_delta_policies_diverge_after_first_round() {
        let (ham, spam) = separable();

        let reset = LogisticRegressionConfig {
            learning_rate: 0.01,
            lambda: 0.1,
            init_value: 0.0,
            ..LogisticRegressionConfig::default()
        };
        let accumulate = LogisticRegressionConfig {
            delta_policy: DeltaPolicy::Accumulate,
            ..reset
        };

        let mut a = LogisticRegressionModel::with_config(reset);
        let mut b = LogisticRegressionModel::with_config(accumulate);
        a.train(&ham, &spam, 1).unwrap();
        b.train(&ham, &spam, 1).unwrap();
        assert_eq!(a.weights(), b.weights());

        a.train(&ham, &spam, 3).unwrap();
        b.train(&ham, &spam, 3).unwrap();
        let a_win = a.weights().unwrap().weight("win").unwrap();
        let b_win = b.weights().unwrap().weight("win").unwrap();
        // Stale deltas keep pushing in the same direction.
        assert!(b_win > a_win);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (ham, spam) = separable();
        let sequential = LogisticRegressionConfig {
            learning_rate: 0.05,
            lambda: 0.2,
            init_value: 0.5,
            ..LogisticRegressionConfig::default()
        };
        let parallel = LogisticRegressionConfig {
            parallel: true,
            ..sequential
        };

        let mut a = LogisticRegressionModel::with_config(sequential);
        let mut b = LogisticRegressionModel::with_config(parallel);
        let a_stats = a.train(&ham, &spam, 30).unwrap();
        let b_stats = b.train(&ham, &spam, 30).unwrap();

        let a_weights = a.weights().unwrap();
        let b_weights = b.weights().unwrap();
        assert_close(a_weights.bias(), b_weights.bias());
        for (term, weight) in a_weights.iter() {
            assert_close(weight, b_weights.weight(term).unwrap());
        }
        assert_close(
            *a_stats.log_likelihoods.last().unwrap(),
            *b_stats.log_likelihoods.last().unwrap(),
        );
    }

    #[test]
    fn test_retraining_reinitializes() {
        let (ham, spam) = separable();
        let mut model = LogisticRegressionModel::new(0.1, 0.0, 0.0);
        model.train(&ham, &spam, 20).unwrap();
        let first = model.weights().unwrap().clone();

        model.train(&ham, &spam, 20).unwrap();
        assert_eq!(model.weights().unwrap(), &first);

        let other = corpus(ClassLabel::Spam, &[&[("offer", 1)]]);
        model.train(&Corpus::empty(ClassLabel::Ham), &other, 0).unwrap();
        assert_eq!(model.weights().unwrap().len(), 1);
    }

    #[test]
    fn test_threshold_is_a_miss_for_both_labels() {
        // init 0 and no rounds: σ = 0.5 everywhere.
        let (ham, spam) = separable();
        let mut model = LogisticRegressionModel::new(0.1, 0.0, 0.0);
        model.train(&ham, &spam, 0).unwrap();

        assert_eq!(model.predict(&ham).unwrap(), 0);
        assert_eq!(model.predict(&spam).unwrap(), 0);
        assert_eq!(model.accuracy(&ham, &spam).unwrap(), 0.0);
        assert_eq!(
            model.classify(&FeatureVector::from_terms(["win"])).unwrap(),
            ClassLabel::Ham
        );
    }

    #[test]
    fn test_untrained_model_fails_fast() {
        let model = LogisticRegressionModel::default();
        let doc = FeatureVector::from_terms(["x"]);

        assert!(!model.is_trained());
        assert!(matches!(
            model.sigmoid(&doc),
            Err(SpamsiftError::ModelNotTrained(_))
        ));
        assert!(matches!(
            model.predict(&Corpus::empty(ClassLabel::Ham)),
            Err(SpamsiftError::ModelNotTrained(_))
        ));
    }

    #[test]
    fn test_invalid_hyperparameters() {
        let (ham, spam) = separable();
        let mut model = LogisticRegressionModel::new(f64::NAN, 1.0, 1.0);
        assert!(matches!(
            model.train(&ham, &spam, 1),
            Err(SpamsiftError::Config(_))
        ));
        assert!(!model.is_trained());

        let config = LogisticRegressionConfig {
            lambda: -2.0,
            ..LogisticRegressionConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

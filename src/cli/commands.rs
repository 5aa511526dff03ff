//! Command implementations for the Spamsift CLI.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Instant;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::SpamsiftConfig;
use crate::corpus::loader::{load_corpus_dir, load_stop_words};
use crate::corpus::{ClassLabel, Corpus};
use crate::error::Result;
use crate::feature::FeatureExtractor;
use crate::ml::logistic_regression::{DeltaPolicy, LogisticRegressionModel};
use crate::ml::naive_bayes::NaiveBayesModel;
use crate::ml::{DocumentClassifier, EvaluationReport};

/// Execute a CLI command.
pub fn execute_command(args: SpamsiftArgs) -> Result<()> {
    match &args.command {
        Command::NaiveBayes(nb_args) => run_naive_bayes(nb_args.clone(), &args),
        Command::LogisticRegression(lr_args) => run_logistic_regression(lr_args.clone(), &args),
        Command::Classify(classify_args) => classify_document(classify_args.clone(), &args),
    }
}

/// Load the configuration file, if any, and apply command line overrides.
pub fn resolve_config(
    training: &TrainingArgs,
    hyperparameters: Option<&HyperparameterArgs>,
) -> Result<SpamsiftConfig> {
    let mut config = match &training.config {
        Some(path) => SpamsiftConfig::from_file(path)?,
        None => SpamsiftConfig::default(),
    };

    if let Some(hp) = hyperparameters {
        let lr = &mut config.logistic_regression;
        if let Some(learning_rate) = hp.learning_rate {
            lr.learning_rate = learning_rate;
        }
        if let Some(lambda) = hp.lambda {
            lr.lambda = lambda;
        }
        if let Some(init_value) = hp.init_value {
            lr.init_value = init_value;
        }
        if hp.accumulate_deltas {
            lr.delta_policy = DeltaPolicy::Accumulate;
        }
        if hp.parallel {
            lr.parallel = true;
        }
        if let Some(iterations) = hp.iterations {
            config.iterations = iterations;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Stop-word sets to evaluate with, each tagged with whether it is the
/// configured list: the configured list first, then optionally no list for
/// comparison.
fn stop_word_variants(training: &TrainingArgs, compare: bool) -> Vec<(bool, HashSet<String>)> {
    let stop_words = training
        .stop_words
        .as_ref()
        .map(load_stop_words)
        .unwrap_or_default();

    let mut variants = vec![(training.stop_words.is_some(), stop_words)];
    if compare {
        variants.push((false, HashSet::new()));
    }
    variants
}

/// Spam and ham corpora loaded from a pair of directories.
struct CorpusPair {
    spam: Corpus,
    ham: Corpus,
}

impl CorpusPair {
    fn load(extractor: &FeatureExtractor, spam_dir: &Path, ham_dir: &Path) -> Result<Self> {
        Ok(CorpusPair {
            spam: load_corpus_dir(extractor, spam_dir, ClassLabel::Spam)?,
            ham: load_corpus_dir(extractor, ham_dir, ClassLabel::Ham)?,
        })
    }

    fn len(&self) -> usize {
        self.spam.len() + self.ham.len()
    }
}

/// Train Naive Bayes once per stop-word variant and evaluate each model on
/// the test directories.
pub fn evaluate_naive_bayes(args: &NaiveBayesArgs) -> Result<EvaluationResults> {
    let config = resolve_config(&args.training, None)?;
    let mut runs = Vec::new();

    for (with_stop_words, stop_words) in
        stop_word_variants(&args.training, args.test.compare_stop_words)
    {
        let extractor = FeatureExtractor::from_config(&config.analysis, stop_words)?;
        let train = CorpusPair::load(&extractor, &args.training.train_spam, &args.training.train_ham)?;
        let test = CorpusPair::load(&extractor, &args.test.test_spam, &args.test.test_ham)?;

        let start_time = Instant::now();
        let mut model = NaiveBayesModel::with_config(config.naive_bayes);
        model.train(&train.spam, &train.ham)?;
        let training_time_ms = start_time.elapsed().as_millis() as u64;

        let report = model.evaluation_report(&test.spam, &test.ham)?;
        runs.push(EvaluationRun {
            model: model.name().to_string(),
            stop_words: with_stop_words,
            training_documents: train.len(),
            features: model.vocabulary()?.len(),
            accuracy: report.accuracy(),
            spam_accuracy: report.class_accuracy(ClassLabel::Spam),
            ham_accuracy: report.class_accuracy(ClassLabel::Ham),
            report,
            iterations: None,
            final_log_likelihood: None,
            training_time_ms,
        });
    }

    Ok(EvaluationResults { runs })
}

/// Train logistic regression once per stop-word variant and evaluate each
/// model on the test directories.
pub fn evaluate_logistic_regression(args: &LogisticRegressionArgs) -> Result<EvaluationResults> {
    let config = resolve_config(&args.training, Some(&args.hyperparameters))?;
    let mut runs = Vec::new();

    for (with_stop_words, stop_words) in
        stop_word_variants(&args.training, args.test.compare_stop_words)
    {
        let extractor = FeatureExtractor::from_config(&config.analysis, stop_words)?;
        let train = CorpusPair::load(&extractor, &args.training.train_spam, &args.training.train_ham)?;
        let test = CorpusPair::load(&extractor, &args.test.test_spam, &args.test.test_ham)?;

        let mut model = LogisticRegressionModel::with_config(config.logistic_regression);
        let stats = model.train(&train.ham, &train.spam, config.iterations)?;

        let report = EvaluationReport {
            spam_hits: model.predict(&test.spam)?,
            spam_total: test.spam.len(),
            ham_hits: model.predict(&test.ham)?,
            ham_total: test.ham.len(),
        };
        let accuracy = model.accuracy(&test.ham, &test.spam)?;
        info!("{}: {accuracy:.2}% on {} test documents", model.name(), test.len());

        runs.push(EvaluationRun {
            model: model.name().to_string(),
            stop_words: with_stop_words,
            training_documents: stats.documents,
            features: stats.features,
            accuracy,
            spam_accuracy: report.class_accuracy(ClassLabel::Spam),
            ham_accuracy: report.class_accuracy(ClassLabel::Ham),
            report,
            iterations: Some(stats.iterations),
            final_log_likelihood: stats.log_likelihoods.last().copied(),
            training_time_ms: stats.training_time_ms,
        });
    }

    Ok(EvaluationResults { runs })
}

/// Train and evaluate Naive Bayes.
fn run_naive_bayes(args: NaiveBayesArgs, cli_args: &SpamsiftArgs) -> Result<()> {
    let results = evaluate_naive_bayes(&args)?;
    output_result("Naive Bayes evaluation", &results, cli_args)
}

/// Train and evaluate logistic regression.
fn run_logistic_regression(args: LogisticRegressionArgs, cli_args: &SpamsiftArgs) -> Result<()> {
    let results = evaluate_logistic_regression(&args)?;
    output_result("Logistic regression evaluation", &results, cli_args)
}

/// Train the selected model and classify one document.
fn classify_document(args: ClassifyArgs, cli_args: &SpamsiftArgs) -> Result<()> {
    let config = resolve_config(&args.training, Some(&args.hyperparameters))?;
    let (_, stop_words) = stop_word_variants(&args.training, false)
        .into_iter()
        .next()
        .unwrap_or_default();
    let extractor = FeatureExtractor::from_config(&config.analysis, stop_words)?;
    let train = CorpusPair::load(&extractor, &args.training.train_spam, &args.training.train_ham)?;

    let bytes = fs::read(&args.document)?;
    let document = extractor.parse_document(&String::from_utf8_lossy(&bytes))?;

    let (model, label, spam_probability) = match args.model {
        ModelKind::NaiveBayes => {
            let mut model = NaiveBayesModel::with_config(config.naive_bayes);
            model.train(&train.spam, &train.ham)?;
            (
                model.name().to_string(),
                model.classify(&document)?,
                model.posterior_spam(&document)?,
            )
        }
        ModelKind::LogisticRegression => {
            let mut model = LogisticRegressionModel::with_config(config.logistic_regression);
            model.train(&train.ham, &train.spam, config.iterations)?;
            (
                model.name().to_string(),
                model.classify(&document)?,
                model.sigmoid(&document)?,
            )
        }
    };

    output_result(
        "Classification",
        &ClassificationResult {
            document: args.document.to_string_lossy().to_string(),
            model,
            label,
            spam_probability,
        },
        cli_args,
    )
}

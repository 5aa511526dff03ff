//! Command line argument parsing for the Spamsift CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Spamsift - spam/ham text classification
#[derive(Parser, Debug, Clone)]
#[command(name = "spamsift")]
#[command(about = "Train and evaluate Naive Bayes and logistic regression spam filters")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpamsiftArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpamsiftArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train and evaluate a Naive Bayes classifier
    #[command(name = "naive-bayes")]
    NaiveBayes(NaiveBayesArgs),

    /// Train and evaluate a logistic regression classifier
    #[command(name = "logistic-regression")]
    LogisticRegression(LogisticRegressionArgs),

    /// Train a classifier and classify a single document
    Classify(ClassifyArgs),
}

/// Training directories and analysis options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct TrainingArgs {
    /// Directory of spam training documents
    #[arg(value_name = "TRAIN_SPAM")]
    pub train_spam: PathBuf,

    /// Directory of ham training documents
    #[arg(value_name = "TRAIN_HAM")]
    pub train_ham: PathBuf,

    /// Stop-word file, one word per line
    #[arg(short, long, value_name = "FILE")]
    pub stop_words: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Held-out test directories.
#[derive(Args, Debug, Clone)]
pub struct TestArgs {
    /// Directory of spam test documents
    #[arg(value_name = "TEST_SPAM")]
    pub test_spam: PathBuf,

    /// Directory of ham test documents
    #[arg(value_name = "TEST_HAM")]
    pub test_ham: PathBuf,

    /// Also evaluate without the stop-word list
    #[arg(long, requires = "stop_words")]
    pub compare_stop_words: bool,
}

/// Arguments for the Naive Bayes command
#[derive(Parser, Debug, Clone)]
pub struct NaiveBayesArgs {
    #[command(flatten)]
    pub training: TrainingArgs,

    #[command(flatten)]
    pub test: TestArgs,
}

/// Logistic regression hyperparameter overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct HyperparameterArgs {
    /// Gradient ascent step size
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// L2 regularization strength
    #[arg(long)]
    pub lambda: Option<f64>,

    /// Initial value of every weight
    #[arg(long)]
    pub init_value: Option<f64>,

    /// Number of gradient ascent rounds
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Carry gradient sums over between rounds
    #[arg(long)]
    pub accumulate_deltas: bool,

    /// Compute gradients on all cores
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for the logistic regression command
#[derive(Parser, Debug, Clone)]
pub struct LogisticRegressionArgs {
    #[command(flatten)]
    pub training: TrainingArgs,

    #[command(flatten)]
    pub test: TestArgs,

    #[command(flatten)]
    pub hyperparameters: HyperparameterArgs,
}

/// Arguments for classifying one document
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub training: TrainingArgs,

    /// Document to classify
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Model to train
    #[arg(short, long, default_value = "nb")]
    pub model: ModelKind,

    #[command(flatten)]
    pub hyperparameters: HyperparameterArgs,
}

/// Learner selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Multinomial Naive Bayes
    #[value(name = "nb")]
    NaiveBayes,
    /// Logistic regression
    #[value(name = "lr")]
    LogisticRegression,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_bayes_command() {
        let args = SpamsiftArgs::try_parse_from([
            "spamsift",
            "naive-bayes",
            "train/spam",
            "train/ham",
            "test/spam",
            "test/ham",
            "--stop-words",
            "stopwords.txt",
            "--compare-stop-words",
        ])
        .unwrap();

        if let Command::NaiveBayes(nb_args) = args.command {
            assert_eq!(nb_args.training.train_spam, PathBuf::from("train/spam"));
            assert_eq!(nb_args.training.train_ham, PathBuf::from("train/ham"));
            assert_eq!(nb_args.test.test_spam, PathBuf::from("test/spam"));
            assert_eq!(nb_args.test.test_ham, PathBuf::from("test/ham"));
            assert_eq!(
                nb_args.training.stop_words,
                Some(PathBuf::from("stopwords.txt"))
            );
            assert!(nb_args.test.compare_stop_words);
            assert!(nb_args.training.config.is_none());
        } else {
            panic!("Expected NaiveBayes command");
        }
    }

    #[test]
    fn test_logistic_regression_command() {
        let args = SpamsiftArgs::try_parse_from([
            "spamsift",
            "logistic-regression",
            "a",
            "b",
            "c",
            "d",
            "--learning-rate",
            "0.01",
            "--lambda",
            "0.5",
            "--init-value",
            "0",
            "--iterations",
            "200",
            "--accumulate-deltas",
            "--parallel",
        ])
        .unwrap();

        if let Command::LogisticRegression(lr_args) = args.command {
            let hp = lr_args.hyperparameters;
            assert_eq!(hp.learning_rate, Some(0.01));
            assert_eq!(hp.lambda, Some(0.5));
            assert_eq!(hp.init_value, Some(0.0));
            assert_eq!(hp.iterations, Some(200));
            assert!(hp.accumulate_deltas);
            assert!(hp.parallel);
        } else {
            panic!("Expected LogisticRegression command");
        }
    }

    #[test]
    fn test_classify_command() {
        let args =
            SpamsiftArgs::try_parse_from(["spamsift", "classify", "spam", "ham", "mail.txt"])
                .unwrap();

        if let Command::Classify(classify_args) = args.command {
            assert_eq!(classify_args.document, PathBuf::from("mail.txt"));
            assert_eq!(classify_args.model, ModelKind::NaiveBayes);
        } else {
            panic!("Expected Classify command");
        }

        let args = SpamsiftArgs::try_parse_from([
            "spamsift", "classify", "spam", "ham", "mail.txt", "--model", "lr",
        ])
        .unwrap();
        if let Command::Classify(classify_args) = args.command {
            assert_eq!(classify_args.model, ModelKind::LogisticRegression);
        }
    }

    #[test]
    fn test_compare_stop_words_requires_a_list() {
        let result = SpamsiftArgs::try_parse_from([
            "spamsift",
            "naive-bayes",
            "a",
            "b",
            "c",
            "d",
            "--compare-stop-words",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_test_directories_is_an_error() {
        let result = SpamsiftArgs::try_parse_from(["spamsift", "naive-bayes", "a", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let base = ["spamsift", "classify", "s", "h", "d"];

        let args = SpamsiftArgs::try_parse_from(base).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = SpamsiftArgs::try_parse_from(["spamsift", "-vv", "classify", "s", "h", "d"])
            .unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = SpamsiftArgs::try_parse_from(["spamsift", "--quiet", "classify", "s", "h", "d"])
            .unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args = SpamsiftArgs::try_parse_from([
            "spamsift", "--format", "json", "--pretty", "classify", "s", "h", "d",
        ])
        .unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
        assert!(args.pretty);
    }
}

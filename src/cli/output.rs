//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SpamsiftArgs};
use crate::corpus::ClassLabel;
use crate::error::Result;
use crate::ml::EvaluationReport;

/// One train-then-evaluate run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRun {
    /// Learner name.
    pub model: String,
    /// Whether the stop-word list was applied.
    pub stop_words: bool,
    /// Training documents across both classes.
    pub training_documents: usize,
    /// Distinct features learned.
    pub features: usize,
    /// Percentage of test documents classified correctly.
    pub accuracy: f64,
    /// Percentage of spam test documents classified as spam.
    pub spam_accuracy: f64,
    /// Percentage of ham test documents classified as ham.
    pub ham_accuracy: f64,
    /// Per-class hit counts.
    pub report: EvaluationReport,
    /// Gradient rounds, logistic regression only.
    pub iterations: Option<usize>,
    /// Training log-likelihood before the last round, logistic regression only.
    pub final_log_likelihood: Option<f64>,
    pub training_time_ms: u64,
}

/// Result structure for the evaluation commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResults {
    pub runs: Vec<EvaluationRun>,
}

/// Result structure for single-document classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub document: String,
    pub model: String,
    pub label: ClassLabel,
    pub spam_probability: f64,
}

/// Output a command result in the requested format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &SpamsiftArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SpamsiftArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("EvaluationResults") => {
            output_evaluation_human(&value, args)
        }
        _ => output_generic_human(&value, args),
    }
}

/// Output evaluation runs in human format.
fn output_evaluation_human(value: &serde_json::Value, args: &SpamsiftArgs) -> Result<()> {
    let Some(runs) = value.get("runs").and_then(|r| r.as_array()) else {
        return Ok(());
    };

    for run in runs {
        let with_stop_words = run
            .get("stop_words")
            .and_then(|s| s.as_bool())
            .unwrap_or(false);
        let accuracy = run.get("accuracy").and_then(|a| a.as_f64()).unwrap_or(0.0);
        println!(
            "{}",
            format_accuracy_line(with_stop_words, accuracy)
        );

        if args.verbosity() > 1 {
            if let Some(report) = run.get("report").and_then(|r| r.as_object()) {
                for class in ["spam", "ham"] {
                    let hits = report
                        .get(&format!("{class}_hits"))
                        .and_then(|h| h.as_u64())
                        .unwrap_or(0);
                    let total = report
                        .get(&format!("{class}_total"))
                        .and_then(|t| t.as_u64())
                        .unwrap_or(0);
                    let class_accuracy = run
                        .get(&format!("{class}_accuracy"))
                        .and_then(|a| a.as_f64())
                        .unwrap_or(0.0);
                    println!("  {class}: {hits}/{total} ({class_accuracy:.2}%)");
                }
            }
            if let Some(features) = run.get("features").and_then(|f| f.as_u64()) {
                println!("  features: {features}");
            }
            if let Some(ll) = run.get("final_log_likelihood").and_then(|l| l.as_f64()) {
                println!("  log-likelihood: {ll:.4}");
            }
            if let Some(ms) = run.get("training_time_ms").and_then(|t| t.as_u64()) {
                println!("  training time: {ms}ms");
            }
        }
    }
    Ok(())
}

fn format_accuracy_line(with_stop_words: bool, accuracy: f64) -> String {
    if with_stop_words {
        format!("Accuracy with stop words: {accuracy:.2}%")
    } else {
        format!("Accuracy without stop words: {accuracy:.2}%")
    }
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, _args: &SpamsiftArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SpamsiftArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

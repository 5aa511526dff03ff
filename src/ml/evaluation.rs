//! Hit-rate evaluation of a trained classifier on held-out corpora.

use serde::{Deserialize, Serialize};

use crate::corpus::{ClassLabel, Corpus};
use crate::error::Result;
use crate::ml::classifier::DocumentClassifier;

/// Per-class hit counts of one evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Spam documents classified as spam.
    pub spam_hits: usize,
    /// Spam documents evaluated.
    pub spam_total: usize,
    /// Ham documents classified as ham.
    pub ham_hits: usize,
    /// Ham documents evaluated.
    pub ham_total: usize,
}

impl EvaluationReport {
    /// Record the outcome for one document whose true class is `label`.
    pub fn record(&mut self, label: ClassLabel, hit: bool) {
        let (hits, total) = match label {
            ClassLabel::Spam => (&mut self.spam_hits, &mut self.spam_total),
            ClassLabel::Ham => (&mut self.ham_hits, &mut self.ham_total),
        };
        *total += 1;
        if hit {
            *hits += 1;
        }
    }

    /// Correctly classified documents.
    pub fn hits(&self) -> usize {
        self.spam_hits + self.ham_hits
    }

    /// Evaluated documents.
    pub fn total(&self) -> usize {
        self.spam_total + self.ham_total
    }

    /// Percentage of correctly classified documents, `0.0` when nothing was
    /// evaluated.
    pub fn accuracy(&self) -> f64 {
        percentage(self.hits(), self.total())
    }

    /// Percentage of correctly classified documents of one class.
    pub fn class_accuracy(&self, label: ClassLabel) -> f64 {
        match label {
            ClassLabel::Spam => percentage(self.spam_hits, self.spam_total),
            ClassLabel::Ham => percentage(self.ham_hits, self.ham_total),
        }
    }
}

/// `hits / total × 100`, or `0.0` for an empty total.
pub fn percentage(hits: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64 * 100.0
    }
}

/// Classify every document of both test corpora and count hits.
///
/// A document is a hit when the predicted class equals the label of the
/// corpus it came from.
pub fn evaluate<C>(classifier: &C, test_spam: &Corpus, test_ham: &Corpus) -> Result<EvaluationReport>
where
    C: DocumentClassifier + ?Sized,
{
    let mut report = EvaluationReport::default();
    for corpus in [test_spam, test_ham] {
        for document in corpus {
            let predicted = classifier.classify(document)?;
            report.record(corpus.label(), predicted == corpus.label());
        }
    }

    log::info!(
        "{}: {}/{} correct ({:.2}%)",
        classifier.name(),
        report.hits(),
        report.total(),
        report.accuracy()
    );

    Ok(report)
}

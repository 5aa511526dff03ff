//! Classifier trait definition and the shared tie-break policy.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::corpus::ClassLabel;
use crate::error::Result;
use crate::feature::FeatureVector;

/// A trained two-class document classifier.
///
/// Both learners implement this trait so evaluation and the CLI can treat
/// them uniformly.
pub trait DocumentClassifier: Send + Sync {
    /// Predict the class of a parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`SpamsiftError::ModelNotTrained`](crate::error::SpamsiftError::ModelNotTrained)
    /// when called before training.
    fn classify(&self, document: &FeatureVector) -> Result<ClassLabel>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

/// Which class wins when the spam and ham scores are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Equal scores classify as ham.
    #[default]
    FavorHam,
    /// Equal scores classify as spam.
    FavorSpam,
}

impl TieBreak {
    /// The class chosen on a tie.
    pub fn winner(self) -> ClassLabel {
        match self {
            TieBreak::FavorHam => ClassLabel::Ham,
            TieBreak::FavorSpam => ClassLabel::Spam,
        }
    }

    /// Pick the class with the strictly greater score.
    ///
    /// Infinite scores compare as usual, so `-inf` never beats a finite
    /// score and two `-inf` scores tie. A NaN score never wins against a
    /// number; two NaN scores tie.
    pub fn decide(self, spam_score: f64, ham_score: f64) -> ClassLabel {
        match spam_score.partial_cmp(&ham_score) {
            Some(Ordering::Greater) => ClassLabel::Spam,
            Some(Ordering::Less) => ClassLabel::Ham,
            Some(Ordering::Equal) => self.winner(),
            None => match (spam_score.is_nan(), ham_score.is_nan()) {
                (true, false) => ClassLabel::Ham,
                (false, true) => ClassLabel::Spam,
                _ => self.winner(),
            },
        }
    }
}

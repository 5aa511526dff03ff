//! Labelled document collections.
//!
//! A [`Corpus`] is an ordered, read-only sequence of feature vectors that
//! all belong to one [`ClassLabel`]. Learners iterate it once per training
//! round; nothing ever mutates it after construction.

pub mod loader;

use std::fmt;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpamsiftError};
use crate::feature::{FeatureExtractor, FeatureVector};

/// One of the two document classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassLabel {
    /// Legitimate mail, label `0`.
    Ham,
    /// Unsolicited mail, label `1`.
    Spam,
}

impl ClassLabel {
    /// Both labels, ham first.
    pub const ALL: [ClassLabel; 2] = [ClassLabel::Ham, ClassLabel::Spam];

    /// Numeric label, `0` for ham and `1` for spam.
    pub fn as_u8(self) -> u8 {
        match self {
            ClassLabel::Ham => 0,
            ClassLabel::Spam => 1,
        }
    }

    /// Regression target used by logistic regression.
    pub fn target(self) -> f64 {
        f64::from(self.as_u8())
    }
}

impl TryFrom<u8> for ClassLabel {
    type Error = SpamsiftError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(ClassLabel::Ham),
            1 => Ok(ClassLabel::Spam),
            other => Err(SpamsiftError::invalid_argument(format!(
                "class label must be 0 or 1, got {other}"
            ))),
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassLabel::Ham => write!(f, "ham"),
            ClassLabel::Spam => write!(f, "spam"),
        }
    }
}

/// An ordered collection of documents sharing one class label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    label: ClassLabel,
    documents: Vec<FeatureVector>,
}

impl Corpus {
    /// Create a corpus from already-parsed documents.
    pub fn new(label: ClassLabel, documents: Vec<FeatureVector>) -> Self {
        Corpus { label, documents }
    }

    /// Create an empty corpus.
    pub fn empty(label: ClassLabel) -> Self {
        Self::new(label, Vec::new())
    }

    /// The class every document of this corpus belongs to.
    pub fn label(&self) -> ClassLabel {
        self.label
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate over the documents in order.
    pub fn iter(&self) -> slice::Iter<'_, FeatureVector> {
        self.documents.iter()
    }

    /// The documents as a slice.
    pub fn documents(&self) -> &[FeatureVector] {
        &self.documents
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a FeatureVector;
    type IntoIter = slice::Iter<'a, FeatureVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse every raw document with `extractor` into a corpus labelled `label`.
///
/// # Examples
///
/// ```
/// use spamsift::corpus::{build_corpus, ClassLabel};
/// use spamsift::feature::FeatureExtractor;
///
/// let extractor = FeatureExtractor::without_stop_words().unwrap();
/// let corpus = build_corpus(&extractor, ["cheap meds", "win cash now"], ClassLabel::Spam).unwrap();
///
/// assert_eq!(corpus.len(), 2);
/// assert_eq!(corpus.label(), ClassLabel::Spam);
/// ```
pub fn build_corpus<I, S>(extractor: &FeatureExtractor, documents: I, label: ClassLabel) -> Result<Corpus>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let documents = documents
        .into_iter()
        .map(|raw| extractor.parse_document(raw.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    Ok(Corpus::new(label, documents))
}

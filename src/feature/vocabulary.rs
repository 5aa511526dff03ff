//! Vocabulary aggregation over training corpora.

use ahash::AHashSet;

use crate::corpus::Corpus;
use crate::feature::vector::FeatureVector;

/// The set of term keys observed across training documents.
///
/// The vocabulary only grows through [`Vocabulary::observe`]; parsing a
/// document never touches it. The bias feature is never a member.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: AHashSet<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of the term keys of every document in `corpora`.
    pub fn from_corpora<'a, I>(corpora: I) -> Self
    where
        I: IntoIterator<Item = &'a Corpus>,
    {
        let mut vocabulary = Self::new();
        for corpus in corpora {
            for document in corpus {
                vocabulary.observe(document);
            }
        }
        vocabulary
    }

    /// Add every term of `document` to the vocabulary.
    pub fn observe(&mut self, document: &FeatureVector) {
        for (term, _) in document.terms() {
            if !self.terms.contains(term) {
                self.terms.insert(term.to_string());
            }
        }
    }

    /// Whether `term` was observed.
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    /// Number of distinct terms, `|V|`.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no term has been observed.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over the terms in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.iter().map(String::as_str)
    }
}

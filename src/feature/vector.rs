//! Sparse per-document feature vectors.

use ahash::AHashMap;

/// Word-count features of a single document.
///
/// Every vector carries exactly one bias feature with value
/// [`FeatureVector::BIAS`]. The bias lives outside the term map, so no token
/// can ever be mistaken for it. Term keys are whatever the analysis pipeline
/// produced (lowercase alphabetic tokens with the default pipeline) and always
/// have a count of at least one.
///
/// Vectors are immutable once built.
///
/// # Examples
///
/// ```
/// use spamsift::feature::FeatureVector;
///
/// let doc = FeatureVector::from_terms(["free", "money", "free"]);
/// assert_eq!(doc.count("free"), 2);
/// assert_eq!(doc.count("lunch"), 0);
/// assert_eq!(doc.bias(), 1);
/// assert_eq!(doc.total_count(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureVector {
    terms: AHashMap<String, u64>,
}

impl FeatureVector {
    /// Value of the bias (intercept) feature present in every document.
    pub const BIAS: u64 = 1;

    /// A vector holding only the bias feature.
    ///
    /// This is what a document with no usable words turns into, including
    /// documents that could not be read at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a vector by counting occurrences of each term.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts: AHashMap<String, u64> = AHashMap::new();
        for term in terms {
            *counts.entry(term.into()).or_insert(0) += 1;
        }
        FeatureVector { terms: counts }
    }

    /// Build a vector from precomputed `(term, count)` pairs.
    ///
    /// Repeated terms are summed; zero counts are dropped.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut terms: AHashMap<String, u64> = AHashMap::new();
        for (term, count) in counts {
            if count > 0 {
                *terms.entry(term.into()).or_insert(0) += count;
            }
        }
        FeatureVector { terms }
    }

    /// The bias feature value. Always [`FeatureVector::BIAS`].
    pub fn bias(&self) -> u64 {
        Self::BIAS
    }

    /// Occurrence count of `term`, zero when absent.
    pub fn count(&self, term: &str) -> u64 {
        self.terms.get(term).copied().unwrap_or(0)
    }

    /// Whether `term` occurs in the document.
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Iterate over `(term, count)` pairs. The bias is not included.
    pub fn terms(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.terms.iter().map(|(term, &count)| (term.as_str(), count))
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the document has no terms besides the bias.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum of all term counts, bias excluded.
    pub fn total_count(&self) -> u64 {
        self.terms.values().sum()
    }
}

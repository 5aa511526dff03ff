//! Filesystem loading of stop-word lists and document directories.
//!
//! This is the only part of the library that touches the filesystem. All
//! failures that concern a single input are logged and absorbed so that a
//! training or evaluation run is never aborted by one bad file:
//!
//! - a missing stop-word file yields an empty stop-word set,
//! - a missing document directory yields an empty corpus,
//! - an unreadable document yields a bias-only feature vector.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::corpus::{ClassLabel, Corpus};
use crate::error::Result;
use crate::feature::{FeatureExtractor, FeatureVector};

/// Read a stop-word list, one word per line.
///
/// Lines are trimmed and lowercased; blank lines are ignored.
pub fn load_stop_words<P: AsRef<Path>>(path: P) -> HashSet<String> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => parse_stop_words(&content),
        Err(e) => {
            warn!("Stop-word file {} could not be read: {e}", path.display());
            HashSet::new()
        }
    }
}

/// Parse stop words from the contents of a stop-word file.
pub fn parse_stop_words(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// List the regular files of `dir` sorted by path.
///
/// A path that is not a readable directory yields an empty list.
pub fn list_documents<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let dir = dir.as_ref();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Not a readable folder {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {e}", dir.display());
                None
            }
        })
        .filter(|path| {
            let is_file = path.is_file();
            if !is_file {
                debug!("Skipping non-file entry {}", path.display());
            }
            is_file
        })
        .collect();

    files.sort();
    files
}

/// Parse a single document file.
///
/// Content that is not valid UTF-8 is decoded lossily. A read failure is
/// logged and turned into a bias-only vector.
pub fn load_document<P: AsRef<Path>>(extractor: &FeatureExtractor, path: P) -> Result<FeatureVector> {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(bytes) => extractor.parse_document(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            warn!("Failed to read from file {}: {e}", path.display());
            Ok(FeatureVector::empty())
        }
    }
}

/// Build a corpus from every file of `dir`.
pub fn load_corpus_dir<P: AsRef<Path>>(
    extractor: &FeatureExtractor,
    dir: P,
    label: ClassLabel,
) -> Result<Corpus> {
    let dir = dir.as_ref();
    let documents = list_documents(dir)
        .iter()
        .map(|path| load_document(extractor, path))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Loaded {} {label} documents from {}",
        documents.len(),
        dir.display()
    );

    Ok(Corpus::new(label, documents))
}

//! Text analysis module for Spamsift.
//!
//! Turns raw document text into a stream of normalized tokens: a tokenizer
//! splits the text, then filters lowercase it and drop stop words.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer};
pub use token::{Token, TokenStream};

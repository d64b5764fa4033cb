//! Error types for PDF loading and rule compilation.
//!
//! Scanning itself never fails: lines that fit no rule are skipped. The only
//! hard failures are an unreadable input, a file that is not a PDF, and a
//! rule set that does not compile.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a PDF file into a [`Document`](crate::model::Document).
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input file could not be opened or read.
    #[error("cannot read {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but does not parse as a PDF.
    #[error("{} is not a valid PDF: {message}", .path.display())]
    InvalidPdf { path: PathBuf, message: String },
}

/// Errors raised while compiling a [`RulesConfig`](crate::rules::RulesConfig).
#[derive(Debug, Error)]
pub enum RulesError {
    /// A question pattern is not a valid regular expression.
    #[error("invalid question pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The option label class is empty.
    #[error("label_class must not be empty")]
    EmptyLabelClass,

    /// The option label class does not form a valid character class.
    #[error("invalid label_class '{class}': {message}")]
    InvalidLabelClass { class: String, message: String },
}

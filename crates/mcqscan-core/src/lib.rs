//! mcqscan-core: PDF loading, scan rules, and MCQ extraction.
//!
//! This crate turns a textbook PDF into an ordered list of
//! [`QuestionRecord`]s using line-based pattern heuristics.

pub mod config;
pub mod error;
pub mod model;
pub mod pdf;
pub mod rules;
pub mod sample;
pub mod scanner;

pub use config::{load_config, load_config_from, McqscanConfig};
pub use error::{ExtractError, RulesError};
pub use model::{Document, Page, QuestionRecord};
pub use pdf::{extract_mcqs, load_document};
pub use rules::{RulesConfig, ScanRules};
pub use scanner::{scan_document, ScanStats, Scanner};

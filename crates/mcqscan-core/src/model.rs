//! Core data model types for mcqscan.
//!
//! A [`Document`] is the line-oriented view of a PDF that the scanner walks;
//! a [`QuestionRecord`] is what the scanner produces.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single extracted multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Question text, including any continuation lines joined by a space.
    pub question: String,
    /// Options in the order they were matched, formatted as `"<label>. <text>"`.
    pub options: Vec<String>,
    /// 1-based number of the page holding the question header.
    pub page: u32,
}

impl QuestionRecord {
    pub fn new(question: impl Into<String>, options: Vec<String>, page: u32) -> Self {
        Self {
            question: question.into(),
            options,
            page,
        }
    }
}

/// One page of extracted text, already split into trimmed, non-empty lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number as reported by the PDF page tree.
    pub number: u32,
    pub lines: Vec<String>,
}

impl Page {
    /// Split raw page text into lines, trimming each and dropping blanks.
    pub fn from_text(number: u32, text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self { number, lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The text content of a PDF, page by page.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Where the document was loaded from (empty for in-memory documents).
    pub source: PathBuf,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(source: impl Into<PathBuf>, pages: Vec<Page>) -> Self {
        Self {
            source: source.into(),
            pages,
        }
    }

    /// Build a document from raw page texts, numbering pages from 1.
    pub fn from_page_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        let pages = texts
            .iter()
            .enumerate()
            .map(|(i, text)| Page::from_text(i as u32 + 1, text.as_ref()))
            .collect();
        Self {
            source: PathBuf::new(),
            pages,
        }
    }

    /// Total number of non-empty lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }
}

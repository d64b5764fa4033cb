//! The MCQ scan: a single forward pass over document lines.
//!
//! The scan is a two-state machine. In [`ScanState::Idle`] every line that is
//! not a question header is ignored. A header moves the machine to
//! [`ScanState::Open`], where following lines contribute options or, failing
//! that, continuation text. The next header or the end of the document closes
//! the question: it is flushed as a [`QuestionRecord`] when it collected at
//! least one option and discarded otherwise.

use crate::model::{Document, QuestionRecord};
use crate::rules::ScanRules;

/// Scanner state between lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanState {
    /// No question is open.
    #[default]
    Idle,
    /// A question header was seen and options are being collected.
    Open {
        question: String,
        options: Vec<String>,
        page: u32,
    },
}

/// Counters kept alongside the records, for logging and previews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub pages: usize,
    pub empty_pages: usize,
    pub lines: usize,
    /// Question headers closed without any option.
    pub discarded: usize,
}

/// Incremental scanner. Feed it lines in document order, then call
/// [`Scanner::finish`].
#[derive(Debug)]
pub struct Scanner<'r> {
    rules: &'r ScanRules,
    state: ScanState,
    records: Vec<QuestionRecord>,
    stats: ScanStats,
}

impl<'r> Scanner<'r> {
    pub fn new(rules: &'r ScanRules) -> Self {
        Self {
            rules,
            state: ScanState::Idle,
            records: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// Process one trimmed, non-empty line found on `page`.
    pub fn feed_line(&mut self, page: u32, line: &str) {
        self.stats.lines += 1;

        if self.rules.is_question_header(line) {
            self.close_question();
            self.state = ScanState::Open {
                question: line.to_string(),
                options: Vec::new(),
                page,
            };
            return;
        }

        let ScanState::Open {
            question, options, ..
        } = &mut self.state
        else {
            return;
        };

        let found = self.rules.options_in(line);
        if !found.is_empty() {
            options.extend(found);
        } else if !self.rules.starts_with_label(line) {
            question.push(' ');
            question.push_str(line);
        }
    }

    /// Flush the open question if it has options, discard it otherwise.
    fn close_question(&mut self) {
        match std::mem::take(&mut self.state) {
            ScanState::Idle => {}
            ScanState::Open {
                question,
                options,
                page,
            } => {
                if options.is_empty() {
                    tracing::debug!(page, %question, "discarding question without options");
                    self.stats.discarded += 1;
                } else {
                    self.records
                        .push(QuestionRecord::new(question, options, page));
                }
            }
        }
    }

    /// Close any open question and return the records in scan order.
    pub fn finish(mut self) -> (Vec<QuestionRecord>, ScanStats) {
        self.close_question();
        (self.records, self.stats)
    }
}

/// Scan every page of `doc` and return the extracted questions with stats.
pub fn scan_document_with_stats(
    doc: &Document,
    rules: &ScanRules,
) -> (Vec<QuestionRecord>, ScanStats) {
    let mut scanner = Scanner::new(rules);
    let mut empty_pages = 0;

    for page in &doc.pages {
        if page.is_empty() {
            tracing::debug!(page = page.number, "skipping page without text");
            empty_pages += 1;
            continue;
        }
        for line in &page.lines {
            scanner.feed_line(page.number, line);
        }
    }

    let (records, mut stats) = scanner.finish();
    stats.pages = doc.pages.len();
    stats.empty_pages = empty_pages;

    tracing::info!(
        records = records.len(),
        discarded = stats.discarded,
        pages = stats.pages,
        empty_pages = stats.empty_pages,
        "scan complete"
    );

    (records, stats)
}

/// Scan every page of `doc` and return the extracted questions.
pub fn scan_document(doc: &Document, rules: &ScanRules) -> Vec<QuestionRecord> {
    scan_document_with_stats(doc, rules).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RulesConfig;

    fn rules() -> ScanRules {
        ScanRules::compile(&RulesConfig::default()).unwrap()
    }

    fn scan(pages: &[&str]) -> Vec<QuestionRecord> {
        scan_document(&Document::from_page_texts(pages), &rules())
    }

    #[test]
    fn empty_document_yields_nothing() {
        assert!(scan(&[]).is_empty());
        assert!(scan(&["", "   \n\n"]).is_empty());
    }

    #[test]
    fn header_then_option_line() {
        let records = scan(&["Choose the correct answer:\na) Paris b) London c) Rome"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Choose the correct answer:");
        assert_eq!(records[0].options, vec!["a. Paris", "b. London", "c. Rome"]);
        assert_eq!(records[0].page, 1);
    }

    #[test]
    fn header_without_options_is_dropped() {
        assert!(scan(&["Which of the following is true?\n\n\n"]).is_empty());
    }

    #[test]
    fn consecutive_headers_discard_the_first() {
        let rules = rules();
        let doc = Document::from_page_texts(&[
            "Fill in the blanks\nChoose the correct answer\na) Paris b) London",
        ]);
        let (records, stats) = scan_document_with_stats(&doc, &rules);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Choose the correct answer");
        assert_eq!(records[0].options, vec!["a. Paris", "b. London"]);
        assert_eq!(stats.discarded, 1);
    }

    #[test]
    fn prose_line_continues_the_question() {
        let records = scan(&[
            "Choose the correct answer\nName the planet nearest the sun\na) Mercury b) Venus",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].question,
            "Choose the correct answer Name the planet nearest the sun"
        );
        assert_eq!(records[0].options, vec!["a. Mercury", "b. Venus"]);
    }

    #[test]
    fn label_outside_alphabet_is_question_text() {
        let records = scan(&["Choose the correct answer\ne) none of these\na) yes b) no"]);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].question,
            "Choose the correct answer e) none of these"
        );
        assert_eq!(records[0].options, vec!["a. yes", "b. no"]);
    }

    #[test]
    fn options_across_lines_accumulate_in_order() {
        let records = scan(&["Select the correct answer\na) Iron\nb) Copper\nc) Gold d) Neon"]);
        assert_eq!(
            records[0].options,
            vec!["a. Iron", "b. Copper", "c. Gold", "d. Neon"]
        );
    }

    #[test]
    fn header_line_options_are_not_collected() {
        let records = scan(&["Which of the following a) one b) two\nc) three"]);
        assert_eq!(records[0].question, "Which of the following a) one b) two");
        assert_eq!(records[0].options, vec!["c. three"]);
    }

    #[test]
    fn lines_before_any_header_are_ignored() {
        let records = scan(&["Chapter 1\na) stray b) options\nChoose the correct answer\nc) Rome"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].options, vec!["c. Rome"]);
    }

    #[test]
    fn question_spans_pages() {
        let records = scan(&["Choose the correct answer", "", "a) Paris b) London"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].page, 1);
        assert_eq!(records[0].options, vec!["a. Paris", "b. London"]);
    }

    #[test]
    fn repeated_questions_are_not_deduplicated() {
        let records = scan(&[
            "Choose the correct answer\na) Paris",
            "Choose the correct answer\na) Paris",
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].question, records[1].question);
        assert_eq!(records[1].page, 2);
    }

    #[test]
    fn incomplete_label_sets_are_kept() {
        let records = scan(&["Choose the correct answer\nc) only this one"]);
        assert_eq!(records[0].options, vec!["c. only this one"]);
    }

    #[test]
    fn scanner_state_transitions() {
        let rules = rules();
        let mut scanner = Scanner::new(&rules);
        assert_eq!(scanner.state(), &ScanState::Idle);

        scanner.feed_line(1, "Ignored preamble");
        assert_eq!(scanner.state(), &ScanState::Idle);

        scanner.feed_line(1, "Choose the correct option");
        assert!(matches!(scanner.state(), ScanState::Open { options, .. } if options.is_empty()));

        scanner.feed_line(2, "a) yes b) no");
        assert!(matches!(scanner.state(), ScanState::Open { options, .. } if options.len() == 2));
        assert!(scanner.records().is_empty());

        scanner.feed_line(2, "Fill in the blanks");
        assert_eq!(scanner.records().len(), 1);

        let (records, stats) = scanner.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(stats.discarded, 1);
        assert_eq!(stats.lines, 4);
    }
}

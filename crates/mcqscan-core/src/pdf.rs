//! PDF loading via `lopdf`.
//!
//! The file is read into memory in one call and closed before parsing, so
//! the handle is released on every path. Text is extracted page by page;
//! a page whose content cannot be decoded counts as a page without text.
//!
//! Page text is rebuilt from the content stream operators rather than taken
//! from `lopdf::Document::extract_text`, which only breaks lines at the end
//! of a text object. A new line starts at every vertical text move
//! (`Td`, `TD`, `T*`, `Tm`, `'`, `"`) as well as at `ET`.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Object, ObjectId};

use crate::error::ExtractError;
use crate::model::{Document, Page, QuestionRecord};
use crate::rules::ScanRules;
use crate::scanner::{scan_document_with_stats, ScanStats};

/// TJ adjustments below this (in thousandths of an em) read as a word gap.
const WORD_GAP: f32 = -100.0;

/// Load a PDF file into a line-oriented [`Document`].
pub fn load_document(path: &Path) -> Result<Document, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut doc = load_document_bytes(&bytes).map_err(|message| ExtractError::InvalidPdf {
        path: path.to_path_buf(),
        message,
    })?;
    doc.source = path.to_path_buf();

    tracing::info!(
        path = %path.display(),
        pages = doc.pages.len(),
        lines = doc.line_count(),
        "loaded PDF"
    );

    Ok(doc)
}

/// Parse an in-memory PDF. Errors carry the parser's message only; callers
/// attach the path.
pub fn load_document_bytes(bytes: &[u8]) -> Result<Document, String> {
    let pdf = lopdf::Document::load_mem(bytes).map_err(|e| e.to_string())?;
    Ok(document_from_pdf(&pdf))
}

fn document_from_pdf(pdf: &lopdf::Document) -> Document {
    let pages = pdf
        .get_pages()
        .into_iter()
        .map(|(number, page_id)| match page_text(pdf, page_id) {
            Ok(text) => Page::from_text(number, &text),
            Err(e) => {
                tracing::warn!(page = number, error = %e, "cannot extract page text, skipping");
                Page {
                    number,
                    lines: Vec::new(),
                }
            }
        })
        .collect();

    Document::new("", pages)
}

/// Concatenated content streams of a page. A dangling stream reference or
/// a filter `lopdf` cannot undo is an error.
fn page_content(pdf: &lopdf::Document, page_id: ObjectId) -> lopdf::Result<Vec<u8>> {
    let mut data = Vec::new();
    for id in pdf.get_page_contents(page_id) {
        let stream = pdf.get_object(id).and_then(Object::as_stream)?;
        if stream.dict.has(b"Filter") {
            data.extend(stream.decompressed_content()?);
        } else {
            data.extend_from_slice(&stream.content);
        }
        data.push(b'\n');
    }
    Ok(data)
}

fn page_text(pdf: &lopdf::Document, page_id: ObjectId) -> lopdf::Result<String> {
    let encodings: BTreeMap<Vec<u8>, &str> = pdf
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect();
    let content = Content::decode(&page_content(pdf, page_id)?)?;

    let mut text = TextLines::default();
    let mut encoding = None;
    for op in &content.operations {
        let operands = op.operands.as_slice();
        match op.operator.as_str() {
            "BT" => text.begin(),
            "ET" => text.break_line(),
            "Tf" => {
                let font = operands
                    .first()
                    .ok_or_else(|| lopdf::Error::Syntax("missing font operand".to_string()))?
                    .as_name()?;
                encoding = encodings.get(font).copied();
            }
            "TL" => text.leading = number(operands, 0),
            "Td" => text.move_by(number(operands, 0), number(operands, 1)),
            "TD" => {
                text.leading = -number(operands, 1);
                text.move_by(number(operands, 0), number(operands, 1));
            }
            "Tm" => text.move_to(number(operands, 5)),
            "T*" => text.next_line(),
            "Tj" | "TJ" => text.show(encoding, operands),
            "'" => {
                text.next_line();
                text.show(encoding, operands);
            }
            "\"" => {
                text.next_line();
                text.show(encoding, operands.get(2..).unwrap_or_default());
            }
            _ => {}
        }
    }

    Ok(text.out)
}

fn number(operands: &[Object], index: usize) -> f32 {
    operands
        .get(index)
        .and_then(|o| o.as_float().ok())
        .unwrap_or(0.0)
}

/// Text collected so far plus the vertical position of the current line.
#[derive(Debug, Default)]
struct TextLines {
    out: String,
    y: f32,
    leading: f32,
}

impl TextLines {
    fn begin(&mut self) {
        self.y = 0.0;
    }

    fn break_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn gap(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with(char::is_whitespace) {
            self.out.push(' ');
        }
    }

    fn move_by(&mut self, dx: f32, dy: f32) {
        if dy != 0.0 {
            self.y += dy;
            self.break_line();
        } else if dx != 0.0 {
            self.gap();
        }
    }

    fn move_to(&mut self, y: f32) {
        if (y - self.y).abs() > 0.5 {
            self.break_line();
        } else {
            self.gap();
        }
        self.y = y;
    }

    fn next_line(&mut self) {
        self.y -= self.leading;
        self.break_line();
    }

    fn show(&mut self, encoding: Option<&str>, operands: &[Object]) {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => {
                    self.out
                        .push_str(&lopdf::Document::decode_text(encoding, bytes));
                }
                Object::Array(items) => self.show(encoding, items),
                Object::Integer(_) | Object::Real(_) => {
                    if operand.as_float().is_ok_and(|adjust| adjust < WORD_GAP) {
                        self.gap();
                    }
                }
                _ => {}
            }
        }
    }
}

/// Load `path` and scan it with `rules`.
pub fn extract_mcqs(path: &Path, rules: &ScanRules) -> Result<Vec<QuestionRecord>, ExtractError> {
    extract_mcqs_with_stats(path, rules).map(|(records, _)| records)
}

/// Like [`extract_mcqs`], also returning scan counters.
pub fn extract_mcqs_with_stats(
    path: &Path,
    rules: &ScanRules,
) -> Result<(Vec<QuestionRecord>, ScanStats), ExtractError> {
    let doc = load_document(path)?;
    Ok(scan_document_with_stats(&doc, rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RulesConfig;
    use crate::sample::{build_pdf, build_pdf_from_operations};
    use lopdf::content::Operation;
    use lopdf::dictionary;

    fn op(operator: &str, operands: Vec<Object>) -> Operation {
        Operation::new(operator, operands)
    }

    fn show(text: &str) -> Operation {
        op("Tj", vec![Object::string_literal(text)])
    }

    fn page_lines(operations: Vec<Operation>) -> Vec<String> {
        let bytes = build_pdf_from_operations(vec![operations]).unwrap();
        let doc = load_document_bytes(&bytes).unwrap();
        doc.pages[0].lines.clone()
    }

    fn rules() -> ScanRules {
        ScanRules::compile(&RulesConfig::default()).unwrap()
    }

    #[test]
    fn lines_come_back_per_page() {
        let bytes = build_pdf(&[
            vec!["Choose the correct answer", "a) Paris b) London"],
            vec!["Page two"],
        ])
        .unwrap();
        let doc = load_document_bytes(&bytes).unwrap();
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(
            doc.pages[0].lines,
            vec!["Choose the correct answer", "a) Paris b) London"]
        );
        assert_eq!(doc.pages[1].number, 2);
        assert_eq!(doc.pages[1].lines, vec!["Page two"]);
    }

    #[test]
    fn extract_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.pdf");
        let bytes = build_pdf(&[vec![
            "Choose the correct answer",
            "a) Paris b) London c) Rome",
        ]])
        .unwrap();
        std::fs::write(&path, bytes).unwrap();

        let records = extract_mcqs(&path, &rules()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].options, vec!["a. Paris", "b. London", "c. Rome"]);
    }

    #[test]
    fn textless_pages_yield_no_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.pdf");
        std::fs::write(&path, build_pdf::<&str>(&[vec![], vec![]]).unwrap()).unwrap();

        let (records, stats) = extract_mcqs_with_stats(&path, &rules()).unwrap();
        assert!(records.is_empty());
        assert_eq!(stats.pages, 2);
        assert_eq!(stats.empty_pages, 2);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = load_document(Path::new("definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, ExtractError::Open { .. }));
    }

    #[test]
    fn non_pdf_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.pdf");
        std::fs::write(&path, "just some text, not a PDF").unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPdf { .. }));
    }

    #[test]
    fn line_moves_inside_one_text_object() {
        let bytes = build_pdf_from_operations(vec![vec![
            op("BT", vec![]),
            op("Tf", vec!["F1".into(), 11.into()]),
            op("TL", vec![14.into()]),
            op("Td", vec![40.into(), 800.into()]),
            show("Choose the correct answer"),
            op("T*", vec![]),
            show("a) Paris b) London c) Rome"),
            op("ET", vec![]),
        ]])
        .unwrap();

        let doc = load_document_bytes(&bytes).unwrap();
        assert_eq!(
            doc.pages[0].lines,
            vec!["Choose the correct answer", "a) Paris b) London c) Rome"]
        );

        let records = crate::scanner::scan_document(&doc, &rules());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].options, vec!["a. Paris", "b. London", "c. Rome"]);
    }

    #[test]
    fn every_vertical_move_starts_a_line() {
        let lines = page_lines(vec![
            op("BT", vec![]),
            op("Tf", vec!["F1".into(), 11.into()]),
            op("Td", vec![40.into(), 800.into()]),
            show("first"),
            op("Td", vec![0.into(), (-14).into()]),
            show("second"),
            op("TD", vec![0.into(), (-14).into()]),
            show("third"),
            op("T*", vec![]),
            show("fourth"),
            op("'", vec![Object::string_literal("fifth")]),
            op(
                "\"",
                vec![0.into(), 0.into(), Object::string_literal("sixth")],
            ),
            op("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 40.into(), 600.into()]),
            show("seventh"),
            op("ET", vec![]),
        ]);
        assert_eq!(
            lines,
            vec!["first", "second", "third", "fourth", "fifth", "sixth", "seventh"]
        );
    }

    #[test]
    fn same_baseline_stays_one_line() {
        let lines = page_lines(vec![
            op("BT", vec![]),
            op("Tf", vec!["F1".into(), 11.into()]),
            op("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 40.into(), 700.into()]),
            show("a) Paris"),
            op("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 200.into(), 700.into()]),
            show("b) London"),
            op("Td", vec![120.into(), 0.into()]),
            op(
                "TJ",
                vec![Object::Array(vec![
                    Object::string_literal("c)"),
                    (-250).into(),
                    Object::string_literal("Rome"),
                ])],
            ),
            op("ET", vec![]),
        ]);
        assert_eq!(lines, vec!["a) Paris b) London c) Rome"]);
    }

    #[test]
    fn undecodable_pages_are_skipped() {
        let bytes = build_pdf(&[
            vec!["Chapter 1"],
            vec!["Choose the correct answer", "a) Paris b) London"],
            vec!["Chapter 2"],
        ])
        .unwrap();
        let mut pdf = lopdf::Document::load_mem(&bytes).unwrap();
        let pages = pdf.get_pages();

        // Page 1 points at a stream that does not exist.
        pdf.get_object_mut(pages[&1])
            .and_then(Object::as_dict_mut)
            .unwrap()
            .set("Contents", Object::Reference((9999, 0)));

        // Page 3 uses a filter that cannot be undone.
        let stream = lopdf::Stream::new(dictionary! { "Filter" => "DCTDecode" }, vec![0xff, 0xd8]);
        let stream_id = pdf.add_object(stream);
        pdf.get_object_mut(pages[&3])
            .and_then(Object::as_dict_mut)
            .unwrap()
            .set("Contents", stream_id);

        let doc = document_from_pdf(&pdf);
        assert_eq!(doc.pages.len(), 3);
        assert!(doc.pages[0].is_empty());
        assert!(doc.pages[2].is_empty());

        let (records, stats) = scan_document_with_stats(&doc, &rules());
        assert_eq!(stats.pages, 3);
        assert_eq!(stats.empty_pages, 2);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].page, 2);
        assert_eq!(records[0].options, vec!["a. Paris", "b. London"]);
    }
}

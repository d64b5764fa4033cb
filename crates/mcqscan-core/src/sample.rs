//! Minimal PDF writer for sample files and fixtures.
//!
//! Each page is a single Courier text object; lines are separated by `T*`
//! line moves, the way typeset pages usually lay out running text.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};

/// Lines of the sample written by `mcqscan init --sample`.
pub const SAMPLE_PAGES: &[&[&str]] = &[
    &[
        "Chapter 1 - Measurement",
        "I. Choose the correct answer",
        "1. SI unit of length:",
        "a) metre b) kilogram c) second d) kelvin",
    ],
    &[
        "2. Which of the following is a derived quantity?",
        "a) mass",
        "b) time",
        "c) speed",
        "II. Fill in the blanks",
    ],
];

/// Build a PDF whose pages hold the given lines, top to bottom.
pub fn build_pdf<S: AsRef<str>>(pages: &[Vec<S>]) -> lopdf::Result<Vec<u8>> {
    build_pdf_from_operations(pages.iter().map(|lines| text_block(lines)).collect())
}

fn text_block<S: AsRef<str>>(lines: &[S]) -> Vec<Operation> {
    if lines.is_empty() {
        return Vec::new();
    }

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 11.into()]),
        Operation::new("TL", vec![14.into()]),
        Operation::new("Td", vec![40.into(), 800.into()]),
    ];
    for (row, line) in lines.iter().enumerate() {
        if row > 0 {
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.as_ref())],
        ));
    }
    operations.push(Operation::new("ET", vec![]));
    operations
}

/// Build a PDF with one page per operation list. Font `F1` (Courier) is
/// available on every page.
pub fn build_pdf_from_operations(pages: Vec<Vec<Operation>>) -> lopdf::Result<Vec<u8>> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// The bundled sample as PDF bytes.
pub fn sample_pdf() -> lopdf::Result<Vec<u8>> {
    let pages: Vec<Vec<&str>> = SAMPLE_PAGES.iter().map(|p| p.to_vec()).collect();
    build_pdf(&pages)
}

//! In-memory PDF builders for tests.
//!
//! Each line is written in its own text object so extracted text keeps one
//! line per label.

use lopdf::content::{Content, Operation};
use lopdf::encryption;
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};

const FILE_ID: &[u8] = b"payslip-fixture!";

/// Build a PDF with one page per entry of `pages`, each page holding the given lines.
pub fn text_pdf(pages: &[&[&str]]) -> Vec<u8> {
    save(build(pages, helvetica()))
}

/// The payslip used across the test suites.
pub fn sample_payslip() -> Vec<u8> {
    text_pdf(&[&[
        "ACME Corp - Payslip",
        "Employee: Jane Doe",
        "Net Pay: $2,500.00",
        "Employment Type: Contractor",
    ]])
}

/// A single-page table: each label and its value are separate text objects
/// on the same baseline, the layout most payroll systems print.
pub fn two_column_pdf(rows: &[(&str, &str)]) -> Vec<u8> {
    let mut operations = Vec::new();
    for (i, (label, value)) in rows.iter().enumerate() {
        let y = baseline(i);
        operations.extend(text_object(50, y, label));
        operations.extend(text_object(250, y, value));
    }

    save(build_from_operations(vec![operations], helvetica()))
}

/// A single page whose font dictionary has no `/Type /Font` entry. lopdf
/// refuses to decode such fonts; pdf-extract reads them.
pub fn untyped_font_pdf(lines: &[&str]) -> Vec<u8> {
    let mut font = helvetica();
    font.remove(b"Type");
    save(build(&[lines], font))
}

/// A single page encrypted with the standard handler and an empty user
/// password, as produced by "restrict editing" in most PDF writers.
pub fn empty_password_pdf(lines: &[&str]) -> Vec<u8> {
    save(encrypt(build(&[lines], helvetica()), None))
}

/// Like [`empty_password_pdf`], but the document needs a real password to open.
pub fn password_protected_pdf(lines: &[&str]) -> Vec<u8> {
    save(encrypt(build(&[lines], helvetica()), Some(vec![0; 32])))
}

/// [`untyped_font_pdf`] encrypted with an empty user password.
pub fn empty_password_untyped_font_pdf(lines: &[&str]) -> Vec<u8> {
    let mut font = helvetica();
    font.remove(b"Type");
    save(encrypt(build(&[lines], font), None))
}

fn helvetica() -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    }
}

fn baseline(row: usize) -> i64 {
    780 - (row as i64) * 20
}

fn text_object(x: i64, y: i64, text: &str) -> [Operation; 5] {
    [
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

fn build(pages: &[&[&str]], font: Dictionary) -> Document {
    let pages: Vec<Vec<Operation>> = pages
        .iter()
        .map(|lines| {
            lines
                .iter()
                .enumerate()
                .flat_map(|(i, line)| text_object(50, baseline(i), line))
                .collect::<Vec<Operation>>()
        })
        .collect();

    build_from_operations(pages, font)
}

fn build_from_operations(pages: Vec<Vec<Operation>>, font: Dictionary) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(font);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content.encode().unwrap_or_default();
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Apply RC4 40-bit encryption (V1, R2) to every stream. `user_check` is the
/// `/U` entry; without one any password opens the document.
fn encrypt(mut doc: Document, user_check: Option<Vec<u8>>) -> Document {
    let id = Object::String(FILE_ID.to_vec(), StringFormat::Hexadecimal);
    doc.trailer.set("ID", vec![id.clone(), id]);

    let mut handler = dictionary! {
        "Filter" => "Standard",
        "V" => Object::Integer(1),
        "R" => Object::Integer(2),
        "O" => Object::String(vec![0x4f; 32], StringFormat::Hexadecimal),
        "P" => Object::Integer(-4),
        "CF" => dictionary! {
            "StdCF" => dictionary! {
                "CFM" => "V2",
            },
        },
    };
    if let Some(check) = user_check {
        handler.set("U", Object::String(check, StringFormat::Hexadecimal));
    }
    let handler_id = doc.add_object(handler);
    doc.trailer.set("Encrypt", handler_id);

    let key = encryption::get_encryption_key(&doc, "", false).unwrap_or_default();

    // RC4 is symmetric, so the decryption routine also encrypts
    for (&object_id, object) in doc.objects.iter_mut() {
        if object_id == handler_id {
            continue;
        }
        let Ok(cipher) = encryption::decrypt_object(&key, object_id, &*object, false) else {
            continue;
        };
        match object {
            Object::Stream(stream) => stream.set_content(cipher),
            Object::String(content, _) => *content = cipher,
            _ => {}
        }
    }

    doc
}

fn save(mut doc: Document) -> Vec<u8> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap_or_default();
    buffer
}

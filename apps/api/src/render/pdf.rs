//! PDF serialization of a `DocumentLayout` using the standard-14 Helvetica faces.
//!
//! Content streams are left uncompressed and no creation date or file ID is
//! written, so output bytes depend only on the layout.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use crate::layout::document::{
    DocumentLayout, LaidOutPage, PageGeometry, TextStyle, DOCUMENT_TITLE, TIMESTAMP_FIELD_LEN,
};
use crate::layout::font_metrics::{win_ansi_code, BuiltinFont, REPLACEMENT_CODE};
use crate::render::RenderError;

const PDF_VERSION: &str = "1.4";
const PRODUCER: &str = concat!("proposals ", env!("CARGO_PKG_VERSION"));

/// Serializes the layout into a complete PDF file.
pub fn write_pdf(layout: &DocumentLayout) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in BuiltinFont::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let geometry = &layout.geometry;
    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = page_content(page, geometry)
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::from(geometry.width_pt),
        Object::from(geometry.height_pt),
    ];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(DOCUMENT_TITLE),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(bytes)
}

/// One text object per non-blank line. PDF y grows upward, layout y grows downward.
fn page_content(page: &LaidOutPage, geometry: &PageGeometry) -> Content {
    let mut operations = Vec::new();

    for line in page.lines.iter().filter(|l| !l.text.is_empty()) {
        let font = line.style.font();
        let mut operand = encode_win_ansi(&line.text);
        if line.style == TextStyle::Timestamp {
            operand = pad_timestamp(operand);
        }
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![
                font.resource_name().into(),
                Object::from(line.style.size_pt()),
            ],
        ));
        operations.push(Operation::new(
            "Td",
            vec![
                Object::from(round2(line.x)),
                Object::from(round2(geometry.height_pt - line.baseline)),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(operand, StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    Content { operations }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Encodes text for the WinAnsi-encoded core fonts. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_code(c).unwrap_or(REPLACEMENT_CODE))
        .collect()
}

/// Right-pads the encoded timestamp with spaces to a fixed length, so a
/// different date never shifts stream lengths or xref offsets.
fn pad_timestamp(mut encoded: Vec<u8>) -> Vec<u8> {
    if encoded.len() < TIMESTAMP_FIELD_LEN {
        encoded.resize(TIMESTAMP_FIELD_LEN, b' ');
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::document::{default_page_geometry, layout_document};
    use chrono::{TimeZone, Utc};

    fn render(proposal: &str) -> Vec<u8> {
        let generated_at = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let layout = layout_document(proposal, "Acme", generated_at, &default_page_geometry());
        write_pdf(&layout).unwrap()
    }

    #[test]
    fn test_output_is_a_loadable_pdf() {
        let bytes = render("Title: Proposal: API\n\nBody text");
        assert!(bytes.starts_with(b"%PDF-1.4"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_page_tree_matches_layout() {
        let proposal = "A line of proposal text\n".repeat(120);
        let generated_at = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let layout = layout_document(&proposal, "", generated_at, &default_page_geometry());
        let bytes = write_pdf(&layout).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), layout.page_count());
        assert!(layout.page_count() > 1);
    }

    #[test]
    fn test_text_is_written_as_literal_strings() {
        let bytes = render("Phase 1: Discovery");
        let haystack = String::from_utf8_lossy(&bytes);
        assert!(haystack.contains("(Phase 1: Discovery) Tj"));
        assert!(haystack.contains("/Helvetica-Bold"));
        assert!(haystack.contains("/WinAnsiEncoding"));
    }

    #[test]
    fn test_encode_win_ansi_maps_typography() {
        assert_eq!(encode_win_ansi("Plan"), b"Plan".to_vec());
        assert_eq!(encode_win_ansi("don’t"), vec![b'd', b'o', b'n', 0x92, b't']);
        assert_eq!(encode_win_ansi("“A” – B"), vec![0x93, b'A', 0x94, b' ', 0x96, b' ', b'B']);
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("🚀"), vec![b'?']);
    }

    #[test]
    fn test_timestamp_operand_has_fixed_length() {
        let short = pad_timestamp(encode_win_ansi("Generated on: May 01, 2024"));
        let long = pad_timestamp(encode_win_ansi("Generated on: September 30, 2024"));
        assert_eq!(short.len(), TIMESTAMP_FIELD_LEN);
        assert_eq!(long.len(), TIMESTAMP_FIELD_LEN);
        assert!(short.starts_with(b"Generated on: May 01, 2024"));
        assert!(short.ends_with(b"      "));
    }
}

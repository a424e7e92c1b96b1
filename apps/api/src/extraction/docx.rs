use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts paragraph text from a DOCX held in memory.
///
/// Every `w:p` in `word/document.xml` (table cells included) becomes one line,
/// in document order. Runs are concatenated, `w:tab` becomes a tab and
/// `w:br`/`w:cr` a newline inside the paragraph.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(format!("not a DOCX container: {e}")))?;

    let xml_content = {
        let mut document_xml = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| ExtractionError::Docx(format!("Missing {DOCUMENT_PART}: {e}")))?;

        let mut content = String::new();
        document_xml
            .read_to_string(&mut content)
            .map_err(|e| ExtractionError::Docx(format!("Failed to read {DOCUMENT_PART}: {e}")))?;
        content
    };

    let paragraphs = walk_paragraphs(&xml_content)?;
    debug!("DOCX extracted: {} paragraphs", paragraphs.len());
    Ok(paragraphs.join("\n"))
}

/// A paragraph still being read, plus the text-box paragraphs anchored in it.
#[derive(Default)]
struct OpenParagraph {
    text: String,
    nested: Vec<String>,
}

/// Collects the text of every paragraph in document order.
///
/// Text-box paragraphs nest inside the paragraph that anchors them; they are
/// emitted right after that paragraph. Word stores each text box twice
/// (`mc:Choice` and `mc:Fallback`), so fallback subtrees are skipped.
fn walk_paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut paragraphs = Vec::new();
    let mut open: Vec<OpenParagraph> = Vec::new();
    let mut in_text = false;
    let mut fallback_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"mc:Fallback" => fallback_depth += 1,
            Ok(Event::End(e)) if e.name().as_ref() == b"mc:Fallback" => {
                fallback_depth = fallback_depth.saturating_sub(1)
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::Docx(format!(
                    "Error parsing {DOCUMENT_PART} at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ if fallback_depth > 0 => {}
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => open.push(OpenParagraph::default()),
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(closed) = open.pop() {
                        let lines = std::iter::once(closed.text).chain(closed.nested);
                        match open.last_mut() {
                            Some(parent) => parent.nested.extend(lines),
                            None => paragraphs.extend(lines),
                        }
                    }
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => match open.last_mut() {
                    Some(parent) => parent.nested.push(String::new()),
                    None => paragraphs.push(String::new()),
                },
                b"w:tab" => push_text(&mut open, "\t"),
                b"w:br" | b"w:cr" => push_text(&mut open, "\n"),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| ExtractionError::Docx(format!("Invalid text content: {e}")))?;
                push_text(&mut open, &text);
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn push_text(open: &mut [OpenParagraph], text: &str) {
    if let Some(current) = open.last_mut() {
        current.text.push_str(text);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;

    fn wrap_body(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
    }

    fn zip_document_xml(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer
            .write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
            .unwrap();
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    /// Builds a minimal DOCX with one single-run paragraph per entry.
    pub fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{p}</w:t></w:r></w:p>"#))
            .collect();
        zip_document_xml(&wrap_body(&body))
    }

    #[test]
    fn test_extract_docx_joins_paragraphs_with_newline() {
        let bytes = build_docx(&["Jane Doe", "Software Engineer", "Python, Go"]);
        let text = extract_docx_text(&bytes).unwrap();
        assert_eq!(text, "Jane Doe\nSoftware Engineer\nPython, Go");
    }

    #[test]
    fn test_extract_docx_concatenates_runs_and_unescapes() {
        let body = r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>R&amp;D </w:t></w:r><w:r><w:t>Lead</w:t></w:r><w:r><w:tab/><w:t>2021</w:t></w:r></w:p>"#;
        let bytes = zip_document_xml(&wrap_body(body));
        let text = extract_docx_text(&bytes).unwrap();
        assert_eq!(text, "R&D Lead\t2021");
    }

    #[test]
    fn test_extract_docx_line_break_and_empty_paragraph() {
        let body = r#"<w:p><w:r><w:t>Line one</w:t><w:br/><w:t>Line two</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>After gap</w:t></w:r></w:p>"#;
        let bytes = zip_document_xml(&wrap_body(body));
        let text = extract_docx_text(&bytes).unwrap();
        assert_eq!(text, "Line one\nLine two\n\nAfter gap");
    }

    #[test]
    fn test_extract_docx_includes_table_cells_in_order() {
        let body = r#"<w:p><w:r><w:t>Skills</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>Python</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Go</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#;
        let bytes = zip_document_xml(&wrap_body(body));
        let text = extract_docx_text(&bytes).unwrap();
        assert_eq!(text, "Skills\nPython\nGo");
    }

    #[test]
    fn test_extract_docx_text_box_once_after_anchor_paragraph() {
        let text_box = r#"<w:txbxContent><w:p><w:r><w:t>Contact: jane@example.com</w:t></w:r></w:p></w:txbxContent>"#;
        let body = format!(
            r#"<w:p><w:r><w:t>Jane Doe</w:t></w:r><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><wps:txbx>{text_box}</wps:txbx></w:drawing></mc:Choice><mc:Fallback><w:pict><v:textbox>{text_box}</v:textbox></w:pict></mc:Fallback></mc:AlternateContent></w:r><w:r><w:t xml:space="preserve"> Software Engineer</w:t></w:r></w:p><w:p><w:r><w:t>Python, Go</w:t></w:r></w:p>"#
        );
        let bytes = zip_document_xml(&wrap_body(&body));
        let text = extract_docx_text(&bytes).unwrap();
        assert_eq!(
            text,
            "Jane Doe Software Engineer\nContact: jane@example.com\nPython, Go"
        );
    }

    #[test]
    fn test_extract_docx_ignores_instruction_text_outside_w_t() {
        let body = r#"<w:p><w:r><w:instrText>PAGE</w:instrText></w:r><w:r><w:t>Visible</w:t></w:r></w:p>"#;
        let bytes = zip_document_xml(&wrap_body(body));
        assert_eq!(extract_docx_text(&bytes).unwrap(), "Visible");
    }

    #[test]
    fn test_extract_docx_rejects_non_zip_bytes() {
        let err = extract_docx_text(b"plain text pretending to be docx").unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(_)));
    }

    #[test]
    fn test_extract_docx_rejects_zip_without_document_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("notes.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hello").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_docx_text(&bytes).unwrap_err();
        assert!(
            err.to_string().contains("word/document.xml"),
            "unexpected error: {err}"
        );
    }
}

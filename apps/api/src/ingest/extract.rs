//! Text extraction for PDF, DOCX and TXT documents.

use std::io::{Cursor, Read};

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::ingest::document::{Document, DocumentFormat, IntakeError, Upload};

/// Extracts plain text from a validated document.
///
/// Carried in `AppState` as `Arc<dyn TextExtractor>`.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, document: &Document) -> Result<String, IntakeError>;
}

/// Default extractor: dispatches on the detected format.
pub struct FormatExtractor;

impl TextExtractor for FormatExtractor {
    fn extract(&self, document: &Document) -> Result<String, IntakeError> {
        let format = document.format();
        let result = match format {
            DocumentFormat::Pdf => extract_pdf_text(document.bytes()),
            DocumentFormat::Docx => extract_docx_text(document.bytes()),
            DocumentFormat::Txt => extract_plain_text(document.bytes()),
        };

        result.map_err(|e| IntakeError::Extraction {
            format,
            message: e.to_string(),
        })
    }
}

/// Validates an upload and extracts its text. Format checks run before the
/// extractor is touched, so unsupported uploads never reach it.
pub fn read_upload(upload: &Upload, extractor: &dyn TextExtractor) -> Result<String, IntakeError> {
    let document = Document::from_upload(upload)?;
    let text = extractor.extract(&document)?;
    debug!(
        file = document.file_name(),
        format = %document.format(),
        chars = text.len(),
        "Extracted document text"
    );
    Ok(text.trim().to_string())
}

fn extract_pdf_text(data: &[u8]) -> anyhow::Result<String> {
    let text = pdf_extract::extract_text_from_mem(data)?;
    Ok(text)
}

fn extract_plain_text(data: &[u8]) -> anyhow::Result<String> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    Ok(std::str::from_utf8(data)?.to_string())
}

fn extract_docx_text(data: &[u8]) -> anyhow::Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut lines = Vec::new();
    // text boxes nest whole paragraphs inside a run of the outer one
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    if depth == 0 {
                        current.clear();
                    } else {
                        current.push(' ');
                    }
                    depth += 1;
                }
                b"w:tab" if depth > 0 => current.push('\t'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" if depth > 0 => current.push('\t'),
                b"w:br" if depth > 0 => current.push('\n'),
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"w:p" => {
                depth = depth.saturating_sub(1);
                if depth > 0 {
                    current.push(' ');
                } else {
                    let line = current.trim();
                    if !line.is_empty() {
                        lines.push(line.to_string());
                    }
                    current.clear();
                }
            }
            Event::Text(e) if depth > 0 => {
                current.push_str(&e.xml_content()?);
            }
            Event::GeneralRef(e) if depth > 0 => {
                if let Some(ch) = e.resolve_char_ref()? {
                    current.push(ch);
                } else if let Some(resolved) = resolve_predefined_entity(&e.decode()?) {
                    current.push_str(resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(lines.join("\n"))
}

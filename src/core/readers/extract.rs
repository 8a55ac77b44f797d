//! Plain text extraction for supported document formats.
//!
//! - `.txt`: UTF-8 (invalid sequences replaced)
//! - `.pdf`: `pdf-extract`
//! - `.docx`: `word/document.xml` read with `zip` + `quick-xml`,
//!   one line per paragraph
//!
//! Extraction never panics; malformed files produce
//! [`ColepsError::ExtractionFailed`].

use crate::core::error::{ColepsError, Result};
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

/// Largest decompressed `word/document.xml` accepted.
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Document formats the readers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Text,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

/// A `.docx` paragraph with its style name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub style: Option<String>,
    pub text: String,
}

impl Paragraph {
    /// Heading, title or "Titre" styles.
    pub fn is_heading(&self) -> bool {
        self.style.as_deref().map_or(false, |style| {
            let style = style.to_lowercase();
            style.starts_with("heading") || style.starts_with("titre") || style == "title"
        })
    }
}

/// Read a file and return its text.
pub fn extract_text(path: &Path) -> Result<String> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| ColepsError::UnsupportedFormat(path.display().to_string()))?;

    if !path.is_file() {
        return Err(ColepsError::DocumentNotFound(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    extract_bytes(&bytes, format)
        .map_err(|e| ColepsError::ExtractionFailed(format!("{}: {}", path.display(), e)))
}

/// Extract text from in-memory content of a known format.
pub fn extract_bytes(bytes: &[u8], format: DocumentFormat) -> Result<String> {
    match format {
        DocumentFormat::Text => Ok(String::from_utf8_lossy(bytes).into_owned()),
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ColepsError::ExtractionFailed(format!("PDF: {e}"))),
        DocumentFormat::Docx => {
            let paragraphs = docx_paragraphs(bytes)?;
            Ok(paragraphs
                .into_iter()
                .map(|p| p.text)
                .filter(|t| !t.trim().is_empty())
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

/// Heading texts of a `.docx` file, in document order.
pub fn docx_titles(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path)?;
    Ok(docx_paragraphs(&bytes)?
        .into_iter()
        .filter(|p| p.is_heading())
        .map(|p| p.text.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

/// Paragraphs of a `.docx` archive.
pub fn docx_paragraphs(bytes: &[u8]) -> Result<Vec<Paragraph>> {
    let ooxml = |e: String| ColepsError::ExtractionFailed(format!("DOCX: {e}"));

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ooxml(e.to_string()))?;
    let entry = archive
        .by_name("word/document.xml")
        .map_err(|_| ooxml("word/document.xml not found".to_string()))?;

    let mut xml = Vec::new();
    entry
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut xml)
        .map_err(|e| ooxml(e.to_string()))?;
    if xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err(ooxml("word/document.xml exceeds size limit".to_string()));
    }

    parse_paragraphs(&xml).map_err(ooxml)
}

fn style_value(e: &BytesStart) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == b"val")
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

fn parse_paragraphs(xml: &[u8]) -> std::result::Result<Vec<Paragraph>, String> {
    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<Paragraph> = None;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => current = Some(Paragraph::default()),
                b"t" => in_text = true,
                b"pStyle" => {
                    if let Some(p) = current.as_mut() {
                        p.style = style_value(&e);
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if let Some(p) = current.as_mut() {
                    match e.local_name().as_ref() {
                        b"pStyle" => p.style = style_value(&e),
                        b"tab" | b"br" => p.text.push(' '),
                        _ => {}
                    }
                }
            }
            Ok(Event::Text(t)) if in_text => {
                if let Some(p) = current.as_mut() {
                    p.text
                        .push_str(t.unescape().map_err(|e| e.to_string())?.as_ref());
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let Some(p) = current.take() {
                        paragraphs.push(p);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

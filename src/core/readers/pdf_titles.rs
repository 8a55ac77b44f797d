//! Section titles of PDF files.
//!
//! Titles are text runs set in a font larger than a threshold. A run
//! ends when the font size changes, the text moves to another line, or
//! the page ends.

use crate::core::error::{ColepsError, Result};
use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};
use std::fs;
use std::path::Path;

/// Default threshold, in points, above which text counts as a title.
pub const DEFAULT_TITLE_MIN_FONT_SIZE: f64 = 12.0;

/// Sizes closer than this belong to the same run.
const SIZE_TOLERANCE: f64 = 0.5;

/// Collects large-font runs as titles, deduplicated in reading order.
#[derive(Debug)]
pub struct TitleCollector {
    min_font_size: f64,
    titles: Vec<String>,
    run: String,
    run_size: f64,
    last_end: f64,
    last_y: f64,
}

impl TitleCollector {
    pub fn new(min_font_size: f64) -> Self {
        Self {
            min_font_size,
            titles: Vec::new(),
            run: String::new(),
            run_size: 0.0,
            last_end: 0.0,
            last_y: 0.0,
        }
    }

    fn flush(&mut self) {
        let text = self.run.split_whitespace().collect::<Vec<_>>().join(" ");
        self.run.clear();
        if self.run_size > self.min_font_size && !text.is_empty() && !self.titles.contains(&text)
        {
            self.titles.push(text);
        }
    }

    /// Flush the pending run and return the titles.
    pub fn finish(mut self) -> Vec<String> {
        self.flush();
        self.titles
    }
}

/// Font size after the text rendering matrix is applied.
fn rendered_size(trm: &Transform, font_size: f64) -> f64 {
    let x = font_size * (trm.m11 + trm.m21);
    let y = font_size * (trm.m12 + trm.m22);
    (x * y).abs().sqrt()
}

impl OutputDev for TitleCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_page(&mut self) -> std::result::Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> std::result::Result<(), OutputError> {
        let size = rendered_size(trm, font_size);
        let (x, y) = (trm.m31, trm.m32);

        if !self.run.is_empty() {
            let new_size = (size - self.run_size).abs() > SIZE_TOLERANCE;
            let new_line = (y - self.last_y).abs() > size * 0.5;
            if new_size || new_line {
                self.flush();
            } else if x > self.last_end + size * 0.1 {
                self.run.push(' ');
            }
        }
        if self.run.is_empty() {
            self.run_size = size;
        }

        self.run.push_str(char);
        self.last_end = x + width * size;
        self.last_y = y;
        Ok(())
    }

    fn begin_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }
}

/// Titles of an in-memory PDF.
pub fn pdf_titles_from_mem(bytes: &[u8], min_font_size: f64) -> Result<Vec<String>> {
    let pdf = |e: String| ColepsError::ExtractionFailed(format!("PDF: {e}"));

    let doc = pdf_extract::Document::load_mem(bytes).map_err(|e| pdf(e.to_string()))?;
    let mut collector = TitleCollector::new(min_font_size);
    pdf_extract::output_doc(&doc, &mut collector).map_err(|e| pdf(format!("{e:?}")))?;
    Ok(collector.finish())
}

/// Titles of a PDF file.
pub fn pdf_titles(path: &Path, min_font_size: f64) -> Result<Vec<String>> {
    let bytes = fs::read(path)?;
    pdf_titles_from_mem(&bytes, min_font_size)
}

//! Document readers.
//!
//! - **walker**: lists supported files in the documents directory
//! - **extract**: plain text from `.txt`, `.pdf` and `.docx`
//! - **pdf_titles**: large-font runs of PDF files
//! - **library**: loading, adding and listing documents; section titles

pub mod extract;
pub mod library;
pub mod pdf_titles;
pub mod walker;

pub use extract::{extract_text, DocumentFormat};
pub use library::{DocumentInfo, FileTitleSource, Library, LoadOutcome};
pub use pdf_titles::{pdf_titles, DEFAULT_TITLE_MIN_FONT_SIZE};
pub use walker::{default_include_patterns, DocumentWalker};

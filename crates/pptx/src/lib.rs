//! PPTX (Office Open XML) text extraction.
//!
//! Reads slide titles, body paragraphs and speaker notes from .pptx files,
//! which are ZIP archives containing XML documents.

pub mod parser;

pub use parser::PptxParser;

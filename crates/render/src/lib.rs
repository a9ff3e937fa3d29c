//! Slide rendering and OCR.
//!
//! Converts a presentation to per-slide images with external tools and
//! reads the text back out of them.

pub mod ocr;
pub mod renderer;

pub use ocr::{extract_all, extract_image_text, OcrEngine, TesseractCli};
pub use renderer::{RenderConfig, SlideRenderer, DEFAULT_DPI};

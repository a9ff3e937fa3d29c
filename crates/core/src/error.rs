//! Error types shared by the consistency-check pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while checking a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read a file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The input could not be opened as a valid presentation.
    #[error("Failed to read presentation: {0}")]
    DocumentRead(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for PPTX).
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// Document conversion to PDF failed.
    #[error("Rendering error: {0}")]
    Render(String),

    /// PDF pages could not be rasterized or loaded.
    #[error("Rasterization error: {0}")]
    Rasterize(String),

    /// The OCR engine failed on an image.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// The language model call failed.
    #[error("Inference error: {0}")]
    Inference(String),

    /// No JSON value could be recovered from a model reply.
    #[error("JSON extraction failed: {0}")]
    JsonExtraction(String),

    /// Result serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

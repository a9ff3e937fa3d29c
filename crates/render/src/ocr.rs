//! OCR over rendered slide images.

use deckcheck_core::{Error, Result, SlideOcr};
use image::{DynamicImage, ImageFormat};
use std::io::{Cursor, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Something that can read text from an image.
pub trait OcrEngine {
    /// Recognize the text in one image.
    fn recognize(&self, image: &DynamicImage) -> Result<String>;
}

/// Tesseract driven through its command-line interface.
///
/// The image is PNG-encoded in memory and piped to `tesseract stdin stdout`.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    /// The `tesseract` executable.
    program: PathBuf,
    /// Language passed with `-l`, when set.
    language: Option<String>,
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self {
            program: PathBuf::from("tesseract"),
            language: None,
        }
    }
}

impl TesseractCli {
    /// Use `tesseract` from `PATH` with its default language.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific `tesseract` executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the recognition language (e.g. `eng`, `eng+deu`).
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }
}

impl OcrEngine for TesseractCli {
    fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| Error::Ocr(format!("Failed to encode image: {}", e)))?;

        let mut cmd = Command::new(&self.program);
        cmd.arg("stdin").arg("stdout");
        if let Some(ref lang) = self.language {
            cmd.arg("-l").arg(lang);
        }

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Ocr(format!("{}: {}", self.program.display(), e)))?;

        // The child is always reaped, even when it stopped reading early.
        let sent = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&png),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Ocr(format!("Failed to read output: {}", e)))?;

        if let Err(e) = sent {
            return Err(Error::Ocr(format!(
                "Failed to send image to tesseract ({}): {}",
                output.status,
                if output.stderr.is_empty() {
                    e.to_string()
                } else {
                    String::from_utf8_lossy(&output.stderr).trim().to_string()
                }
            )));
        }

        if !output.status.success() {
            return Err(Error::Ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Run OCR on one image, turning engine failures into [`SlideOcr::Failed`].
pub fn extract_image_text<E: OcrEngine + ?Sized>(
    engine: &E,
    image: &DynamicImage,
    debug: bool,
) -> SlideOcr {
    match engine.recognize(image) {
        Ok(text) => {
            if debug && !text.trim().is_empty() {
                log::debug!("Extracted image text:\n{}\n{}", text, "-".repeat(40));
            }
            SlideOcr::Text(text)
        }
        Err(e) => {
            log::error!("{}", e);
            SlideOcr::Failed
        }
    }
}

/// Run OCR over every rendered page, one outcome per slide.
///
/// Images are consumed one at a time. When fewer images than slides were
/// rendered the remaining slides get [`SlideOcr::NoImage`]; surplus images
/// are dropped.
pub fn extract_all<E: OcrEngine + ?Sized>(
    engine: &E,
    images: Vec<DynamicImage>,
    slide_count: usize,
    debug: bool,
) -> Vec<SlideOcr> {
    if images.is_empty() {
        log::warn!("No slide images generated - using only structured text");
        return vec![SlideOcr::NoImage; slide_count];
    }

    if images.len() != slide_count {
        log::warn!(
            "Rendered {} page images for {} slides",
            images.len(),
            slide_count
        );
    }

    log::info!("Extracting text from {} slide images", images.len().min(slide_count));

    let mut outcomes: Vec<SlideOcr> = images
        .into_iter()
        .take(slide_count)
        .map(|image| extract_image_text(engine, &image, debug))
        .collect();
    outcomes.resize(slide_count, SlideOcr::NoImage);
    outcomes
}

//! The end-to-end check: extract, render, OCR, combine, analyze, write.

use anyhow::{Context, Result};
use deckcheck_analyzer::{InconsistencyAnalyzer, InferenceClient};
use deckcheck_core::{
    combine, log_summary, AnalysisResult, CombinedSlide, ResultWriter, SlideTextRecord,
};
use deckcheck_pptx::PptxParser;
use deckcheck_render::{extract_all, OcrEngine, SlideRenderer};
use image::DynamicImage;
use std::path::Path;

/// Characters of each combined slide shown in debug logs.
const COMBINED_PREVIEW_CHARS: usize = 500;

/// The stages of one run, wired together.
pub struct Pipeline<'a, E: ?Sized, C> {
    pub renderer: &'a SlideRenderer,
    pub ocr: &'a E,
    pub analyzer: &'a InconsistencyAnalyzer<C>,
    pub writer: &'a ResultWriter,
    pub debug: bool,
}

impl<E, C> Pipeline<'_, E, C>
where
    E: OcrEngine + ?Sized,
    C: InferenceClient,
{
    /// Check one presentation and write the result file.
    ///
    /// Only an unreadable presentation or an unwritable output file is an
    /// error; analysis failures are written as error records.
    pub fn run(&self, input: &Path) -> Result<AnalysisResult> {
        let records = extract_structured_text(input, self.debug)?;
        let images = self.renderer.render(input);
        let combined = combine_slides(&records, images, self.ocr, self.debug);

        let result = self.analyzer.analyze(&combined);

        self.writer.write(&result).with_context(|| {
            format!("Failed to write results to {}", self.writer.path().display())
        })?;
        log::info!(
            "Analysis complete. Results saved to {}",
            self.writer.path().display()
        );
        log_summary(&result);

        Ok(result)
    }
}

/// Read the native text of every slide.
pub fn extract_structured_text(input: &Path, debug: bool) -> Result<Vec<SlideTextRecord>> {
    let presentation = PptxParser::new()
        .with_debug(debug)
        .parse_file(input)
        .with_context(|| format!("Could not read presentation {}", input.display()))?;
    Ok(presentation.into_slides())
}

/// OCR the rendered pages and join them with the native text.
pub fn combine_slides<E: OcrEngine + ?Sized>(
    records: &[SlideTextRecord],
    images: Vec<DynamicImage>,
    ocr: &E,
    debug: bool,
) -> Vec<CombinedSlide> {
    let ocr_texts = extract_all(ocr, images, records.len(), debug);
    let combined = combine(records, &ocr_texts);

    if debug {
        for slide in &combined {
            let text = slide.text();
            if !text.trim().is_empty() {
                let preview: String = text.chars().take(COMBINED_PREVIEW_CHARS).collect();
                log::debug!(
                    "Slide {} combined text:\n{}...\n{}",
                    slide.number,
                    preview,
                    "-".repeat(40)
                );
            }
        }
    }

    combined
}

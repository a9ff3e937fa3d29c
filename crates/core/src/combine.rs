//! Joins native slide text with OCR text.

use crate::types::{CombinedSlide, SlideOcr, SlideTextRecord};

/// Combine per-slide text records with OCR outcomes.
///
/// Produces exactly one entry per record. OCR outcomes are matched by index;
/// a record without a matching outcome gets an empty OCR section.
pub fn combine(records: &[SlideTextRecord], ocr: &[SlideOcr]) -> Vec<CombinedSlide> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| CombinedSlide {
            number: record.number,
            structured: record.text(),
            ocr: ocr
                .get(idx)
                .map(|o| o.as_text().to_string())
                .unwrap_or_default(),
        })
        .collect()
}

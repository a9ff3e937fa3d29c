//! Domain types for extracted presentation content and analysis findings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker placed between a slide's native text and its OCR text.
pub const IMAGE_CONTENT_MARKER: &str = "[IMAGE CONTENT]";

/// Represents an entire presentation with its extracted text.
#[derive(Debug, Clone)]
pub struct Presentation {
    /// Original filename (without path).
    pub filename: String,

    /// Slides in presentation order.
    pub slides: Vec<SlideTextRecord>,
}

impl Presentation {
    /// Create an empty presentation with the given filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            slides: Vec::new(),
        }
    }

    /// Add a slide to the presentation.
    pub fn add_slide(&mut self, slide: SlideTextRecord) {
        self.slides.push(slide);
    }

    /// Consume the presentation, returning its slides.
    pub fn into_slides(self) -> Vec<SlideTextRecord> {
        self.slides
    }
}

/// One piece of text captured from a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Text of the title placeholder.
    Title(String),
    /// One non-empty paragraph from a shape's text frame.
    Body(String),
    /// Trimmed speaker notes.
    Notes(String),
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Title(text) => write!(f, "Title: {}", text),
            Fragment::Body(text) => f.write_str(text),
            Fragment::Notes(text) => write!(f, "Notes: {}", text),
        }
    }
}

/// Text captured from a single slide, in capture order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideTextRecord {
    /// 1-based slide number.
    pub number: usize,

    /// Title, body paragraphs and notes, in the order they were read.
    pub fragments: Vec<Fragment>,
}

impl SlideTextRecord {
    /// Create an empty record for the given slide number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            fragments: Vec::new(),
        }
    }

    /// Add a fragment.
    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Render the labelled text block for this slide.
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether nothing was captured from this slide.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// OCR outcome for one slide.
///
/// A failed engine call and a missing page image both contribute empty text
/// to the combined block, but stay distinguishable here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideOcr {
    /// Text recognized on the slide image.
    Text(String),
    /// The OCR engine failed on this slide's image.
    Failed,
    /// No image was rendered for this slide.
    NoImage,
}

impl SlideOcr {
    /// The recognized text, or an empty string.
    pub fn as_text(&self) -> &str {
        match self {
            SlideOcr::Text(text) => text,
            SlideOcr::Failed | SlideOcr::NoImage => "",
        }
    }
}

/// Native text and OCR text for one slide, joined for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedSlide {
    /// 1-based slide number.
    pub number: usize,

    /// Labelled native text of the slide.
    pub structured: String,

    /// OCR text of the slide image (empty when unavailable).
    pub ocr: String,
}

impl CombinedSlide {
    /// The block sent to the analyzer for this slide.
    pub fn text(&self) -> String {
        format!(
            "{}\n\n{}\n{}",
            self.structured, IMAGE_CONTENT_MARKER, self.ocr
        )
    }
}

/// Category of a detected inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InconsistencyKind {
    /// Conflicting numbers.
    Numerical,
    /// Contradictory claims.
    Textual,
    /// Mismatched dates or schedules.
    Timeline,
    /// Reasoning flaws or contradictory conclusions.
    Logical,
}

impl InconsistencyKind {
    /// All categories, in prompt order.
    pub const ALL: [InconsistencyKind; 4] = [
        InconsistencyKind::Numerical,
        InconsistencyKind::Textual,
        InconsistencyKind::Timeline,
        InconsistencyKind::Logical,
    ];

    /// The wire name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            InconsistencyKind::Numerical => "numerical",
            InconsistencyKind::Textual => "textual",
            InconsistencyKind::Timeline => "timeline",
            InconsistencyKind::Logical => "logical",
        }
    }
}

impl fmt::Display for InconsistencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inconsistency reported by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// 1-based slide numbers involved.
    pub slide_numbers: Vec<u32>,

    /// Explanation of the inconsistency.
    pub description: String,

    /// Category of the inconsistency.
    #[serde(rename = "type")]
    pub kind: InconsistencyKind,

    /// Model confidence in [0, 1].
    pub confidence: f64,
}

/// Error record written in place of findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// What went wrong.
    pub error: String,

    /// The unparsed model reply, when one was received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

/// Outcome of the analysis stage.
///
/// Serializes either as a JSON array of findings or as an object with an
/// `error` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    /// Findings reported by the model, in reply order.
    Findings(Vec<Finding>),
    /// The call or the reply parsing failed.
    Failed(ErrorRecord),
}

impl AnalysisResult {
    /// An error record without a model reply.
    pub fn failed(error: impl Into<String>) -> Self {
        AnalysisResult::Failed(ErrorRecord {
            error: error.into(),
            raw_text: None,
        })
    }

    /// An error record carrying the raw model reply.
    pub fn failed_with_raw(error: impl Into<String>, raw_text: impl Into<String>) -> Self {
        AnalysisResult::Failed(ErrorRecord {
            error: error.into(),
            raw_text: Some(raw_text.into()),
        })
    }

    /// The findings, if the analysis succeeded.
    pub fn findings(&self) -> Option<&[Finding]> {
        match self {
            AnalysisResult::Findings(findings) => Some(findings),
            AnalysisResult::Failed(_) => None,
        }
    }
}

//! Core domain types, content combining, and result reporting
//! for presentation consistency checks.

pub mod combine;
pub mod error;
pub mod report;
pub mod types;

pub use combine::combine;
pub use error::{Error, Result};
pub use report::{log_summary, summary_line, ResultWriter};
pub use types::{
    AnalysisResult, CombinedSlide, ErrorRecord, Finding, Fragment, InconsistencyKind,
    Presentation, SlideOcr, SlideTextRecord, IMAGE_CONTENT_MARKER,
};

//! Result file output and the human-readable summary.
//!
//! The result file holds either a JSON array of findings or an error
//! object, pretty-printed with two-space indentation.

use crate::error::Result;
use crate::types::{AnalysisResult, Finding};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes analysis results to a JSON file.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    /// Destination of the JSON output.
    path: PathBuf,
}

impl Default for ResultWriter {
    fn default() -> Self {
        Self {
            path: PathBuf::from("results.json"),
        }
    }
}

impl ResultWriter {
    /// Create a writer targeting the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the result to the output path.
    pub fn write(&self, result: &AnalysisResult) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        write_results(&mut writer, result)?;
        writer.flush()?;
        Ok(())
    }
}

/// Serialize a result as indented JSON followed by a newline.
pub fn write_results<W: Write>(writer: &mut W, result: &AnalysisResult) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// One summary line for a finding.
///
/// ```text
/// - Slide [1, 2]: Revenue differs (numerical, confidence: 0.90)
/// ```
pub fn summary_line(finding: &Finding) -> String {
    format!(
        "- Slide {:?}: {} ({}, confidence: {:.2})",
        finding.slide_numbers, finding.description, finding.kind, finding.confidence
    )
}

/// Log the summary of a result.
pub fn log_summary(result: &AnalysisResult) {
    match result {
        AnalysisResult::Findings(findings) => {
            log::info!("Found {} potential inconsistencies", findings.len());
            for finding in findings {
                log::info!("{}", summary_line(finding));
            }
        }
        AnalysisResult::Failed(_) => {
            log::warn!("No issues found or analysis failed. Check output file for details.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InconsistencyKind;

    fn finding(confidence: f64) -> Finding {
        Finding {
            slide_numbers: vec![1, 2],
            description: "Revenue differs".to_string(),
            kind: InconsistencyKind::Numerical,
            confidence,
        }
    }

    #[test]
    fn test_summary_line_two_decimals() {
        assert_eq!(
            summary_line(&finding(0.9)),
            "- Slide [1, 2]: Revenue differs (numerical, confidence: 0.90)"
        );
        assert!(summary_line(&finding(0.876)).ends_with("confidence: 0.88)"));
        assert!(summary_line(&finding(1.0)).ends_with("confidence: 1.00)"));
    }

    #[test]
    fn test_write_findings_indented() {
        let mut out = Vec::new();
        write_results(&mut out, &AnalysisResult::Findings(vec![finding(0.9)])).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("[\n  {\n    \"slide_numbers\": ["));
        assert!(text.contains("\"type\": \"numerical\""));
        assert!(text.ends_with("]\n"));
    }

    #[test]
    fn test_write_error_record() {
        let mut out = Vec::new();
        let result = AnalysisResult::failed_with_raw("JSON extraction failed", "not json at all");
        write_results(&mut out, &result).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["error"], "JSON extraction failed");
        assert_eq!(value["raw_text"], "not json at all");
    }

    #[test]
    fn test_writer_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let writer = ResultWriter::new(&path);

        writer.write(&AnalysisResult::failed("quota exceeded")).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"error\": \"quota exceeded\"\n}\n");
    }
}

//! Inconsistency detection over combined slide text.

use crate::gemini::InferenceClient;
use crate::prompt::{build_prompt, truncate_for_log, DEBUG_PREVIEW_CHARS, SYSTEM_INSTRUCTION};
use crate::response::extract_json;
use deckcheck_core::{AnalysisResult, CombinedSlide, Finding};
use serde_json::Value;

/// Error message recorded when no JSON could be recovered from a reply.
pub const EXTRACTION_FAILED: &str = "JSON extraction failed";

/// Sends a presentation to a language model and interprets the reply.
#[derive(Debug)]
pub struct InconsistencyAnalyzer<C> {
    client: C,
    debug: bool,
}

impl<C: InferenceClient> InconsistencyAnalyzer<C> {
    /// Create an analyzer over an inference client.
    pub fn new(client: C) -> Self {
        Self {
            client,
            debug: false,
        }
    }

    /// Set whether the prompt and raw reply are logged.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Analyze the slides.
    ///
    /// Never fails: call errors and unusable replies become
    /// [`AnalysisResult::Failed`].
    pub fn analyze(&self, slides: &[CombinedSlide]) -> AnalysisResult {
        log::info!("Analyzing content with the language model...");

        let prompt = build_prompt(slides);
        if self.debug {
            log::debug!(
                "Sending prompt (truncated):\n{}",
                truncate_for_log(&prompt, DEBUG_PREVIEW_CHARS)
            );
        }

        let reply = match self.client.generate(SYSTEM_INSTRUCTION, &prompt) {
            Ok(reply) => reply,
            Err(e) => {
                log::error!("Language model API error: {}", e);
                return AnalysisResult::failed(e.to_string());
            }
        };

        if self.debug {
            log::debug!("Raw model response: {}", reply);
        }

        interpret_reply(&reply)
    }
}

/// Turn a raw model reply into findings or an error record.
pub fn interpret_reply(reply: &str) -> AnalysisResult {
    let value = match extract_json(reply) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("{}", e);
            return AnalysisResult::failed_with_raw(EXTRACTION_FAILED, reply);
        }
    };

    match findings_from_value(value) {
        Ok(findings) => AnalysisResult::Findings(findings),
        Err(e) => {
            log::debug!("Reply JSON does not match the finding schema: {}", e);
            AnalysisResult::failed_with_raw(
                format!("Response did not match the finding schema: {}", e),
                reply,
            )
        }
    }
}

/// Accept an array of findings, or a single finding object.
fn findings_from_value(value: Value) -> serde_json::Result<Vec<Finding>> {
    match value {
        Value::Object(_) => serde_json::from_value::<Finding>(value).map(|f| vec![f]),
        other => serde_json::from_value(other),
    }
}

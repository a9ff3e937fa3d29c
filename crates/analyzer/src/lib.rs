//! Language-model inconsistency analysis.
//!
//! Builds the analysis prompt from combined slide text, sends it to an
//! inference service, and recovers structured findings from the reply.

pub mod analyzer;
pub mod gemini;
pub mod prompt;
pub mod response;

pub use analyzer::{interpret_reply, InconsistencyAnalyzer, EXTRACTION_FAILED};
pub use gemini::{GeminiClient, GeminiConfig, InferenceClient, API_KEY_ENV, DEFAULT_MODEL};
pub use prompt::{build_prompt, SYSTEM_INSTRUCTION};
pub use response::extract_json;

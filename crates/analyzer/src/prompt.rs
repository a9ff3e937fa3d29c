//! Prompt construction.

use deckcheck_core::CombinedSlide;

/// Instruction sent with every analysis request.
pub const SYSTEM_INSTRUCTION: &str = "Analyze this presentation for inconsistencies. Return findings as JSON. \
Focus on these types:\n\
1. numerical: Conflicting numbers (revenue, percentages, statistics)\n\
2. textual: Contradictory claims or statements\n\
3. timeline: Mismatched dates, schedules, or forecasts\n\
4. logical: Reasoning flaws or contradictory conclusions\n\n\
Output format: List of objects with these keys:\n\
- slide_numbers: array of slide numbers involved (1-indexed)\n\
- description: clear explanation of the inconsistency\n\
- type: one of ['numerical', 'textual', 'timeline', 'logical']\n\
- confidence: float between 0-1\n\n\
Only include findings with confidence > 0.5. \
Reference slide numbers explicitly in descriptions.";

/// Characters of prompt shown in debug logs.
pub const DEBUG_PREVIEW_CHARS: usize = 1000;

/// Label every slide block and join them with blank lines.
///
/// Slides are labelled by position, starting at 1.
pub fn build_prompt(slides: &[CombinedSlide]) -> String {
    slides
        .iter()
        .enumerate()
        .map(|(idx, slide)| format!("--- Slide {} ---\n{}", idx + 1, slide.text()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Shorten text for logging, cutting on a character boundary.
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}... [truncated]", &text[..end]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(number: usize, structured: &str) -> CombinedSlide {
        CombinedSlide {
            number,
            structured: structured.to_string(),
            ocr: String::new(),
        }
    }

    #[test]
    fn test_build_prompt_labels_slides() {
        let prompt = build_prompt(&[slide(1, "Title: A"), slide(2, "B")]);

        assert_eq!(
            prompt,
            "--- Slide 1 ---\nTitle: A\n\n[IMAGE CONTENT]\n\n\n--- Slide 2 ---\nB\n\n[IMAGE CONTENT]\n"
        );
    }

    #[test]
    fn test_build_prompt_empty() {
        assert_eq!(build_prompt(&[]), "");
    }

    #[test]
    fn test_instruction_names_every_category() {
        for kind in deckcheck_core::InconsistencyKind::ALL {
            assert!(SYSTEM_INSTRUCTION.contains(kind.as_str()));
        }
        assert!(SYSTEM_INSTRUCTION.contains("confidence > 0.5"));
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 10), "short");
        assert_eq!(truncate_for_log("abcdef", 3), "abc... [truncated]");
        assert_eq!(truncate_for_log("ééé", 2), "éé... [truncated]");
    }
}

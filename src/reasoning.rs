//! Extraction of reasoning segments from model output.
//!
//! Reasoning models wrap their chain of thought in a `<think>...</think>` tag
//! pair ahead of the answer. The tags and their interior are not part of the
//! visible message; the interior is rendered separately, de-emphasized.

/// Sentinel opening a reasoning segment.
pub const THINK_OPEN: &str = "<think>";

/// Sentinel closing a reasoning segment.
pub const THINK_CLOSE: &str = "</think>";

/// Model output split into its visible and reasoning parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitContent {
    /// The message text with the reasoning segment and tags removed, trimmed.
    pub visible: String,

    /// The reasoning segment, if present and non-blank.
    pub reasoning: Option<String>,
}

/// Splits the first `<think>...</think>` segment out of `content`.
///
/// The visible text is everything outside the tag pair, whitespace-trimmed.
/// The reasoning segment is the tag interior; a blank interior counts as
/// absent. Without a complete tag pair the content is returned trimmed and
/// unsplit, so an unclosed `<think>` stays visible.
pub fn split_reasoning(content: &str) -> SplitContent {
    let Some(open) = content.find(THINK_OPEN) else {
        return SplitContent {
            visible: content.trim().to_string(),
            reasoning: None,
        };
    };
    let interior_start = open + THINK_OPEN.len();
    let Some(close) = content[interior_start..].find(THINK_CLOSE) else {
        return SplitContent {
            visible: content.trim().to_string(),
            reasoning: None,
        };
    };
    let interior = &content[interior_start..interior_start + close];
    let after = &content[interior_start + close + THINK_CLOSE.len()..];

    let mut visible = String::with_capacity(open + after.len());
    visible.push_str(&content[..open]);
    visible.push_str(after);

    SplitContent {
        visible: visible.trim().to_string(),
        reasoning: if interior.trim().is_empty() {
            None
        } else {
            Some(interior.to_string())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through_trimmed() {
        let split = split_reasoning("  Hello, world!  \n");
        assert_eq!(split.visible, "Hello, world!");
        assert_eq!(split.reasoning, None);
    }

    #[test]
    fn reasoning_segment_is_extracted() {
        let split = split_reasoning("<think>The user greeted me.</think>\n\nHello!");
        assert_eq!(split.visible, "Hello!");
        assert_eq!(split.reasoning.as_deref(), Some("The user greeted me."));
    }

    #[test]
    fn reasoning_mid_message_leaves_surrounding_text() {
        let split = split_reasoning("Before <think>hmm</think> after");
        assert_eq!(split.visible, "Before  after");
        assert_eq!(split.reasoning.as_deref(), Some("hmm"));
    }

    #[test]
    fn blank_reasoning_counts_as_absent() {
        let split = split_reasoning("<think>   </think>Answer");
        assert_eq!(split.visible, "Answer");
        assert_eq!(split.reasoning, None);
    }

    #[test]
    fn unclosed_tag_is_not_split() {
        let split = split_reasoning("<think>never closed");
        assert_eq!(split.visible, "<think>never closed");
        assert_eq!(split.reasoning, None);
    }

    #[test]
    fn multiline_reasoning_is_preserved() {
        let split = split_reasoning("<think>line one\nline two</think>Done.");
        assert_eq!(split.reasoning.as_deref(), Some("line one\nline two"));
        assert_eq!(split.visible, "Done.");
    }

    #[test]
    fn only_first_segment_is_split() {
        let split = split_reasoning("<think>a</think>x<think>b</think>y");
        assert_eq!(split.reasoning.as_deref(), Some("a"));
        assert_eq!(split.visible, "x<think>b</think>y");
    }
}

/// Prompt construction for paragraph translation.
///
/// Builds the instruction text sent to the completion gateway, optionally
/// framing the target paragraph with a window of surrounding paragraphs.
/// Template used when context mode is off
const PLAIN_TEMPLATE: &str = "\
Translate the following paragraph into {target_language}.
Leave proper names in their original language.
The translated text must be in {target_language}.
Respond with the translation only. Do not include any other text.

Here is the paragraph: {paragraph}";

/// Template used when context mode is on
const CONTEXT_TEMPLATE: &str = "\
Here is the surrounding context of the article, for reference only:
{context}

Translate the following paragraph into {target_language}.
Leave proper names in their original language.
The translated text must be in {target_language}.
Respond with the translation only. Do not include any other text.

Here is the paragraph: {paragraph}";

/// Builds prompts for one translation run
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    /// Target language, injected verbatim into the template
    target_language: String,
    /// Whether prompts carry a surrounding-paragraph context window
    context_mode: bool,
    /// Paragraphs included before and after the target when context mode is on
    context_window_size: usize,
}

impl PromptBuilder {
    /// Create a prompt builder
    pub fn new(
        target_language: impl Into<String>,
        context_mode: bool,
        context_window_size: usize,
    ) -> Self {
        Self {
            target_language: target_language.into(),
            context_mode,
            context_window_size,
        }
    }

    /// Build the prompt for the paragraph at `index`.
    ///
    /// Context mode is a run-level configuration choice, not a per-call
    /// decision: every prompt of a run has the same shape, which also keeps
    /// retries byte-identical to the first attempt.
    pub fn build(&self, paragraphs: &[String], index: usize) -> String {
        let paragraph = &paragraphs[index];

        if self.context_mode {
            CONTEXT_TEMPLATE
                .replace("{context}", &self.context_window(paragraphs, index))
                .replace("{target_language}", &self.target_language)
                .replace("{paragraph}", paragraph)
        } else {
            PLAIN_TEMPLATE
                .replace("{target_language}", &self.target_language)
                .replace("{paragraph}", paragraph)
        }
    }

    /// Collect up to `context_window_size` paragraphs before and after the
    /// target, in source order, excluding the target itself
    fn context_window(&self, paragraphs: &[String], index: usize) -> String {
        let start = index.saturating_sub(self.context_window_size);
        let end = (index + 1 + self.context_window_size).min(paragraphs.len());

        let mut parts = Vec::new();
        parts.extend_from_slice(&paragraphs[start..index]);
        parts.extend_from_slice(&paragraphs[index + 1..end]);
        parts.join("\n")
    }
}

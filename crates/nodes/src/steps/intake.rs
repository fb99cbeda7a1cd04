use pipeline::{prefix_chars, ForgeError, ForgeState, Step, StepName, EMPTY_IDEA_PLACEHOLDER};

/// Maximum number of idea characters echoed into the intake log line.
const LOG_PREVIEW_CHARS: usize = 80;

/// First step: normalises the raw idea and seeds `feature_brief`.
///
/// - Trims surrounding whitespace from `idea`; an idea that is empty after
///   trimming becomes [`EMPTY_IDEA_PLACEHOLDER`].
/// - Sets `feature_brief` to the normalised idea when it is absent or empty.
/// - Logs the idea, truncated to 80 characters with a `...` marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intake;

impl Step for Intake {
    fn name(&self) -> StepName {
        StepName::from_static("intake")
    }

    fn apply(&self, mut state: ForgeState) -> Result<ForgeState, ForgeError> {
        let trimmed = state.idea.trim();
        state.idea = if trimmed.is_empty() {
            EMPTY_IDEA_PLACEHOLDER.to_owned()
        } else {
            trimmed.to_owned()
        };

        if state.feature_brief.as_deref().map_or(true, str::is_empty) {
            state.feature_brief = Some(state.idea.clone());
        }

        let truncated = state.idea.chars().count() > LOG_PREVIEW_CHARS;
        let message = format!(
            "[intake] normalized idea: {}{}",
            prefix_chars(&state.idea, LOG_PREVIEW_CHARS),
            if truncated { "..." } else { "" },
        );
        state.log(message);
        Ok(state)
    }
}

use pipeline::{ForgeError, ForgeState, Step, StepName};

/// Metadata key the linear brief is stored under.
pub const LINEAR_BRIEF_KEY: &str = "linear_brief";

/// Placeholder that turns the run into a linear, read-out friendly brief.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linearizer;

impl Step for Linearizer {
    fn name(&self) -> StepName {
        StepName::from_static("linearizer")
    }

    fn apply(&self, mut state: ForgeState) -> Result<ForgeState, ForgeError> {
        let linear_brief = format!(
            "PROJECT: {}\n\nSUMMARY:\n{}\n\nNOTE: This is a stub linearization from the FORGE kernel.",
            state.idea,
            state.feature_brief_or_idea(),
        );
        state.set_metadata(LINEAR_BRIEF_KEY, linear_brief);
        state.log("[linearizer] produced stub linear brief.");
        Ok(state)
    }
}

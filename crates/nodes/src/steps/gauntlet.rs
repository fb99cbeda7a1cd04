use pipeline::{prefix_chars, ForgeError, ForgeState, Step, StepName};
use serde::Serialize;

/// Metadata key the skeleton is stored under.
pub const SKELETON_KEY: &str = "skeleton";

/// Maximum number of idea characters used in the skeleton title.
const TITLE_IDEA_CHARS: usize = 60;

/// Evaluation stages the skeleton lists, in order.
pub const SKELETON_STAGES: [&str; 4] = [
    "research_stub",
    "blueprint_stub",
    "stress_test_stub",
    "integration_stub",
];

#[derive(Debug, Serialize)]
struct Skeleton<'a> {
    title: String,
    stages: &'a [&'a str],
}

/// Placeholder for multi-stage evaluation of the idea.
///
/// Attaches a fixed draft skeleton under `metadata["skeleton"]`, replacing any
/// earlier value at that key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gauntlet;

impl Step for Gauntlet {
    fn name(&self) -> StepName {
        StepName::from_static("gauntlet")
    }

    fn apply(&self, mut state: ForgeState) -> Result<ForgeState, ForgeError> {
        let skeleton = Skeleton {
            title: format!(
                "FORGE draft for: {}",
                prefix_chars(&state.idea, TITLE_IDEA_CHARS)
            ),
            stages: &SKELETON_STAGES,
        };
        let value = serde_json::to_value(&skeleton)
            .map_err(|e| ForgeError::step_failed(self.name(), e.to_string()))?;

        state.set_metadata(SKELETON_KEY, value);
        state.log("[gauntlet] attached draft skeleton structure.");
        Ok(state)
    }
}

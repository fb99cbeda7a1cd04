use pipeline::{ForgeError, ForgeState, Step, StepName};

/// Placeholder for brief clean-up (contradiction removal, structure
/// normalisation). Only records the brief's length.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fixer;

impl Step for Fixer {
    fn name(&self) -> StepName {
        StepName::from_static("fixer")
    }

    fn apply(&self, mut state: ForgeState) -> Result<ForgeState, ForgeError> {
        let length = state.feature_brief().chars().count();
        state.log(format!("[fixer] received feature_brief, length={length}"));
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn logs_brief_length_and_changes_nothing_else() {
        let input = ForgeState::new("idea").with_feature_brief("héllo");
        let out = Fixer.apply(input.clone()).unwrap();

        assert_eq!(out.logs, vec!["[fixer] received feature_brief, length=5"]);
        assert_eq!(ForgeState { logs: Vec::new(), ..out }, input);
    }

    #[test]
    fn absent_brief_counts_as_zero() {
        let out = Fixer.apply(ForgeState::new("idea")).unwrap();
        assert_eq!(out.logs, vec!["[fixer] received feature_brief, length=0"]);
    }
}

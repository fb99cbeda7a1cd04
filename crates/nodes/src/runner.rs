//! Sequential pipeline runner.
//!
//! [`PipelineRunner`] folds a [`ForgeState`] through an ordered list of
//! [`Step`]s. Execution is synchronous and deterministic: step N always sees the
//! cumulative effect of steps 1..N-1, nothing is skipped or retried, and the
//! first error aborts the run.

use std::sync::Arc;

use pipeline::{ForgeError, ForgeState, ReferenceCatalog, RunId, Step, StepName};

use crate::steps::{Fixer, Gauntlet, Intake, Linearizer, VaultPrep};

/// Ordered, immutable list of steps.
///
/// Holds no per-run state, so one runner can be shared (e.g. behind an
/// [`Arc`]) by any number of concurrent callers.
pub struct PipelineRunner {
    steps: Vec<Box<dyn Step>>,
}

impl PipelineRunner {
    /// Starts building a runner from custom steps.
    pub fn builder() -> PipelineRunnerBuilder {
        PipelineRunnerBuilder::default()
    }

    /// Names of the configured steps, in execution order.
    pub fn step_names(&self) -> Vec<StepName> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Number of configured steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the runner has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step against a copy of `initial` and returns the final state.
    ///
    /// `initial` itself is never modified.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a step. Later steps do not run and no
    /// partial state is returned.
    pub fn run(&self, initial: &ForgeState) -> Result<ForgeState, ForgeError> {
        let run_id = RunId::new();
        let span = tracing::info_span!("pipeline_run", %run_id, steps = self.steps.len());
        let _entered = span.enter();

        let mut state = initial.clone();
        for step in &self.steps {
            let name = step.name();
            tracing::debug!(step = %name, "running step");
            state = step.apply(state).inspect_err(|e| {
                tracing::warn!(step = %name, error = %e, "step failed; aborting run");
            })?;
        }

        tracing::info!(log_entries = state.logs.len(), "pipeline run complete");
        Ok(state)
    }
}

impl std::fmt::Debug for PipelineRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineRunner")
            .field("steps", &self.step_names())
            .finish()
    }
}

/// Builder for [`PipelineRunner`]. Steps run in the order they are added.
#[derive(Default)]
pub struct PipelineRunnerBuilder {
    steps: Vec<Box<dyn Step>>,
}

impl PipelineRunnerBuilder {
    /// Appends `step`.
    #[must_use]
    pub fn step(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Finishes the runner.
    pub fn build(self) -> PipelineRunner {
        PipelineRunner { steps: self.steps }
    }
}

/// Builds the default FORGE pipeline:
/// intake → fixer → gauntlet → linearizer → vault prep.
///
/// `catalog` supplies the reference line attached by the vault prep step.
pub fn forge_pipeline(catalog: Arc<dyn ReferenceCatalog>) -> PipelineRunner {
    PipelineRunner::builder()
        .step(Intake)
        .step(Fixer)
        .step(Gauntlet)
        .step(Linearizer)
        .step(VaultPrep::new(catalog))
        .build()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pipeline::{EmptyCatalog, FnStep};
    use pretty_assertions::assert_eq;

    use super::*;

    fn append(
        name: &'static str,
    ) -> FnStep<impl Fn(ForgeState) -> Result<ForgeState, ForgeError> + Send + Sync + 'static> {
        FnStep::new(name, move |mut state: ForgeState| {
            state.log(name);
            Ok(state)
        })
    }

    #[test]
    fn default_pipeline_order() {
        let runner = forge_pipeline(Arc::new(EmptyCatalog));
        let names: Vec<String> = runner.step_names().iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            vec!["intake", "fixer", "gauntlet", "linearizer", "vault_prep"]
        );
    }

    #[test]
    fn steps_observe_earlier_effects_in_order() {
        let runner = PipelineRunner::builder()
            .step(append("first"))
            .step(append("second"))
            .step(FnStep::new("check", |mut state: ForgeState| {
                assert_eq!(state.logs, vec!["first", "second"]);
                state.log("third");
                Ok(state)
            }))
            .build();

        let out = runner.run(&ForgeState::default()).unwrap();
        assert_eq!(out.logs, vec!["first", "second", "third"]);
    }

    #[test]
    fn caller_state_is_not_mutated() {
        let initial = ForgeState::new("  padded  ");
        let runner = forge_pipeline(Arc::new(EmptyCatalog));
        let _ = runner.run(&initial).unwrap();

        assert_eq!(initial, ForgeState::new("  padded  "));
    }

    #[test]
    fn failing_step_aborts_remaining_steps() {
        static AFTER_FAILURE: AtomicUsize = AtomicUsize::new(0);

        let runner = PipelineRunner::builder()
            .step(append("ok"))
            .step(FnStep::new("broken", |_state: ForgeState| {
                Err(ForgeError::step_failed(
                    StepName::from_static("broken"),
                    "deliberate",
                ))
            }))
            .step(FnStep::new("never", |state: ForgeState| {
                AFTER_FAILURE.fetch_add(1, Ordering::SeqCst);
                Ok(state)
            }))
            .build();

        let err = runner.run(&ForgeState::default()).unwrap_err();
        assert!(matches!(err, ForgeError::StepFailed { ref step, .. } if step.as_str() == "broken"));
        assert_eq!(AFTER_FAILURE.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_runner_returns_copy_of_input() {
        let runner = PipelineRunner::builder().build();
        assert!(runner.is_empty());
        let initial = ForgeState::new("as is");
        assert_eq!(runner.run(&initial).unwrap(), initial);
    }
}

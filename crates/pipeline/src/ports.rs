//! Port traits implemented outside this crate.
//!
//! [`Step`] is implemented by the pipeline nodes; [`ReferenceCatalog`] by the
//! reference data loader. The domain crate defines *what* is needed and the
//! other crates supply it.

use crate::{ForgeError, ForgeState, StepName};

/// One stage of the pipeline: a transformation from state to state.
///
/// Implementations receive the state by value and hand back the (possibly
/// modified) state. Returning `Err` aborts the whole run.
pub trait Step: Send + Sync {
    /// Stable name used in tracing events and error reports.
    fn name(&self) -> StepName;

    /// Transforms `state`.
    fn apply(&self, state: ForgeState) -> Result<ForgeState, ForgeError>;
}

/// Adapts a closure into a [`Step`].
///
/// ```
/// use pipeline::{FnStep, ForgeState, Step};
///
/// let shout = FnStep::new("shout", |mut state: ForgeState| {
///     state.idea = state.idea.to_uppercase();
///     Ok(state)
/// });
/// let out = shout.apply(ForgeState::new("hi")).unwrap();
/// assert_eq!(out.idea, "HI");
/// ```
pub struct FnStep<F> {
    name: &'static str,
    f: F,
}

impl<F> FnStep<F>
where
    F: Fn(ForgeState) -> Result<ForgeState, ForgeError> + Send + Sync,
{
    /// Wraps `f` as a step called `name`.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> Step for FnStep<F>
where
    F: Fn(ForgeState) -> Result<ForgeState, ForgeError> + Send + Sync,
{
    fn name(&self) -> StepName {
        StepName::from_static(self.name)
    }

    fn apply(&self, state: ForgeState) -> Result<ForgeState, ForgeError> {
        (self.f)(state)
    }
}

impl<F> std::fmt::Debug for FnStep<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStep").field("name", &self.name).finish()
    }
}

/// Read-only lookup over the public reference entries.
///
/// Loaded once at start-up and shared by reference between concurrent runs;
/// implementations must not mutate after construction.
pub trait ReferenceCatalog: Send + Sync {
    /// Id of the first public entry, if any entries were loaded.
    fn first_public_id(&self) -> Option<&str>;

    /// Text payload of the public entry with `id`, if present.
    fn public_text(&self, id: &str) -> Option<&str>;
}

/// A catalog with no entries, used when no reference data is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl ReferenceCatalog for EmptyCatalog {
    fn first_public_id(&self) -> Option<&str> {
        None
    }

    fn public_text(&self, _id: &str) -> Option<&str> {
        None
    }
}

use std::sync::Arc;

use pipeline::{ForgeError, ForgeState, ReferenceCatalog, Step, StepName};
use serde::Serialize;

/// Metadata key for the attached reference line.
pub const FORGE_IPSUM_KEY: &str = "forge_ipsum";

/// Metadata key for the run status.
pub const STATUS_KEY: &str = "status";

/// Status every completed run is marked with.
pub const DRAFT_STATUS: &str = "draft";

#[derive(Debug, Serialize)]
struct ForgeIpsum<'a> {
    #[serde(rename = "ref")]
    reference: &'a str,
    text: &'a str,
}

/// Final step before storage: attaches one public reference line when one is
/// available and marks the state as a draft.
///
/// The reference line is taken from the first public entry of the catalog.
/// With no entries loaded the `forge_ipsum` key is left out entirely.
#[derive(Clone)]
pub struct VaultPrep {
    catalog: Arc<dyn ReferenceCatalog>,
}

impl VaultPrep {
    /// Creates the step over `catalog`.
    pub fn new(catalog: Arc<dyn ReferenceCatalog>) -> Self {
        Self { catalog }
    }
}

impl std::fmt::Debug for VaultPrep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultPrep")
            .field("first_public_id", &self.catalog.first_public_id())
            .finish()
    }
}

impl Step for VaultPrep {
    fn name(&self) -> StepName {
        StepName::from_static("vault_prep")
    }

    fn apply(&self, mut state: ForgeState) -> Result<ForgeState, ForgeError> {
        let attached = self
            .catalog
            .first_public_id()
            .filter(|id| !id.is_empty())
            .and_then(|id| {
                self.catalog
                    .public_text(id)
                    .filter(|text| !text.is_empty())
                    .map(|text| ForgeIpsum { reference: id, text })
            });

        if let Some(ipsum) = attached {
            let value = serde_json::to_value(&ipsum)
                .map_err(|e| ForgeError::step_failed(self.name(), e.to_string()))?;
            state.set_metadata(FORGE_IPSUM_KEY, value);
        } else {
            tracing::debug!("no public reference entry available; forge_ipsum omitted");
        }

        state.set_metadata(STATUS_KEY, DRAFT_STATUS);
        state.log("[vault_prep] marked state as draft and attached FORGE ipsum (if available).");
        Ok(state)
    }
}

//! The five default FORGE pipeline steps, in execution order.

mod fixer;
mod gauntlet;
mod intake;
mod linearizer;
mod vault_prep;

pub use fixer::Fixer;
pub use gauntlet::{Gauntlet, SKELETON_KEY, SKELETON_STAGES};
pub use intake::Intake;
pub use linearizer::{Linearizer, LINEAR_BRIEF_KEY};
pub use vault_prep::{VaultPrep, DRAFT_STATUS, FORGE_IPSUM_KEY, STATUS_KEY};

//! Core domain for the FORGE kernel.
//!
//! This crate contains the run state, newtype identifiers, the error type, and
//! the port traits that the step implementations and the reference data loader
//! plug into. Infrastructure crates implement the traits defined here; they
//! never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; other crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`state`] | [`ForgeState`], the metadata map, text helpers |
//! | [`identifiers`] | Newtype identifiers (`ProjectId`, `StepName`, `RunId`) |
//! | [`errors`] | [`ForgeError`] |
//! | [`ports`] | [`Step`], [`FnStep`], [`ReferenceCatalog`] |
//! | [`factory`] | Factory task registry |

pub mod errors;
pub mod factory;
pub mod identifiers;
pub mod ports;
pub mod state;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::ForgeError;
pub use factory::{Factory, FactoryTask, FactoryTaskKind, FactoryTaskStatus};
pub use identifiers::{ProjectId, RunId, StepName};
pub use ports::{EmptyCatalog, FnStep, ReferenceCatalog, Step};
pub use state::{prefix_chars, ForgeState, Metadata, EMPTY_IDEA_PLACEHOLDER};

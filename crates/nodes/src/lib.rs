//! FORGE kernel pipeline steps and runner.
//!
//! This crate provides the five default pipeline steps (Intake, Fixer,
//! Gauntlet, Linearizer, Vault Prep) and the [`PipelineRunner`] that threads a
//! [`pipeline::ForgeState`] through them in order.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Steps operate on the domain types from the
//! [`pipeline`] crate and reach reference data only through
//! [`pipeline::ReferenceCatalog`]. Nothing here performs I/O.
//!
//! Every step is currently a placeholder: trimming, logging, and attaching
//! static data. Multi-model evaluation, retries, and persistence are out of
//! scope for this crate.

pub mod runner;
pub mod steps;

pub use runner::{forge_pipeline, PipelineRunner, PipelineRunnerBuilder};
pub use steps::{Fixer, Gauntlet, Intake, Linearizer, VaultPrep};

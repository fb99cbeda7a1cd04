//! Top-level error type for the FORGE kernel domain.
//!
//! [`ForgeError`] covers conditions that abort a pipeline run or prevent the
//! kernel from starting. Component-level errors (reference data I/O, HTTP
//! binding) are defined in their respective crates and convert into
//! [`ForgeError`] where they cross into the domain.
//!
//! Missing optional input is never an error: steps substitute empty defaults.
//! There is no retry policy; a run either completes every step or fails as a
//! whole.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::StepName;

/// Errors that abort a pipeline run or kernel start-up.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum ForgeError {
    /// A step failed while transforming the run state.
    ///
    /// The runner stops at the failing step; later steps never execute and no
    /// partial state is returned.
    #[error("Step '{step}' failed: {reason}")]
    StepFailed {
        /// Name of the step that failed.
        step: StepName,
        /// Human-readable description of the failure.
        reason: String,
    },

    /// The reference data source exists but could not be read or parsed.
    #[error("Reference data error: {message}")]
    ReferenceData {
        /// Description of the read or parse problem.
        message: String,
    },

    /// The kernel configuration is invalid.
    ///
    /// Produced at load time; the kernel never starts with an invalid config.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },
}

impl ForgeError {
    /// Builds a [`ForgeError::StepFailed`] for `step`.
    pub fn step_failed(step: StepName, reason: impl Into<String>) -> Self {
        Self::StepFailed {
            step,
            reason: reason.into(),
        }
    }

    /// Builds a [`ForgeError::ConfigurationError`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }
}

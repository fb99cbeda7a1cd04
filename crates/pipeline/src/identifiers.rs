//! Newtype domain identifiers.
//!
//! Every domain concept that has an identity is represented as a distinct newtype
//! wrapping a primitive, so a [`ProjectId`] can never be passed where a
//! [`StepName`] is expected even though both are strings underneath.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Opaque external project identifier (e.g. a database row or repository id).
    ///
    /// The kernel never interprets it; it is carried from the request into the
    /// final state unchanged. Serialises as a bare JSON string.
    ///
    /// Deserialisation does not reject `""`; entry points that accept ids from
    /// the wire treat an empty id as absent.
    ProjectId
}

string_id! {
    /// Name of one pipeline step, e.g. `"intake"` or `"vault_prep"`.
    ///
    /// Used as the tracing field for per-step events and in
    /// [`crate::ForgeError::StepFailed`].
    StepName
}

impl StepName {
    /// Creates a [`StepName`] from a compile-time constant.
    pub fn from_static(name: &'static str) -> Self {
        debug_assert!(!name.is_empty(), "step names must not be empty");
        Self(name.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single pipeline run (one invocation of the runner).
///
/// Generated fresh for every run and recorded on the run's tracing span so
/// all events from one request can be correlated. It is not part of the
/// serialised state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random [`RunId`].
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_project_id_is_rejected() {
        assert!(ProjectId::new("").is_none());
        assert_eq!(ProjectId::new("gh-42").unwrap().as_str(), "gh-42");
    }

    #[test]
    fn project_id_serialises_as_plain_string() {
        let id = ProjectId::new("proj-7").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"proj-7\"");
        let back: ProjectId = serde_json::from_str("\"proj-7\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(RunId::new(), RunId::new());
    }
}

//! The run state threaded through the FORGE pipeline.
//!
//! A [`ForgeState`] is created fresh per request, moved through every step in
//! order, and discarded once the response has been produced. Steps are
//! additive: each may add `metadata` keys and append `logs` entries, but none
//! removes keys it did not set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProjectId;

/// Open-ended, insertion-ordered metadata accumulated across steps.
///
/// Values may be any JSON value (text, number, bool, null, nested mapping,
/// sequence).
pub type Metadata = serde_json::Map<String, Value>;

/// Placeholder substituted for an idea that is empty after trimming.
pub const EMPTY_IDEA_PLACEHOLDER: &str = "Untitled idea (empty input).";

/// State object that flows through the FORGE kernel.
///
/// Every field tolerates absence on input: a missing `idea` deserialises as an
/// empty string, missing `metadata`/`logs` as empty containers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForgeState {
    /// Raw idea text; non-empty once the intake step has run.
    #[serde(default)]
    pub idea: String,

    /// Structured brief. Seeded from `idea` by intake when absent or empty.
    #[serde(default)]
    pub feature_brief: Option<String>,

    /// External project identifier, passed through untouched.
    #[serde(default)]
    pub project_id: Option<ProjectId>,

    /// Metadata accumulated across steps.
    #[serde(default)]
    pub metadata: Metadata,

    /// Append-only log, one entry per step.
    #[serde(default)]
    pub logs: Vec<String>,
}

impl ForgeState {
    /// Creates a state holding only `idea`.
    pub fn new(idea: impl Into<String>) -> Self {
        Self {
            idea: idea.into(),
            ..Self::default()
        }
    }

    /// Sets `feature_brief`.
    #[must_use]
    pub fn with_feature_brief(mut self, brief: impl Into<String>) -> Self {
        self.feature_brief = Some(brief.into());
        self
    }

    /// Sets `project_id`.
    #[must_use]
    pub fn with_project_id(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Replaces `metadata`.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns `feature_brief`, or `""` when absent.
    pub fn feature_brief(&self) -> &str {
        self.feature_brief.as_deref().unwrap_or_default()
    }

    /// Returns `feature_brief` when present, otherwise `idea`.
    pub fn feature_brief_or_idea(&self) -> &str {
        match self.feature_brief.as_deref() {
            Some(brief) => brief,
            None => &self.idea,
        }
    }

    /// Appends one message to `logs`.
    pub fn log(&mut self, message: impl Into<String>) {
        self.logs.push(message.into());
    }

    /// Inserts `value` under `key` in `metadata`, replacing any prior value at
    /// that key only.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metadata.insert(key.into(), value.into());
    }
}

/// Returns the first `max` characters of `text`.
///
/// Counts Unicode scalar values, not bytes, so multi-byte text is never split
/// mid-character.
pub fn prefix_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn deserialises_with_every_field_absent() {
        let state: ForgeState = serde_json::from_value(json!({})).unwrap();
        assert_eq!(state, ForgeState::default());
    }

    #[test]
    fn serialises_all_fields_including_nulls() {
        let state = ForgeState::new("x");
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({
                "idea": "x",
                "feature_brief": null,
                "project_id": null,
                "metadata": {},
                "logs": [],
            })
        );
    }

    #[test]
    fn metadata_keeps_insertion_order() {
        let mut state = ForgeState::new("x");
        state.set_metadata("zeta", 1);
        state.set_metadata("alpha", 2);
        let keys: Vec<&str> = state.metadata.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn feature_brief_falls_back_to_idea() {
        let state = ForgeState::new("idea text");
        assert_eq!(state.feature_brief(), "");
        assert_eq!(state.feature_brief_or_idea(), "idea text");

        let state = state.with_feature_brief("brief");
        assert_eq!(state.feature_brief_or_idea(), "brief");
    }

    #[test]
    fn prefix_chars_respects_char_boundaries() {
        assert_eq!(prefix_chars("héllo", 2), "hé");
        assert_eq!(prefix_chars("abc", 10), "abc");
        assert_eq!(prefix_chars("", 3), "");
    }
}

use std::sync::Arc;

use nodes::forge_pipeline;
use nodes::steps::{FORGE_IPSUM_KEY, LINEAR_BRIEF_KEY, SKELETON_KEY, STATUS_KEY};
use pipeline::{EmptyCatalog, ForgeState, Metadata, ProjectId, ReferenceCatalog};
use pretty_assertions::assert_eq;
use serde_json::json;

struct StaticCatalog(Vec<(&'static str, &'static str)>);

impl ReferenceCatalog for StaticCatalog {
    fn first_public_id(&self) -> Option<&str> {
        self.0.first().map(|(id, _)| *id)
    }

    fn public_text(&self, id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, text)| *text)
    }
}

#[test]
fn todo_app_example() {
    let runner = forge_pipeline(Arc::new(EmptyCatalog));
    let out = runner.run(&ForgeState::new("Build a todo app")).unwrap();

    assert_eq!(out.idea, "Build a todo app");
    assert_eq!(out.feature_brief.as_deref(), Some("Build a todo app"));
    assert_eq!(
        out.metadata[SKELETON_KEY]["title"],
        json!("FORGE draft for: Build a todo app")
    );
    assert_eq!(out.metadata[STATUS_KEY], json!("draft"));
    assert_eq!(
        out.logs,
        vec![
            "[intake] normalized idea: Build a todo app",
            "[fixer] received feature_brief, length=16",
            "[gauntlet] attached draft skeleton structure.",
            "[linearizer] produced stub linear brief.",
            "[vault_prep] marked state as draft and attached FORGE ipsum (if available).",
        ]
    );
}

#[test]
fn blank_idea_becomes_placeholder() {
    let runner = forge_pipeline(Arc::new(EmptyCatalog));
    let out = runner.run(&ForgeState::new("   ")).unwrap();

    assert_eq!(out.idea, "Untitled idea (empty input).");
    assert_eq!(out.logs.len(), 5);
}

#[test]
fn metadata_keys_without_reference_data() {
    let runner = forge_pipeline(Arc::new(EmptyCatalog));
    let out = runner.run(&ForgeState::new("idea")).unwrap();

    let keys: Vec<&str> = out.metadata.keys().map(String::as_str).collect();
    assert_eq!(keys, vec![SKELETON_KEY, LINEAR_BRIEF_KEY, STATUS_KEY]);
}

#[test]
fn reference_entry_is_attached_when_present() {
    let catalog = StaticCatalog(vec![("FI-001", "first line"), ("FI-002", "second line")]);
    let runner = forge_pipeline(Arc::new(catalog));
    let out = runner.run(&ForgeState::new("idea")).unwrap();

    assert_eq!(
        out.metadata[FORGE_IPSUM_KEY],
        json!({ "ref": "FI-001", "text": "first line" })
    );
}

#[test]
fn blank_reference_entry_is_not_attached() {
    let runner = forge_pipeline(Arc::new(StaticCatalog(vec![("", "")])));
    let out = runner.run(&ForgeState::new("idea")).unwrap();

    assert!(!out.metadata.contains_key(FORGE_IPSUM_KEY));
    assert_eq!(out.metadata[STATUS_KEY], json!("draft"));
}

#[test]
fn caller_fields_pass_through() {
    let mut metadata = Metadata::new();
    metadata.insert("source".to_owned(), json!({ "channel": "voice", "tags": [1, 2] }));

    let initial = ForgeState::new("  Ship it  ")
        .with_feature_brief("A detailed brief")
        .with_project_id(ProjectId::new("proj-123").unwrap())
        .with_metadata(metadata);

    let runner = forge_pipeline(Arc::new(EmptyCatalog));
    let out = runner.run(&initial).unwrap();

    assert_eq!(out.idea, "Ship it");
    assert_eq!(out.feature_brief.as_deref(), Some("A detailed brief"));
    assert_eq!(out.project_id.as_ref().map(ProjectId::as_str), Some("proj-123"));
    assert_eq!(
        out.metadata["source"],
        json!({ "channel": "voice", "tags": [1, 2] })
    );
    assert_eq!(out.logs[1], "[fixer] received feature_brief, length=16");
}

#[test]
fn independent_runs_produce_identical_output() {
    let runner = forge_pipeline(Arc::new(StaticCatalog(vec![("a", "b")])));

    let first = runner.run(&ForgeState::new("same idea")).unwrap();
    let second = runner.run(&ForgeState::new("same idea")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn final_state_serialises_with_expected_shape() {
    let runner = forge_pipeline(Arc::new(EmptyCatalog));
    let out = runner.run(&ForgeState::new("Build a todo app")).unwrap();
    let value = serde_json::to_value(&out).unwrap();

    assert_eq!(value["project_id"], json!(null));
    assert_eq!(value["metadata"]["status"], json!("draft"));
    assert_eq!(value["logs"].as_array().map(Vec::len), Some(5));
}

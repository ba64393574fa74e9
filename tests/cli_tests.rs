use clap::Parser;
use field_autofill::cli::commands::{cmd_fill, cmd_mappings, cmd_scan};
use field_autofill::cli::config::{
    AppConfig, Cli, Commands, MappingAction, Target, load_config, parse_assignment,
    resolve_mappings_path,
};
use field_autofill::error::AutofillError;
use field_autofill::field::field_model::Category;
use field_autofill::fill::mapping::MappingTable;
use field_autofill::store::mapping_store::{MappingStore, MemoryStore};

mod common;
use common::fixture_path;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_scan_with_fixture() {
    let cli = Cli::parse_from(["field-autofill", "scan", "--fixture", "page.json"]);
    match cli.command {
        Commands::Scan {
            url,
            fixture,
            format,
        } => {
            assert_eq!(url, None);
            assert_eq!(fixture.as_deref(), Some("page.json"));
            assert_eq!(format, "console");
        }
        _ => panic!("Expected Scan command"),
    }
    assert_eq!(cli.verbose, 0);
}

#[test]
fn cli_parse_fill_dry_run_with_globals() {
    let cli = Cli::parse_from([
        "field-autofill",
        "fill",
        "--url",
        "https://example.com/signup",
        "--dry-run",
        "-vv",
        "--mappings",
        "mine.json",
    ]);
    match cli.command {
        Commands::Fill { url, dry_run, .. } => {
            assert_eq!(url.as_deref(), Some("https://example.com/signup"));
            assert!(dry_run);
        }
        _ => panic!("Expected Fill command"),
    }
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.mappings.as_deref(), Some("mine.json"));
}

#[test]
fn cli_parse_mappings_set() {
    let cli = Cli::parse_from([
        "field-autofill",
        "mappings",
        "set",
        "email=me@example.com",
        "city=Paris",
    ]);
    match cli.command {
        Commands::Mappings { action } => assert_eq!(
            action,
            MappingAction::Set {
                entries: vec!["email=me@example.com".into(), "city=Paris".into()]
            }
        ),
        _ => panic!("Expected Mappings command"),
    }
}

#[test]
fn cli_rejects_url_with_fixture() {
    let result = Cli::try_parse_from([
        "field-autofill",
        "scan",
        "--url",
        "https://example.com",
        "--fixture",
        "page.json",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_requires_entries_for_set() {
    assert!(Cli::try_parse_from(["field-autofill", "mappings", "set"]).is_err());
}

// ============================================================================
// Argument helpers
// ============================================================================

#[test]
fn target_needs_exactly_one_source() {
    assert_eq!(
        Target::from_args(Some("https://a.com".into()), None).unwrap(),
        Target::Url("https://a.com".into())
    );
    assert_eq!(
        Target::from_args(None, Some("p.json".into())).unwrap(),
        Target::Fixture("p.json".into())
    );
    assert!(matches!(
        Target::from_args(None, None),
        Err(AutofillError::Validation(_))
    ));
    assert!(matches!(
        Target::from_args(Some("u".into()), Some("f".into())),
        Err(AutofillError::Validation(_))
    ));
}

#[test]
fn assignment_splits_on_first_equals() {
    assert_eq!(
        parse_assignment(" website = https://x.com/?a=b ").unwrap(),
        ("website".to_string(), "https://x.com/?a=b".to_string())
    );
    assert!(matches!(
        parse_assignment("email"),
        Err(AutofillError::Validation(_))
    ));
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn missing_config_file_gives_defaults() {
    let config = load_config(Some("/nonexistent/field-autofill.yaml"));
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.mappings.path, "field-mappings.json");
    assert_eq!(config.trace.path, None);
}

#[test]
fn yaml_config_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("field-autofill.yaml");
    std::fs::write(
        &path,
        "browser:\n  script: tools/server.js\nmappings:\n  path: /tmp/m.json\ntrace:\n  path: trace.jsonl\n",
    )
    .unwrap();

    let config = load_config(path.to_str());

    assert_eq!(config.browser.node, "node");
    assert_eq!(config.browser.script, "tools/server.js");
    assert_eq!(config.mappings.path, "/tmp/m.json");
    assert_eq!(config.trace.path.as_deref(), Some("trace.jsonl"));
}

#[test]
fn malformed_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("field-autofill.yaml");
    std::fs::write(&path, "mappings: [unclosed").unwrap();

    assert_eq!(load_config(path.to_str()), AppConfig::default());
}

#[test]
fn mappings_flag_beats_config_file() {
    let config = AppConfig::default();
    assert_eq!(resolve_mappings_path(Some("cli.json"), &config), "cli.json");
    assert_eq!(resolve_mappings_path(None, &config), "field-mappings.json");
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn mappings_set_merges_into_current_table() {
    let store = MemoryStore::new();
    let action = MappingAction::Set {
        entries: vec!["email=me@example.com".into()],
    };

    cmd_mappings(&action, &store).unwrap();

    let table = store.load().unwrap();
    assert_eq!(table.len(), Category::ALL.len());
    assert_eq!(table.get(Category::Email), Some("me@example.com"));
    assert_eq!(table.get(Category::FirstName), Some("John"));
}

#[test]
fn mappings_set_with_bad_category_saves_nothing() {
    let store = MemoryStore::with_table(MappingTable::empty());
    let action = MappingAction::Set {
        entries: vec!["shoe_size=42".into()],
    };

    assert!(cmd_mappings(&action, &store).is_err());
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn mappings_set_with_blank_value_clears_category() {
    let store = MemoryStore::new();
    let action = MappingAction::Set {
        entries: vec!["email=".into(), "city=Paris".into()],
    };

    cmd_mappings(&action, &store).unwrap();

    let table = store.load().unwrap();
    assert_eq!(table.get(Category::Email), None);
    assert_eq!(table.get(Category::City), Some("Paris"));
    assert_eq!(table.len(), Category::ALL.len() - 1);
}

#[test]
fn mappings_unset_and_reset() {
    let store = MemoryStore::new();

    cmd_mappings(
        &MappingAction::Unset {
            categories: vec!["email".into(), "Phone".into()],
        },
        &store,
    )
    .unwrap();
    let table = store.load().unwrap();
    assert_eq!(table.get(Category::Email), None);
    assert_eq!(table.get(Category::Phone), None);
    assert_eq!(table.len(), Category::ALL.len() - 2);

    cmd_mappings(&MappingAction::Reset, &store).unwrap();
    assert_eq!(store.load().unwrap(), MappingTable::defaults());
}

#[test]
fn scan_and_fill_run_against_fixture_file() {
    let store = MemoryStore::new();
    let config = AppConfig::default();
    let target = Target::Fixture(fixture_path("signup.json").display().to_string());

    cmd_scan(&target, "json", &config, &store).unwrap();
    cmd_scan(&target, "console", &config, &store).unwrap();
    cmd_fill(&target, true, &config, &store).unwrap();
    cmd_fill(&target, false, &config, &store).unwrap();
}

#[test]
fn scan_of_missing_fixture_fails() {
    let store = MemoryStore::new();
    let target = Target::Fixture("/nonexistent/page.json".into());
    let err = cmd_scan(&target, "console", &AppConfig::default(), &store).unwrap_err();
    assert!(matches!(err, AutofillError::Extraction(_)));
}

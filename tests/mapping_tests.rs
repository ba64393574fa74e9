use field_autofill::error::AutofillError;
use field_autofill::field::field_model::Category;
use field_autofill::fill::mapping::MappingTable;
use field_autofill::store::mapping_store::{
    JsonFileStore, MappingStore, MemoryStore, update_mapping,
};

// ============================================================================
// MappingTable
// ============================================================================

#[test]
fn defaults_cover_every_category() {
    let defaults = MappingTable::defaults();
    assert_eq!(defaults.len(), Category::ALL.len());
    for category in Category::ALL {
        assert!(defaults.get(category).is_some(), "{}", category);
    }
    assert_eq!(defaults.get(Category::Email), Some("your_email@example.com"));
    assert_eq!(defaults.get(Category::State), Some("NY"));
}

#[test]
fn empty_value_reads_as_unset() {
    let mut table = MappingTable::empty();
    table.set(Category::City, "");
    assert_eq!(table.get(Category::City), None);
    assert_eq!(table.len(), 1);
}

#[test]
fn from_entries_trims_and_drops_blank_pairs() {
    let table = MappingTable::from_entries([
        ("  email ", " me@example.com "),
        ("", "orphan value"),
        ("city", "   "),
        ("Phone", "+4400"),
    ])
    .unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(Category::Email), Some("me@example.com"));
    assert_eq!(table.get(Category::Phone), Some("+4400"));
    assert_eq!(table.get(Category::City), None);
}

#[test]
fn from_entries_rejects_unknown_category() {
    let err = MappingTable::from_entries([("email", "a@b.com"), ("favorite_color", "blue")])
        .unwrap_err();
    assert!(matches!(err, AutofillError::Validation(ref msg) if msg.contains("favorite_color")));
}

#[test]
fn later_entries_override_earlier_ones() {
    let table = MappingTable::from_entries([("email", "old@x.com"), ("email", "new@x.com")]).unwrap();
    assert_eq!(table.get(Category::Email), Some("new@x.com"));
}

#[test]
fn table_serializes_as_flat_object() {
    let table: MappingTable = [(Category::ZipCode, "10001"), (Category::Email, "a@b.com")]
        .into_iter()
        .collect();

    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"email": "a@b.com", "zip_code": "10001"})
    );
}

// ============================================================================
// JsonFileStore
// ============================================================================

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("mappings.json"));
    assert_eq!(store.load().unwrap(), MappingTable::defaults());
}

#[test]
fn saved_table_is_loaded_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested").join("mappings.json"));
    let table = MappingTable::from_entries([("email", "me@example.com")]).unwrap();

    store.save(&table).unwrap();

    assert!(store.path().exists(), "parent directories are created");
    assert_eq!(store.load().unwrap(), table);
}

#[test]
fn saved_empty_table_stays_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("mappings.json"));

    store.save(&MappingTable::empty()).unwrap();

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mappings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonFileStore::new(&path).load().unwrap_err();
    assert!(matches!(err, AutofillError::JsonParse { .. }));
}

#[test]
fn unknown_keys_in_stored_file_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mappings.json");
    std::fs::write(&path, r#"{"email": "me@example.com", "shoe_size": "42", "City": "Paris"}"#)
        .unwrap();

    let table = JsonFileStore::new(&path).load().unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(Category::Email), Some("me@example.com"));
    assert_eq!(table.get(Category::City), Some("Paris"));
}

// ============================================================================
// update_mapping
// ============================================================================

#[test]
fn memory_store_starts_with_defaults() {
    assert_eq!(MemoryStore::new().load().unwrap(), MappingTable::defaults());
}

#[test]
fn update_mapping_replaces_the_stored_table() {
    let store = MemoryStore::new();

    let saved = update_mapping(&store, [("email", "me@example.com"), ("city", "")]).unwrap();

    assert_eq!(saved.len(), 1);
    assert_eq!(store.load().unwrap(), saved);
}

#[test]
fn invalid_update_leaves_store_untouched() {
    let original = MappingTable::from_entries([("email", "keep@example.com")]).unwrap();
    let store = MemoryStore::with_table(original.clone());

    let result = update_mapping(&store, [("not_a_category", "x")]);

    assert!(matches!(result, Err(AutofillError::Validation(_))));
    assert_eq!(store.load().unwrap(), original);
}

//! Collection store integration tests.
//!
//! These tests cover persistence of the owned-cards file and the
//! counting rules of add/remove.

use std::fs;

use collection_tracker::cards::{CardData, MYTHIC_CATALOG_RARITY};
use collection_tracker::collection::CollectionStore;
use collection_tracker::TrackerError;
use proptest::prelude::*;
use serde_json::json;

fn card(id: u64, name: &str, rarity: &str) -> CardData {
    CardData::new()
        .with_field("multiverse_id", id)
        .with_field("name", name)
        .with_field("rarity", rarity)
        .with_field("set", "M10")
}

// =============================================================================
// Persistence Tests
// =============================================================================

/// Test that save then load reproduces ids and owned counts.
#[test]
fn test_save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collection.json");

    let mut store = CollectionStore::new();
    let bolt = card(191089, "Lightning Bolt", "Common");
    let baneslayer = card(191091, "Baneslayer Angel", "Mythic Rare");
    store.add(&bolt).unwrap();
    store.add(&bolt).unwrap();
    store.add(&bolt).unwrap();
    store.add(&baneslayer).unwrap();
    store.save_as(&path).unwrap();

    let loaded = CollectionStore::load(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.count(&bolt).unwrap(), 3);
    assert_eq!(loaded.count(&baneslayer).unwrap(), 1);
    assert_eq!(loaded.file_path(), Some(path.as_path()));

    // Card data written back verbatim
    let entry = &loaded.entries()[0];
    assert_eq!(entry.card(), &bolt);
}

/// Test the on-disk JSON shape.
#[test]
fn test_file_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collection.json");

    let mut store = CollectionStore::new();
    store.add(&card(1, "Island", "Common")).unwrap();
    store.add(&card(1, "Island", "Common")).unwrap();
    store.save_as(&path).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["collection"][0]["collection_data"]["owned"], 2);
    assert_eq!(value["collection"][0]["card_data"]["name"], "Island");
    assert_eq!(value["collection"].as_array().unwrap().len(), 1);
}

/// Test that loading does not depend on key order in the file.
#[test]
fn test_load_ignores_key_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collection.json");
    fs::write(
        &path,
        r#"{"collection":[
            {"collection_data":{"owned":4},"card_data":{"name":"Forest","multiverse_id":7}}
        ]}"#,
    )
    .unwrap();

    let store = CollectionStore::load(&path).unwrap();
    assert_eq!(store.count_id(collection_tracker::MultiverseId::new(7)), 4);
}

/// Test that a missing file loads as an empty collection bound to the path.
#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nothing-here.json");

    let mut store = CollectionStore::load(&path).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.file_path(), Some(path.as_path()));

    // Plain save now works and creates the file
    store.add(&card(1, "Swamp", "Common")).unwrap();
    store.save().unwrap();
    assert!(path.is_file());
}

/// Test that malformed JSON is a fatal load error.
#[test]
fn test_load_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"collection\": [ { \"card_data\": ").unwrap();

    assert!(matches!(CollectionStore::load(&path), Err(TrackerError::Json(_))));
}

/// Test that negative owned counts are rejected as malformed.
#[test]
fn test_load_negative_owned() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("negative.json");
    fs::write(
        &path,
        json!({"collection": [{"card_data": {"multiverse_id": 1}, "collection_data": {"owned": -1}}]})
            .to_string(),
    )
    .unwrap();

    assert!(matches!(CollectionStore::load(&path), Err(TrackerError::Json(_))));
}

/// Test that duplicate identifiers in a file are rejected.
#[test]
fn test_load_duplicate_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dupes.json");
    fs::write(
        &path,
        json!({"collection": [
            {"card_data": {"multiverse_id": 1, "name": "A"}, "collection_data": {"owned": 1}},
            {"card_data": {"multiverse_id": 1, "name": "A"}, "collection_data": {"owned": 2}}
        ]})
        .to_string(),
    )
    .unwrap();

    assert!(matches!(
        CollectionStore::load(&path),
        Err(TrackerError::CorruptCollection(_))
    ));
}

/// Test that an entry without an identifier is rejected.
#[test]
fn test_load_entry_without_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noid.json");
    fs::write(
        &path,
        json!({"collection": [{"card_data": {"name": "Token"}, "collection_data": {"owned": 1}}]})
            .to_string(),
    )
    .unwrap();

    assert!(matches!(
        CollectionStore::load(&path),
        Err(TrackerError::CorruptCollection(_))
    ));
}

/// Test that zero-owned entries in old files are dropped on load.
#[test]
fn test_load_skips_zero_owned() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zero.json");
    fs::write(
        &path,
        json!({"collection": [
            {"card_data": {"multiverse_id": 1}, "collection_data": {"owned": 0}},
            {"card_data": {"multiverse_id": 2}, "collection_data": {"owned": 1}}
        ]})
        .to_string(),
    )
    .unwrap();

    let store = CollectionStore::load(&path).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.entries()[0].id().raw(), 2);
}

/// Test save without a path, then save_as binding the path.
#[test]
fn test_save_requires_path_then_binds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("mine.json");

    let mut store = CollectionStore::new();
    store.add(&card(5, "Plains", "Common")).unwrap();
    assert!(matches!(store.save(), Err(TrackerError::NoFilePathSet)));

    store.save_as(&path).unwrap();
    assert_eq!(store.file_path(), Some(path.as_path()));

    store.add(&card(6, "Mountain", "Common")).unwrap();
    store.save().unwrap();

    let reloaded = CollectionStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
}

// =============================================================================
// Search Tests
// =============================================================================

/// Test that rarity:mythic finds only cards with the catalog's mythic term.
#[test]
fn test_search_mythic() {
    let mut store = CollectionStore::new();
    store.add(&card(1, "Jace, the Mind Sculptor", MYTHIC_CATALOG_RARITY)).unwrap();
    store.add(&card(2, "Counterspell", "Common")).unwrap();
    store.add(&card(3, "Mythic Proportions", "Rare")).unwrap();

    let found = store.search("rarity:mythic");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].card().get_text("rarity").as_deref(), Some(MYTHIC_CATALOG_RARITY));
}

/// Test that all filters must match.
#[test]
fn test_search_and_semantics() {
    let mut store = CollectionStore::new();
    store.add(&card(1, "Llanowar Elves", "Common")).unwrap();
    store.add(&card(2, "Elvish Archdruid", "Rare")).unwrap();

    assert_eq!(store.search("name:elv").len(), 2);
    assert_eq!(store.search("NAME:elv, RARITY:rare").len(), 1);
    assert!(store.search("name:elv, rarity:uncommon").is_empty());
}

// =============================================================================
// Counting Properties
// =============================================================================

proptest! {
    /// Count equals net adds minus removes, floored at zero, for any sequence.
    #[test]
    fn prop_count_tracks_adds_and_removes(ops in prop::collection::vec((0u64..4, any::<bool>()), 0..64)) {
        let mut store = CollectionStore::new();
        let mut expected = [0u32; 4];

        for (id, add) in ops {
            let c = card(id, "Card", "Common");
            if add {
                store.add(&c).unwrap();
                expected[id as usize] += 1;
            } else {
                store.remove(&c).unwrap();
                expected[id as usize] = expected[id as usize].saturating_sub(1);
            }
        }

        for id in 0..4u64 {
            prop_assert_eq!(store.count(&card(id, "Card", "Common")).unwrap(), expected[id as usize]);
        }
        prop_assert!(store.entries().iter().all(|e| e.owned() > 0));
        prop_assert_eq!(store.len(), expected.iter().filter(|&&n| n > 0).count());
    }
}

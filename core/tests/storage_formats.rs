//! Stress dictionary and harvest storage formats on disk.

use std::fs;

use libdiction_core::{
    Config, DictionError, HarvestBackend, HarvestCache, NoStress, StressDictionary, StressLookup,
};

#[test]
fn test_json_dictionary_builds_fst() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("words.json");
    fs::write(&json, r#"{"вода": 1, "молоко": 2, "берёза": 1}"#).unwrap();

    let dict = StressDictionary::load_json(&json).unwrap();
    assert_eq!(dict.len(), 3);

    let fst_path = dir.path().join("words.fst");
    dict.save_fst(&fst_path).unwrap();

    // extension picks the loader
    let loaded = StressDictionary::load(&fst_path).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.stress_of("молоко"), Some(2));
    assert_eq!(loaded.stress_of("берёза"), Some(1));
    assert!(!loaded.has_entry("кукуруза"));

    let mut entries = loaded.entries();
    entries.sort();
    assert_eq!(entries, dict.entries());
}

#[test]
fn test_malformed_json_is_a_serialization_error() {
    let err = StressDictionary::from_json_str("{\"вода\": \"one\"}").unwrap_err();
    assert!(matches!(err, DictionError::Serialization(_)));
}

#[test]
fn test_config_toml_roundtrip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diction.toml");

    let mut cfg = Config::default();
    cfg.max_cache_size = 256;
    cfg.sandhi_enabled = false;
    cfg.stress_dictionary_path = Some(dir.path().join("words.fst"));
    cfg.save_toml(&path).unwrap();

    let loaded = Config::load_toml(&path).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn test_config_opens_redb_harvest() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = Config::default();
    cfg.harvest_backend = HarvestBackend::Redb;
    cfg.harvest_path = Some(dir.path().join("harvest.redb"));

    {
        let harvest = cfg.open_harvest();
        assert!(harvest.record_at("кукуруза", 3, &NoStress, 100));
        assert!(harvest.record_at("кукуруза", 3, &NoStress, 200));
    }

    let harvest = cfg.open_harvest();
    let entry = harvest.get("кукуруза").unwrap();
    assert_eq!(entry.stress, 3);
    assert_eq!(entry.count, 2);
    assert_eq!((entry.first_seen, entry.last_seen), (100, 200));
}

#[test]
fn test_redb_without_path_falls_back_to_memory() {
    let mut cfg = Config::default();
    cfg.harvest_backend = HarvestBackend::Redb;
    let harvest = cfg.open_harvest();
    assert!(harvest.is_empty());
    assert!(harvest.record("слово", 0, &NoStress));
    assert_eq!(harvest.stress_of("слово"), Some(0));
}

#[test]
fn test_harvest_skips_dictionary_words() {
    let dict = StressDictionary::from_entries([("вода", 1)]);
    let harvest = HarvestCache::in_memory();
    assert!(!harvest.record("вода", 0, &dict));
    assert!(harvest.record("кукуруза", 3, &dict));

    let exported: std::collections::BTreeMap<String, usize> =
        serde_json::from_str(&harvest.export_json().unwrap()).unwrap();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported.get("кукуруза"), Some(&3));
}

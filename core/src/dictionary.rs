// core/src/dictionary.rs
//
// Primary stress dictionary: word -> 0-based stressed syllable index.
//
// Dynamic entries live in a HashMap; large read-only dictionaries are loaded
// from an `fst::Map` whose values are the stress indices themselves, so no
// separate payload store is needed.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use fst::{IntoStreamer, Map, MapBuilder, Streamer};

use crate::error::{DictionError, DictionResult};

/// Seam between the stress resolver and whatever stores stress indices.
///
/// Keys are lookup keys as produced by [`crate::utils::lookup_key`].
pub trait StressLookup {
    fn stress_of(&self, key: &str) -> Option<usize>;

    fn has_entry(&self, key: &str) -> bool {
        self.stress_of(key).is_some()
    }
}

impl StressLookup for HashMap<String, usize> {
    fn stress_of(&self, key: &str) -> Option<usize> {
        self.get(key).copied()
    }
}

/// An empty source, used when a collaborator supplies no table.
pub struct NoStress;

impl StressLookup for NoStress {
    fn stress_of(&self, _key: &str) -> Option<usize> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct StressDictionary {
    map: HashMap<String, usize>,
    fst_map: Option<Map<Vec<u8>>>,
}

impl StressDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, usize)>,
        K: Into<String>,
    {
        let mut d = Self::new();
        for (k, v) in entries {
            d.insert(k, v);
        }
        d
    }

    /// Insert or overwrite an in-memory entry. In-memory entries shadow the fst.
    pub fn insert<K: Into<String>>(&mut self, word: K, stress: usize) {
        self.map.insert(word.into(), stress);
    }

    pub fn lookup(&self, key: &str) -> Option<usize> {
        if let Some(v) = self.map.get(key) {
            return Some(*v);
        }
        self.fst_map
            .as_ref()
            .and_then(|m| m.get(key))
            .map(|v| v as usize)
    }

    pub fn len(&self) -> usize {
        let fst_len = self.fst_map.as_ref().map(|m| m.len()).unwrap_or(0);
        self.map.len() + fst_len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a `{ "word": index, ... }` JSON object.
    pub fn from_json_str(content: &str) -> DictionResult<Self> {
        let raw: HashMap<String, usize> = serde_json::from_str(content)?;
        Ok(Self {
            map: raw,
            fst_map: None,
        })
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> DictionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load an fst map produced by [`StressDictionary::to_fst_bytes`].
    pub fn load_fst<P: AsRef<Path>>(path: P) -> DictionResult<Self> {
        let path = path.as_ref();
        let mut f = File::open(path)?;
        let mut buf = Vec::new();
        f.read_to_end(&mut buf)?;
        let map = Map::new(buf)?;
        tracing::debug!("loaded {} stress entries from {}", map.len(), path.display());
        Ok(Self {
            map: HashMap::new(),
            fst_map: Some(map),
        })
    }

    /// Load by extension: `.fst` as an fst map, anything else as JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> DictionResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("fst") => Self::load_fst(path),
            _ => Self::load_json(path),
        }
    }

    /// All entries, in-memory values winning over fst values, sorted by key.
    pub fn entries(&self) -> Vec<(String, usize)> {
        let mut merged: HashMap<String, usize> = HashMap::new();
        if let Some(m) = &self.fst_map {
            let mut stream = m.into_stream();
            while let Some((k, v)) = stream.next() {
                merged.insert(String::from_utf8_lossy(k).into_owned(), v as usize);
            }
        }
        for (k, v) in &self.map {
            merged.insert(k.clone(), *v);
        }
        let mut out: Vec<(String, usize)> = merged.into_iter().collect();
        out.sort();
        out
    }

    /// Serialize every entry into an fst map. Keys are inserted in byte order.
    pub fn to_fst_bytes(&self) -> DictionResult<Vec<u8>> {
        let mut builder = MapBuilder::memory();
        for (k, v) in self.entries() {
            builder.insert(k.as_bytes(), v as u64)?;
        }
        Ok(builder.into_inner()?)
    }

    pub fn save_fst<P: AsRef<Path>>(&self, path: P) -> DictionResult<()> {
        let bytes = self.to_fst_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Reload from an in-memory fst buffer.
    pub fn from_fst_bytes(bytes: Vec<u8>) -> DictionResult<Self> {
        let map = Map::new(bytes).map_err(DictionError::from)?;
        Ok(Self {
            map: HashMap::new(),
            fst_map: Some(map),
        })
    }
}

impl StressLookup for StressDictionary {
    fn stress_of(&self, key: &str) -> Option<usize> {
        self.lookup(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_lookup() {
        let d = StressDictionary::from_entries([("вода", 1), ("мама", 0)]);
        assert_eq!(d.lookup("вода"), Some(1));
        assert_eq!(d.lookup("мама"), Some(0));
        assert_eq!(d.lookup("дом"), None);
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn fst_roundtrip_preserves_entries() {
        let d = StressDictionary::from_entries([("молоко", 2), ("голова", 2), ("книга", 0)]);
        let bytes = d.to_fst_bytes().expect("build fst");
        let loaded = StressDictionary::from_fst_bytes(bytes).expect("load fst");
        assert_eq!(loaded.lookup("молоко"), Some(2));
        assert_eq!(loaded.lookup("книга"), Some(0));
        assert_eq!(loaded.lookup("вода"), None);
        assert_eq!(loaded.len(), 3);
    }

    #[test]
    fn in_memory_entries_shadow_fst() {
        let base = StressDictionary::from_entries([("замок", 0)]);
        let mut d = StressDictionary::from_fst_bytes(base.to_fst_bytes().unwrap()).unwrap();
        d.insert("замок", 1);
        assert_eq!(d.lookup("замок"), Some(1));
        assert_eq!(d.entries(), vec![("замок".to_string(), 1)]);
    }

    #[test]
    fn json_parsing() {
        let d = StressDictionary::from_json_str(r#"{"весна": 1, "ночь": 0}"#).unwrap();
        assert_eq!(d.stress_of("весна"), Some(1));
        assert!(d.has_entry("ночь"));
        assert!(StressDictionary::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn file_load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("words.json");
        std::fs::write(&json_path, r#"{"душа": 1}"#).unwrap();
        let d = StressDictionary::load(&json_path).unwrap();
        assert_eq!(d.lookup("душа"), Some(1));

        let fst_path = dir.path().join("words.fst");
        d.save_fst(&fst_path).unwrap();
        let f = StressDictionary::load(&fst_path).unwrap();
        assert_eq!(f.lookup("душа"), Some(1));
    }
}

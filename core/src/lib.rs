//! libdiction-core
//!
//! Language-agnostic infrastructure shared by the diction transcribers
//! (currently `librussian`).
//!
//! Public API:
//! - `StressDictionary` - fst/JSON backed word -> stressed-syllable lookup
//! - `StressLookup` - the seam every stress source implements
//! - `HarvestCache` - append-only store of externally verified stresses
//! - `Engine` / `WordPipeline` - LRU-memoized per-word pipeline
//! - `DictionError` - error taxonomy
//! - `Config` - configuration shared by every language crate
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod error;
pub use error::{DictionError, DictionResult};

pub mod dictionary;
pub use dictionary::{NoStress, StressDictionary, StressLookup};

pub mod harvest;
pub use harvest::{
    HarvestCache, HarvestEntry, HarvestRepository, HarvestStats, InMemoryRepository,
    RedbRepository,
};

pub mod engine;
pub use engine::{Engine, WordPipeline};

/// Where the harvest cache keeps its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarvestBackend {
    /// Process lifetime only.
    #[default]
    Memory,
    /// redb file at `Config::harvest_path`.
    Redb,
}

/// Generic configuration for transcription core functionality.
///
/// Language-specific options (style presets, clitic handling) belong in the
/// language crate's own config, which flattens this one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of entries in the request -> transcription cache
    pub max_cache_size: usize,

    /// Primary stress dictionary (`.json` word -> index, or `.fst`)
    pub stress_dictionary_path: Option<PathBuf>,

    /// Harvest storage
    pub harvest_backend: HarvestBackend,
    pub harvest_path: Option<PathBuf>,

    /// Run cross-word voicing adjustment after per-word transcription
    pub sandhi_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cache_size: 1000,
            stress_dictionary_path: None,
            harvest_backend: HarvestBackend::Memory,
            harvest_path: None,
            sandhi_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load the configured stress dictionary, or an empty one.
    ///
    /// A missing or unreadable file is logged and treated as empty so that
    /// transcription degrades to placeholder stress instead of failing.
    pub fn open_stress_dictionary(&self) -> StressDictionary {
        match &self.stress_dictionary_path {
            Some(path) => StressDictionary::load(path).unwrap_or_else(|e| {
                tracing::warn!("stress dictionary {} unavailable: {}", path.display(), e);
                StressDictionary::new()
            }),
            None => StressDictionary::new(),
        }
    }

    /// Open the configured harvest cache, falling back to memory on failure.
    pub fn open_harvest(&self) -> HarvestCache {
        match (self.harvest_backend, &self.harvest_path) {
            (HarvestBackend::Redb, Some(path)) => HarvestCache::open_redb(path).unwrap_or_else(|e| {
                tracing::warn!("harvest store {} unavailable: {}", path.display(), e);
                HarvestCache::in_memory()
            }),
            (HarvestBackend::Redb, None) => {
                tracing::warn!("redb harvest backend selected without harvest_path");
                HarvestCache::in_memory()
            }
            (HarvestBackend::Memory, _) => HarvestCache::in_memory(),
        }
    }
}

/// Utility helpers.
pub mod utils {
    use unicode_normalization::UnicodeNormalization;

    /// Characters stripped when turning a word into a dictionary key.
    pub const KEY_PUNCTUATION: &[char] = &[
        '.', ',', '!', '?', ';', ':', '"', '“', '”', '‘', '’', '\'', '„', '‚', '«', '»', '—',
        '–', '-', '(', ')',
    ];

    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        s.nfc().collect::<String>().trim().to_string()
    }

    /// NFC composition only.
    pub fn nfc(s: &str) -> String {
        s.nfc().collect()
    }

    /// Dictionary key for a word: NFC, punctuation removed, lowercased.
    pub fn lookup_key(word: &str) -> String {
        nfc(word)
            .chars()
            .filter(|c| !KEY_PUNCTUATION.contains(c))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.max_cache_size = 64;
        cfg.harvest_backend = HarvestBackend::Redb;
        cfg.harvest_path = Some(PathBuf::from("/tmp/harvest.redb"));
        let text = cfg.to_toml_string().unwrap();
        assert!(text.contains("harvest_backend = \"redb\""));
        let back = Config::from_toml_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = Config::from_toml_str("sandhi_enabled = false").unwrap();
        assert!(!cfg.sandhi_enabled);
        assert_eq!(cfg.max_cache_size, 1000);
        assert_eq!(cfg.harvest_backend, HarvestBackend::Memory);
    }

    #[test]
    fn missing_dictionary_degrades_to_empty() {
        let mut cfg = Config::default();
        cfg.stress_dictionary_path = Some(PathBuf::from("/nonexistent/words.json"));
        assert!(cfg.open_stress_dictionary().is_empty());
    }

    #[test]
    fn lookup_key_strips_and_lowercases() {
        assert_eq!(utils::lookup_key("«Вода,»"), "вода");
        assert_eq!(utils::lookup_key("(Кто-то)"), "ктото");
        // decomposed й composes before filtering
        assert_eq!(utils::lookup_key("мои\u{0306}"), "мой");
        assert_eq!(utils::normalize("  ёлка "), "ёлка");
    }
}

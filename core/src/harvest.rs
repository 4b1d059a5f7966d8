//! Harvested stress cache.
//!
//! Stress indices verified outside the pipeline (a human, an online lookup)
//! are appended here and consulted after the primary dictionary. The cache is
//! append-only: recording a word that is already harvested bumps its counter and
//! `last_seen` but never rewrites its stress.
//!
//! Persistence is delegated to a [`HarvestRepository`]:
//! - [`InMemoryRepository`]: thread-safe map, used by tests and as the default.
//! - [`RedbRepository`]: ACID storage in a redb file, one JSON value per word.
//!
//! Repository failures are logged and swallowed. A failed write leaves the
//! in-memory view updated; a failed load starts from an empty cache.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use redb::ReadableTable;

use crate::dictionary::StressLookup;
use crate::error::{DictionError, DictionResult};

/// One harvested word. Timestamps are seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestEntry {
    pub stress: usize,
    pub first_seen: u64,
    pub last_seen: u64,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HarvestStats {
    pub total: usize,
    pub newest: Option<u64>,
    pub oldest: Option<u64>,
}

/// Storage backend for the harvest cache.
pub trait HarvestRepository: Send + Sync {
    fn load_all(&self) -> DictionResult<HashMap<String, HarvestEntry>>;
    fn store(&self, word: &str, entry: &HarvestEntry) -> DictionResult<()>;
    fn clear(&self) -> DictionResult<()>;
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryRepository {
    inner: Arc<RwLock<HashMap<String, HarvestEntry>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> DictionError {
    DictionError::Storage("harvest repository lock poisoned".into())
}

impl HarvestRepository for InMemoryRepository {
    fn load_all(&self) -> DictionResult<HashMap<String, HarvestEntry>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.clone())
    }

    fn store(&self, word: &str, entry: &HarvestEntry) -> DictionResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(word.to_string(), entry.clone());
        Ok(())
    }

    fn clear(&self) -> DictionResult<()> {
        self.inner.write().map_err(|_| poisoned())?.clear();
        Ok(())
    }
}

/// redb-backed repository. Values are JSON-encoded [`HarvestEntry`] records.
pub struct RedbRepository {
    db: redb::Database,
    #[allow(dead_code)]
    path: PathBuf,
}

impl RedbRepository {
    const TABLE_DEF: redb::TableDefinition<'static, &'static str, &'static str> =
        redb::TableDefinition::new("harvest");

    /// Create or open a redb database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> DictionResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let db = redb::Database::create(path.as_ref())?;
        Ok(Self {
            db,
            path: path.as_ref().to_path_buf(),
        })
    }
}

impl HarvestRepository for RedbRepository {
    fn load_all(&self) -> DictionResult<HashMap<String, HarvestEntry>> {
        let mut out = HashMap::new();
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(Self::TABLE_DEF) {
            Ok(t) => t,
            // nothing harvested yet
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(out),
            Err(e) => return Err(e.into()),
        };
        for item in table.iter()? {
            let (k, v) = item?;
            let entry: HarvestEntry = serde_json::from_str(v.value())?;
            out.insert(k.value().to_string(), entry);
        }
        Ok(out)
    }

    fn store(&self, word: &str, entry: &HarvestEntry) -> DictionResult<()> {
        let json = serde_json::to_string(entry)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(Self::TABLE_DEF)?;
            table.insert(word, json.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn clear(&self) -> DictionResult<()> {
        let write_txn = self.db.begin_write()?;
        write_txn.delete_table(Self::TABLE_DEF)?;
        write_txn.commit()?;
        Ok(())
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// The shared, append-only harvest cache.
///
/// Cloning is cheap and clones share state. Readers take copies
/// ([`HarvestCache::snapshot`]) rather than holding the lock.
#[derive(Clone)]
pub struct HarvestCache {
    entries: Arc<RwLock<HashMap<String, HarvestEntry>>>,
    repo: Arc<dyn HarvestRepository>,
}

impl HarvestCache {
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryRepository::new()))
    }

    /// Wrap a repository, loading whatever it already holds.
    pub fn with_repository(repo: Arc<dyn HarvestRepository>) -> Self {
        let loaded = repo.load_all().unwrap_or_else(|e| {
            tracing::warn!("harvest cache load failed, starting empty: {}", e);
            HashMap::new()
        });
        if !loaded.is_empty() {
            tracing::debug!("harvest cache loaded {} words", loaded.len());
        }
        Self {
            entries: Arc::new(RwLock::new(loaded)),
            repo,
        }
    }

    pub fn open_redb<P: AsRef<Path>>(path: P) -> DictionResult<Self> {
        Ok(Self::with_repository(Arc::new(RedbRepository::open(path)?)))
    }

    /// Record a verified stress for `word` (a lookup key).
    ///
    /// Returns false when `known` already has the word (corrections or the
    /// primary dictionary), in which case nothing is stored.
    pub fn record(&self, word: &str, stress: usize, known: &dyn StressLookup) -> bool {
        self.record_at(word, stress, known, now_secs())
    }

    /// [`HarvestCache::record`] with an explicit timestamp.
    pub fn record_at(&self, word: &str, stress: usize, known: &dyn StressLookup, now: u64) -> bool {
        if known.has_entry(word) {
            return false;
        }

        let updated = match self.entries.write() {
            Ok(mut map) => {
                let entry = map
                    .entry(word.to_string())
                    .and_modify(|e| {
                        e.count = e.count.saturating_add(1);
                        e.last_seen = now;
                    })
                    .or_insert(HarvestEntry {
                        stress,
                        first_seen: now,
                        last_seen: now,
                        count: 1,
                    });
                entry.clone()
            }
            Err(_) => return false,
        };

        if let Err(e) = self.repo.store(word, &updated) {
            tracing::warn!("harvest write for {:?} failed: {}", word, e);
        }
        true
    }

    pub fn get(&self, word: &str) -> Option<HarvestEntry> {
        self.entries.read().ok().and_then(|m| m.get(word).cloned())
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> HashMap<String, HarvestEntry> {
        if let Ok(map) = self.entries.read() {
            map.clone()
        } else {
            HashMap::new()
        }
    }

    pub fn stats(&self) -> HarvestStats {
        let snap = self.snapshot();
        HarvestStats {
            total: snap.len(),
            newest: snap.values().map(|e| e.first_seen).max(),
            oldest: snap.values().map(|e| e.first_seen).min(),
        }
    }

    /// Export as a plain `{ word: stress }` dictionary, keys sorted.
    pub fn export_json(&self) -> DictionResult<String> {
        let plain: std::collections::BTreeMap<String, usize> = self
            .snapshot()
            .into_iter()
            .map(|(k, v)| (k, v.stress))
            .collect();
        Ok(serde_json::to_string_pretty(&plain)?)
    }

    /// Export every field of every entry, keys sorted.
    pub fn export_full_json(&self) -> DictionResult<String> {
        let full: std::collections::BTreeMap<String, HarvestEntry> =
            self.snapshot().into_iter().collect();
        Ok(serde_json::to_string_pretty(&full)?)
    }

    pub fn clear(&self) {
        if let Ok(mut map) = self.entries.write() {
            map.clear();
        }
        if let Err(e) = self.repo.clear() {
            tracing::warn!("harvest clear failed: {}", e);
        }
    }
}

impl StressLookup for HarvestCache {
    fn stress_of(&self, key: &str) -> Option<usize> {
        self.get(key).map(|e| e.stress)
    }
}

impl std::fmt::Debug for HarvestCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvestCache")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{NoStress, StressDictionary};

    #[test]
    fn poisoned_memory_repository_reports_storage_error() {
        let repo = InMemoryRepository::new();
        let inner = Arc::clone(&repo.inner);
        let _ = std::thread::spawn(move || {
            let _guard = inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        let entry = HarvestEntry {
            stress: 0,
            first_seen: 1,
            last_seen: 1,
            count: 1,
        };
        assert!(matches!(repo.store("слово", &entry), Err(DictionError::Storage(_))));
        assert!(matches!(repo.clear(), Err(DictionError::Storage(_))));
        assert!(matches!(repo.load_all(), Err(DictionError::Storage(_))));
    }

    #[test]
    fn record_then_lookup() {
        let h = HarvestCache::in_memory();
        assert!(h.record_at("струна", 1, &NoStress, 100));
        assert_eq!(h.stress_of("струна"), Some(1));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn append_only_keeps_first_stress() {
        let h = HarvestCache::in_memory();
        h.record_at("замок", 0, &NoStress, 100);
        h.record_at("замок", 1, &NoStress, 200);
        let e = h.get("замок").unwrap();
        assert_eq!(e.stress, 0, "stress must not be rewritten");
        assert_eq!(e.count, 2);
        assert_eq!(e.first_seen, 100);
        assert_eq!(e.last_seen, 200);
    }

    #[test]
    fn known_words_are_skipped() {
        let dict = StressDictionary::from_entries([("вода", 1)]);
        let h = HarvestCache::in_memory();
        assert!(!h.record_at("вода", 0, &dict, 1));
        assert!(h.is_empty());
    }

    #[test]
    fn stats_and_export() {
        let h = HarvestCache::in_memory();
        assert_eq!(h.stats(), HarvestStats::default());
        h.record_at("берег", 0, &NoStress, 50);
        h.record_at("туман", 1, &NoStress, 70);
        let s = h.stats();
        assert_eq!(s.total, 2);
        assert_eq!(s.oldest, Some(50));
        assert_eq!(s.newest, Some(70));

        let plain: HashMap<String, usize> = serde_json::from_str(&h.export_json().unwrap()).unwrap();
        assert_eq!(plain.get("туман"), Some(&1));
        let full: HashMap<String, HarvestEntry> =
            serde_json::from_str(&h.export_full_json().unwrap()).unwrap();
        assert_eq!(full["берег"].first_seen, 50);
    }

    #[test]
    fn snapshot_is_a_copy() {
        let h = HarvestCache::in_memory();
        h.record_at("лес", 0, &NoStress, 1);
        let snap = h.snapshot();
        h.record_at("поле", 0, &NoStress, 2);
        assert_eq!(snap.len(), 1);
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn clear_empties_cache_and_repository() {
        let repo = Arc::new(InMemoryRepository::new());
        let h = HarvestCache::with_repository(repo.clone());
        h.record_at("лес", 0, &NoStress, 1);
        assert_eq!(repo.load_all().unwrap().len(), 1);
        h.clear();
        assert!(h.is_empty());
        assert!(repo.load_all().unwrap().is_empty());
    }

    #[test]
    fn redb_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harvest.redb");
        {
            let h = HarvestCache::open_redb(&path).unwrap();
            h.record_at("рассвет", 1, &NoStress, 10);
            h.record_at("рассвет", 1, &NoStress, 20);
        }
        let h = HarvestCache::open_redb(&path).unwrap();
        let e = h.get("рассвет").expect("entry survives reopen");
        assert_eq!(e.stress, 1);
        assert_eq!(e.count, 2);
        h.clear();
        drop(h);
        let h = HarvestCache::open_redb(&path).unwrap();
        assert!(h.is_empty());
    }
}

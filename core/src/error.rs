//! Error taxonomy shared by the diction crates.
//!
//! ```text
//! DictionError
//! ├── LookupMiss               -- word absent from every stress source (non-fatal)
//! ├── StressOnYoRejected       -- attempt to move stress off a ё-rule syllable
//! ├── ClusterConditionUnmet    -- lexical condition of a cluster rule failed (falls through)
//! ├── InvalidStressIndex       -- caller index outside the word's syllables
//! ├── NoYeInSyllable           -- е↔ё cycling on a syllable with neither letter
//! ├── WordIndexOutOfRange      -- text-level mutation addressed a missing word
//! ├── Storage / Io / Serialization
//! ```
//!
//! Only the caller-contract variants ever reach a caller of the pipeline.
//! `LookupMiss` and `ClusterConditionUnmet` are produced internally and resolved
//! on the spot (placeholder stress, default per-character rules).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictionError {
    /// No correction, dictionary or harvest entry exists for the word.
    #[error("no stress entry for {0:?}")]
    LookupMiss(String),

    /// Stress was derived from a written ё and cannot be reassigned.
    #[error("stress of {word:?} is fixed on its ё syllable ({syllable})")]
    StressOnYoRejected { word: String, syllable: usize },

    /// A lexically conditioned cluster rule did not apply to this word.
    #[error("cluster {cluster:?} does not apply to {word:?}")]
    ClusterConditionUnmet { cluster: &'static str, word: String },

    /// Stress index outside `[none, syllable_count - 1]`.
    #[error("stress index {index} out of range for {syllable_count} syllable(s)")]
    InvalidStressIndex { index: usize, syllable_count: usize },

    #[error("syllable {syllable} of {word:?} contains neither е nor ё")]
    NoYeInSyllable { word: String, syllable: usize },

    #[error("word index {index} out of range ({len} word(s))")]
    WordIndexOutOfRange { index: usize, len: usize },

    /// Persistent storage (redb) failure.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON / TOML / fst decoding failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type DictionResult<T> = Result<T, DictionError>;

impl From<serde_json::Error> for DictionError {
    fn from(e: serde_json::Error) -> Self {
        DictionError::Serialization(e.to_string())
    }
}

impl From<fst::Error> for DictionError {
    fn from(e: fst::Error) -> Self {
        DictionError::Serialization(e.to_string())
    }
}

impl From<redb::Error> for DictionError {
    fn from(e: redb::Error) -> Self {
        DictionError::Storage(e.to_string())
    }
}

impl From<redb::DatabaseError> for DictionError {
    fn from(e: redb::DatabaseError) -> Self {
        DictionError::Storage(e.to_string())
    }
}

impl From<redb::TransactionError> for DictionError {
    fn from(e: redb::TransactionError) -> Self {
        DictionError::Storage(e.to_string())
    }
}

impl From<redb::TableError> for DictionError {
    fn from(e: redb::TableError) -> Self {
        DictionError::Storage(e.to_string())
    }
}

impl From<redb::StorageError> for DictionError {
    fn from(e: redb::StorageError) -> Self {
        DictionError::Storage(e.to_string())
    }
}

impl From<redb::CommitError> for DictionError {
    fn from(e: redb::CommitError) -> Self {
        DictionError::Storage(e.to_string())
    }
}

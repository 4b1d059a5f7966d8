//! librussian crate root
//!
//! Cyrillic Russian to IPA transcription for sung diction. The per-word
//! pipeline (normalize, syllabify, analyze, transcribe) is exposed as
//! `process_word` / `Transcriber`; the text-level `Engine` adds clitic
//! merging, stress resolution and cross-word sandhi on top of the shared
//! `libdiction-core` infrastructure.
//!
//! Public API exported here:
//! - `Engine`, `Transcript`, `TextWord` from `engine`
//! - `process_word`, `TranscriptionRequest`, `ProcessedWord` from `transcriber`
//! - `StyleConfig`, `StylePreset` from `style`
//! - `StressResolver`, `StressAssignment`, `Provenance` from `stress`
//! - `RussianConfig` from `config`

pub mod alphabet;
pub mod cluster;
pub mod config;
pub mod data;
pub mod engine;
pub mod normalize;
pub mod palatalization;
pub mod position;
pub mod sandhi;
pub mod stress;
pub mod style;
pub mod syllable;
pub mod transcriber;
pub mod validate;
pub mod voicing;

pub use libdiction_core::{DictionError, DictionResult, HarvestCache, StressDictionary, StressLookup};

pub use config::RussianConfig;
pub use engine::{Engine, PartRole, TextWord, Transcript, WordPart};
pub use normalize::normalize;
pub use palatalization::RegressiveMode;
pub use position::{position, Position};
pub use sandhi::apply_sandhi;
pub use stress::{EditSource, Provenance, Resolution, StressAssignment, StressResolver};
pub use style::{PalatalN, ShchaNotation, StyleConfig, StylePreset, VelarEnding, VowelReduction};
pub use syllable::syllabify;
pub use transcriber::{
    process_resolved, process_word, ProcessedWord, SandhiChange, TranscribedSyllable, Transcriber,
    TranscriptionRequest,
};
pub use validate::{validate_ipa, ForbiddenGlyph};

// librussian/src/position.rs

use serde::{Deserialize, Serialize};

/// Where a syllable sits relative to the stress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    Stressed,
    PretonicImmediate,
    PretonicRemote,
    PosttonicImmediate,
    PosttonicRemote,
    /// The word carries no stress at all (standalone clitic).
    Unstressed,
}

impl Position {
    pub fn is_stressed(self) -> bool {
        self == Position::Stressed
    }
}

/// Classify syllable `i` against `stress`.
///
/// The word's syllable count is not an argument: no label depends on it.
pub fn position(i: usize, stress: Option<usize>) -> Position {
    let Some(s) = stress else {
        return Position::Unstressed;
    };
    if i == s {
        Position::Stressed
    } else if i + 1 == s {
        Position::PretonicImmediate
    } else if i < s {
        Position::PretonicRemote
    } else if i == s + 1 {
        Position::PosttonicImmediate
    } else {
        Position::PosttonicRemote
    }
}

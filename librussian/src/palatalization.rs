// librussian/src/palatalization.rs
//
// Which consonants of a word are palatalized.
//
// Pass 1 marks consonants that are soft in their own right (ч щ й, or before
// ь or a palatalizing vowel). Pass 2 walks right-to-left and lets softness
// spread backwards through a cluster, limited by natural class.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::alphabet::{
    is_always_hard, is_consonant, is_dental, is_inherently_palatal, is_labial,
    is_palatalizing_vowel, is_sign, is_velar,
};

/// Scope of the regressive pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegressiveMode {
    /// Every natural-class rule.
    #[default]
    Full,
    /// Dentals and н only.
    Partial,
    /// No regressive pass.
    Minimal,
}

/// Character indices of palatalized consonants.
pub type PalatalizationMap = BTreeSet<usize>;

fn directly_soft(c: char, next: Option<char>) -> bool {
    if !is_consonant(c) || is_always_hard(c) {
        return false;
    }
    is_inherently_palatal(c) || matches!(next, Some(n) if n == 'ь' || is_palatalizing_vowel(n))
}

/// Next consonant after `i` in the same cluster (signs skipped).
fn next_consonant(chars: &[char], i: usize) -> Option<usize> {
    for (j, &n) in chars.iter().enumerate().skip(i + 1) {
        if is_sign(n) {
            continue;
        }
        if is_consonant(n) {
            return Some(j);
        }
        return None;
    }
    None
}

fn propagates(c: char, next: char, mode: RegressiveMode) -> bool {
    match mode {
        RegressiveMode::Minimal => false,
        RegressiveMode::Partial => {
            if c == 'н' {
                next == 'н' || is_dental(next)
            } else {
                is_dental(c)
            }
        }
        RegressiveMode::Full => match c {
            'л' => next == 'л',
            'р' => next == 'р',
            'н' => next == 'н' || is_dental(next),
            _ if is_velar(c) => is_velar(next),
            _ if is_labial(c) => is_labial(next),
            _ => is_dental(c),
        },
    }
}

pub fn analyze_palatalization(chars: &[char], mode: RegressiveMode) -> PalatalizationMap {
    let mut map = PalatalizationMap::new();
    for (i, &c) in chars.iter().enumerate() {
        if directly_soft(c, chars.get(i + 1).copied()) {
            map.insert(i);
        }
    }
    if mode == RegressiveMode::Minimal {
        return map;
    }

    for i in (0..chars.len()).rev() {
        let c = chars[i];
        if !is_consonant(c) || is_always_hard(c) || map.contains(&i) {
            continue;
        }
        let Some(j) = next_consonant(chars, i) else {
            continue;
        };
        let n = chars[j];
        if !map.contains(&j) || is_always_hard(n) {
            continue;
        }
        if propagates(c, n, mode) {
            map.insert(i);
        }
    }
    map
}

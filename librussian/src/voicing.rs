// librussian/src/voicing.rs
//
// Regressive voicing assimilation inside consonant clusters.
//
// An obstruent takes the voicing of the next obstruent in its cluster. Signs,
// sonorants and в are looked through; a vowel ends the cluster.

use std::collections::BTreeMap;

use phf::phf_map;
use serde::Serialize;

use crate::alphabet::{class_of, is_sign, is_sonorant, is_vowel, is_voiced, is_voiceless, GraphemeClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Devoice,
    Voice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct VoicingDirective {
    pub direction: Direction,
    /// Replacement IPA for the consonant.
    pub ipa: &'static str,
}

/// Character index in the word -> directive.
pub type VoicingMap = BTreeMap<usize, VoicingDirective>;

pub static DEVOICE: phf::Map<char, &'static str> = phf_map! {
    'б' => "p", 'в' => "f", 'г' => "k", 'д' => "t", 'ж' => "ʃ", 'з' => "s",
};

pub static VOICE: phf::Map<char, &'static str> = phf_map! {
    'п' => "b", 'ф' => "v", 'к' => "ɡ", 'т' => "d", 'ш' => "ʒ", 'с' => "z",
    'х' => "ɣ", 'ц' => "dz", 'ч' => "dʒʲ", 'щ' => "ʒʲʒʲ",
};

/// The obstruent whose voicing `chars[i]` assimilates to, if any.
fn trigger_after(chars: &[char], i: usize) -> Option<char> {
    for &n in &chars[i + 1..] {
        if is_sign(n) || is_sonorant(n) || n == 'в' {
            continue;
        }
        if is_vowel(n) {
            return None;
        }
        return (class_of(n) == GraphemeClass::Consonant).then_some(n);
    }
    None
}

/// Build the voicing map for a whole word.
pub fn analyze_voicing(chars: &[char]) -> VoicingMap {
    let mut map = VoicingMap::new();
    for i in (0..chars.len()).rev() {
        let c = chars[i];
        if class_of(c) != GraphemeClass::Consonant {
            continue;
        }
        let Some(t) = trigger_after(chars, i) else {
            continue;
        };
        let directive = if is_voiced(c) && is_voiceless(t) {
            DEVOICE.get(&c).map(|ipa| VoicingDirective {
                direction: Direction::Devoice,
                ipa,
            })
        } else if is_voiceless(c) && is_voiced(t) {
            VOICE.get(&c).map(|ipa| VoicingDirective {
                direction: Direction::Voice,
                ipa,
            })
        } else {
            None
        };
        if let Some(d) = directive {
            map.insert(i, d);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(w: &str) -> VoicingMap {
        let chars: Vec<char> = w.chars().collect();
        analyze_voicing(&chars)
    }

    #[test]
    fn devoicing_before_voiceless() {
        let m = map("трубка");
        assert_eq!(m.len(), 1);
        assert_eq!(m[&3].ipa, "p");
        assert_eq!(m[&3].direction, Direction::Devoice);
        assert_eq!(map("ложка")[&2].ipa, "ʃ");
    }

    #[test]
    fn voicing_before_voiced() {
        assert_eq!(map("вокзал")[&2].ipa, "ɡ");
        assert_eq!(map("сбор")[&0].ipa, "z");
        // sign is looked through
        assert_eq!(map("просьба")[&3].ipa, "z");
    }

    #[test]
    fn v_never_triggers() {
        // с before в stays voiceless
        assert!(map("свет").is_empty());
        // but в itself devoices
        assert_eq!(map("вкус")[&0].ipa, "f");
    }

    #[test]
    fn vowel_ends_the_cluster() {
        assert!(map("дата").is_empty());
    }

    #[test]
    fn sonorants_never_receive_directives() {
        for w in ["смерть", "мягкий", "здравствуйте", "объявление", "лезть", "отбой"] {
            let chars: Vec<char> = w.chars().collect();
            for idx in map(w).keys() {
                let c = chars[*idx];
                assert!(!is_sonorant(c) && !is_vowel(c), "{} got a directive on {}", w, c);
            }
        }
    }

    #[test]
    fn irregular_pairs() {
        assert_eq!(map("отдых")[&1].ipa, "d");
        assert_eq!(VOICE[&'ч'], "dʒʲ");
        assert_eq!(VOICE[&'щ'], "ʒʲʒʲ");
    }
}

// librussian/src/cluster.rs
//
// Lexicalized consonant clusters whose reading overrides the per-character
// rules. The table is ordered: longer sequences first, then by priority within
// equal length. The first rule whose sequence and condition both hold wins.

use libdiction_core::{DictionError, DictionResult};
use serde::Serialize;

/// A successful match at some offset of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClusterMatch {
    /// The matched Cyrillic sequence.
    pub sequence: &'static str,
    /// Characters consumed, counted from the match offset.
    pub length: usize,
    pub ipa: &'static str,
}

#[derive(Debug, Clone, Copy)]
enum Replacement {
    Fixed(&'static str),
    /// Soft reading when the character after the sequence is е ё и ю я or ь.
    BySoftness {
        soft: &'static str,
        hard: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
enum Condition {
    Always,
    /// Word equals one of `equals`, starts with one of `prefixes`, or
    /// contains one of `contains`.
    Lexical {
        equals: &'static [&'static str],
        prefixes: &'static [&'static str],
        contains: &'static [&'static str],
    },
    NotContaining(&'static str),
    /// Word-final -ся/-сь not belonging to -тся/-ться/-дся/-дься, in a word
    /// of more than one syllable.
    ReflexiveEnding,
    /// г at the exact position of a word-final -ого/-его.
    GenitiveEnding,
}

#[derive(Debug, Clone, Copy)]
struct ClusterRule {
    sequences: &'static [&'static str],
    replacement: Replacement,
    /// Characters consumed; defaults to the sequence length.
    consumes: Option<usize>,
    condition: Condition,
}

const fn rule(sequences: &'static [&'static str], ipa: &'static str) -> ClusterRule {
    ClusterRule {
        sequences,
        replacement: Replacement::Fixed(ipa),
        consumes: None,
        condition: Condition::Always,
    }
}

const fn contains(list: &'static [&'static str]) -> Condition {
    Condition::Lexical {
        equals: &[],
        prefixes: &[],
        contains: list,
    }
}

static RULES: &[ClusterRule] = &[
    rule(&["вств"], "stv"),
    rule(&["ться", "дься"], "tːsʌ"),
    rule(&["стч", "здч", "ссч"], "ʃʲʃʲ"),
    ClusterRule {
        sequences: &["стн"],
        replacement: Replacement::BySoftness { soft: "sɲ", hard: "sn" },
        consumes: None,
        condition: Condition::Always,
    },
    ClusterRule {
        sequences: &["здн"],
        replacement: Replacement::BySoftness { soft: "zɲ", hard: "zn" },
        consumes: None,
        condition: Condition::NotContaining("бездн"),
    },
    rule(&["рдц"], "rts"),
    rule(&["лнц"], "nts"),
    rule(&["тся", "дся"], "tːsʌ"),
    rule(&["сш", "зш"], "ʃː"),
    rule(&["зж", "сж"], "ʒː"),
    rule(&["сч", "зч", "жч"], "ʃʲʃʲ"),
    rule(&["тш", "дш", "чш"], "tʃː"),
    rule(&["дж", "тж"], "dʒː"),
    rule(&["тч", "дч"], "tʲʃʲ"),
    rule(&["тц", "дц"], "tːs"),
    ClusterRule {
        sequences: &["чн"],
        replacement: Replacement::Fixed("ʃn"),
        consumes: None,
        condition: Condition::Lexical {
            equals: &["конечно"],
            prefixes: &[],
            contains: &["скучн"],
        },
    },
    ClusterRule {
        sequences: &["чт"],
        replacement: Replacement::Fixed("ʃt"),
        consumes: None,
        condition: Condition::Lexical {
            equals: &["что", "ничто"],
            prefixes: &["чтоб"],
            contains: &[],
        },
    },
    ClusterRule {
        sequences: &["гк"],
        replacement: Replacement::BySoftness { soft: "xʲkʲ", hard: "xk" },
        consumes: None,
        condition: contains(&["мягк", "лёгк", "легк"]),
    },
    ClusterRule {
        sequences: &["ся", "сь"],
        replacement: Replacement::Fixed("sʌ"),
        consumes: None,
        condition: Condition::ReflexiveEnding,
    },
    ClusterRule {
        sequences: &["гч"],
        replacement: Replacement::Fixed("x"),
        consumes: Some(1),
        condition: contains(&["мягч", "лёгч", "легч"]),
    },
    ClusterRule {
        sequences: &["г"],
        replacement: Replacement::Fixed("v"),
        consumes: Some(1),
        condition: Condition::GenitiveEnding,
    },
];

const SOFTENING: &[char] = &['е', 'ё', 'и', 'ю', 'я', 'ь'];

fn starts_with_at(chars: &[char], i: usize, seq: &str) -> bool {
    let mut j = i;
    for c in seq.chars() {
        if chars.get(j) != Some(&c) {
            return false;
        }
        j += 1;
    }
    true
}

fn check(
    cond: Condition,
    sequence: &'static str,
    word: &str,
    chars: &[char],
    i: usize,
) -> DictionResult<()> {
    let holds = match cond {
        Condition::Always => true,
        Condition::Lexical {
            equals,
            prefixes,
            contains,
        } => {
            equals.contains(&word)
                || prefixes.iter().any(|p| word.starts_with(p))
                || contains.iter().any(|c| word.contains(c))
        }
        Condition::NotContaining(stem) => !word.contains(stem),
        Condition::ReflexiveEnding => {
            let prev = i.checked_sub(1).and_then(|p| chars.get(p)).copied();
            let prev2 = i.checked_sub(2).and_then(|p| chars.get(p)).copied();
            let after_td = matches!(prev, Some('т' | 'д'))
                || (prev == Some('ь') && matches!(prev2, Some('т' | 'д')));
            i + 2 == chars.len() && !after_td && crate::alphabet::count_vowels(word) > 1
        }
        Condition::GenitiveEnding => {
            (word.ends_with("ого") || word.ends_with("его")) && i + 2 == chars.len()
        }
    };
    if holds {
        Ok(())
    } else {
        Err(DictionError::ClusterConditionUnmet {
            cluster: sequence,
            word: word.to_string(),
        })
    }
}

/// Find the cluster starting at character `i` of `word`, if any.
///
/// `chars` must be `word.chars()` collected. A rule whose lexical condition
/// fails is skipped and matching continues with the next rule.
pub fn match_at(word: &str, chars: &[char], i: usize) -> Option<ClusterMatch> {
    for rule in RULES {
        for &seq in rule.sequences {
            if !starts_with_at(chars, i, seq) {
                continue;
            }
            let seq_len = seq.chars().count();
            match check(rule.condition, seq, word, chars, i) {
                Ok(()) => {
                    let ipa = match rule.replacement {
                        Replacement::Fixed(ipa) => ipa,
                        Replacement::BySoftness { soft, hard } => {
                            match chars.get(i + seq_len) {
                                Some(c) if SOFTENING.contains(c) => soft,
                                _ => hard,
                            }
                        }
                    };
                    return Some(ClusterMatch {
                        sequence: seq,
                        length: rule.consumes.unwrap_or(seq_len),
                        ipa,
                    });
                }
                Err(e) => tracing::trace!("{}", e),
            }
        }
    }
    None
}

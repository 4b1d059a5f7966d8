// librussian/src/sandhi.rs
//
// Cross-word voicing. Runs after every word of a text has been transcribed:
// the coda of word A assimilates in voicing to the onset of word B unless
// sentence punctuation separates them.

use once_cell::sync::Lazy;
use phf::phf_map;
use regex::Regex;

use crate::transcriber::{ProcessedWord, SandhiChange};

/// Punctuation after word A that blocks assimilation into word B.
pub const BLOCKING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

static FINAL_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(tʃʲ|dʒʲ|ts|dz|[^\sʲː]ʲ|[^\sʲː])$").expect("valid regex"));

static INITIAL_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(tʃʲ|dʒʲ|ts|dz|[^\sʲː]ʲ?)").expect("valid regex"));

static VOICE: phf::Map<&'static str, &'static str> = phf_map! {
    "p" => "b", "pʲ" => "bʲ", "t" => "d", "tʲ" => "dʲ", "k" => "ɡ", "kʲ" => "ɡʲ",
    "s" => "z", "sʲ" => "zʲ", "f" => "v", "fʲ" => "vʲ", "ʃ" => "ʒ", "x" => "ɣ",
    "ts" => "dz", "tʃʲ" => "dʒʲ",
};

static DEVOICE: phf::Map<&'static str, &'static str> = phf_map! {
    "b" => "p", "bʲ" => "pʲ", "d" => "t", "dʲ" => "tʲ", "ɡ" => "k", "ɡʲ" => "kʲ",
    "z" => "s", "zʲ" => "sʲ", "v" => "f", "vʲ" => "fʲ", "ʒ" => "ʃ",
};

const VOICED_OBSTRUENTS: &[&str] = &[
    "b", "bʲ", "d", "dʲ", "ɡ", "ɡʲ", "z", "zʲ", "v", "vʲ", "ʒ", "dz", "dʒʲ", "ɣ",
];

const VOICELESS_OBSTRUENTS: &[&str] = &[
    "p", "pʲ", "t", "tʲ", "k", "kʲ", "s", "sʲ", "f", "fʲ", "ʃ", "x", "ts", "tʃʲ",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Onset {
    Voiced,
    Voiceless,
}

/// Classify an onset unit. A palatalized form not listed explicitly (ʃʲ of
/// щ, xʲ) is classified by its plain base.
fn classify(unit: &str) -> Option<Onset> {
    let base = unit.strip_suffix('ʲ').unwrap_or(unit);
    if VOICED_OBSTRUENTS.contains(&unit) || VOICED_OBSTRUENTS.contains(&base) {
        Some(Onset::Voiced)
    } else if VOICELESS_OBSTRUENTS.contains(&unit) || VOICELESS_OBSTRUENTS.contains(&base) {
        Some(Onset::Voiceless)
    } else {
        None
    }
}

fn final_unit(ipa: &str) -> Option<&str> {
    FINAL_UNIT.find(ipa).map(|m| m.as_str())
}

fn initial_unit(ipa: &str) -> Option<&str> {
    INITIAL_UNIT.find(ipa).map(|m| m.as_str())
}

fn blocked(punct: Option<&String>) -> bool {
    punct.is_some_and(|p| p.chars().any(|c| c == '\n' || BLOCKING_PUNCTUATION.contains(&c)))
}

/// Apply cross-word voicing in place.
///
/// `trailing_punct[i]` is the punctuation written after word `i` (missing
/// entries count as none); a `'\n'` in it marks a line break, which blocks
/// like sentence punctuation. Only the last syllable of each word is touched.
/// Returns every change with the index of the word it was applied to.
pub fn apply_sandhi(
    words: &mut [ProcessedWord],
    trailing_punct: &[String],
) -> Vec<(usize, SandhiChange)> {
    let mut changes = Vec::new();
    for a in 0..words.len().saturating_sub(1) {
        if blocked(trailing_punct.get(a)) {
            continue;
        }
        let Some(trigger) = words[a + 1]
            .syllables
            .first()
            .and_then(|s| initial_unit(&s.ipa))
            .map(str::to_string)
        else {
            continue;
        };
        let Some(onset) = classify(&trigger) else {
            continue;
        };
        let Some(last) = words[a].syllables.last_mut() else {
            continue;
        };
        let Some(coda) = final_unit(&last.ipa) else {
            continue;
        };
        let table = match onset {
            Onset::Voiced => &VOICE,
            Onset::Voiceless => &DEVOICE,
        };
        let Some(&to) = table.get(coda) else {
            continue;
        };

        let change = SandhiChange {
            from: coda.to_string(),
            to: to.to_string(),
            trigger,
        };
        let stem_len = last.ipa.len() - coda.len();
        last.ipa.truncate(stem_len);
        last.ipa.push_str(to);
        last.sandhi = Some(change.clone());
        tracing::trace!("sandhi {} -> {} before {}", change.from, change.to, change.trigger);
        changes.push((a, change));
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcriber::{process_word, TranscriptionRequest};

    fn words(list: &[(&str, usize)]) -> Vec<ProcessedWord> {
        list.iter()
            .map(|(w, s)| process_word(&TranscriptionRequest::new(w, Some(*s))))
            .collect()
    }

    #[test]
    fn units() {
        assert_eq!(final_unit("nots"), Some("ts"));
        assert_eq!(final_unit("notʃʲ"), Some("tʃʲ"));
        assert_eq!(final_unit("brɑtʲ"), Some("tʲ"));
        assert_eq!(final_unit("ʃʲʃʲ"), Some("ʃʲ"));
        assert_eq!(initial_unit("dʒʲɑ"), Some("dʒʲ"));
        assert_eq!(initial_unit("bʲe"), Some("bʲ"));
        assert_eq!(initial_unit("ɑ"), Some("ɑ"));
    }

    #[test]
    fn voiceless_coda_voices_before_voiced_onset() {
        // брат был
        let mut w = words(&[("брат", 0), ("был", 0)]);
        let changes = apply_sandhi(&mut w, &[String::new(), String::new()]);
        assert_eq!(changes.len(), 1);
        assert_eq!(w[0].ipa(), "brɑd");
        let s = w[0].syllables[0].sandhi.as_ref().unwrap();
        assert_eq!((s.from.as_str(), s.to.as_str(), s.trigger.as_str()), ("t", "d", "b"));
    }

    #[test]
    fn punctuation_blocks() {
        for p in [".", ",", "!", "?", ";", ":"] {
            let mut w = words(&[("брат", 0), ("был", 0)]);
            let changes = apply_sandhi(&mut w, &[p.to_string()]);
            assert!(changes.is_empty(), "{} should block", p);
            assert_eq!(w[0].ipa(), "brɑt");
        }
        let mut w = words(&[("брат", 0), ("был", 0)]);
        assert!(apply_sandhi(&mut w, &["\n".to_string()]).is_empty());
        // a dash does not block
        let mut w = words(&[("брат", 0), ("был", 0)]);
        assert_eq!(apply_sandhi(&mut w, &["—".to_string()]).len(), 1);
    }

    #[test]
    fn sonorants_and_vowels_never_trigger() {
        let mut w = words(&[("брат", 0), ("мой", 0), ("сад", 0), ("он", 0)]);
        let changes = apply_sandhi(&mut w, &[]);
        assert!(changes.is_empty());
    }

    #[test]
    fn palatalized_coda_keeps_palatalization() {
        let mut w = words(&[("мать", 0), ("дома", 1)]);
        apply_sandhi(&mut w, &[]);
        assert_eq!(w[0].ipa(), "mɑdʲ");
    }

    #[test]
    fn only_last_syllable_changes() {
        let mut w = words(&[("вокзал", 1), ("брат", 0), ("был", 0)]);
        let before = w[0].clone();
        apply_sandhi(&mut w, &[]);
        assert_eq!(w[0], before);
        assert_eq!(w[1].ipa(), "brɑd");
    }
}

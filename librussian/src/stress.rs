// librussian/src/stress.rs
//
// Stress resolution and stress mutation.
//
// Lookup order: ё-exception table, then corrections, primary dictionary,
// harvest cache, pure-exception table, the written ё, and finally a
// placeholder on the first syllable.

use std::fmt;

use libdiction_core::utils::lookup_key;
use libdiction_core::{DictionError, DictionResult, StressLookup};
use serde::{Deserialize, Serialize};

use crate::data;
use crate::normalize::normalize;
use crate::syllable::{count_vowels, syllabify, syllable_containing};

/// Why a stress index was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    Correction,
    Dictionary,
    Harvested,
    YoException,
    YoRule,
    /// No source knew the word; needs attention.
    Placeholder,
    User,
    Composer,
    /// Standalone function word, inherently unstressed.
    Clitic,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Correction => "correction",
            Provenance::Dictionary => "dictionary",
            Provenance::Harvested => "harvested",
            Provenance::YoException => "yo-exception",
            Provenance::YoRule => "yo-rule",
            Provenance::Placeholder => "placeholder",
            Provenance::User => "user",
            Provenance::Composer => "composer",
            Provenance::Clitic => "clitic",
        }
    }

    /// Came from a verified source rather than a guess or an edit.
    pub fn is_verified(self) -> bool {
        matches!(
            self,
            Provenance::Correction
                | Provenance::Dictionary
                | Provenance::Harvested
                | Provenance::YoException
        )
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who moved the stress by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditSource {
    #[default]
    User,
    Composer,
}

impl From<EditSource> for Provenance {
    fn from(s: EditSource) -> Self {
        match s {
            EditSource::User => Provenance::User,
            EditSource::Composer => Provenance::Composer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StressAssignment {
    /// Stressed syllable; None for inherently unstressed words.
    pub index: Option<usize>,
    pub provenance: Provenance,
}

impl StressAssignment {
    pub fn new(index: Option<usize>, provenance: Provenance) -> Self {
        Self { index, provenance }
    }

    pub fn needs_attention(&self) -> bool {
        self.provenance == Provenance::Placeholder
    }
}

/// Result of resolving one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Form to transcribe: the lookup key, or the ё-spelling of a ё-exception.
    pub form: String,
    pub assignment: StressAssignment,
    /// Stress given by a verified source, kept so that moving the stress back
    /// onto it restores `Dictionary` provenance.
    pub dictionary_stress: Option<usize>,
    /// The ё-exception entry that rewrote the word, if any.
    pub yo_exception: Option<&'static data::YoException>,
}

/// Corrections and the primary dictionary; what a harvest must not shadow.
pub struct KnownStress<'a> {
    dictionary: &'a dyn StressLookup,
}

impl StressLookup for KnownStress<'_> {
    fn stress_of(&self, key: &str) -> Option<usize> {
        data::correction(key).or_else(|| self.dictionary.stress_of(key))
    }
}

/// Priority chain over the stress sources of one transcription call.
pub struct StressResolver<'a> {
    dictionary: &'a dyn StressLookup,
    harvest: &'a dyn StressLookup,
}

impl<'a> StressResolver<'a> {
    pub fn new(dictionary: &'a dyn StressLookup, harvest: &'a dyn StressLookup) -> Self {
        Self {
            dictionary,
            harvest,
        }
    }

    pub fn known(&self) -> KnownStress<'a> {
        KnownStress {
            dictionary: self.dictionary,
        }
    }

    fn chain(&self, key: &str) -> Option<(usize, Provenance)> {
        if let Some(s) = data::correction(key) {
            return Some((s, Provenance::Correction));
        }
        if let Some(s) = self.dictionary.stress_of(key) {
            return Some((s, Provenance::Dictionary));
        }
        if let Some(s) = self.harvest.stress_of(key) {
            return Some((s, Provenance::Harvested));
        }
        data::exception_stress(key).map(|s| (s, Provenance::Dictionary))
    }

    /// Resolve stress for one word (no surrounding clitics).
    pub fn resolve(&self, word: &str, standalone_clitic: bool) -> Resolution {
        let key = lookup_key(&normalize(word));

        if standalone_clitic {
            return Resolution {
                form: key,
                assignment: StressAssignment::new(None, Provenance::Clitic),
                dictionary_stress: None,
                yo_exception: None,
            };
        }

        if let Some(exc) = data::yo_exception(&key) {
            tracing::debug!("{} read as {}", key, exc.actual_form);
            return Resolution {
                form: exc.actual_form.to_string(),
                assignment: StressAssignment::new(Some(exc.stress), Provenance::YoException),
                dictionary_stress: Some(exc.stress),
                yo_exception: Some(exc),
            };
        }

        let syllable_count = count_vowels(&key);
        let (index, provenance) = match self.chain(&key) {
            Some((s, p)) if s < syllable_count.max(1) => (s, p),
            Some((s, p)) => {
                tracing::warn!("{} stress {} for {} is out of range, ignored", p, s, key);
                self.fallback(&key)
            }
            None => self.fallback(&key),
        };
        let dictionary_stress = provenance.is_verified().then_some(index);
        let index = if syllable_count == 1 { 0 } else { index };

        Resolution {
            form: key,
            assignment: StressAssignment::new(Some(index), provenance),
            dictionary_stress,
            yo_exception: None,
        }
    }

    fn fallback(&self, key: &str) -> (usize, Provenance) {
        let yo = key
            .chars()
            .position(|c| c == 'ё')
            .and_then(|pos| syllable_containing(key, pos));
        match yo {
            Some(s) => (s, Provenance::YoRule),
            None => {
                tracing::debug!("{}", DictionError::LookupMiss(key.to_string()));
                (0, Provenance::Placeholder)
            }
        }
    }
}

/// Move the stress of `word` to syllable `index`, or clear it with `None`.
///
/// Stress fixed by a written ё cannot move. Landing on the dictionary stress
/// restores `Dictionary` provenance; anything else is attributed to `source`.
pub fn reassign(
    word: &str,
    current: StressAssignment,
    dictionary_stress: Option<usize>,
    index: Option<usize>,
    source: EditSource,
) -> DictionResult<StressAssignment> {
    if current.provenance == Provenance::YoRule {
        if let Some(syllable) = current.index {
            return Err(DictionError::StressOnYoRejected {
                word: word.to_string(),
                syllable,
            });
        }
    }
    let Some(index) = index else {
        return Ok(StressAssignment::new(None, source.into()));
    };
    let syllable_count = syllabify(word).len();
    if index >= syllable_count {
        return Err(DictionError::InvalidStressIndex {
            index,
            syllable_count,
        });
    }
    let provenance = if dictionary_stress == Some(index) {
        Provenance::Dictionary
    } else {
        source.into()
    };
    Ok(StressAssignment::new(Some(index), provenance))
}

/// Toggle е/ё in the stressed syllable `syllable` of `word`.
///
/// A ё in that syllable turns every ё of the word back into е (provenance
/// `User`); an е becomes ё (provenance `YoRule`). Returns the new spelling.
pub fn cycle_yo(
    word: &str,
    current: StressAssignment,
    syllable: usize,
) -> DictionResult<(String, StressAssignment)> {
    let syllables = syllabify(word);
    if current.index != Some(syllable) || syllable >= syllables.len() {
        return Err(DictionError::InvalidStressIndex {
            index: syllable,
            syllable_count: syllables.len(),
        });
    }

    let target = &syllables[syllable];
    if target.contains('ё') {
        let form = word.replace('ё', "е");
        return Ok((form, StressAssignment::new(current.index, Provenance::User)));
    }
    if target.contains('е') {
        let form: String = syllables
            .iter()
            .enumerate()
            .map(|(k, s)| {
                if k == syllable {
                    s.replace('е', "ё")
                } else {
                    s.clone()
                }
            })
            .collect();
        return Ok((form, StressAssignment::new(current.index, Provenance::YoRule)));
    }
    Err(DictionError::NoYeInSyllable {
        word: word.to_string(),
        syllable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use libdiction_core::NoStress;
    use std::collections::HashMap;

    fn dict(entries: &[(&str, usize)]) -> HashMap<String, usize> {
        entries.iter().map(|(w, s)| (w.to_string(), *s)).collect()
    }

    #[test]
    fn chain_order() {
        let d = dict(&[("молоко", 0), ("пила", 1)]);
        let h = dict(&[("пила", 0), ("река", 1)]);
        let r = StressResolver::new(&d, &h);

        // correction beats dictionary
        let res = r.resolve("Молоко", false);
        assert_eq!(res.assignment, StressAssignment::new(Some(2), Provenance::Correction));

        // dictionary beats harvest
        let res = r.resolve("пила,", false);
        assert_eq!(res.assignment, StressAssignment::new(Some(1), Provenance::Dictionary));
        assert_eq!(res.dictionary_stress, Some(1));

        let res = r.resolve("река", false);
        assert_eq!(res.assignment.provenance, Provenance::Harvested);
    }

    #[test]
    fn yo_rule_and_placeholder() {
        let r = StressResolver::new(&NoStress, &NoStress);
        let res = r.resolve("берёза", false);
        assert_eq!(res.assignment, StressAssignment::new(Some(1), Provenance::YoRule));
        assert_eq!(res.dictionary_stress, None);

        let res = r.resolve("кукуруза", false);
        assert_eq!(res.assignment, StressAssignment::new(Some(0), Provenance::Placeholder));
        assert!(res.assignment.needs_attention());
    }

    #[test]
    fn yo_exception_rewrites_form() {
        let r = StressResolver::new(&NoStress, &NoStress);
        let res = r.resolve("Еще", false);
        assert_eq!(res.form, "ещё");
        assert_eq!(res.assignment, StressAssignment::new(Some(1), Provenance::YoException));
        assert!(res.yo_exception.is_some());
    }

    #[test]
    fn pure_exception_counts_as_dictionary() {
        let r = StressResolver::new(&NoStress, &NoStress);
        let res = r.resolve("танцую", false);
        assert_eq!(res.assignment, StressAssignment::new(Some(1), Provenance::Dictionary));
    }

    #[test]
    fn monosyllables_and_clitics() {
        let d = dict(&[("дом", 3)]);
        let r = StressResolver::new(&d, &NoStress);
        // out-of-range entry ignored, single vowel stressed anyway
        assert_eq!(r.resolve("дом", false).assignment.index, Some(0));
        assert_eq!(r.resolve("кот", false).assignment.index, Some(0));

        let res = r.resolve("на", true);
        assert_eq!(res.assignment, StressAssignment::new(None, Provenance::Clitic));
    }

    #[test]
    fn reassign_rules() {
        let yo = StressAssignment::new(Some(1), Provenance::YoRule);
        let err = reassign("берёза", yo, None, Some(0), EditSource::User).unwrap_err();
        assert!(matches!(err, DictionError::StressOnYoRejected { syllable: 1, .. }));

        let dict_stress = StressAssignment::new(Some(1), Provenance::Dictionary);
        let err = reassign("вода", dict_stress, Some(1), Some(2), EditSource::User).unwrap_err();
        assert!(matches!(err, DictionError::InvalidStressIndex { index: 2, syllable_count: 2 }));

        let moved = reassign("вода", dict_stress, Some(1), Some(0), EditSource::Composer).unwrap();
        assert_eq!(moved, StressAssignment::new(Some(0), Provenance::Composer));
        let back = reassign("вода", moved, Some(1), Some(1), EditSource::User).unwrap();
        assert_eq!(back, StressAssignment::new(Some(1), Provenance::Dictionary));

        let cleared = reassign("вода", back, Some(1), None, EditSource::User).unwrap();
        assert_eq!(cleared, StressAssignment::new(None, Provenance::User));
        // a written ё still pins the stress
        assert!(reassign("берёза", yo, None, None, EditSource::User).is_err());
    }

    #[test]
    fn cycling_yo() {
        let a = StressAssignment::new(Some(1), Provenance::Placeholder);
        let (form, b) = cycle_yo("береза", a, 1).unwrap();
        assert_eq!(form, "берёза");
        assert_eq!(b.provenance, Provenance::YoRule);

        let (form, c) = cycle_yo(&form, b, 1).unwrap();
        assert_eq!(form, "береза");
        assert_eq!(c.provenance, Provenance::User);

        // not the stressed syllable
        assert!(matches!(
            cycle_yo("береза", a, 0),
            Err(DictionError::InvalidStressIndex { .. })
        ));
        let a = StressAssignment::new(Some(0), Provenance::Dictionary);
        assert!(matches!(
            cycle_yo("мама", a, 0),
            Err(DictionError::NoYeInSyllable { syllable: 0, .. })
        ));
    }

    #[test]
    fn known_excludes_harvest() {
        let d = dict(&[("пила", 1)]);
        let h = dict(&[("река", 1)]);
        let r = StressResolver::new(&d, &h);
        let known = r.known();
        assert!(known.has_entry("пила"));
        assert!(known.has_entry("душа"));
        assert!(!known.has_entry("река"));
    }
}

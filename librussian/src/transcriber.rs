// librussian/src/transcriber.rs
//
// Word -> per-syllable IPA.
//
// All analysis runs over the whole word (voicing, palatalization, cluster
// lookup and vowel context use word indices); output is then produced one
// syllable at a time so that syllable boundaries survive into the IPA.

use std::collections::BTreeSet;

use libdiction_core::WordPipeline;
use phf::phf_map;
use serde::Serialize;

use crate::alphabet::{
    is_always_hard, is_consonant, is_sign, is_vowel, palatalizing_agent, softened_before,
};
use crate::cluster;
use crate::data;
use crate::normalize::normalize;
use crate::palatalization::{analyze_palatalization, PalatalizationMap};
use crate::position::{position, Position};
use crate::stress::{Provenance, StressAssignment, StressResolver};
use crate::style::{StyleConfig, VelarEnding};
use crate::syllable::{count_vowels, syllabify, syllable_offsets};
use crate::voicing::{analyze_voicing, VoicingMap};

/// Everything one word transcription depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranscriptionRequest {
    /// Normalized word, without surrounding punctuation.
    pub word: String,
    pub stress: Option<usize>,
    /// Syllables that keep full vowel quality regardless of position.
    pub locked: BTreeSet<usize>,
    /// Standalone clitic (unstressed function word).
    pub clitic: bool,
    pub style: StyleConfig,
    /// Where `stress` came from, carried through to the output.
    pub provenance: Option<Provenance>,
}

impl TranscriptionRequest {
    pub fn new(word: &str, stress: Option<usize>) -> Self {
        Self {
            word: normalize(word),
            stress,
            locked: BTreeSet::new(),
            clitic: false,
            style: StyleConfig::default(),
            provenance: None,
        }
    }

    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    pub fn with_locked<I: IntoIterator<Item = usize>>(mut self, locked: I) -> Self {
        self.locked = locked.into_iter().collect();
        self
    }

    pub fn as_clitic(mut self) -> Self {
        self.clitic = true;
        self.provenance = Some(Provenance::Clitic);
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }
}

/// A voicing change applied across a word boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SandhiChange {
    pub from: String,
    pub to: String,
    /// Onset of the following word that caused the change.
    pub trigger: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscribedSyllable {
    pub cyrillic: String,
    pub ipa: String,
    pub is_stressed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandhi: Option<SandhiChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedWord {
    pub word: String,
    pub syllables: Vec<TranscribedSyllable>,
    /// Effective stress (monosyllables collapse onto 0).
    pub stress: Option<usize>,
    /// Produced from the pure-exception table rather than the rules.
    pub is_exception: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

impl ProcessedWord {
    /// Syllable IPA joined with spaces.
    pub fn ipa(&self) -> String {
        self.syllables
            .iter()
            .map(|s| s.ipa.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// IPA without syllable boundaries.
    pub fn ipa_compact(&self) -> String {
        self.syllables.iter().map(|s| s.ipa.as_str()).collect()
    }

    pub fn syllable_count(&self) -> usize {
        self.syllables.len()
    }

    /// Stress with its source, when the request named one.
    pub fn assignment(&self) -> Option<StressAssignment> {
        self.provenance.map(|p| StressAssignment::new(self.stress, p))
    }

    /// Monosyllables carry stressed quality but no stress mark.
    pub fn shows_stress_mark(&self) -> bool {
        self.syllables.len() > 1 && self.stress.is_some()
    }
}

static DEFAULT_IPA: phf::Map<char, &'static str> = phf_map! {
    'б' => "b", 'п' => "p", 'в' => "v", 'ф' => "f",
    'д' => "d", 'т' => "t",
    'г' => "ɡ", 'к' => "k", 'х' => "x",
    'з' => "z", 'с' => "s",
    'ж' => "ʒ", 'ш' => "ʃ", 'ц' => "ts", 'ч' => "tʃʲ", 'щ' => "ʃʲʃʲ",
    'м' => "m", 'й' => "j",
};

static FINAL_DEVOICE: phf::Map<char, &'static str> = phf_map! {
    'б' => "p", 'в' => "f", 'г' => "k", 'д' => "t", 'ж' => "ʃ", 'з' => "s",
};

/// Closed set of letter classes the transcriber dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phoneme {
    Sign,
    Consonant(char),
    Vowel(VowelLetter),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VowelLetter {
    A,
    O,
    /// е and ё
    E { yo: bool },
    Ya,
    Yu,
    U,
    Y,
    I,
    Eh,
}

impl Phoneme {
    fn of(c: char) -> Self {
        match c {
            'а' => Phoneme::Vowel(VowelLetter::A),
            'о' => Phoneme::Vowel(VowelLetter::O),
            'е' => Phoneme::Vowel(VowelLetter::E { yo: false }),
            'ё' => Phoneme::Vowel(VowelLetter::E { yo: true }),
            'я' => Phoneme::Vowel(VowelLetter::Ya),
            'ю' => Phoneme::Vowel(VowelLetter::Yu),
            'у' => Phoneme::Vowel(VowelLetter::U),
            'ы' => Phoneme::Vowel(VowelLetter::Y),
            'и' => Phoneme::Vowel(VowelLetter::I),
            'э' => Phoneme::Vowel(VowelLetter::Eh),
            _ if is_sign(c) => Phoneme::Sign,
            _ if is_consonant(c) => Phoneme::Consonant(c),
            _ => Phoneme::Other,
        }
    }
}

/// Word-wide analysis shared by every syllable of one word.
struct WordContext<'a> {
    word: &'a str,
    chars: Vec<char>,
    offsets: Vec<usize>,
    lengths: Vec<usize>,
    stress: Option<usize>,
    locked: &'a BTreeSet<usize>,
    clitic: bool,
    voicing: VoicingMap,
    palatalized: PalatalizationMap,
    /// Last consonant of a syllable whose twin opens the next syllable.
    geminate_first: BTreeSet<usize>,
    /// The twin itself; it is folded into the length mark.
    geminate_second: BTreeSet<usize>,
    /// Index of и in a hard-read -кий/-гий/-хий ending.
    hard_velar_vowel: Option<usize>,
}

impl<'a> WordContext<'a> {
    fn new(word: &'a str, syllables: &[String], stress: Option<usize>, req: &'a TranscriptionRequest) -> Self {
        let chars: Vec<char> = word.chars().collect();
        let offsets = syllable_offsets(syllables);
        let lengths: Vec<usize> = syllables.iter().map(|s| s.chars().count()).collect();
        let voicing = analyze_voicing(&chars);
        let mut palatalized = analyze_palatalization(&chars, req.style.regressive);

        let mut geminate_first = BTreeSet::new();
        let mut geminate_second = BTreeSet::new();
        for k in 0..syllables.len().saturating_sub(1) {
            let end = offsets[k] + lengths[k];
            let mut last = end - 1;
            if chars[last] == 'ь' && lengths[k] >= 2 {
                last -= 1;
            }
            let first = offsets[k + 1];
            if is_consonant(chars[last]) && chars.get(first) == Some(&chars[last]) {
                geminate_first.insert(last);
                geminate_second.insert(first);
            }
        }

        let mut hard_velar_vowel = None;
        if req.style.velar_ending == VelarEnding::Stage
            && ["кий", "гий", "хий"].iter().any(|e| word.ends_with(e))
            && syllables.len() > 1
            && stress != Some(syllables.len() - 1)
        {
            let n = chars.len();
            palatalized.remove(&(n - 3));
            hard_velar_vowel = Some(n - 2);
        }

        Self {
            word,
            chars,
            offsets,
            lengths,
            stress,
            locked: &req.locked,
            clitic: req.clitic,
            voicing,
            palatalized,
            geminate_first,
            geminate_second,
            hard_velar_vowel,
        }
    }

    fn at(&self, i: Option<usize>) -> Option<char> {
        i.and_then(|i| self.chars.get(i)).copied()
    }

    fn prev(&self, i: usize, back: usize) -> Option<char> {
        self.at(i.checked_sub(back))
    }

    fn next(&self, i: usize, ahead: usize) -> Option<char> {
        self.chars.get(i + ahead).copied()
    }

    fn syllable_of(&self, i: usize) -> Option<usize> {
        (0..self.offsets.len()).find(|&k| i >= self.offsets[k] && i < self.offsets[k] + self.lengths[k])
    }

    /// т/д directly before `i`, possibly with a soft sign in between.
    fn after_t_or_d(&self, i: usize) -> bool {
        matches!(self.prev(i, 1), Some('т' | 'д'))
            || (self.prev(i, 1) == Some('ь') && matches!(self.prev(i, 2), Some('т' | 'д')))
    }

    fn transcribe_syllable(&self, k: usize) -> String {
        let start = self.offsets[k];
        let end = start + self.lengths[k];
        let last = k + 1 == self.offsets.len();
        let pos = position(k, self.stress);
        let locked = self.locked.contains(&k);

        let mut out = String::new();
        let mut i = start;
        while i < end {
            match Phoneme::of(self.chars[i]) {
                Phoneme::Sign | Phoneme::Other => i += 1,
                Phoneme::Vowel(v) => {
                    self.vowel(i, v, pos, locked, &mut out);
                    i += 1;
                }
                Phoneme::Consonant(c) => i += self.consonant(i, c, start, end, last, &mut out),
            }
        }
        out
    }

    /// Emit one consonant (or cluster); returns characters consumed.
    fn consonant(&self, i: usize, c: char, start: usize, end: usize, last: bool, out: &mut String) -> usize {
        if i == start && self.geminate_second.contains(&i) {
            return 1;
        }
        if c == 'с' && self.after_t_or_d(i) && self.next(i, 1) == Some('я') {
            return 1;
        }
        if let Some(m) = cluster::match_at(self.word, &self.chars, i) {
            out.push_str(m.ipa);
            return m.length.min(end - i).max(1);
        }

        let palatalized = self.palatalized.contains(&i);
        let directive = self.voicing.get(&i);
        let word_final = last && self.chars[i + 1..].iter().all(|n| is_sign(*n));

        let base: &str = if let Some(d) = directive {
            d.ipa
        } else if let Some(f) = FINAL_DEVOICE.get(&c).filter(|_| word_final) {
            *f
        } else {
            match c {
                'л' => {
                    if palatalized {
                        "lʲ"
                    } else {
                        "ɫ"
                    }
                }
                'н' => {
                    if palatalized {
                        "ɲ"
                    } else {
                        "n"
                    }
                }
                'р' => {
                    if palatalized || self.r_softened_by_front_vowel(i) {
                        "rʲ"
                    } else {
                        "r"
                    }
                }
                _ => DEFAULT_IPA.get(&c).copied().unwrap_or(""),
            }
        };
        out.push_str(base);

        if palatalized && !is_always_hard(c) {
            let marked = match directive {
                Some(d) => !d.ipa.contains('ʲ') && c != 'н',
                None => !matches!(c, 'й' | 'ч' | 'щ' | 'н' | 'л' | 'р'),
            };
            if marked {
                out.push('ʲ');
            }
        }

        let doubled = i + 1 < end && self.chars[i + 1] == c;
        if doubled && !matches!(c, 'ж' | 'ш' | 'щ' | 'ч') {
            out.push('ː');
            return 2;
        }
        if self.geminate_first.contains(&i) && !matches!(c, 'ж' | 'ш' | 'щ' | 'ч') {
            out.push('ː');
        }
        1
    }

    /// р after a stressed и/е/э, before a further consonant.
    fn r_softened_by_front_vowel(&self, i: usize) -> bool {
        let Some(p) = i.checked_sub(1) else {
            return false;
        };
        if !matches!(self.chars[p], 'и' | 'е' | 'э') {
            return false;
        }
        if self.stress.is_none() || self.syllable_of(p) != self.stress {
            return false;
        }
        matches!(self.next(i, 1), Some(n) if is_consonant(n))
    }

    /// Consonant before the vowel at `i` is palatal on the vowel's side.
    fn after_palatal_consonant(&self, i: usize) -> bool {
        match self.prev(i, 1) {
            Some(p) if is_consonant(p) => softened_before(p, Some(self.chars[i])),
            _ => false,
        }
    }

    /// The segment after the vowel at `i` is palatal.
    ///
    /// When a cluster starts there, its own reading decides.
    fn palatal_to_the_right(&self, i: usize) -> bool {
        if let Some(m) = cluster::match_at(self.word, &self.chars, i + 1) {
            return m.ipa.chars().nth(1) == Some('ʲ');
        }
        palatalizing_agent(self.next(i, 1), self.next(i, 2))
    }

    fn takes_glide(&self, i: usize) -> bool {
        match self.prev(i, 1) {
            None => true,
            Some(p) => is_vowel(p) || is_sign(p),
        }
    }

    fn vowel(&self, i: usize, v: VowelLetter, pos: Position, locked: bool, out: &mut String) {
        let ipa = match v {
            VowelLetter::A => self.vowel_a(i, pos, locked),
            VowelLetter::O => self.vowel_o(i, pos, locked),
            VowelLetter::E { yo } => {
                if self.takes_glide(i) {
                    out.push('j');
                }
                self.vowel_e(i, yo, pos, locked)
            }
            VowelLetter::Ya => {
                if self.prev(i, 1) == Some('с') && self.after_t_or_d(i - 1) {
                    return;
                }
                if self.takes_glide(i) {
                    out.push('j');
                }
                self.vowel_ya(i, pos, locked)
            }
            VowelLetter::Yu => {
                if self.takes_glide(i) {
                    out.push('j');
                }
                "u"
            }
            VowelLetter::U => "u",
            VowelLetter::Y => "ɨ",
            VowelLetter::I => {
                if matches!(self.prev(i, 1), Some(p) if is_always_hard(p)) || self.hard_velar_vowel == Some(i) {
                    "ɨ"
                } else {
                    "i"
                }
            }
            VowelLetter::Eh => {
                if pos.is_stressed() || locked {
                    "ɛ"
                } else {
                    "ɪ"
                }
            }
        };
        out.push_str(ipa);
    }

    /// -ая (optionally with a trailing ь) at the end of the word.
    fn is_aya_ending(&self, a: usize) -> bool {
        let n = self.chars.len();
        self.next(a, 1) == Some('я') && (a + 2 == n || (a + 3 == n && self.next(a, 2) == Some('ь')))
    }

    fn vowel_a(&self, i: usize, pos: Position, locked: bool) -> &'static str {
        let aya = self.is_aya_ending(i);
        let interpalatal = self.after_palatal_consonant(i) && self.palatal_to_the_right(i);
        let full = if interpalatal { "a" } else { "ɑ" };
        if locked {
            return full;
        }
        match pos {
            Position::Stressed => {
                if aya {
                    "ɑ"
                } else {
                    full
                }
            }
            Position::PretonicImmediate => full,
            Position::PosttonicImmediate => "ɑ",
            Position::PretonicRemote | Position::PosttonicRemote | Position::Unstressed => {
                // ʌ even after ч щ й
                if aya {
                    "ɑ"
                } else {
                    "ʌ"
                }
            }
        }
    }

    fn vowel_o(&self, i: usize, pos: Position, locked: bool) -> &'static str {
        if locked {
            return "o";
        }
        match pos {
            Position::Stressed => "o",
            Position::PretonicImmediate => "ɑ",
            Position::PosttonicImmediate => "ʌ",
            Position::PretonicRemote | Position::PosttonicRemote | Position::Unstressed => {
                if i == 0 || self.clitic {
                    "ɑ"
                } else {
                    "ʌ"
                }
            }
        }
    }

    fn vowel_e(&self, i: usize, yo: bool, pos: Position, locked: bool) -> &'static str {
        let left = self.after_palatal_consonant(i)
            || match self.prev(i, 1) {
                None => true,
                Some(p) => matches!(p, 'и' | 'е' | 'ё' | 'ю' | 'я' | 'ь' | 'й'),
            };
        let interpalatal = left && self.palatal_to_the_right(i);

        if pos.is_stressed() || locked {
            return if yo {
                "o"
            } else if interpalatal {
                "e"
            } else {
                "ɛ"
            };
        }
        if matches!(self.prev(i, 1), Some(p) if is_always_hard(p)) {
            "ɨ"
        } else if interpalatal {
            "i"
        } else {
            "ɪ"
        }
    }

    fn vowel_ya(&self, i: usize, pos: Position, locked: bool) -> &'static str {
        let after_pal = self.after_palatal_consonant(i);
        let full = if after_pal && self.palatal_to_the_right(i) {
            "a"
        } else {
            "ɑ"
        };
        if locked {
            return full;
        }
        let n = self.chars.len();
        let final_or_before_final_sign = i + 1 == n || (i + 2 == n && self.next(i, 1) == Some('ь'));
        match pos {
            Position::Stressed | Position::PretonicImmediate => full,
            _ => {
                if self.prev(i, 1) == Some('а') && final_or_before_final_sign {
                    "ɑ"
                } else if self.prev(i, 1) == Some('с') && final_or_before_final_sign {
                    "ʌ"
                } else if pos == Position::PosttonicImmediate && i + 1 == n {
                    "ɑ"
                } else if after_pal {
                    "ɪ"
                } else {
                    "ʌ"
                }
            }
        }
    }
}

/// Does a request resolve to the pure-exception reading?
fn exception_applies(word: &str, stress: Option<usize>) -> Option<&'static data::PureException> {
    let exc = data::pure_exception(word)?;
    match stress {
        None => Some(exc),
        Some(s) if s == exc.stress => Some(exc),
        Some(_) => None,
    }
}

/// Transcribe one word. Deterministic in its request.
pub fn process_word(req: &TranscriptionRequest) -> ProcessedWord {
    let word = normalize(&req.word);
    let syllables = syllabify(&word);

    if let Some(exc) = exception_applies(&word, req.stress) {
        let stress = req.stress.or(Some(exc.stress));
        let transcribed = exc
            .ipa
            .split('.')
            .enumerate()
            .map(|(k, ipa)| TranscribedSyllable {
                cyrillic: syllables.get(k).cloned().unwrap_or_default(),
                ipa: ipa.to_string(),
                is_stressed: Some(k) == stress,
                sandhi: None,
            })
            .collect();
        let provenance = match (req.provenance, req.stress) {
            (None, None) => Some(Provenance::Dictionary),
            (p, _) => p,
        };
        return ProcessedWord {
            word,
            syllables: transcribed,
            stress,
            is_exception: true,
            provenance,
        };
    }

    let stress = if count_vowels(&word) == 1 && req.stress.is_some() {
        Some(0)
    } else {
        req.stress
    };
    let ctx = WordContext::new(&word, &syllables, stress, req);
    let transcribed = syllables
        .iter()
        .enumerate()
        .map(|(k, cyr)| TranscribedSyllable {
            cyrillic: cyr.clone(),
            ipa: ctx.transcribe_syllable(k),
            is_stressed: Some(k) == stress,
            sandhi: None,
        })
        .collect();

    ProcessedWord {
        word: word.clone(),
        syllables: transcribed,
        stress,
        is_exception: false,
        provenance: req.provenance,
    }
}

/// Resolve stress for `word` through `resolver`, then transcribe it.
///
/// Clitics are not merged here; the result carries the resolved provenance.
pub fn process_resolved(word: &str, resolver: &StressResolver<'_>, style: StyleConfig) -> ProcessedWord {
    let res = resolver.resolve(word, false);
    let req = TranscriptionRequest::new(&res.form, res.assignment.index)
        .with_style(style)
        .with_provenance(res.assignment.provenance);
    process_word(&req)
}

/// The per-word pipeline plugged into `libdiction_core::Engine`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transcriber;

impl WordPipeline for Transcriber {
    type Request = TranscriptionRequest;
    type Output = ProcessedWord;

    fn run(&self, request: &TranscriptionRequest) -> ProcessedWord {
        process_word(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palatalization::RegressiveMode;

    fn ipa(word: &str, stress: Option<usize>) -> String {
        process_word(&TranscriptionRequest::new(word, stress)).ipa()
    }

    #[test]
    fn keeps_syllable_boundaries() {
        assert_eq!(ipa("вода", Some(1)), "vɑ dɑ");
        assert_eq!(ipa("молоко", Some(2)), "mʌ ɫɑ ko");
        assert_eq!(ipa("трубка", Some(0)), "tru pkɑ");
    }

    #[test]
    fn monosyllable_stress_collapses_to_zero() {
        let w = process_word(&TranscriptionRequest::new("дом", Some(3)));
        assert_eq!(w.stress, Some(0));
        assert!(w.syllables[0].is_stressed);
        assert!(!w.shows_stress_mark());
    }

    #[test]
    fn clitic_o_stays_open() {
        let w = process_word(&TranscriptionRequest::new("во", None).as_clitic());
        assert_eq!(w.ipa(), "vɑ");
        assert_eq!(w.stress, None);
    }

    #[test]
    fn geminates_take_length_mark() {
        assert_eq!(ipa("ванна", Some(0)), "vɑ nːɑ");
        assert_eq!(ipa("касса", Some(0)), "kɑ sːɑ");
        // no length mark on ж ш щ ч
        assert_eq!(ipa("жжёт", Some(0)), "ʒʒot");
    }

    #[test]
    fn r_after_stressed_front_vowel() {
        assert_eq!(ipa("первый", Some(0)), "pʲɛ rʲvɨj");
        // word-final р stays hard
        assert_eq!(ipa("мир", Some(0)), "mʲir");
        // unstressed: no softening
        assert_eq!(ipa("терпеть", Some(1)), "tʲɪ rpʲetʲ");
    }

    #[test]
    fn aya_and_reflexive_endings() {
        assert_eq!(ipa("красивая", Some(1)), "krɑ sʲi vɑ jɑ");
        assert_eq!(ipa("бойся", Some(0)), "boj sʌ");
    }

    #[test]
    fn remote_a_after_palatal_reduces_to_wedge() {
        let compact = |w: &str, s: usize| {
            process_word(&TranscriptionRequest::new(w, Some(s))).ipa_compact()
        };
        assert_eq!(compact("часовой", 2), "tʃʲʌsɑvoj");
        assert_eq!(compact("чародей", 2), "tʃʲʌrɑdʲej");
        assert!(compact("щавелевый", 2).starts_with("ʃʲʃʲʌ"));
    }

    #[test]
    fn locked_syllable_keeps_full_quality() {
        let req = TranscriptionRequest::new("молоко", Some(2)).with_locked([0]);
        assert_eq!(process_word(&req).ipa(), "mo ɫɑ ko");
        let req = TranscriptionRequest::new("весна", Some(1)).with_locked([0]);
        assert_eq!(process_word(&req).ipa(), "vʲɛ snɑ");
    }

    #[test]
    fn pure_exception_respects_stress() {
        let w = process_word(&TranscriptionRequest::new("сейчас", None));
        assert!(w.is_exception);
        assert_eq!(w.ipa(), "si tʃʲɑs");
        assert_eq!(w.stress, Some(1));

        let w = process_word(&TranscriptionRequest::new("сейчас", Some(0)));
        assert!(!w.is_exception);
        assert_eq!(w.stress, Some(0));
        assert_eq!(w.assignment(), None);
    }

    #[test]
    fn resolved_words_carry_provenance() {
        let dict = libdiction_core::NoStress;
        let harvest = libdiction_core::NoStress;
        let resolver = StressResolver::new(&dict, &harvest);

        let w = process_resolved("вода", &resolver, StyleConfig::default());
        assert_eq!(w.ipa(), "vɑ dɑ");
        assert_eq!(w.assignment(), Some(StressAssignment::new(Some(1), Provenance::Correction)));

        let w = process_resolved("кукуруза", &resolver, StyleConfig::default());
        assert!(w.assignment().is_some_and(|a| a.needs_attention()));

        let w = process_word(&TranscriptionRequest::new("на", None).as_clitic());
        assert_eq!(w.assignment(), Some(StressAssignment::new(None, Provenance::Clitic)));
    }

    #[test]
    fn velar_ending_style() {
        let modern = TranscriptionRequest::new("тихий", Some(0));
        assert_eq!(process_word(&modern).ipa(), "tʲi xʲij");

        let mut style = StyleConfig::default();
        style.velar_ending = VelarEnding::Stage;
        let stage = TranscriptionRequest::new("тихий", Some(0)).with_style(style);
        assert_eq!(process_word(&stage).ipa(), "tʲi xɨj");

        // stressed ending keeps the soft reading
        let stressed = TranscriptionRequest::new("тихий", Some(1)).with_style(style);
        assert!(process_word(&stressed).ipa().ends_with("xʲij"));
    }

    #[test]
    fn regressive_mode_changes_output() {
        let mut style = StyleConfig::default();
        style.regressive = RegressiveMode::Minimal;
        let req = TranscriptionRequest::new("лезть", Some(0)).with_style(style);
        assert_eq!(process_word(&req).ipa(), "lʲɛstʲ");
        assert_eq!(ipa("лезть", Some(0)), "lʲɛsʲtʲ");
    }

    #[test]
    fn deterministic() {
        let req = TranscriptionRequest::new("здравствуйте", Some(0));
        assert_eq!(process_word(&req), process_word(&req));
    }
}

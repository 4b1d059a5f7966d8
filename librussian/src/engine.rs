//! Russian diction engine
//!
//! Turns a whole text into IPA: tokenizes lines, merges clitics onto their
//! hosts, resolves stress, transcribes each word through the memoizing
//! `libdiction_core::Engine<Transcriber>` and finally runs cross-word sandhi.
//!
//! Words are kept pristine in the `Transcript`; sandhi is applied to copies so
//! that any single word can be re-transcribed (new stress, ё toggled, locked
//! syllables) and the boundary pass simply re-run.

use std::collections::BTreeSet;
use std::sync::Arc;

use libdiction_core::utils::{lookup_key, nfc};
use libdiction_core::{DictionError, DictionResult, HarvestCache, StressDictionary};
use serde::Serialize;

use crate::alphabet::is_cyrillic;
use crate::config::RussianConfig;
use crate::data::{self, YoException};
use crate::normalize::normalize;
use crate::sandhi::apply_sandhi;
use crate::stress::{self, EditSource, Provenance, StressAssignment, StressResolver};
use crate::style::StyleConfig;
use crate::syllable::count_vowels;
use crate::transcriber::{ProcessedWord, SandhiChange, Transcriber, TranscriptionRequest};
use crate::validate::validate_ipa;

/// Punctuation split off the edges of a token.
pub const EDGE_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '»', '«', '"', '\'', '—', '–', '…'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartRole {
    Proclitic,
    Main,
    Enclitic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordPart {
    /// Written form, punctuation stripped.
    pub text: String,
    pub role: PartRole,
}

/// One transcribed token of a text, possibly with clitics attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextWord {
    /// Parts as written, separated by spaces.
    pub display: String,
    pub parts: Vec<WordPart>,
    pub trailing_punct: String,
    pub line: usize,
    pub line_break_after: bool,
    pub standalone_clitic: bool,
    /// Combined form that is transcribed (ё-corrected, clitics joined).
    pub form: String,
    /// Syllables contributed by a proclitic before the main part.
    pub proclitic_syllables: usize,
    /// Stress over the combined form.
    pub stress: StressAssignment,
    /// Verified stress over the combined form, if any source gave one.
    pub dictionary_stress: Option<usize>,
    pub locked: BTreeSet<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yo_exception: Option<&'static YoException>,
    /// Per-word transcription before sandhi.
    pub processed: ProcessedWord,
}

impl TextWord {
    /// Lookup key of the main part.
    pub fn main_key(&self) -> String {
        self.parts
            .iter()
            .find(|p| p.role == PartRole::Main)
            .map(|p| lookup_key(&normalize(&p.text)))
            .unwrap_or_default()
    }
}

/// A transcribed text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    pub words: Vec<TextWord>,
    /// `words[i].processed` after cross-word sandhi.
    pub sandhied: Vec<ProcessedWord>,
    pub sandhi_changes: Vec<(usize, SandhiChange)>,
    /// Input lines, including lines without words.
    pub line_count: usize,
}

impl Transcript {
    fn resandhi(&mut self, enabled: bool) {
        self.sandhied = self.words.iter().map(|w| w.processed.clone()).collect();
        self.sandhi_changes = if enabled {
            let punct: Vec<String> = self
                .words
                .iter()
                .map(|w| {
                    if w.line_break_after {
                        format!("{}\n", w.trailing_punct)
                    } else {
                        w.trailing_punct.clone()
                    }
                })
                .collect();
            apply_sandhi(&mut self.sandhied, &punct)
        } else {
            Vec::new()
        };
    }

    fn lines_with<F>(&self, mut render_word: F) -> String
    where
        F: FnMut(&ProcessedWord) -> String,
    {
        let mut lines = vec![Vec::new(); self.line_count];
        for (w, p) in self.words.iter().zip(&self.sandhied) {
            if let Some(line) = lines.get_mut(w.line) {
                line.push(render_word(p));
            }
        }
        lines
            .into_iter()
            .map(|l| l.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Styled IPA, syllables and words separated by spaces, one line per
    /// input line.
    pub fn render(&self, style: &StyleConfig) -> String {
        self.lines_with(|p| {
            p.syllables
                .iter()
                .map(|s| style.apply(&s.ipa))
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    /// Canonical IPA with `.` between syllables and `ˈ` before the stressed
    /// syllable of polysyllables.
    pub fn render_marked(&self) -> String {
        self.lines_with(|p| {
            let mark = p.shows_stress_mark();
            p.syllables
                .iter()
                .map(|s| {
                    if mark && s.is_stressed {
                        format!("ˈ{}", s.ipa)
                    } else {
                        s.ipa.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(".")
        })
    }

    /// Words whose stress came from no source.
    pub fn needs_attention(&self) -> Vec<usize> {
        self.words
            .iter()
            .enumerate()
            .filter(|(_, w)| w.stress.needs_attention())
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Token {
    text: String,
    trailing: String,
    key: String,
}

fn split_token(raw: &str) -> (String, String) {
    let core = raw.trim_start_matches(EDGE_PUNCTUATION);
    let word = core.trim_end_matches(EDGE_PUNCTUATION);
    let trailing = core[word.len()..].to_string();
    (word.to_string(), trailing)
}

fn tokenize_line(line: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for raw in line.split_whitespace() {
        if !raw.chars().any(is_cyrillic) {
            // detached punctuation belongs to the previous word
            if let Some(prev) = tokens.last_mut() {
                let punct: String = raw.chars().filter(|c| EDGE_PUNCTUATION.contains(c)).collect();
                prev.trailing.push_str(&punct);
            }
            continue;
        }
        let (text, trailing) = split_token(raw);
        let key = lookup_key(&normalize(&text));
        tokens.push(Token { text, trailing, key });
    }
    tokens
}

fn group_clitics(tokens: Vec<Token>, merge: bool) -> Vec<Vec<(Token, PartRole)>> {
    let mut groups = Vec::new();
    let mut iter = tokens.into_iter().peekable();
    while let Some(tok) = iter.next() {
        let mut group = Vec::new();
        let host = if merge
            && data::is_proclitic(&tok.key)
            && tok.trailing.is_empty()
            && iter.peek().is_some()
        {
            group.push((tok, PartRole::Proclitic));
            match iter.next() {
                Some(next) => next,
                None => break,
            }
        } else {
            tok
        };
        let open = host.trailing.is_empty();
        group.push((host, PartRole::Main));
        if merge && open && iter.peek().is_some_and(|n| data::is_enclitic(&n.key)) {
            if let Some(enc) = iter.next() {
                group.push((enc, PartRole::Enclitic));
            }
        }
        groups.push(group);
    }
    groups
}

/// Public engine for librussian.
///
/// Wraps the generic `libdiction_core::Engine<Transcriber>` together with the
/// stress sources. The inner engine is behind an `Arc` so clones share the
/// word cache.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<libdiction_core::Engine<Transcriber>>,
    dictionary: Arc<StressDictionary>,
    harvest: HarvestCache,
    config: RussianConfig,
    style: StyleConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(RussianConfig::default())
    }
}

impl Engine {
    /// Build an engine, opening the dictionary and harvest the config names.
    pub fn new(config: RussianConfig) -> Self {
        let dictionary = config.base.open_stress_dictionary();
        let harvest = config.base.open_harvest();
        Self::with_sources(config, dictionary, harvest)
    }

    pub fn with_sources(
        config: RussianConfig,
        dictionary: StressDictionary,
        harvest: HarvestCache,
    ) -> Self {
        let style = config.effective_style();
        tracing::debug!(
            "engine: {} dictionary entries, {} harvested, cache {}",
            dictionary.len(),
            harvest.len(),
            config.base.max_cache_size
        );
        Self {
            inner: Arc::new(libdiction_core::Engine::from_config(Transcriber, &config.base)),
            dictionary: Arc::new(dictionary),
            harvest,
            config,
            style,
        }
    }

    pub fn config(&self) -> &RussianConfig {
        &self.config
    }

    pub fn style(&self) -> StyleConfig {
        self.style
    }

    /// Change the active style. Existing transcripts must be rebuilt with
    /// [`Engine::restyle`] for regressive or velar changes to show.
    pub fn set_style(&mut self, style: StyleConfig) {
        self.style = style;
    }

    pub fn dictionary(&self) -> &StressDictionary {
        &self.dictionary
    }

    pub fn harvest(&self) -> &HarvestCache {
        &self.harvest
    }

    fn resolver(&self) -> StressResolver<'_> {
        StressResolver::new(self.dictionary.as_ref(), &self.harvest)
    }

    /// Transcribe a single request through the cache.
    pub fn process(&self, request: &TranscriptionRequest) -> ProcessedWord {
        let word = self.inner.process(request);
        if self.config.validate_ipa {
            for glyph in validate_ipa(&word.ipa()) {
                tracing::warn!(
                    "{}: forbidden glyph {} (use {})",
                    word.word,
                    glyph.glyph,
                    glyph.replacement
                );
            }
        }
        word
    }

    fn rebuild(&self, w: &mut TextWord) {
        let mut req = TranscriptionRequest::new(&w.form, w.stress.index)
            .with_provenance(w.stress.provenance)
            .with_style(self.style.phonological())
            .with_locked(w.locked.iter().copied());
        if w.standalone_clitic {
            req = req.as_clitic();
        }
        w.processed = self.process(&req);
    }

    fn build_word(&self, group: Vec<(Token, PartRole)>, line: usize) -> TextWord {
        let standalone_clitic = group.len() == 1
            && group
                .first()
                .is_some_and(|(t, _)| data::is_standalone_clitic(&t.key));

        let main = group
            .iter()
            .find(|(_, r)| *r == PartRole::Main)
            .map(|(t, _)| t.text.clone())
            .unwrap_or_default();
        let res = self.resolver().resolve(&main, standalone_clitic);

        let mut form = String::new();
        let mut proclitic_syllables = 0;
        for (tok, role) in &group {
            match role {
                PartRole::Proclitic => {
                    proclitic_syllables += count_vowels(&tok.key);
                    form.push_str(&tok.key);
                }
                PartRole::Main => form.push_str(&res.form),
                PartRole::Enclitic => form.push_str(&tok.key),
            }
        }

        let trailing_punct = group
            .last()
            .map(|(t, _)| t.trailing.clone())
            .unwrap_or_default();
        let display = group
            .iter()
            .map(|(t, _)| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let parts = group
            .into_iter()
            .map(|(t, role)| WordPart { text: t.text, role })
            .collect();

        let mut word = TextWord {
            display,
            parts,
            trailing_punct,
            line,
            line_break_after: false,
            standalone_clitic,
            form,
            proclitic_syllables,
            stress: StressAssignment::new(
                res.assignment.index.map(|s| s + proclitic_syllables),
                res.assignment.provenance,
            ),
            dictionary_stress: res.dictionary_stress.map(|s| s + proclitic_syllables),
            locked: BTreeSet::new(),
            yo_exception: res.yo_exception,
            processed: ProcessedWord {
                word: String::new(),
                syllables: Vec::new(),
                stress: None,
                is_exception: false,
                provenance: None,
            },
        };
        self.rebuild(&mut word);
        word
    }

    /// Transcribe one word (with any attached clitics written in it).
    pub fn transcribe_word(&self, word: &str) -> TextWord {
        let mut tokens = tokenize_line(&nfc(word));
        if tokens.is_empty() {
            tokens.push(Token {
                text: word.trim().to_string(),
                trailing: String::new(),
                key: lookup_key(&normalize(word)),
            });
        }
        let mut groups = group_clitics(tokens, self.config.merge_clitics);
        let group = if groups.is_empty() {
            Vec::new()
        } else {
            groups.swap_remove(0)
        };
        self.build_word(group, 0)
    }

    /// Transcribe a whole text.
    pub fn transcribe_text(&self, text: &str) -> Transcript {
        let text = nfc(text);
        let mut words: Vec<TextWord> = Vec::new();
        let mut line_count = 0;
        for (line_idx, line) in text.lines().enumerate() {
            line_count = line_idx + 1;
            let groups = group_clitics(tokenize_line(line), self.config.merge_clitics);
            let first = words.len();
            for group in groups {
                words.push(self.build_word(group, line_idx));
            }
            if words.len() > first {
                if let Some(last) = words.last_mut() {
                    last.line_break_after = true;
                }
            }
        }
        tracing::debug!("transcribed {} words over {} lines", words.len(), line_count);

        let mut transcript = Transcript {
            words,
            sandhied: Vec::new(),
            sandhi_changes: Vec::new(),
            line_count,
        };
        transcript.resandhi(self.config.base.sandhi_enabled);
        transcript
    }

    /// Re-transcribe every word with the current style.
    pub fn restyle(&self, transcript: &mut Transcript) {
        for w in transcript.words.iter_mut() {
            self.rebuild(w);
        }
        transcript.resandhi(self.config.base.sandhi_enabled);
    }

    /// Move the stress of a single word; `None` leaves it unstressed.
    pub fn set_word_stress(
        &self,
        word: &mut TextWord,
        index: Option<usize>,
        source: EditSource,
    ) -> DictionResult<()> {
        word.stress = stress::reassign(&word.form, word.stress, word.dictionary_stress, index, source)?;
        word.standalone_clitic = false;
        self.rebuild(word);
        Ok(())
    }

    /// Toggle е/ё in the stressed syllable of a single word.
    pub fn cycle_word_yo(&self, word: &mut TextWord, syllable: usize) -> DictionResult<()> {
        let (form, assignment) = stress::cycle_yo(&word.form, word.stress, syllable)?;
        word.form = form;
        word.stress = assignment;
        self.rebuild(word);
        Ok(())
    }

    /// Keep full vowel quality in `syllable` regardless of position.
    pub fn lock_word_syllable(&self, word: &mut TextWord, syllable: usize) -> DictionResult<()> {
        let syllable_count = word.processed.syllable_count();
        if syllable >= syllable_count {
            return Err(DictionError::InvalidStressIndex {
                index: syllable,
                syllable_count,
            });
        }
        if word.locked.insert(syllable) {
            self.rebuild(word);
        }
        Ok(())
    }

    pub fn unlock_word_syllable(&self, word: &mut TextWord, syllable: usize) {
        if word.locked.remove(&syllable) {
            self.rebuild(word);
        }
    }

    fn word_mut<'t>(
        transcript: &'t mut Transcript,
        index: usize,
    ) -> DictionResult<&'t mut TextWord> {
        let len = transcript.words.len();
        transcript
            .words
            .get_mut(index)
            .ok_or(DictionError::WordIndexOutOfRange { index, len })
    }

    pub fn set_stress(
        &self,
        transcript: &mut Transcript,
        word_index: usize,
        index: Option<usize>,
        source: EditSource,
    ) -> DictionResult<()> {
        let word = Self::word_mut(transcript, word_index)?;
        self.set_word_stress(word, index, source)?;
        transcript.resandhi(self.config.base.sandhi_enabled);
        Ok(())
    }

    /// Toggle е/ё; `syllable` must be the stressed syllable of the word.
    pub fn cycle_yo(
        &self,
        transcript: &mut Transcript,
        word_index: usize,
        syllable: usize,
    ) -> DictionResult<()> {
        let word = Self::word_mut(transcript, word_index)?;
        self.cycle_word_yo(word, syllable)?;
        transcript.resandhi(self.config.base.sandhi_enabled);
        Ok(())
    }

    pub fn lock_syllable(
        &self,
        transcript: &mut Transcript,
        word_index: usize,
        syllable: usize,
    ) -> DictionResult<()> {
        let word = Self::word_mut(transcript, word_index)?;
        self.lock_word_syllable(word, syllable)?;
        transcript.resandhi(self.config.base.sandhi_enabled);
        Ok(())
    }

    pub fn unlock_syllable(
        &self,
        transcript: &mut Transcript,
        word_index: usize,
        syllable: usize,
    ) -> DictionResult<()> {
        let word = Self::word_mut(transcript, word_index)?;
        self.unlock_word_syllable(word, syllable);
        transcript.resandhi(self.config.base.sandhi_enabled);
        Ok(())
    }

    /// Apply an externally verified stress for `word`.
    ///
    /// The stress is recorded in the harvest cache unless corrections or the
    /// dictionary already know the word; placeholder words of the transcript
    /// with that main part are then re-transcribed. Returns whether anything
    /// was recorded.
    pub fn accept_verified_stress(
        &self,
        transcript: &mut Transcript,
        word: &str,
        index: usize,
    ) -> DictionResult<bool> {
        let key = lookup_key(&normalize(word));
        let syllable_count = count_vowels(&key).max(1);
        if index >= syllable_count {
            return Err(DictionError::InvalidStressIndex {
                index,
                syllable_count,
            });
        }
        if !self.harvest.record(&key, index, &self.resolver().known()) {
            tracing::debug!("{} already known, verified stress not harvested", key);
            return Ok(false);
        }

        let mut touched = 0;
        for w in transcript.words.iter_mut() {
            if w.stress.provenance == Provenance::Placeholder && w.main_key() == key {
                let combined = index + w.proclitic_syllables;
                w.stress = StressAssignment::new(Some(combined), Provenance::Harvested);
                w.dictionary_stress = Some(combined);
                self.rebuild(w);
                touched += 1;
            }
        }
        if touched > 0 {
            transcript.resandhi(self.config.base.sandhi_enabled);
        }
        tracing::info!("harvested {} -> {} ({} word(s) updated)", key, index, touched);
        Ok(true)
    }

    /// Get cache statistics (hits, misses, hit rate)
    pub fn cache_stats(&self) -> (usize, usize, f64) {
        let (hits, misses) = self.inner.cache_stats();
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };
        (hits, misses, hit_rate)
    }

    pub fn cache_size(&self) -> usize {
        self.inner.cache_size()
    }

    pub fn clear_cache(&self) {
        self.inner.clear_cache();
    }
}

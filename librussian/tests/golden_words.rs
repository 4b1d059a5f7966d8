// librussian/tests/golden_words.rs
//
// Reference transcriptions and pipeline-wide properties.
//
// Comparisons ignore syllable-boundary spaces: the open-syllable split puts
// cluster consonants in the following syllable ("тру|бка" -> "tru pkɑ").

use librussian::alphabet::{is_sonorant, is_vowel};
use librussian::syllable::count_vowels;
use librussian::voicing::analyze_voicing;
use librussian::{
    normalize, position, process_word, syllabify, Position, StyleConfig, TranscriptionRequest,
};

fn compact(word: &str, stress: usize) -> String {
    process_word(&TranscriptionRequest::new(word, Some(stress))).ipa_compact()
}

#[test]
fn reference_words() {
    let cases = [
        ("вода", 1, "vɑdɑ"),
        ("молоко", 2, "mʌɫɑko"),
        ("трубка", 0, "trupkɑ"),
        ("вокзал", 1, "vɑɡzɑɫ"),
        ("что", 0, "ʃto"),
        ("конечно", 1, "kɑɲɛʃnʌ"),
        ("сердце", 0, "sʲɛrtsɨ"),
        ("солнце", 0, "sontsɨ"),
        ("вся", 0, "fsʲɑ"),
    ];
    for (word, stress, expected) in cases {
        assert_eq!(compact(word, stress), expected, "{} stressed on {}", word, stress);
    }
}

#[test]
fn shto_is_lexical() {
    let ipa = compact("нечто", 0);
    assert!(!ipa.contains("ʃt"), "нечто must keep its affricate: {}", ipa);
    assert!(ipa.contains("tʃʲ"), "нечто: {}", ipa);
}

#[test]
fn uppercase_and_lookalikes_transcribe_alike() {
    assert_eq!(compact("ВОДА", 1), compact("вода", 1));
    // Latin o and a in an otherwise Cyrillic word
    assert_eq!(compact("вoдa", 1), compact("вода", 1));
    // pre-1918 spelling
    assert_eq!(normalize("вѣра"), "вера");
}

const SAMPLE: &[&str] = &[
    "вода",
    "молоко",
    "здравствуйте",
    "объявление",
    "счастье",
    "мягкий",
    "красивая",
    "учиться",
    "солнце",
    "взгляд",
    "йод",
    "съесть",
    "подъезд",
    "пр",
];

#[test]
fn syllable_count_matches_vowels() {
    for word in SAMPLE {
        let n = syllabify(word).len();
        assert_eq!(n, count_vowels(word).max(1), "{}", word);
        assert_eq!(syllabify(word).concat(), *word);
    }
}

#[test]
fn transcription_is_deterministic() {
    for word in SAMPLE {
        for stress in [None, Some(0)] {
            let req = TranscriptionRequest::new(word, stress).with_style(StyleConfig::default());
            assert_eq!(process_word(&req), process_word(&req), "{}", word);
        }
    }
}

#[test]
fn one_transcribed_syllable_per_syllable() {
    for word in SAMPLE {
        let w = process_word(&TranscriptionRequest::new(word, Some(0)));
        assert_eq!(w.syllable_count(), syllabify(word).len(), "{}", word);
        assert_eq!(w.syllables.iter().filter(|s| s.is_stressed).count(), 1, "{}", word);
    }
}

#[test]
fn positions_are_exclusive() {
    for stress in 0..5 {
        for i in 0..6 {
            let p = position(i, Some(stress));
            assert_eq!(p == Position::Stressed, i == stress);
            assert_ne!(p, Position::Unstressed);
        }
    }
    assert_eq!(position(3, None), Position::Unstressed);
}

#[test]
fn voicing_map_skips_sonorants_and_vowels() {
    for word in SAMPLE {
        let chars: Vec<char> = word.chars().collect();
        for idx in analyze_voicing(&chars).keys() {
            let c = chars[*idx];
            assert!(!is_sonorant(c) && !is_vowel(c), "{}: directive on {}", word, c);
        }
    }
}

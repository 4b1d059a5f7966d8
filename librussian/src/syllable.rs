// librussian/src/syllable.rs
//
// Open-syllable segmentation for sung Russian.
//
// Every vowel is a nucleus. The consonant run between two vowels goes entirely
// to the following syllable, й closes the preceding vowel, signs stay with the
// consonant before them, and whatever follows the last vowel joins the final
// syllable.

use crate::alphabet::{is_sign, is_vowel};

pub use crate::alphabet::count_vowels;

/// Split a normalized word into syllables.
///
/// A word without vowels comes back as a single pseudo-syllable.
pub fn syllabify(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        current.push(c);
        if !is_vowel(c) {
            i += 1;
            continue;
        }

        if chars.get(i + 1) == Some(&'й') {
            current.push('й');
            i += 1;
        }

        let rest = &chars[i + 1..];
        if !rest.iter().any(|c| is_vowel(*c)) {
            current.extend(rest.iter());
            out.push(std::mem::take(&mut current));
            break;
        }
        out.push(std::mem::take(&mut current));
        i += 1;
    }

    if !current.is_empty() && !current.chars().all(is_sign) {
        out.push(current);
    }
    if out.is_empty() {
        out.push(word.to_string());
    }
    out
}

/// Character offset of each syllable within the word.
pub fn syllable_offsets(syllables: &[String]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(syllables.len());
    let mut pos = 0;
    for s in syllables {
        offsets.push(pos);
        pos += s.chars().count();
    }
    offsets
}

/// Index of the syllable holding character `char_index`, if any.
pub fn syllable_containing(word: &str, char_index: usize) -> Option<usize> {
    let syllables = syllabify(word);
    let mut pos = 0;
    for (i, s) in syllables.iter().enumerate() {
        let len = s.chars().count();
        if char_index < pos + len {
            return Some(i);
        }
        pos += len;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(w: &str) -> Vec<String> {
        syllabify(w)
    }

    #[test]
    fn consonants_go_to_the_following_vowel() {
        assert_eq!(split("молоко"), ["мо", "ло", "ко"]);
        assert_eq!(split("трубка"), ["тру", "бка"]);
        assert_eq!(split("весна"), ["ве", "сна"]);
        assert_eq!(split("сердце"), ["се", "рдце"]);
    }

    #[test]
    fn yot_closes_the_vowel() {
        assert_eq!(split("чайник"), ["чай", "ник"]);
        assert_eq!(split("мой"), ["мой"]);
        assert_eq!(split("отбой"), ["о", "тбой"]);
    }

    #[test]
    fn signs_stay_with_their_consonant() {
        assert_eq!(split("объявление"), ["о", "бъя", "вле", "ни", "е"]);
        assert_eq!(split("любовь"), ["лю", "бовь"]);
        assert_eq!(split("счастье"), ["сча", "стье"]);
    }

    #[test]
    fn vowelless_word_is_one_pseudo_syllable() {
        assert_eq!(split("в"), ["в"]);
        assert_eq!(split("ь"), ["ь"]);
        assert_eq!(split(""), [""]);
    }

    #[test]
    fn syllable_count_matches_vowel_count() {
        for w in ["здравствуйте", "объявление", "пространство", "её", "ая", "конечно"] {
            assert_eq!(split(w).len(), count_vowels(w), "{}", w);
            assert_eq!(split(w).concat(), w);
        }
    }

    #[test]
    fn offsets_and_lookup() {
        let s = split("молоко");
        assert_eq!(syllable_offsets(&s), vec![0, 2, 4]);
        assert_eq!(syllable_containing("молоко", 3), Some(1));
        assert_eq!(syllable_containing("молоко", 6), None);
        assert_eq!(syllable_containing("ёлка", 0), Some(0));
    }
}

// librussian/src/alphabet.rs
//
// Grapheme classes and the natural classes the phonological rules refer to.
// Everything here works on normalized (lowercase, folded) characters.

/// Coarse class of a normalized character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphemeClass {
    Vowel,
    /// Obstruent consonant (anything that takes part in voicing).
    Consonant,
    /// л м н р й
    Sonorant,
    /// ь ъ
    Sign,
    /// Punctuation, digits, non-Cyrillic.
    Other,
}

pub const VOWELS: &[char] = &['а', 'е', 'ё', 'и', 'о', 'у', 'ы', 'э', 'ю', 'я'];
pub const SONORANTS: &[char] = &['л', 'м', 'н', 'р', 'й'];
pub const OBSTRUENTS: &[char] = &[
    'б', 'в', 'г', 'д', 'ж', 'з', 'к', 'п', 'с', 'т', 'ф', 'х', 'ц', 'ч', 'ш', 'щ',
];
pub const SIGNS: &[char] = &['ь', 'ъ'];

pub const DENTALS: &[char] = &['т', 'д', 'с', 'з', 'н', 'ц'];
pub const VELARS: &[char] = &['к', 'г', 'х'];
pub const LABIALS: &[char] = &['б', 'п', 'в', 'ф', 'м'];
pub const ALWAYS_HARD: &[char] = &['ж', 'ш', 'ц'];
pub const INHERENTLY_PALATAL: &[char] = &['ч', 'щ', 'й'];
pub const PALATALIZING_VOWELS: &[char] = &['е', 'ё', 'и', 'ю', 'я'];

pub const VOICED: &[char] = &['б', 'в', 'г', 'д', 'ж', 'з'];
pub const VOICELESS: &[char] = &['п', 'ф', 'к', 'т', 'ш', 'с', 'х', 'ц', 'ч', 'щ'];

pub fn class_of(c: char) -> GraphemeClass {
    if VOWELS.contains(&c) {
        GraphemeClass::Vowel
    } else if SONORANTS.contains(&c) {
        GraphemeClass::Sonorant
    } else if OBSTRUENTS.contains(&c) {
        GraphemeClass::Consonant
    } else if SIGNS.contains(&c) {
        GraphemeClass::Sign
    } else {
        GraphemeClass::Other
    }
}

pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Any consonant letter, sonorants included.
pub fn is_consonant(c: char) -> bool {
    matches!(class_of(c), GraphemeClass::Consonant | GraphemeClass::Sonorant)
}

pub fn is_sonorant(c: char) -> bool {
    SONORANTS.contains(&c)
}

pub fn is_sign(c: char) -> bool {
    SIGNS.contains(&c)
}

pub fn is_dental(c: char) -> bool {
    DENTALS.contains(&c)
}

pub fn is_velar(c: char) -> bool {
    VELARS.contains(&c)
}

pub fn is_labial(c: char) -> bool {
    LABIALS.contains(&c)
}

pub fn is_always_hard(c: char) -> bool {
    ALWAYS_HARD.contains(&c)
}

pub fn is_inherently_palatal(c: char) -> bool {
    INHERENTLY_PALATAL.contains(&c)
}

pub fn is_palatalizing_vowel(c: char) -> bool {
    PALATALIZING_VOWELS.contains(&c)
}

pub fn is_voiced(c: char) -> bool {
    VOICED.contains(&c)
}

pub fn is_voiceless(c: char) -> bool {
    VOICELESS.contains(&c)
}

pub fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}')
}

/// True when consonant `cons`, followed by `next`, is soft on the vowel side.
///
/// Used for the left edge of the interpalatal test: ч щ й are always soft,
/// ж ш ц never are, anything else is soft before ь or a palatalizing vowel.
pub fn softened_before(cons: char, next: Option<char>) -> bool {
    if is_inherently_palatal(cons) {
        return true;
    }
    if is_always_hard(cons) {
        return false;
    }
    matches!(next, Some(n) if n == 'ь' || is_palatalizing_vowel(n))
}

/// Right edge of the interpalatal test.
///
/// `next` is the segment after the vowel, `after` the one after that.
pub fn palatalizing_agent(next: Option<char>, after: Option<char>) -> bool {
    let Some(n) = next else {
        return false;
    };
    if n == 'й' || is_palatalizing_vowel(n) || n == 'ч' || n == 'щ' {
        return true;
    }
    if is_always_hard(n) {
        return false;
    }
    is_consonant(n) && matches!(after, Some(a) if a == 'ь' || is_palatalizing_vowel(a))
}

pub fn count_vowels(word: &str) -> usize {
    word.chars().filter(|c| is_vowel(*c)).count()
}

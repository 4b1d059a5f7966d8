// librussian/src/normalize.rs
//
// Letter folding: Latin/Greek look-alikes and pre-1918 letters map to modern
// Cyrillic, then everything is lowercased. Punctuation is left alone; key
// construction strips it separately (`libdiction_core::utils::lookup_key`).

use libdiction_core::utils;
use phf::phf_map;

static FOLD: phf::Map<char, char> = phf_map! {
    // Latin look-alikes
    'A' => 'А', 'a' => 'а', 'B' => 'В', 'C' => 'С', 'E' => 'Е', 'e' => 'е',
    'H' => 'Н', 'K' => 'К', 'M' => 'М', 'O' => 'О', 'o' => 'о', 'P' => 'Р',
    'p' => 'р', 'T' => 'Т', 'X' => 'Х', 'x' => 'х', 'Y' => 'У', 'y' => 'у',
    // Greek look-alikes
    'α' => 'а', 'β' => 'в', 'γ' => 'г', 'ε' => 'е', 'η' => 'н', 'ι' => 'и',
    'κ' => 'к', 'μ' => 'м', 'ν' => 'н', 'ο' => 'о', 'ρ' => 'р', 'τ' => 'т',
    'υ' => 'у', 'χ' => 'х', 'ω' => 'о',
    // Pre-1918 orthography
    'ѣ' => 'е', 'Ѣ' => 'Е', 'і' => 'и', 'І' => 'И', 'ѵ' => 'и', 'Ѵ' => 'И',
    'ѳ' => 'ф', 'Ѳ' => 'Ф',
};

/// Fold a single character without case folding.
pub fn fold_char(c: char) -> char {
    FOLD.get(&c).copied().unwrap_or(c)
}

/// NFC-compose, fold look-alikes, lowercase.
///
/// Folding runs again after lowercasing so that uppercase Greek lands on
/// the lowercase table.
///
/// Total and idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    utils::nfc(text)
        .chars()
        .flat_map(|c| fold_char(c).to_lowercase())
        .map(fold_char)
        .collect()
}

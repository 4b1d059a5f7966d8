// librussian/src/validate.rs
//
// House-notation check for canonical (unstyled) IPA.

use serde::Serialize;

/// Glyph -> the glyph the notation uses instead.
const FORBIDDEN: &[(&str, &str)] = &[
    ("g", "ɡ"),
    ("ə", "ʌ"),
    ("ɐ", "ɑ"),
    ("nʲ", "ɲ"),
    ("ɔ", "o"),
    ("ʊ", "u"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForbiddenGlyph {
    pub glyph: &'static str,
    pub replacement: &'static str,
    /// Byte offset of the occurrence.
    pub offset: usize,
}

/// Every forbidden glyph in `ipa`, in order of appearance.
pub fn validate_ipa(ipa: &str) -> Vec<ForbiddenGlyph> {
    let mut found: Vec<ForbiddenGlyph> = FORBIDDEN
        .iter()
        .flat_map(|&(glyph, replacement)| {
            ipa.match_indices(glyph).map(move |(offset, _)| ForbiddenGlyph {
                glyph,
                replacement,
                offset,
            })
        })
        .collect();
    found.sort_by_key(|f| f.offset);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcriber::{process_word, TranscriptionRequest};

    #[test]
    fn reports_each_occurrence() {
        let found = validate_ipa("nʲəgɔ");
        let glyphs: Vec<_> = found.iter().map(|f| (f.glyph, f.replacement)).collect();
        assert_eq!(glyphs, vec![("nʲ", "ɲ"), ("ə", "ʌ"), ("g", "ɡ"), ("ɔ", "o")]);
    }

    #[test]
    fn pipeline_output_is_clean() {
        for (w, s) in [
            ("молоко", 2),
            ("вокзал", 1),
            ("день", 0),
            ("книга", 0),
            ("счастье", 0),
            ("мягкий", 0),
            ("здравствуйте", 1),
        ] {
            let ipa = process_word(&TranscriptionRequest::new(w, Some(s))).ipa();
            assert!(validate_ipa(&ipa).is_empty(), "{} -> {}", w, ipa);
        }
    }
}

// librussian/src/data.rs
//
// Static lexical tables: stress corrections, printed-е-for-ё words, pure
// exceptions with their families, and the clitic inventories.

use libdiction_core::StressLookup;
use phf::phf_map;
use serde::Serialize;

/// A word commonly printed with е where ё is pronounced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YoException {
    pub actual_form: &'static str,
    pub stress: usize,
    pub note: &'static str,
    /// Both readings exist (все / всё); the table picks the lyric default.
    pub ambiguous: bool,
}

/// A word whose complete transcription is stored rather than derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PureException {
    /// Syllables separated by '.'.
    pub ipa: &'static str,
    pub stress: usize,
    pub note: &'static str,
}

/// Stress of a word belonging to a pure-exception family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExceptionFamily {
    pub stress: usize,
    /// Head word of the family (a key of `PURE_EXCEPTIONS`).
    pub family: &'static str,
    pub note: &'static str,
}

/// Manual overrides; highest lookup priority.
pub static STRESS_CORRECTIONS: phf::Map<&'static str, usize> = phf_map! {
    "душа" => 1,
    "вода" => 1,
    "земля" => 1,
    "весна" => 1,
    "зима" => 1,
    "жена" => 1,
    "сестра" => 1,
    "стена" => 1,
    "война" => 1,
    "волна" => 1,
    "гора" => 1,
    "доска" => 1,
    "игра" => 1,
    "нога" => 1,
    "рука" => 1,
    "спина" => 1,
    "страна" => 1,
    "пространство" => 1,
    "группа" => 0,
    "трава" => 1,
    "труба" => 1,
    "щека" => 1,
    "молоко" => 2,
    "потому" => 2,
    "почему" => 2,
    "всегда" => 1,
    "тогда" => 1,
    "сюда" => 1,
    "туда" => 1,
    "куда" => 1,
    "никуда" => 2,
    "откуда" => 1,
    "молодой" => 2,
    "золотой" => 2,
    "голубой" => 2,
    "дорогой" => 2,
    "объявление" => 2,
    "любовь" => 1,
    "люблю" => 1,
    "хочу" => 1,
    "могу" => 1,
    "пойду" => 1,
    "приду" => 1,
};

pub static YO_EXCEPTIONS: phf::Map<&'static str, YoException> = phf_map! {
    "ее" => YoException { actual_form: "её", stress: 1, note: "her (acc./gen. of она)", ambiguous: false },
    "нем" => YoException { actual_form: "нём", stress: 0, note: "him/it (prep. of он/оно)", ambiguous: false },
    "мое" => YoException { actual_form: "моё", stress: 1, note: "my (neut. nom./acc.)", ambiguous: false },
    "моем" => YoException { actual_form: "моём", stress: 1, note: "my (masc./neut. prep.)", ambiguous: false },
    "твое" => YoException { actual_form: "твоё", stress: 1, note: "your (neut. nom./acc.)", ambiguous: false },
    "твоем" => YoException { actual_form: "твоём", stress: 1, note: "your (masc./neut. prep.)", ambiguous: false },
    "свое" => YoException { actual_form: "своё", stress: 1, note: "one's own (neut. nom./acc.)", ambiguous: false },
    "своем" => YoException { actual_form: "своём", stress: 1, note: "one's own (masc./neut. prep.)", ambiguous: false },
    "чье" => YoException { actual_form: "чьё", stress: 0, note: "whose? (neut. nom./acc.)", ambiguous: false },
    "чьем" => YoException { actual_form: "чьём", stress: 0, note: "whose? (masc./neut. prep.)", ambiguous: false },
    "все" => YoException { actual_form: "всё", stress: 0, note: "everything (neut.); or все (everyone) if people", ambiguous: true },
    "всем" => YoException { actual_form: "всём", stress: 0, note: "everything (prep.); or всем (instr./dat.) if people", ambiguous: true },
    "идешь" => YoException { actual_form: "идёшь", stress: 1, note: "you walk (идти)", ambiguous: false },
    "идет" => YoException { actual_form: "идёт", stress: 1, note: "walks (идти)", ambiguous: false },
    "идем" => YoException { actual_form: "идём", stress: 1, note: "we walk (идти)", ambiguous: false },
    "идете" => YoException { actual_form: "идёте", stress: 1, note: "you (pl.) walk (идти)", ambiguous: false },
    "несешь" => YoException { actual_form: "несёшь", stress: 1, note: "you carry (нести)", ambiguous: false },
    "несет" => YoException { actual_form: "несёт", stress: 1, note: "carries (нести)", ambiguous: false },
    "несем" => YoException { actual_form: "несём", stress: 1, note: "we carry (нести)", ambiguous: false },
    "несете" => YoException { actual_form: "несёте", stress: 1, note: "you (pl.) carry (нести)", ambiguous: false },
    "встаешь" => YoException { actual_form: "встаёшь", stress: 1, note: "you stand up (вставать)", ambiguous: false },
    "встает" => YoException { actual_form: "встаёт", stress: 1, note: "stands up (вставать)", ambiguous: false },
    "встаем" => YoException { actual_form: "встаём", stress: 1, note: "we stand up (вставать)", ambiguous: false },
    "встаете" => YoException { actual_form: "встаёте", stress: 1, note: "you (pl.) stand up (вставать)", ambiguous: false },
    "бережешь" => YoException { actual_form: "бережёшь", stress: 2, note: "you save (беречь)", ambiguous: false },
    "бережет" => YoException { actual_form: "бережёт", stress: 2, note: "saves (беречь)", ambiguous: false },
    "бережем" => YoException { actual_form: "бережём", stress: 2, note: "we save (беречь)", ambiguous: false },
    "бережете" => YoException { actual_form: "бережёте", stress: 2, note: "you (pl.) save (беречь)", ambiguous: false },
    "теленок" => YoException { actual_form: "телёнок", stress: 1, note: "calf (-ёнок suffix)", ambiguous: false },
    "ребенок" => YoException { actual_form: "ребёнок", stress: 1, note: "child (-ёнок suffix)", ambiguous: false },
    "жеребенок" => YoException { actual_form: "жеребёнок", stress: 2, note: "foal (-ёнок suffix)", ambiguous: false },
    "поросенок" => YoException { actual_form: "поросёнок", stress: 2, note: "piglet (-ёнок suffix)", ambiguous: false },
    "цыпленок" => YoException { actual_form: "цыплёнок", stress: 1, note: "chick (-ёнок suffix)", ambiguous: false },
    "котенок" => YoException { actual_form: "котёнок", stress: 1, note: "kitten (-ёнок suffix)", ambiguous: false },
    "щенок" => YoException { actual_form: "щенок", stress: 1, note: "puppy (stress only, no ё)", ambiguous: false },
    "актер" => YoException { actual_form: "актёр", stress: 1, note: "actor (-ёр suffix)", ambiguous: false },
    "дирижер" => YoException { actual_form: "дирижёр", stress: 2, note: "conductor (-ёр suffix)", ambiguous: false },
    "боксер" => YoException { actual_form: "боксёр", stress: 1, note: "boxer (-ёр suffix)", ambiguous: false },
    "гримёр" => YoException { actual_form: "гримёр", stress: 1, note: "makeup artist (-ёр suffix)", ambiguous: false },
    "суфлер" => YoException { actual_form: "суфлёр", stress: 1, note: "prompter (-ёр suffix)", ambiguous: false },
    "режиссер" => YoException { actual_form: "режиссёр", stress: 2, note: "director (-ёр suffix)", ambiguous: false },
    "стажер" => YoException { actual_form: "стажёр", stress: 1, note: "trainee (-ёр suffix)", ambiguous: false },
    "еще" => YoException { actual_form: "ещё", stress: 1, note: "still, yet, more", ambiguous: false },
    "елка" => YoException { actual_form: "ёлка", stress: 0, note: "fir tree", ambiguous: false },
    "елки" => YoException { actual_form: "ёлки", stress: 0, note: "fir trees", ambiguous: false },
    "елку" => YoException { actual_form: "ёлку", stress: 0, note: "fir tree (acc.)", ambiguous: false },
    "елкой" => YoException { actual_form: "ёлкой", stress: 0, note: "fir tree (instr.)", ambiguous: false },
    "елке" => YoException { actual_form: "ёлке", stress: 0, note: "fir tree (prep./dat.)", ambiguous: false },
    "черт" => YoException { actual_form: "чёрт", stress: 0, note: "devil", ambiguous: false },
    "черта" => YoException { actual_form: "чёрта", stress: 0, note: "devil (gen.)", ambiguous: false },
    "желтый" => YoException { actual_form: "жёлтый", stress: 0, note: "yellow", ambiguous: false },
    "желтая" => YoException { actual_form: "жёлтая", stress: 0, note: "yellow (fem.)", ambiguous: false },
    "желтое" => YoException { actual_form: "жёлтое", stress: 0, note: "yellow (neut.)", ambiguous: false },
    "черный" => YoException { actual_form: "чёрный", stress: 0, note: "black", ambiguous: false },
    "черная" => YoException { actual_form: "чёрная", stress: 0, note: "black (fem.)", ambiguous: false },
    "черное" => YoException { actual_form: "чёрное", stress: 0, note: "black (neut.)", ambiguous: false },
    "пчелы" => YoException { actual_form: "пчёлы", stress: 0, note: "bees", ambiguous: false },
    "пчел" => YoException { actual_form: "пчёл", stress: 0, note: "bees (gen.)", ambiguous: false },
    "лед" => YoException { actual_form: "лёд", stress: 0, note: "ice", ambiguous: false },
    "льда" => YoException { actual_form: "льда", stress: 1, note: "ice (gen.); no ё", ambiguous: false },
    "мед" => YoException { actual_form: "мёд", stress: 0, note: "honey", ambiguous: false },
    "меда" => YoException { actual_form: "мёда", stress: 0, note: "honey (gen.)", ambiguous: false },
    "береза" => YoException { actual_form: "берёза", stress: 1, note: "birch tree", ambiguous: false },
    "березы" => YoException { actual_form: "берёзы", stress: 1, note: "birch trees", ambiguous: false },
    "озера" => YoException { actual_form: "озёра", stress: 1, note: "lakes", ambiguous: false },
    "слезы" => YoException { actual_form: "слёзы", stress: 0, note: "tears", ambiguous: false },
    "звезды" => YoException { actual_form: "звёзды", stress: 0, note: "stars", ambiguous: false },
    "уединенный" => YoException { actual_form: "уединённый", stress: 3, note: "solitary, secluded (adj./participle)", ambiguous: false },
    "уединенная" => YoException { actual_form: "уединённая", stress: 3, note: "solitary (fem.)", ambiguous: false },
    "уединенное" => YoException { actual_form: "уединённое", stress: 3, note: "solitary (neut.)", ambiguous: false },
    "уединенные" => YoException { actual_form: "уединённые", stress: 3, note: "solitary (pl.)", ambiguous: false },
    "уединенного" => YoException { actual_form: "уединённого", stress: 3, note: "solitary (gen. m./n.)", ambiguous: false },
    "уединенной" => YoException { actual_form: "уединённой", stress: 3, note: "solitary (gen./dat./instr./prep. f.)", ambiguous: false },
    "уединенному" => YoException { actual_form: "уединённому", stress: 3, note: "solitary (dat. m./n.)", ambiguous: false },
    "уединенным" => YoException { actual_form: "уединённым", stress: 3, note: "solitary (instr. m./n. or dat. pl.)", ambiguous: false },
    "уединенных" => YoException { actual_form: "уединённых", stress: 3, note: "solitary (gen./prep. pl.)", ambiguous: false },
    "уединенными" => YoException { actual_form: "уединёнными", stress: 3, note: "solitary (instr. pl.)", ambiguous: false },
};

pub static PURE_EXCEPTIONS: phf::Map<&'static str, PureException> = phf_map! {
    "счастье" => PureException { ipa: "ʃʲʃʲɑ.sʲtʲjɪ", stress: 0, note: "vowel stays ɑ despite the interpalatal position" },
    "церковь" => PureException { ipa: "tsɛrʲ.kʌfʲ", stress: 0, note: "р palatalized without a palatalizing agent" },
    "ангел" => PureException { ipa: "ɑn.ɡʲɪɫ", stress: 0, note: "н stays hard before soft г" },
    "ага" => PureException { ipa: "ɑ.hɑ", stress: 1, note: "г read as h" },
    "сейчас" => PureException { ipa: "si.tʃʲɑs", stress: 1, note: "initial с stays hard" },
    "танцевать" => PureException { ipa: "tʌn.tsɑ.vɑtʲ", stress: 2, note: "unstressed це read tsɑ" },
};

pub static EXCEPTION_FAMILIES: phf::Map<&'static str, ExceptionFamily> = phf_map! {
    "счастье" => ExceptionFamily { stress: 0, family: "счастье", note: "happiness; vowel stays /ɑ/ not [a] (Old Muscovite)" },
    "счастья" => ExceptionFamily { stress: 0, family: "счастье", note: "счастье gen.; vowel stays /ɑ/" },
    "счастью" => ExceptionFamily { stress: 0, family: "счастье", note: "счастье dat.; vowel stays /ɑ/" },
    "счастьем" => ExceptionFamily { stress: 0, family: "счастье", note: "счастье instr.; vowel stays /ɑ/" },
    "счастлив" => ExceptionFamily { stress: 0, family: "счастье", note: "happy (m.); vowel stays /ɑ/" },
    "счастлива" => ExceptionFamily { stress: 1, family: "счастье", note: "happy (f.); vowel stays /ɑ/" },
    "счастливый" => ExceptionFamily { stress: 1, family: "счастье", note: "happy (adj.); vowel stays /ɑ/" },
    "церковь" => ExceptionFamily { stress: 0, family: "церковь", note: "church; р palatalized (Old Muscovite)" },
    "церкви" => ExceptionFamily { stress: 0, family: "церковь", note: "церковь gen./dat./prep.; р palatalized" },
    "церквей" => ExceptionFamily { stress: 1, family: "церковь", note: "церковь gen.pl.; р palatalized" },
    "церковный" => ExceptionFamily { stress: 0, family: "церковь", note: "church (adj.); р palatalized" },
    "ангел" => ExceptionFamily { stress: 0, family: "ангел", note: "angel; н stays hard before soft г (borrowed word)" },
    "ангела" => ExceptionFamily { stress: 0, family: "ангел", note: "angel gen.; н stays hard" },
    "ангелы" => ExceptionFamily { stress: 0, family: "ангел", note: "angels; н stays hard" },
    "ангелов" => ExceptionFamily { stress: 0, family: "ангел", note: "angels gen.; н stays hard" },
    "ангельский" => ExceptionFamily { stress: 0, family: "ангел", note: "angelic; н stays hard" },
    "ага" => ExceptionFamily { stress: 1, family: "ага", note: "aha!; г is /h/ (aspirate), not /x/" },
    "сейчас" => ExceptionFamily { stress: 1, family: "сейчас", note: "now; initial с stays HARD (Old Muscovite)" },
    "танцевать" => ExceptionFamily { stress: 2, family: "танцевать", note: "to dance; unstressed -це- is /tsɑ/ not /tsɨ/" },
    "танцую" => ExceptionFamily { stress: 1, family: "танцевать", note: "I dance; unstressed -це- is /tsɑ/" },
    "танцуешь" => ExceptionFamily { stress: 1, family: "танцевать", note: "you dance; unstressed -це- is /tsɑ/" },
    "танцует" => ExceptionFamily { stress: 1, family: "танцевать", note: "dances; unstressed -це- is /tsɑ/" },
    "танцуем" => ExceptionFamily { stress: 1, family: "танцевать", note: "we dance; unstressed -це- is /tsɑ/" },
    "танцевал" => ExceptionFamily { stress: 2, family: "танцевать", note: "danced (m.); unstressed -це- is /tsɑ/" },
    "танцевала" => ExceptionFamily { stress: 2, family: "танцевать", note: "danced (f.); unstressed -це- is /tsɑ/" },
    "танец" => ExceptionFamily { stress: 0, family: "танцевать", note: "dance (noun); unstressed -це- is /tsɑ/" },
    "танца" => ExceptionFamily { stress: 0, family: "танцевать", note: "dance gen.; unstressed -це- is /tsɑ/" },
    "танцы" => ExceptionFamily { stress: 0, family: "танцевать", note: "dances; unstressed -це- is /tsɑ/" },
    "танцор" => ExceptionFamily { stress: 1, family: "танцевать", note: "dancer; unstressed -це- is /tsɑ/" },
};

/// Attach to the following word.
pub const PROCLITICS: &[&str] = &["в", "к", "с", "б"];

/// Attach to the preceding word.
pub const ENCLITICS: &[&str] = &["ли", "ль", "же", "ж", "бы", "б"];

/// Function words that stay unstressed when they stand alone.
pub const STANDALONE_CLITICS: &[&str] = &[
    "в", "к", "с", "б", "во", "ко", "со", "о", "об", "у", "за", "на", "по", "до", "из", "от",
    "при", "про", "и", "а", "но", "да", "ль", "ли", "же", "ж", "бы", "б", "не", "ни",
];

pub fn correction(key: &str) -> Option<usize> {
    STRESS_CORRECTIONS.get(key).copied()
}

pub fn yo_exception(key: &str) -> Option<&'static YoException> {
    YO_EXCEPTIONS.get(key)
}

pub fn pure_exception(word: &str) -> Option<&'static PureException> {
    PURE_EXCEPTIONS.get(word)
}

/// Stress recorded for a pure exception or a member of its family.
pub fn exception_stress(key: &str) -> Option<usize> {
    PURE_EXCEPTIONS
        .get(key)
        .map(|e| e.stress)
        .or_else(|| EXCEPTION_FAMILIES.get(key).map(|f| f.stress))
}

pub fn is_proclitic(word: &str) -> bool {
    PROCLITICS.contains(&word)
}

pub fn is_enclitic(word: &str) -> bool {
    ENCLITICS.contains(&word)
}

pub fn is_standalone_clitic(word: &str) -> bool {
    STANDALONE_CLITICS.contains(&word)
}

/// The correction table seen through the lookup seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct Corrections;

impl StressLookup for Corrections {
    fn stress_of(&self, key: &str) -> Option<usize> {
        correction(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syllable::{count_vowels, syllabify};

    #[test]
    fn yo_exception_stress_sits_on_yo() {
        for (word, exc) in YO_EXCEPTIONS.entries() {
            if let Some(pos) = exc.actual_form.chars().position(|c| c == 'ё') {
                let syl = crate::syllable::syllable_containing(exc.actual_form, pos);
                assert_eq!(syl, Some(exc.stress), "{} -> {}", word, exc.actual_form);
            }
        }
    }

    #[test]
    fn corrections_are_in_range() {
        for (word, stress) in STRESS_CORRECTIONS.entries() {
            assert!(*stress < count_vowels(word), "{} stress {}", word, stress);
        }
    }

    #[test]
    fn pure_exceptions_split_like_the_word() {
        for (word, exc) in PURE_EXCEPTIONS.entries() {
            assert_eq!(exc.ipa.split('.').count(), syllabify(word).len(), "{}", word);
            assert_eq!(exception_stress(word), Some(exc.stress));
        }
    }

    #[test]
    fn lookups() {
        assert_eq!(correction("молоко"), Some(2));
        assert_eq!(yo_exception("еще").map(|e| e.actual_form), Some("ещё"));
        assert!(yo_exception("все").unwrap().ambiguous);
        assert_eq!(exception_stress("танцевала"), Some(2));
        assert!(is_proclitic("в") && is_enclitic("же") && is_standalone_clitic("при"));
        assert!(!is_standalone_clitic("вода"));
        assert_eq!(Corrections.stress_of("душа"), Some(1));
    }
}

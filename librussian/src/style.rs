// librussian/src/style.rs
//
// Notation styles. Everything except `regressive` and `velar_ending` is a
// literal rewrite of finished IPA; those two feed back into the per-word
// pipeline and are therefore part of every transcription request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palatalization::RegressiveMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VowelReduction {
    #[default]
    Ikanye,
    /// Reduced е/я read as ɛ.
    Ekanye,
    /// No reduction display: ɪ→ɛ, ʌ→ɑ.
    None,
}

/// How щ is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShchaNotation {
    /// ʃʲʃʲ
    #[default]
    DoubledFricative,
    /// ʃʲtʃʲ
    FricativeAffricate,
    /// ʃʲː
    LengthMark,
}

impl ShchaNotation {
    pub fn glyphs(self) -> &'static str {
        match self {
            ShchaNotation::DoubledFricative => "ʃʲʃʲ",
            ShchaNotation::FricativeAffricate => "ʃʲtʃʲ",
            ShchaNotation::LengthMark => "ʃʲː",
        }
    }
}

/// Palatal nasal glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PalatalN {
    /// ɲ
    #[default]
    Palatal,
    /// nʲ
    Superscript,
}

/// Reading of unstressed -кий/-гий/-хий.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VelarEnding {
    /// kʲij
    #[default]
    Modern,
    /// kɨj
    Stage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub vowel_reduction: VowelReduction,
    pub shcha: ShchaNotation,
    pub palatal_n: PalatalN,
    pub regressive: RegressiveMode,
    pub velar_ending: VelarEnding,
}

impl StyleConfig {
    /// Rewrite canonical IPA for display.
    pub fn apply(&self, ipa: &str) -> String {
        let mut out = match self.vowel_reduction {
            VowelReduction::Ikanye => ipa.to_string(),
            VowelReduction::Ekanye => ipa.replace('ɪ', "ɛ"),
            VowelReduction::None => ipa.replace('ɪ', "ɛ").replace('ʌ', "ɑ"),
        };
        if self.shcha != ShchaNotation::DoubledFricative {
            out = out.replace(ShchaNotation::DoubledFricative.glyphs(), self.shcha.glyphs());
        }
        if self.palatal_n == PalatalN::Superscript {
            out = out.replace('ɲ', "nʲ");
        }
        out
    }

    /// The fields the per-word pipeline reads; display toggles reset.
    pub fn phonological(self) -> StyleConfig {
        StyleConfig {
            regressive: self.regressive,
            velar_ending: self.velar_ending,
            ..StyleConfig::default()
        }
    }
}

/// Convert already styled text from one щ notation to another.
pub fn restyle_shcha(ipa: &str, from: ShchaNotation, to: ShchaNotation) -> String {
    if from == to {
        return ipa.to_string();
    }
    ipa.replace(from.glyphs(), to.glyphs())
}

/// Named style presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StylePreset {
    #[default]
    SungRussian,
    ModernStandard,
    Petersburg,
    Choir,
}

impl StylePreset {
    pub const ALL: [StylePreset; 4] = [
        StylePreset::SungRussian,
        StylePreset::ModernStandard,
        StylePreset::Petersburg,
        StylePreset::Choir,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StylePreset::SungRussian => "sung-russian",
            StylePreset::ModernStandard => "modern-standard",
            StylePreset::Petersburg => "petersburg",
            StylePreset::Choir => "choir",
        }
    }

    pub fn config(self) -> StyleConfig {
        let base = StyleConfig::default();
        match self {
            StylePreset::SungRussian => base,
            StylePreset::ModernStandard => StyleConfig {
                regressive: RegressiveMode::Partial,
                ..base
            },
            StylePreset::Petersburg => StyleConfig {
                vowel_reduction: VowelReduction::Ekanye,
                shcha: ShchaNotation::FricativeAffricate,
                regressive: RegressiveMode::Partial,
                ..base
            },
            StylePreset::Choir => StyleConfig {
                vowel_reduction: VowelReduction::None,
                regressive: RegressiveMode::Partial,
                ..base
            },
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StylePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StylePreset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| format!("unknown style preset: {}", s))
    }
}

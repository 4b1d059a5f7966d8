use serde::{Deserialize, Serialize};

use crate::style::{StyleConfig, StylePreset};

/// Russian-specific configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All generic options from `libdiction_core::Config` (flattened via serde)
/// - The named style preset, optionally overridden field by field
/// - Clitic merging and IPA validation toggles
///
/// # Example
///
/// ```rust
/// use librussian::RussianConfig;
///
/// let config = RussianConfig::from_toml_str("preset = \"choir\"").unwrap();
/// assert!(config.base().sandhi_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RussianConfig {
    /// Base configuration fields (cache, dictionary, harvest, sandhi)
    #[serde(flatten)]
    pub base: libdiction_core::Config,

    pub preset: StylePreset,

    /// Explicit style; replaces the preset when present
    pub style: Option<StyleConfig>,

    /// Attach proclitics/enclitics to their host words
    pub merge_clitics: bool,

    /// Log forbidden glyphs found in canonical output
    pub validate_ipa: bool,
}

impl Default for RussianConfig {
    fn default() -> Self {
        Self {
            base: libdiction_core::Config::default(),
            preset: StylePreset::default(),
            style: None,
            merge_clitics: true,
            validate_ipa: false,
        }
    }
}

impl RussianConfig {
    /// Style in effect: the explicit style, else the preset's.
    pub fn effective_style(&self) -> StyleConfig {
        self.style.unwrap_or_else(|| self.preset.config())
    }

    /// Convert this config into the base config for use with the core engine
    pub fn into_base(self) -> libdiction_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libdiction_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libdiction_core::Config {
        &mut self.base
    }

    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: RussianConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

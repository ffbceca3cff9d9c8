//! Engine configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! language_level = "legacy"   # or "modern"
//! legacy_coercion = true      # defaults to true for legacy, false for modern
//! implicit_promotion = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::kind::LanguageLevel;

/// Behavior switches for [`FloorDivEngine`](crate::engine::FloorDivEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Language level, selects display names and the coercion default
    #[serde(default)]
    pub language_level: LanguageLevel,

    /// Enable the legacy coercion fallback; `None` follows the language level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_coercion: Option<bool>,

    /// Let statically known mixed kinds (e.g. int and float) reach the
    /// promoting slots instead of failing outright
    #[serde(default = "default_implicit_promotion")]
    pub implicit_promotion: bool,
}

fn default_implicit_promotion() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            language_level: LanguageLevel::Legacy,
            legacy_coercion: None,
            implicit_promotion: true,
        }
    }
}

impl EngineConfig {
    /// Legacy level defaults
    pub fn legacy() -> Self {
        Self::default()
    }

    /// Modern level defaults
    pub fn modern() -> Self {
        EngineConfig {
            language_level: LanguageLevel::Modern,
            ..Self::default()
        }
    }

    /// Override the coercion fallback switch
    pub fn with_legacy_coercion(mut self, enabled: bool) -> Self {
        self.legacy_coercion = Some(enabled);
        self
    }

    /// Override implicit promotion for statically known mixed kinds
    pub fn with_implicit_promotion(mut self, enabled: bool) -> Self {
        self.implicit_promotion = enabled;
        self
    }

    /// Whether the legacy coercion fallback runs
    pub fn coercion_enabled(&self) -> bool {
        self.legacy_coercion
            .unwrap_or(self.language_level == LanguageLevel::Legacy)
    }

    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and parse a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.language_level, LanguageLevel::Legacy);
        assert!(config.coercion_enabled());
        assert!(config.implicit_promotion);

        let modern = EngineConfig::modern();
        assert!(!modern.coercion_enabled());
        assert!(modern.with_legacy_coercion(true).coercion_enabled());
    }

    #[test]
    fn test_parse_full() {
        let config = EngineConfig::from_toml_str(
            r#"
            language_level = "modern"
            legacy_coercion = true
            implicit_promotion = false
            "#,
        )
        .unwrap();
        assert_eq!(config.language_level, LanguageLevel::Modern);
        assert!(config.coercion_enabled());
        assert!(!config.implicit_promotion);
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let err = EngineConfig::from_toml_str("fast_math = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_unknown_level() {
        assert!(EngineConfig::from_toml_str(r#"language_level = "future""#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        fs::write(&path, "language_level = \"modern\"\n").unwrap();
        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.language_level, LanguageLevel::Modern);

        let missing = dir.path().join("missing.toml");
        let err = EngineConfig::load(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

//! Global settings loaded from TOML, following the same OnceLock pattern as romaji config.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::romaji::PunctuationStyle;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub input: InputSettings,
    pub dictionary: DictionarySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    pub punctuation: PunctuationStyle,
    pub kana_key: u16,
    pub start_in_kana: bool,
    pub candidate_strip: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionarySettings {
    pub system_file: String,
    pub user_file: String,
    pub commit_interval: usize,
    pub completion_limit: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }
    macro_rules! check_file_name {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_positive_usize!(dictionary.commit_interval);
    check_positive_usize!(dictionary.completion_limit);
    check_file_name!(dictionary.system_file);
    check_file_name!(dictionary.user_file);

    if s.dictionary.system_file == s.dictionary.user_file {
        return Err(SettingsError::InvalidValue {
            field: "dictionary.user_file".to_string(),
            reason: "must differ from dictionary.system_file".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.input.punctuation, PunctuationStyle::En);
        assert_eq!(s.input.kana_key, 93);
        assert!(s.input.start_in_kana);
        assert!(s.input.candidate_strip);
        assert_eq!(s.dictionary.system_file, "skk_dict_btree");
        assert_eq!(s.dictionary.user_file, "skk_userdict");
        assert_eq!(s.dictionary.commit_interval, 1000);
        assert_eq!(s.dictionary.completion_limit, 5);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[input]
punctuation = "jp"
kana_key = 104
start_in_kana = false
candidate_strip = false

[dictionary]
system_file = "system.redb"
user_file = "user.redb"
commit_interval = 10
completion_limit = 3
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.input.punctuation, PunctuationStyle::Jp);
        assert_eq!(s.input.kana_key, 104);
        assert!(!s.input.start_in_kana);
        assert_eq!(s.dictionary.commit_interval, 10);
    }

    #[test]
    fn error_zero_commit_interval() {
        let toml = DEFAULT_SETTINGS_TOML.replace("commit_interval = 1000", "commit_interval = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("dictionary.commit_interval"));
    }

    #[test]
    fn error_same_file_names() {
        let toml = DEFAULT_SETTINGS_TOML.replace("\"skk_userdict\"", "\"skk_dict_btree\"");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("dictionary.user_file"));
    }

    #[test]
    fn error_unknown_punctuation() {
        let toml = DEFAULT_SETTINGS_TOML.replace("punctuation = \"en\"", "punctuation = \"fr\"");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[input]
punctuation = "en"
kana_key = 93
start_in_kana = true
candidate_strip = true
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}

//! Global settings loaded from TOML, following the same OnceLock pattern as the
//! reference tables.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

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
    pub speech: SpeechSettings,
    pub library: LibrarySettings,
    pub daily: DailySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechSettings {
    pub locale: String,
    pub rate: f64,
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibrarySettings {
    pub recommended_categories: Vec<String>,
    pub default_artist: String,
    pub custom_default_meaning: String,
    pub lyric_meaning: String,
    pub lyric_jyutping: String,
    pub recent_saved: usize,
    pub export_file_name: String,
}

/// Phrase of the day shown on the home view.
#[derive(Debug, Clone, Deserialize)]
pub struct DailySettings {
    pub text: String,
    pub romanization: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_non_empty!(speech.locale);
    check_non_empty!(speech.program);
    check_non_empty!(library.default_artist);
    check_non_empty!(library.custom_default_meaning);
    check_non_empty!(library.export_file_name);

    if !(s.speech.rate > 0.0 && s.speech.rate.is_finite()) {
        return Err(SettingsError::InvalidValue {
            field: "speech.rate".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if !s.speech.args.iter().any(|a| a.contains("{text}")) {
        return Err(SettingsError::InvalidValue {
            field: "speech.args".to_string(),
            reason: "must contain a {text} placeholder".to_string(),
        });
    }
    if s.library.recent_saved == 0 {
        return Err(SettingsError::InvalidValue {
            field: "library.recent_saved".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    Ok(())
}

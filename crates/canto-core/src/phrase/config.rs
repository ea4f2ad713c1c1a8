use std::collections::HashSet;

use serde::Deserialize;

use super::table::PhraseTable;
use crate::unicode::char_len;

#[derive(Deserialize)]
struct PhraseConfig {
    mappings: Vec<(String, String)>,
    #[serde(default)]
    fallback: Vec<(String, String)>,
}

#[derive(Debug, thiserror::Error)]
pub enum PhraseConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("mappings list is empty")]
    Empty,
    #[error("empty source phrase in mappings")]
    EmptyKey,
    #[error("duplicate source phrase: {0}")]
    DuplicateKey(String),
    #[error("fallback source must be a single character: {0:?}")]
    FallbackNotSingleChar(String),
    #[error("phrase table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a `PhraseTable`, keeping declaration order.
pub fn parse_phrase_toml(toml_str: &str) -> Result<PhraseTable, PhraseConfigError> {
    let config: PhraseConfig =
        toml::from_str(toml_str).map_err(|e| PhraseConfigError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(PhraseConfigError::Empty);
    }

    let mut seen = HashSet::new();
    for (source, _) in &config.mappings {
        if source.is_empty() {
            return Err(PhraseConfigError::EmptyKey);
        }
        if !seen.insert(source.as_str()) {
            return Err(PhraseConfigError::DuplicateKey(source.clone()));
        }
    }

    for (source, _) in &config.fallback {
        if char_len(source) != 1 {
            return Err(PhraseConfigError::FallbackNotSingleChar(source.clone()));
        }
    }

    Ok(PhraseTable::new(config.mappings, config.fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_toml() {
        let toml = r#"
mappings = [["謝謝", "唔該"], ["再見", "拜拜"]]
fallback = [["不", "唔"]]
"#;
        let table = parse_phrase_toml(toml).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("謝謝"), Some("唔該"));
        assert_eq!(table.fallback_rules().len(), 1);
    }

    #[test]
    fn fallback_is_optional() {
        let table = parse_phrase_toml(r#"mappings = [["謝謝", "唔該"]]"#).unwrap();
        assert!(table.fallback_rules().is_empty());
    }

    #[test]
    fn parse_default_toml() {
        let table = parse_phrase_toml(super::super::DEFAULT_PHRASES_TOML).unwrap();
        assert!(table.len() > 40, "expected 40+ phrases, got {}", table.len());
        assert_eq!(table.fallback_rules().len(), 2);
    }

    #[test]
    fn error_empty_mappings() {
        let err = parse_phrase_toml("mappings = []").unwrap_err();
        assert!(matches!(err, PhraseConfigError::Empty));
    }

    #[test]
    fn error_empty_key() {
        let err = parse_phrase_toml(r#"mappings = [["", "唔該"]]"#).unwrap_err();
        assert!(matches!(err, PhraseConfigError::EmptyKey));
    }

    #[test]
    fn error_duplicate_key() {
        let toml = r#"mappings = [["謝謝", "唔該"], ["謝謝", "多謝"]]"#;
        let err = parse_phrase_toml(toml).unwrap_err();
        assert!(matches!(err, PhraseConfigError::DuplicateKey(ref k) if k == "謝謝"));
    }

    #[test]
    fn error_fallback_multi_char() {
        let toml = r#"
mappings = [["謝謝", "唔該"]]
fallback = [["不是", "唔係"]]
"#;
        let err = parse_phrase_toml(toml).unwrap_err();
        assert!(matches!(err, PhraseConfigError::FallbackNotSingleChar(_)));
    }

    #[test]
    fn error_pair_shape() {
        let err = parse_phrase_toml(r#"mappings = [["謝謝"]]"#).unwrap_err();
        assert!(matches!(err, PhraseConfigError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_phrase_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, PhraseConfigError::Parse(_)));
    }
}

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Deserialize)]
struct JyutpingConfig {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum JyutpingConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("key must be a single character: {0:?}")]
    MultiCharKey(String),
    #[error("invalid token for {key:?}: {token:?} (expected ASCII letters and a tone digit)")]
    InvalidToken { key: String, token: String },
    #[error("jyutping table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a sorted `BTreeMap<character, token>`.
pub fn parse_jyutping_toml(toml_str: &str) -> Result<BTreeMap<char, String>, JyutpingConfigError> {
    let config: JyutpingConfig =
        toml::from_str(toml_str).map_err(|e| JyutpingConfigError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(JyutpingConfigError::Empty);
    }

    let mut table = BTreeMap::new();
    for (key, token) in config.mappings {
        let mut chars = key.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(JyutpingConfigError::MultiCharKey(key));
        };
        if token.is_empty() || !token.chars().all(|t| t.is_ascii_alphanumeric()) {
            return Err(JyutpingConfigError::InvalidToken { key, token });
        }
        table.insert(c, token);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_toml() {
        let toml = r#"
[mappings]
"唔" = "m4"
"該" = "goi1"
"#;
        let map = parse_jyutping_toml(toml).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&'唔'], "m4");
        assert_eq!(map[&'該'], "goi1");
    }

    #[test]
    fn parse_default_toml() {
        let map = parse_jyutping_toml(super::super::DEFAULT_JYUTPING_TOML).unwrap();
        assert!(map.len() > 100, "expected 100+ mappings, got {}", map.len());
        assert_eq!(map[&'拜'], "baai1");
    }

    #[test]
    fn error_empty_mappings() {
        let err = parse_jyutping_toml("[mappings]\n").unwrap_err();
        assert!(matches!(err, JyutpingConfigError::Empty));
    }

    #[test]
    fn error_multi_char_key() {
        let toml = r#"
[mappings]
"唔該" = "m4goi1"
"#;
        let err = parse_jyutping_toml(toml).unwrap_err();
        assert!(matches!(err, JyutpingConfigError::MultiCharKey(_)));
    }

    #[test]
    fn error_empty_key() {
        let toml = r#"
[mappings]
"" = "m4"
"#;
        let err = parse_jyutping_toml(toml).unwrap_err();
        assert!(matches!(err, JyutpingConfigError::MultiCharKey(_)));
    }

    #[test]
    fn error_token_with_space() {
        let toml = r#"
[mappings]
"唔" = "m 4"
"#;
        let err = parse_jyutping_toml(toml).unwrap_err();
        assert!(matches!(err, JyutpingConfigError::InvalidToken { .. }));
        assert!(err.to_string().contains("唔"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_jyutping_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, JyutpingConfigError::Parse(_)));
    }
}

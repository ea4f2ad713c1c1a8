use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use tracing::debug_span;

use super::config::{parse_jyutping_toml, JyutpingConfigError};
use super::DEFAULT_JYUTPING_TOML;
use crate::unicode::{collapse_whitespace, is_han, is_passthrough};

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Read-only character → Jyutping syllable table.
#[derive(Debug)]
pub struct JyutpingTable {
    map: HashMap<char, String>,
}

impl JyutpingTable {
    pub fn new(entries: BTreeMap<char, String>) -> Self {
        Self {
            map: entries.into_iter().collect(),
        }
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, JyutpingConfigError> {
        parse_jyutping_toml(toml_str).map(Self::new)
    }

    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), JyutpingConfigError> {
        // Validate eagerly
        parse_jyutping_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| JyutpingConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static JyutpingTable {
        static INSTANCE: OnceLock<JyutpingTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_JYUTPING_TOML);
            JyutpingTable::from_toml(toml_str).expect("jyutping TOML must be valid")
        })
    }

    pub fn lookup(&self, c: char) -> Option<&str> {
        self.map.get(&c).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn romanize(&self, text: &str) -> String {
        let _span = debug_span!("romanize", chars = text.len()).entered();
        let mut joined = String::with_capacity(text.len() * 3);
        for (i, c) in text.chars().enumerate() {
            if i > 0 {
                joined.push(' ');
            }
            if let Some(token) = self.lookup(c) {
                joined.push_str(token);
            } else if is_passthrough(c) {
                joined.push(c);
            }
        }
        collapse_whitespace(&joined)
    }

    /// Han characters in `text` with no table entry, in first-seen order.
    pub fn unknown_chars(&self, text: &str) -> Vec<char> {
        let mut unknown: Vec<char> = Vec::new();
        for c in text.chars() {
            if is_han(c) && !self.map.contains_key(&c) && !unknown.contains(&c) {
                unknown.push(c);
            }
        }
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_table() -> JyutpingTable {
        JyutpingTable::from_toml(
            r#"
[mappings]
"唔" = "m4"
"該" = "goi1"
"拜" = "baai1"
"你" = "nei5"
"好" = "hou2"
"#,
        )
        .unwrap()
    }

    #[test]
    fn empty_input() {
        assert_eq!(sample_table().romanize(""), "");
        assert_eq!(JyutpingTable::global().romanize(""), "");
    }

    #[test]
    fn mapped_characters() {
        let table = sample_table();
        assert_eq!(table.romanize("唔該"), "m4 goi1");
        assert_eq!(table.romanize("拜拜"), "baai1 baai1");
    }

    #[test]
    fn single_mapped_character_has_no_padding() {
        assert_eq!(sample_table().romanize("該"), "goi1");
    }

    #[test]
    fn unknown_and_punctuation_dropped() {
        let table = sample_table();
        assert_eq!(table.romanize("粵"), "");
        assert_eq!(table.romanize("？"), "");
        assert_eq!(table.romanize("你好？"), "nei5 hou2");
        assert_eq!(table.romanize("唔，該"), "m4 goi1");
    }

    #[test]
    fn ascii_passthrough_is_per_character() {
        let table = sample_table();
        assert_eq!(table.romanize("K"), "K");
        assert_eq!(table.romanize("K歌"), "K");
        assert_eq!(table.romanize("ok 你"), "o k nei5");
        assert_eq!(table.romanize("7"), "7");
    }

    #[test]
    fn whitespace_collapses() {
        let table = sample_table();
        assert_eq!(table.romanize("  你\n\n好  "), "nei5 hou2");
        assert_eq!(table.romanize("\t"), "");
    }

    #[test]
    fn global_table_matches_reference_phrases() {
        assert_eq!(super::super::romanize("唔該"), "m4 goi1");
        assert_eq!(super::super::romanize("拜拜"), "baai1 baai1");
        assert_eq!(super::super::romanize("食咗飯未呀？"), "sik6 zo2 faan6 mei6 aa3");
    }

    #[test]
    fn lookup_and_len() {
        let table = sample_table();
        assert_eq!(table.lookup('唔'), Some("m4"));
        assert_eq!(table.lookup('x'), None);
        assert_eq!(table.len(), 5);
        assert!(!table.is_empty());
    }

    #[test]
    fn unknown_chars_are_deduplicated() {
        let table = sample_table();
        assert_eq!(table.unknown_chars("你粵粵a好語"), vec!['粵', '語']);
        assert!(table.unknown_chars("你好abc").is_empty());
    }

    proptest! {
        #[test]
        fn output_is_normalized(input in "\\PC{0,40}") {
            let out = sample_table().romanize(&input);
            prop_assert!(!out.starts_with(' '));
            prop_assert!(!out.ends_with(' '));
            prop_assert!(!out.contains("  "));
            prop_assert!(out.chars().all(|c| c == ' ' || !c.is_whitespace()));
        }

        #[test]
        fn output_only_contains_tokens_and_ascii(input in "[唔該拜你好粵，。a-zA-Z0-9 \t]{0,30}") {
            let out = sample_table().romanize(&input);
            prop_assert!(out.chars().all(|c| c.is_ascii_alphanumeric() || c == ' '));
        }
    }
}

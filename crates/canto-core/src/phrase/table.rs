use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::{debug, debug_span};

use super::config::{parse_phrase_toml, PhraseConfigError};
use super::DEFAULT_PHRASES_TOML;
use crate::unicode::char_len;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Read-only source phrase → target phrase table.
///
/// Substring substitution walks `entries` in declaration order. No
/// longest-match priority is applied: when two sources overlap, whichever is
/// declared first rewrites the text and may consume the other.
#[derive(Debug)]
pub struct PhraseTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
    fallback: Vec<(String, String)>,
}

impl PhraseTable {
    pub fn new(entries: Vec<(String, String)>, fallback: Vec<(String, String)>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, (source, _)) in entries.iter().enumerate() {
            index.entry(source.clone()).or_insert(i);
        }
        Self {
            entries,
            index,
            fallback,
        }
    }

    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), PhraseConfigError> {
        // Validate eagerly
        parse_phrase_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| PhraseConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static PhraseTable {
        static INSTANCE: OnceLock<PhraseTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_PHRASES_TOML);
            parse_phrase_toml(toml_str).expect("phrase TOML must be valid")
        })
    }

    /// Exact whole-phrase lookup.
    pub fn lookup(&self, source: &str) -> Option<&str> {
        self.index
            .get(source)
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn fallback_rules(&self) -> &[(String, String)] {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn substitute(&self, meaning: &str) -> String {
        let _span = debug_span!("substitute", chars = meaning.len()).entered();

        if let Some(target) = self.lookup(meaning) {
            debug!("exact match");
            return target.to_string();
        }

        let mut result = meaning.to_string();
        let mut applied = 0usize;
        for (source, target) in &self.entries {
            if char_len(source) >= 2 && result.contains(source.as_str()) {
                result = result.replace(source.as_str(), target);
                applied += 1;
            }
        }

        // Identity mappings (你好 → 你好) leave the text unchanged and so do not
        // count as a substitution here. A rule fires only when its source
        // occurs in the original meaning.
        if result == meaning {
            for (source, target) in &self.fallback {
                if meaning.contains(source.as_str()) {
                    result = result.replace(source.as_str(), target);
                }
            }
        }

        debug!(applied, changed = result != meaning);
        result
    }
}

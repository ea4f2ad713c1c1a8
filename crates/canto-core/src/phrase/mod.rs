//! Mandarin (standard written) → colloquial Cantonese phrase substitution.
//!
//! Not machine translation: an exact whole-input lookup, then plain substring
//! replacement over an ordered phrase list, then two single-character rules.

mod config;
mod table;

pub use config::{parse_phrase_toml, PhraseConfigError};
pub use table::PhraseTable;

use crate::jyutping;

pub const DEFAULT_PHRASES_TOML: &str = include_str!("default_phrases.toml");

/// Returns the embedded default phrase table TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_PHRASES_TOML
}

/// Substitute `meaning` with the global phrase table.
pub fn substitute(meaning: &str) -> String {
    PhraseTable::global().substitute(meaning)
}

/// Cantonese rendering of a meaning together with its romanization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub cantonese: String,
    pub jyutping: String,
}

/// Substitute then romanize, using the global tables.
pub fn translate(meaning: &str) -> Translation {
    let cantonese = substitute(meaning);
    let jyutping = jyutping::romanize(&cantonese);
    Translation {
        cantonese,
        jyutping,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_thanks() {
        let t = translate("謝謝");
        assert_eq!(t.cantonese, "唔該");
        assert_eq!(t.jyutping, "m4 goi1");
    }

    #[test]
    fn translate_goodbye() {
        let t = translate("再見");
        assert_eq!(t.cantonese, "拜拜");
        assert_eq!(t.jyutping, "baai1 baai1");
    }

    #[test]
    fn translate_empty() {
        let t = translate("");
        assert_eq!(t.cantonese, "");
        assert_eq!(t.jyutping, "");
    }
}

//! Character-to-Jyutping romanization.
//!
//! A fixed character → syllable table (embedded TOML, optionally replaced at
//! startup) drives a left-to-right, one-character-at-a-time transliteration.

mod config;
mod table;

pub use config::{parse_jyutping_toml, JyutpingConfigError};
pub use table::JyutpingTable;

pub const DEFAULT_JYUTPING_TOML: &str = include_str!("default_jyutping.toml");

/// Returns the embedded default table TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_JYUTPING_TOML
}

/// Romanize `text` with the global table.
///
/// Mapped characters become their syllable, ASCII letters, digits and
/// whitespace pass through, anything else is dropped. Emitted pieces are
/// joined with single spaces and the result never has leading, trailing or
/// doubled spaces.
pub fn romanize(text: &str) -> String {
    JyutpingTable::global().romanize(text)
}

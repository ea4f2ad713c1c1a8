use std::fs;

use canto_core::jyutping::{self, JyutpingTable};
use canto_core::phrase::{self, PhraseTable};
use canto_core::settings;
use tracing::debug;

/// Install user overrides for the settings and reference tables. Must run
/// before anything touches the global tables.
pub fn load_overrides(
    settings_file: Option<&str>,
    jyutping_file: Option<&str>,
    phrase_file: Option<&str>,
) {
    if let Some(file) = settings_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(settings::init_custom(content), "Error in {file}: {}");
        debug!(file, "custom settings installed");
    }
    if let Some(file) = jyutping_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(JyutpingTable::init_custom(content), "Error in {file}: {}");
        debug!(file, "custom jyutping table installed");
    }
    if let Some(file) = phrase_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(PhraseTable::init_custom(content), "Error in {file}: {}");
        debug!(file, "custom phrase table installed");
    }
}

pub fn jyutping_export() {
    print!("{}", jyutping::default_toml());
}

pub fn jyutping_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(jyutping::parse_jyutping_toml(&content), "Error: {}");
    println!("OK: {} mappings", map.len());
}

pub fn phrases_export() {
    print!("{}", phrase::default_toml());
}

pub fn phrases_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let table = die!(phrase::parse_phrase_toml(&content), "Error: {}");
    println!(
        "OK: {} mappings, {} fallback rules",
        table.len(),
        table.fallback_rules().len()
    );
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: speech.program={}, speech.locale={}, speech.rate={}, library.recent_saved={}",
        s.speech.program, s.speech.locale, s.speech.rate, s.library.recent_saved
    );
}

fn main() {
    // Validate embedded TOML files at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );
    validate_toml(
        "src/jyutping/default_jyutping.toml",
        include_str!("src/jyutping/default_jyutping.toml"),
    );
    validate_toml(
        "src/phrase/default_phrases.toml",
        include_str!("src/phrase/default_phrases.toml"),
    );
}

fn validate_toml(path: &str, content: &str) {
    if content.parse::<toml::Value>().is_err() {
        panic!("{path} contains invalid TOML");
    }
}

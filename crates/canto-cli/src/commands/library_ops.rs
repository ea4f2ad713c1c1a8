use std::fs;
use std::path::Path;

use canto_core::draft::PhraseDraft;
use canto_core::settings::settings;
use canto_core::store::{FileBlobStore, Library, SaveRequest};
use canto_core::view::View;

use super::{note_ops, pad, song_ops};

pub fn default_data_dir() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    format!("{home}/.local/share/cantonese")
}

pub fn open(dir: &Path) -> Library<FileBlobStore> {
    die!(
        Library::open(FileBlobStore::new(dir)),
        "Error opening library in {}: {}",
        dir.display()
    )
}

pub fn show(dir: &Path, view: View) {
    let lib = open(dir);
    println!("== {} ==", view.label());
    match view {
        View::Home => print_home(&lib),
        View::Conversations => print_phrases(&lib, None),
        View::Songs => song_ops::print_songs(&lib),
        View::Custom => note_ops::print_notes(&lib),
    }
}

fn print_home(lib: &Library<FileBlobStore>) {
    let home = lib.home_summary();
    println!("{}", home.daily.text);
    println!("{}", home.daily.romanization);
    println!();
    println!("saved: {}  songs: {}", home.saved_count, home.song_count);
    for w in &home.recent {
        println!("  {}  {}", pad(&w.cantonese, 20), w.jyutping);
    }
}

pub struct PhraseInput<'a> {
    pub category: &'a str,
    pub meaning: Option<&'a str>,
    pub cantonese: Option<&'a str>,
    pub jyutping: Option<&'a str>,
}

/// Add a phrase. Missing Cantonese text and romanization are derived from
/// the meaning; explicitly given ones are kept as typed.
pub fn phrase_add(dir: &Path, input: &PhraseInput) {
    let mut draft = PhraseDraft::new();
    draft.set_category(input.category);
    if let Some(text) = input.cantonese {
        draft.set_cantonese(text);
    }
    if let Some(meaning) = input.meaning {
        draft.set_meaning(meaning);
        draft.commit_meaning();
    }
    if let Some(jyutping) = input.jyutping {
        die!(draft.set_jyutping(jyutping), "Error: {}");
    }
    let (category, new) = die!(draft.finish(), "Error: {}");

    let mut lib = open(dir);
    let phrase = die!(lib.add_phrase(&category, new), "Error saving phrase: {}");
    println!(
        "Added to {category}: {} ({}) [{}]",
        phrase.cantonese, phrase.jyutping, phrase.id
    );
}

pub fn phrase_list(dir: &Path, category: Option<&str>) {
    let lib = open(dir);
    print_phrases(&lib, category);
}

fn print_phrases(lib: &Library<FileBlobStore>, category: Option<&str>) {
    let mut shown = 0;
    for cat in lib.categories() {
        if category.is_some_and(|name| name != cat.category) {
            continue;
        }
        println!("[{}] {}", cat.id, cat.category);
        for p in &cat.items {
            let mark = if lib.is_saved(&p.cantonese) { "*" } else { " " };
            println!(
                "  {mark} {}  {}  {}  ({})",
                pad(&p.id, 14),
                pad(&p.cantonese, 20),
                pad(&p.jyutping, 28),
                p.meaning
            );
            shown += 1;
        }
    }
    if shown == 0 {
        println!("(empty)");
    }
}

pub fn phrase_delete(dir: &Path, category_id: &str, phrase_id: &str) {
    let mut lib = open(dir);
    let removed = die!(lib.delete_phrase(category_id, phrase_id), "Error: {}");
    println!("Deleted: {} ({})", removed.cantonese, removed.meaning);
}

pub fn categories(dir: &Path) {
    let lib = open(dir);
    for name in lib.category_options() {
        println!("{name}");
    }
}

/// Toggle the saved state of a phrase.
pub fn save(dir: &Path, phrase_id: &str) {
    let mut lib = open(dir);
    let Some((_, phrase)) = lib.find_phrase(phrase_id) else {
        eprintln!("Error: no phrase with id {phrase_id}");
        std::process::exit(1);
    };
    let req = SaveRequest::from(phrase);
    let cantonese = req.cantonese.clone();
    if die!(lib.toggle_save(req), "Error: {}") {
        println!("Saved: {cantonese}");
    } else {
        println!("Unsaved: {cantonese}");
    }
}

pub fn saved(dir: &Path) {
    let lib = open(dir);
    let words = lib.saved_words();
    if words.is_empty() {
        println!("(empty)");
        return;
    }
    for w in words {
        println!(
            "{}  {}  {}  {}",
            pad(&w.cantonese, 24),
            pad(&w.jyutping, 28),
            pad(&w.meaning, 16),
            w.date
        );
    }
    println!("---");
    println!("{} saved", words.len());
}

pub fn import(dir: &Path, file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let mut lib = open(dir);
    let summary = die!(lib.import_categories(&content), "Error: {}");
    println!(
        "Imported {} categories, {} phrases",
        summary.categories, summary.phrases
    );
}

/// Export every category as JSON. `-` writes to stdout.
pub fn export(dir: &Path, output: Option<&str>) {
    let lib = open(dir);
    let json = die!(lib.export_categories(), "Error: {}");
    let output = output.unwrap_or(settings().library.export_file_name.as_str());
    if output == "-" {
        println!("{json}");
    } else {
        die!(fs::write(output, &json), "Error writing {output}: {}");
        println!("Exported {} categories to {output}", lib.categories().len());
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use canto_cli::commands::library_ops::{self, PhraseInput};
use canto_cli::commands::{config_ops, note_ops, song_ops, translate_ops};
use canto_core::view::View;

#[derive(Parser)]
#[command(name = "cantotool", about = "Cantonese phrase book, romanizer and lyric reader")]
struct Cli {
    /// Data directory (default: ~/.local/share/cantonese)
    #[arg(long, global = true)]
    data_dir: Option<String>,
    /// Custom settings TOML
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Custom character → Jyutping table TOML
    #[arg(long, global = true)]
    jyutping_table: Option<String>,
    /// Custom Mandarin → Cantonese phrase table TOML
    #[arg(long, global = true)]
    phrase_table: Option<String>,
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Romanize Chinese text to Jyutping
    Romanize {
        /// Text to romanize
        text: String,
    },
    /// Substitute Mandarin phrasing with Cantonese and romanize the result
    Translate {
        /// Mandarin text
        text: String,
    },
    /// Print one of the views: home, conversations, songs, custom
    Show {
        #[arg(default_value = "home")]
        view: View,
    },
    /// Manage conversation phrases
    Phrase {
        #[command(subcommand)]
        action: PhraseAction,
    },
    /// List category names (existing and recommended)
    Categories,
    /// Save or unsave a phrase
    Save {
        /// Phrase id
        phrase_id: String,
    },
    /// List saved words
    Saved,
    /// Manage songs
    Song {
        #[command(subcommand)]
        action: SongAction,
    },
    /// Manage custom notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Import categories from a JSON export
    Import {
        /// JSON file
        file: String,
    },
    /// Export all categories as JSON
    Export {
        /// Output file, `-` for stdout (default: cantonese_conversations.json)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Speak text with the host speech program
    Speak {
        /// Cantonese text
        text: String,
    },
    /// Export default Jyutping table as TOML
    JyutpingExport,
    /// Validate a custom Jyutping table TOML file
    JyutpingValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default phrase table as TOML
    PhrasesExport,
    /// Validate a custom phrase table TOML file
    PhrasesValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

#[derive(Subcommand)]
enum PhraseAction {
    /// Add a phrase; Cantonese and Jyutping are derived from the meaning unless given
    Add {
        /// Category name (created if new)
        #[arg(short, long)]
        category: String,
        /// Meaning (Mandarin)
        #[arg(short, long)]
        meaning: Option<String>,
        /// Cantonese text
        #[arg(long)]
        cantonese: Option<String>,
        /// Jyutping
        #[arg(long)]
        jyutping: Option<String>,
    },
    /// List phrases
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a phrase
    Delete {
        /// Category id
        category_id: String,
        /// Phrase id
        phrase_id: String,
    },
}

#[derive(Subcommand)]
enum SongAction {
    /// List songs
    List,
    /// Add a song from a lyric text file
    Add {
        /// Lyric file (.txt)
        file: String,
    },
    /// Print a song's lyric lines
    Show {
        /// Song id
        id: String,
        /// Print the romanization under each line
        #[arg(long)]
        romanize: bool,
    },
    /// Delete a song
    Delete {
        /// Song id
        id: String,
    },
    /// Save or unsave a lyric line
    SaveLine {
        /// Song id
        id: String,
        /// Line number as printed by `song show`
        line: usize,
    },
}

#[derive(Subcommand)]
enum NoteAction {
    /// Add a note
    Add {
        /// Cantonese text
        cantonese: String,
        /// Meaning
        #[arg(short, long)]
        meaning: Option<String>,
        /// Free-form note
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// List notes, newest first
    List,
    /// Delete a note
    Delete {
        /// Note id
        id: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("canto_core=debug,canto_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    config_ops::load_overrides(
        cli.settings.as_deref(),
        cli.jyutping_table.as_deref(),
        cli.phrase_table.as_deref(),
    );

    let dir = PathBuf::from(cli.data_dir.unwrap_or_else(library_ops::default_data_dir));

    match cli.command {
        Command::Romanize { text } => translate_ops::romanize_cmd(&text),
        Command::Translate { text } => translate_ops::translate_cmd(&text),
        Command::Show { view } => library_ops::show(&dir, view),
        Command::Phrase { action } => match action {
            PhraseAction::Add {
                category,
                meaning,
                cantonese,
                jyutping,
            } => library_ops::phrase_add(
                &dir,
                &PhraseInput {
                    category: &category,
                    meaning: meaning.as_deref(),
                    cantonese: cantonese.as_deref(),
                    jyutping: jyutping.as_deref(),
                },
            ),
            PhraseAction::List { category } => library_ops::phrase_list(&dir, category.as_deref()),
            PhraseAction::Delete {
                category_id,
                phrase_id,
            } => library_ops::phrase_delete(&dir, &category_id, &phrase_id),
        },
        Command::Categories => library_ops::categories(&dir),
        Command::Save { phrase_id } => library_ops::save(&dir, &phrase_id),
        Command::Saved => library_ops::saved(&dir),
        Command::Song { action } => match action {
            SongAction::List => song_ops::list(&dir),
            SongAction::Add { file } => song_ops::add(&dir, &file),
            SongAction::Show { id, romanize } => song_ops::show(&dir, &id, romanize),
            SongAction::Delete { id } => song_ops::delete(&dir, &id),
            SongAction::SaveLine { id, line } => song_ops::save_line(&dir, &id, line),
        },
        Command::Note { action } => match action {
            NoteAction::Add {
                cantonese,
                meaning,
                note,
            } => note_ops::add(&dir, &cantonese, meaning.as_deref(), &note),
            NoteAction::List => note_ops::list(&dir),
            NoteAction::Delete { id } => note_ops::delete(&dir, &id),
        },
        Command::Import { file } => library_ops::import(&dir, &file),
        Command::Export { output } => library_ops::export(&dir, output.as_deref()),
        Command::Speak { text } => translate_ops::speak_cmd(&text),
        Command::JyutpingExport => config_ops::jyutping_export(),
        Command::JyutpingValidate { file } => config_ops::jyutping_validate(&file),
        Command::PhrasesExport => config_ops::phrases_export(),
        Command::PhrasesValidate { file } => config_ops::phrases_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}

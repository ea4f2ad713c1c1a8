use std::fs;
use std::path::Path;

use canto_core::store::{FileBlobStore, Library, BUILTIN_SONG_ID};

use super::library_ops::open;
use super::pad;

pub fn list(dir: &Path) {
    let lib = open(dir);
    print_songs(&lib);
}

pub(crate) fn print_songs(lib: &Library<FileBlobStore>) {
    for song in lib.songs() {
        let lock = if song.id == BUILTIN_SONG_ID { " (built in)" } else { "" };
        println!(
            "{}  {}  {}{lock}",
            pad(&song.id, 14),
            pad(&song.title, 24),
            song.artist
        );
    }
}

/// Add a song from a lyric file; the file name becomes the title.
pub fn add(dir: &Path, file: &str) {
    let contents = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let file_name = Path::new(file)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());
    let mut lib = open(dir);
    let song = die!(lib.add_song_from_file(&file_name, &contents), "Error: {}");
    println!(
        "Added: {} [{}], {} lines",
        song.title,
        song.id,
        song.lines().len()
    );
}

/// Print numbered lyric lines, optionally each followed by its romanization.
pub fn show(dir: &Path, id: &str, romanize: bool) {
    let lib = open(dir);
    let Some(song) = lib.song(id) else {
        eprintln!("Error: no song with id {id}");
        std::process::exit(1);
    };
    println!("{} - {}", song.title, song.artist);
    for (i, line) in song.lines().iter().enumerate() {
        let mark = if lib.is_saved(line) { "*" } else { " " };
        println!("{mark}{:>3}  {line}", i + 1);
        if romanize {
            println!("      {}", canto_core::romanize(line));
        }
    }
}

pub fn delete(dir: &Path, id: &str) {
    let mut lib = open(dir);
    let removed = die!(lib.delete_song(id), "Error: {}");
    println!("Deleted: {}", removed.title);
}

/// Toggle the saved state of one lyric line (numbered as in `song show`).
pub fn save_line(dir: &Path, id: &str, line: usize) {
    let mut lib = open(dir);
    if die!(lib.save_lyric_line(id, line), "Error: {}") {
        println!("Saved line {line}");
    } else {
        println!("Unsaved line {line}");
    }
}

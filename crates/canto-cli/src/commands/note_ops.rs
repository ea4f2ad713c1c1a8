use std::path::Path;

use canto_core::store::{FileBlobStore, Library};

use super::library_ops::open;

pub fn add(dir: &Path, cantonese: &str, meaning: Option<&str>, note: &str) {
    let mut lib = open(dir);
    let entry = die!(lib.add_note(cantonese, meaning, note), "Error: {}");
    println!("Added: {} ({}) [{}]", entry.cantonese, entry.meaning, entry.id);
}

pub fn list(dir: &Path) {
    let lib = open(dir);
    print_notes(&lib);
}

pub(crate) fn print_notes(lib: &Library<FileBlobStore>) {
    let notes = lib.notes();
    if notes.is_empty() {
        println!("(empty)");
        return;
    }
    for n in notes {
        println!("[{}] {}  {}", n.id, n.date, n.cantonese);
        println!("    {}", canto_core::romanize(&n.cantonese));
        println!("    {}", n.meaning);
        if !n.note.is_empty() {
            println!("    {}", n.note);
        }
    }
}

pub fn delete(dir: &Path, id: &str) {
    let mut lib = open(dir);
    let removed = die!(lib.delete_note(id), "Error: {}");
    println!("Deleted: {}", removed.cantonese);
}

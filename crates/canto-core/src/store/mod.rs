//! Learner's record store: phrase categories, songs, saved words and custom
//! notes.
//!
//! `Library` is an explicit state object over a `BlobStore`. Each sub-store is
//! read once in `open` and rewritten in full whenever a command changes it. A
//! command builds the next state, persists it, and only then swaps it in, so a
//! failed write leaves the in-memory state untouched.

mod blob;
mod ids;
mod seed;
mod types;


use std::io;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, debug_span, warn};

use crate::settings::settings;

pub use blob::{BlobName, BlobStore, FileBlobStore, MemoryBlobStore};
pub use ids::IdGenerator;
pub use seed::{builtin_song, seed_categories, BUILTIN_SONG_ID};
pub use types::{Category, CustomNote, NewPhrase, Phrase, SaveRequest, SavedWord, Song};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error on {blob}: {source}")]
    Io {
        blob: BlobName,
        #[source]
        source: io::Error,
    },

    #[error("stored {blob} is not valid: {source}")]
    Corrupt {
        blob: BlobName,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("import failed: {0}")]
    ImportMalformed(String),

    #[error("song {0} is built in and cannot be deleted")]
    ProtectedSong(String),

    #[error("no song with id {0}")]
    SongNotFound(String),

    #[error("song {song_id} has no lyric line {line}")]
    LyricLineNotFound { song_id: String, line: usize },

    #[error("no phrase {phrase_id} in category {category_id}")]
    PhraseNotFound {
        category_id: String,
        phrase_id: String,
    },

    #[error("no note with id {0}")]
    NoteNotFound(String),

    #[error("Cantonese text must not be empty")]
    EmptyText,

    #[error("category name must not be empty")]
    EmptyCategory,
}

/// Outcome of a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub categories: usize,
    pub phrases: usize,
}

pub struct Library<S: BlobStore> {
    store: S,
    categories: Vec<Category>,
    songs: Vec<Song>,
    saved: Vec<SavedWord>,
    notes: Vec<CustomNote>,
    ids: IdGenerator,
}

fn load_blob<S: BlobStore, T: DeserializeOwned>(
    store: &S,
    blob: BlobName,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store
        .load(blob)
        .map_err(|source| StoreError::Io { blob, source })?
    else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(source) => {
            warn!(%blob, error = %source, "stored blob does not parse");
            Err(StoreError::Corrupt { blob, source })
        }
    }
}

impl<S: BlobStore> Library<S> {
    /// Read every sub-store. Missing blobs start from the seed content.
    pub fn open(store: S) -> Result<Self, StoreError> {
        let _span = debug_span!("library_open").entered();

        let mut categories: Vec<Category> =
            load_blob(&store, BlobName::Categories)?.unwrap_or_else(seed_categories);
        categories.retain(|c| {
            if c.items.is_empty() {
                warn!(category = %c.category, "dropping stored category without phrases");
            }
            !c.items.is_empty()
        });

        let mut songs = vec![builtin_song()];
        if let Some(stored) = load_blob::<S, Vec<Song>>(&store, BlobName::Songs)? {
            songs.extend(stored.into_iter().filter(|s| s.id != BUILTIN_SONG_ID));
        }

        let saved: Vec<SavedWord> = load_blob(&store, BlobName::SavedWords)?.unwrap_or_default();
        let notes: Vec<CustomNote> = load_blob(&store, BlobName::CustomNotes)?.unwrap_or_default();

        debug!(
            categories = categories.len(),
            songs = songs.len(),
            saved = saved.len(),
            notes = notes.len()
        );

        Ok(Self {
            store,
            categories,
            songs,
            saved,
            notes,
            ids: IdGenerator::new(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn write<T: Serialize + ?Sized>(&mut self, blob: BlobName, value: &T) -> Result<(), StoreError> {
        let _span = debug_span!("persist", %blob).entered();
        let json = serde_json::to_string(value)?;
        self.store
            .save(blob, &json)
            .map_err(|source| StoreError::Io { blob, source })
    }

    // --- Categories ---

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Existing category names followed by the recommended ones, deduplicated
    /// in first-seen order.
    pub fn category_options(&self) -> Vec<String> {
        let mut options: Vec<String> = Vec::new();
        let existing = self.categories.iter().map(|c| c.category.as_str());
        let recommended = settings()
            .library
            .recommended_categories
            .iter()
            .map(String::as_str);
        for name in existing.chain(recommended) {
            if !options.iter().any(|o| o == name) {
                options.push(name.to_string());
            }
        }
        options
    }

    pub fn find_phrase(&self, phrase_id: &str) -> Option<(&Category, &Phrase)> {
        self.categories.iter().find_map(|cat| {
            cat.items
                .iter()
                .find(|p| p.id == phrase_id)
                .map(|p| (cat, p))
        })
    }

    /// Append a phrase to the category named `category`, creating the
    /// category when no category has that name yet.
    pub fn add_phrase(&mut self, category: &str, new: NewPhrase) -> Result<Phrase, StoreError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(StoreError::EmptyCategory);
        }
        if new.cantonese.trim().is_empty() {
            return Err(StoreError::EmptyText);
        }

        let id = self.ids.next_id();
        let phrase = Phrase {
            id: id.clone(),
            cantonese: new.cantonese,
            jyutping: new.jyutping,
            meaning: new.meaning,
        };

        let mut next = self.categories.clone();
        match next.iter_mut().find(|c| c.category == category) {
            Some(cat) => cat.items.push(phrase.clone()),
            None => next.push(Category {
                id: format!("{id}_cat"),
                category: category.to_string(),
                items: vec![phrase.clone()],
            }),
        }

        self.write(BlobName::Categories, &next)?;
        self.categories = next;
        Ok(phrase)
    }

    /// Remove a phrase from every category with id `category_id`; imports can
    /// leave several categories (and phrases) sharing an id. Categories left
    /// without phrases are removed too. Returns the first phrase removed.
    pub fn delete_phrase(&mut self, category_id: &str, phrase_id: &str) -> Result<Phrase, StoreError> {
        let mut next = self.categories.clone();
        let mut removed: Option<Phrase> = None;
        for cat in next.iter_mut().filter(|c| c.id == category_id) {
            cat.items.retain(|p| {
                if p.id != phrase_id {
                    return true;
                }
                if removed.is_none() {
                    removed = Some(p.clone());
                }
                false
            });
        }
        let removed = removed.ok_or_else(|| StoreError::PhraseNotFound {
            category_id: category_id.to_string(),
            phrase_id: phrase_id.to_string(),
        })?;
        next.retain(|c| !c.items.is_empty());

        self.write(BlobName::Categories, &next)?;
        self.categories = next;
        Ok(removed)
    }

    /// Merge categories from a JSON export. Either the whole payload is
    /// accepted or nothing changes.
    pub fn import_categories(&mut self, json: &str) -> Result<ImportSummary, StoreError> {
        let _span = debug_span!("import_categories", bytes = json.len()).entered();
        let imported: Vec<Category> =
            serde_json::from_str(json).map_err(|e| StoreError::ImportMalformed(e.to_string()))?;

        for cat in &imported {
            if let Some(p) = cat.items.iter().find(|p| p.cantonese.trim().is_empty()) {
                return Err(StoreError::ImportMalformed(format!(
                    "phrase {} in category {} has no Cantonese text",
                    p.id, cat.category
                )));
            }
        }

        let mut next = self.categories.clone();
        let mut summary = ImportSummary {
            categories: 0,
            phrases: 0,
        };
        for cat in imported {
            if cat.items.is_empty() {
                warn!(category = %cat.category, "skipping empty category");
                continue;
            }
            summary.categories += 1;
            summary.phrases += cat.items.len();
            next.push(cat);
        }

        self.write(BlobName::Categories, &next)?;
        self.categories = next;
        debug!(categories = summary.categories, phrases = summary.phrases);
        Ok(summary)
    }

    /// All categories as pretty-printed JSON, the same shape `import_categories`
    /// reads.
    pub fn export_categories(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.categories)?)
    }

    // --- Saved words ---

    pub fn saved_words(&self) -> &[SavedWord] {
        &self.saved
    }

    pub fn is_saved(&self, cantonese: &str) -> bool {
        self.saved.iter().any(|w| w.cantonese == cantonese)
    }

    /// Save `req` if nothing with the same Cantonese text is saved yet,
    /// otherwise unsave it. Returns whether it is saved afterwards.
    pub fn toggle_save(&mut self, req: SaveRequest) -> Result<bool, StoreError> {
        if req.cantonese.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let mut next = self.saved.clone();
        let now_saved = if self.is_saved(&req.cantonese) {
            next.retain(|w| w.cantonese != req.cantonese);
            false
        } else {
            next.push(SavedWord {
                id: req.id,
                cantonese: req.cantonese,
                jyutping: req.jyutping,
                meaning: req.meaning,
                date: ids::now_rfc3339(),
            });
            true
        };

        self.write(BlobName::SavedWords, &next)?;
        self.saved = next;
        Ok(now_saved)
    }

    /// Toggle the 1-based `line` of a song's non-blank lyric lines.
    pub fn save_lyric_line(&mut self, song_id: &str, line: usize) -> Result<bool, StoreError> {
        let song = self
            .song(song_id)
            .ok_or_else(|| StoreError::SongNotFound(song_id.to_string()))?;
        let text = line
            .checked_sub(1)
            .and_then(|i| song.lines().get(i).map(|l| l.to_string()))
            .ok_or_else(|| StoreError::LyricLineNotFound {
                song_id: song_id.to_string(),
                line,
            })?;
        let labels = &settings().library;
        self.toggle_save(SaveRequest {
            id: None,
            cantonese: text,
            jyutping: labels.lyric_jyutping.clone(),
            meaning: labels.lyric_meaning.clone(),
        })
    }

    // --- Songs ---

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn song(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == id)
    }

    /// Add a song from an uploaded lyric file. The title is the file name
    /// without its `.txt` extension; the contents become the lyrics verbatim.
    pub fn add_song_from_file(&mut self, file_name: &str, contents: &str) -> Result<Song, StoreError> {
        let title = file_name.strip_suffix(".txt").unwrap_or(file_name);
        let song = Song {
            id: self.ids.next_id(),
            title: title.to_string(),
            artist: settings().library.default_artist.clone(),
            lyrics: contents.to_string(),
        };

        let mut next = self.songs.clone();
        next.push(song.clone());
        self.write(BlobName::Songs, &next)?;
        self.songs = next;
        Ok(song)
    }

    pub fn delete_song(&mut self, id: &str) -> Result<Song, StoreError> {
        if id == BUILTIN_SONG_ID {
            return Err(StoreError::ProtectedSong(id.to_string()));
        }
        let pos = self
            .songs
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::SongNotFound(id.to_string()))?;

        let mut next = self.songs.clone();
        let removed = next.remove(pos);
        self.write(BlobName::Songs, &next)?;
        self.songs = next;
        Ok(removed)
    }

    // --- Custom notes ---

    /// Newest first.
    pub fn notes(&self) -> &[CustomNote] {
        &self.notes
    }

    pub fn add_note(
        &mut self,
        cantonese: &str,
        meaning: Option<&str>,
        note: &str,
    ) -> Result<CustomNote, StoreError> {
        if cantonese.trim().is_empty() {
            return Err(StoreError::EmptyText);
        }
        let meaning = match meaning.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => settings().library.custom_default_meaning.clone(),
        };
        let entry = CustomNote {
            id: self.ids.next_id(),
            cantonese: cantonese.to_string(),
            meaning,
            note: note.to_string(),
            date: ids::today(),
        };

        let mut next = Vec::with_capacity(self.notes.len() + 1);
        next.push(entry.clone());
        next.extend(self.notes.iter().cloned());
        self.write(BlobName::CustomNotes, &next)?;
        self.notes = next;
        Ok(entry)
    }

    pub fn delete_note(&mut self, id: &str) -> Result<CustomNote, StoreError> {
        let pos = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| StoreError::NoteNotFound(id.to_string()))?;

        let mut next = self.notes.clone();
        let removed = next.remove(pos);
        self.write(BlobName::CustomNotes, &next)?;
        self.notes = next;
        Ok(removed)
    }
}

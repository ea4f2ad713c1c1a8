//! State of the "new phrase" form.
//!
//! Typing a meaning and leaving the field fills in the Cantonese text and its
//! romanization. Once the learner edits either derived field by hand, later
//! auto-fills leave that field alone. The edits are tracked with explicit
//! flags rather than by comparing against the last generated value.

use crate::jyutping::romanize;
use crate::phrase::translate;
use crate::store::NewPhrase;
use crate::unicode::is_romanization_char;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("enter the Cantonese text (or a meaning to derive it from)")]
    MissingCantonese,
    #[error("choose a category")]
    MissingCategory,
    #[error("romanization may only contain ASCII letters, digits and spaces: {0:?}")]
    InvalidJyutping(String),
}

#[derive(Debug, Clone, Default)]
pub struct PhraseDraft {
    meaning: String,
    cantonese: String,
    jyutping: String,
    category: String,
    cantonese_edited: bool,
    jyutping_edited: bool,
}

impl PhraseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    pub fn cantonese(&self) -> &str {
        &self.cantonese
    }

    pub fn jyutping(&self) -> &str {
        &self.jyutping
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_cantonese_edited(&self) -> bool {
        self.cantonese_edited
    }

    pub fn is_jyutping_edited(&self) -> bool {
        self.jyutping_edited
    }

    /// Update the meaning text. Nothing is derived until `commit_meaning`.
    pub fn set_meaning(&mut self, meaning: &str) {
        self.meaning = meaning.to_string();
    }

    /// The meaning field lost focus: derive the Cantonese text unless the
    /// learner has typed their own (an emptied field counts as not typed).
    pub fn commit_meaning(&mut self) {
        if self.meaning.is_empty() {
            return;
        }
        if self.cantonese.is_empty() || !self.cantonese_edited {
            let t = translate(&self.meaning);
            self.cantonese = t.cantonese;
            if !self.jyutping_edited {
                self.jyutping = t.jyutping;
            }
        }
    }

    /// Hand-edit the Cantonese text.
    pub fn set_cantonese(&mut self, text: &str) {
        self.cantonese = text.to_string();
        self.cantonese_edited = true;
        self.derive_jyutping();
    }

    /// Hand-edit the romanization. Rejected input leaves the field unchanged.
    pub fn set_jyutping(&mut self, text: &str) -> Result<(), DraftError> {
        if !text.chars().all(is_romanization_char) {
            return Err(DraftError::InvalidJyutping(text.to_string()));
        }
        self.jyutping = text.to_string();
        self.jyutping_edited = true;
        Ok(())
    }

    /// Throw away a hand-edited romanization and derive it again.
    pub fn reset_jyutping(&mut self) {
        self.jyutping_edited = false;
        self.derive_jyutping();
    }

    pub fn set_category(&mut self, category: &str) {
        self.category = category.to_string();
    }

    fn derive_jyutping(&mut self) {
        if !self.jyutping_edited {
            self.jyutping = romanize(&self.cantonese);
        }
    }

    /// Validate and produce the category name plus the phrase to add. A
    /// missing Cantonese text is derived from the meaning as a last resort.
    pub fn finish(&self) -> Result<(String, NewPhrase), DraftError> {
        let (cantonese, jyutping) = if self.cantonese.is_empty() && !self.meaning.is_empty() {
            let t = translate(&self.meaning);
            (t.cantonese, t.jyutping)
        } else {
            (self.cantonese.clone(), self.jyutping.clone())
        };

        if cantonese.trim().is_empty() {
            return Err(DraftError::MissingCantonese);
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(DraftError::MissingCategory);
        }

        Ok((
            category.to_string(),
            NewPhrase {
                cantonese,
                jyutping,
                meaning: self.meaning.clone(),
            },
        ))
    }

    /// Reset every field and flag, as after a successful add.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

use serde::{Deserialize, Deserializer, Serialize};

/// A learning entry: Cantonese text, its romanization and the meaning it was
/// derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub cantonese: String,
    #[serde(default)]
    pub jyutping: String,
    #[serde(default)]
    pub meaning: String,
}

/// Named group of phrases. The serialized shape is the import/export format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub category: String,
    pub items: Vec<Phrase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub artist: String,
    pub lyrics: String,
}

impl Song {
    /// Non-blank lyric lines, in order.
    pub fn lines(&self) -> Vec<&str> {
        self.lyrics
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect()
    }
}

/// A bookmarked phrase or lyric line, keyed by its Cantonese text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedWord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_string_or_number"
    )]
    pub id: Option<String>,
    pub cantonese: String,
    #[serde(default)]
    pub jyutping: String,
    #[serde(default)]
    pub meaning: String,
    /// RFC 3339 timestamp of when it was saved.
    #[serde(default)]
    pub date: String,
}

/// A free-form sentence the learner wrote down themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomNote {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub cantonese: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub date: String,
}

/// Fields of a phrase before it is assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewPhrase {
    pub cantonese: String,
    pub jyutping: String,
    pub meaning: String,
}

/// What gets bookmarked by `Library::toggle_save`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SaveRequest {
    pub id: Option<String>,
    pub cantonese: String,
    pub jyutping: String,
    pub meaning: String,
}

impl From<&Phrase> for SaveRequest {
    fn from(p: &Phrase) -> Self {
        Self {
            id: Some(p.id.clone()),
            cantonese: p.cantonese.clone(),
            jyutping: p.jyutping.clone(),
            meaning: p.meaning.clone(),
        }
    }
}

/// Older data files carry millisecond timestamps as bare JSON numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Str(String),
    Num(serde_json::Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Str(s) => s,
            RawId::Num(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    RawId::deserialize(d).map(String::from)
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(d).map(|raw| raw.map(String::from))
}

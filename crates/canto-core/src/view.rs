//! The four top-level views and the data the home view shows.

use std::fmt;
use std::str::FromStr;

use crate::settings::{settings, DailySettings};
use crate::store::{BlobStore, Library, SavedWord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Home,
    Conversations,
    Songs,
    Custom,
}

impl View {
    pub const ALL: [View; 4] = [View::Home, View::Conversations, View::Songs, View::Custom];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Conversations => "conversations",
            View::Songs => "songs",
            View::Custom => "custom",
        }
    }

    /// Tab label shown to the learner.
    pub fn label(self) -> &'static str {
        match self {
            View::Home => "首頁",
            View::Conversations => "對話",
            View::Songs => "歌曲",
            View::Custom => "自定義",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown view {0:?} (expected home, conversations, songs or custom)")]
pub struct UnknownView(pub String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        View::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s) || v.label() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct HomeSummary {
    pub saved_count: usize,
    pub song_count: usize,
    /// Most recently saved words, newest first.
    pub recent: Vec<SavedWord>,
    pub daily: DailySettings,
}

impl<S: BlobStore> Library<S> {
    pub fn home_summary(&self) -> HomeSummary {
        let saved = self.saved_words();
        let recent_n = settings().library.recent_saved;
        HomeSummary {
            saved_count: saved.len(),
            song_count: self.songs().len(),
            recent: saved.iter().rev().take(recent_n).cloned().collect(),
            daily: settings().daily.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBlobStore, SaveRequest};

    #[test]
    fn parse_views() {
        assert_eq!("home".parse::<View>().unwrap(), View::Home);
        assert_eq!(" Songs ".parse::<View>().unwrap(), View::Songs);
        assert_eq!("自定義".parse::<View>().unwrap(), View::Custom);
        assert_eq!(
            "lyrics".parse::<View>().unwrap_err(),
            UnknownView("lyrics".into())
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for v in View::ALL {
            assert_eq!(v.to_string().parse::<View>().unwrap(), v);
        }
        assert_eq!(View::default(), View::Home);
    }

    fn save(lib: &mut Library<MemoryBlobStore>, text: &str) {
        lib.toggle_save(SaveRequest {
            id: None,
            cantonese: text.into(),
            jyutping: String::new(),
            meaning: String::new(),
        })
        .unwrap();
    }

    #[test]
    fn home_summary_of_fresh_library() {
        let lib = Library::open(MemoryBlobStore::new()).unwrap();
        let home = lib.home_summary();
        assert_eq!(home.saved_count, 0);
        assert_eq!(home.song_count, 1);
        assert!(home.recent.is_empty());
        assert_eq!(home.daily.text, "世上無難事，只怕有心人");
    }

    #[test]
    fn home_summary_lists_newest_saved_first() {
        let mut lib = Library::open(MemoryBlobStore::new()).unwrap();
        for text in ["一", "二", "三", "四"] {
            save(&mut lib, text);
        }
        let home = lib.home_summary();
        assert_eq!(home.saved_count, 4);
        let recent: Vec<_> = home.recent.iter().map(|w| w.cantonese.as_str()).collect();
        assert_eq!(recent, ["四", "三", "二"]);
    }
}

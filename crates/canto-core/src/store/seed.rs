//! Starter content for a fresh library.

use super::types::{Category, Phrase, Song};

/// The builtin song is always listed first and cannot be deleted.
pub const BUILTIN_SONG_ID: &str = "song1";

pub fn builtin_song() -> Song {
    Song {
        id: BUILTIN_SONG_ID.to_string(),
        title: "月光光".to_string(),
        artist: "廣東童謠".to_string(),
        lyrics: include_str!("seed_lyrics.txt").to_string(),
    }
}

fn phrase(id: &str, cantonese: &str, jyutping: &str, meaning: &str) -> Phrase {
    Phrase {
        id: id.to_string(),
        cantonese: cantonese.to_string(),
        jyutping: jyutping.to_string(),
        meaning: meaning.to_string(),
    }
}

pub fn seed_categories() -> Vec<Category> {
    vec![
        Category {
            id: "c1".to_string(),
            category: "問候".to_string(),
            items: vec![
                phrase("g1", "你好", "nei5 hou2", "你好"),
                phrase("g2", "早晨", "zou2 san4", "早安"),
                phrase("g3", "食咗飯未呀？", "sik6 zo2 faan6 mei6 aa3?", "吃過飯了嗎？"),
                phrase("g4", "好耐冇見", "hou2 noi6 mou5 gin3", "好久不見"),
            ],
        },
        Category {
            id: "c2".to_string(),
            category: "購物".to_string(),
            items: vec![
                phrase("s1", "呢個幾多錢？", "ni1 go3 gei2 do1 cin2?", "這個多少錢？"),
                phrase("s2", "有無平啲呀？", "jau5 mou5 peng4 di1 aa3?", "有便宜一點的嗎？"),
                phrase("s3", "唔該", "m4 goi1", "謝謝/勞駕"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_phrases_are_non_empty() {
        for cat in seed_categories() {
            assert!(!cat.items.is_empty());
            assert!(cat.items.iter().all(|p| !p.cantonese.is_empty()));
        }
    }

    #[test]
    fn builtin_song_has_lines() {
        let song = builtin_song();
        assert_eq!(song.id, BUILTIN_SONG_ID);
        assert_eq!(song.lines().len(), 4);
    }
}

use canto_core::jyutping::JyutpingTable;
use canto_core::settings::settings;
use canto_core::speech::{CommandSpeaker, Speaker, Utterance};

pub fn romanize_cmd(text: &str) {
    let table = JyutpingTable::global();
    println!("{}", table.romanize(text));

    let unknown = table.unknown_chars(text);
    if !unknown.is_empty() {
        let list: String = unknown.iter().collect();
        eprintln!("(no reading for: {list})");
    }
}

pub fn translate_cmd(text: &str) {
    let t = canto_core::translate(text);
    println!("{}", t.cantonese);
    println!("{}", t.jyutping);
}

/// Speak `text` and wait for playback to finish.
pub fn speak_cmd(text: &str) {
    let mut speaker = CommandSpeaker::from_settings(&settings().speech);
    die!(speaker.speak(&Utterance::from_settings(text)), "Error: {}");
    die!(speaker.wait(), "Error: {}");
}

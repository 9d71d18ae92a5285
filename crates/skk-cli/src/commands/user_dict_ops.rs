use std::path::Path;
use std::process;

use skk_core::dict::{Lookup, Mutate};
use skk_core::settings::settings;
use skk_core::user_dict::UserDictionary;
use unicode_width::UnicodeWidthStr;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn default_user_dict_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    format!("{home}/.skk/{}", settings().dictionary.user_file)
}

fn open(path: &Path) -> UserDictionary {
    die!(
        UserDictionary::open(path, settings().dictionary.commit_interval),
        "Error opening user dictionary: {}"
    )
}

pub fn user_dict_add(path: &Path, reading: &str, candidate: &str) {
    let mut dict = open(path);
    let existed = dict
        .lookup(reading)
        .is_some_and(|cands| cands.first().is_some_and(|c| c.raw() == candidate));
    dict.record_choice(reading, candidate);
    die!(dict.flush(), "Error saving user dictionary: {}");
    if existed {
        println!("Already first: {reading} → {candidate}");
    } else {
        println!("Added: {reading} → {candidate}");
    }
}

pub fn user_dict_list(path: &Path) {
    let dict = open(path);
    let entries = die!(dict.entries(), "Error reading user dictionary: {}");
    if entries.is_empty() {
        println!("(empty)");
        return;
    }

    let width = entries
        .iter()
        .map(|(reading, _)| reading.width())
        .max()
        .unwrap_or(0);
    for (reading, candidates) in &entries {
        let pad = " ".repeat(width - reading.width());
        let texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
        println!("{reading}{pad}  {}", texts.join(" "));
    }
    println!("---");
    println!("{} entries", entries.len());
}

use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn romaji_export() {
    print!("{}", skk_core::romaji::default_toml());
}

pub fn romaji_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(skk_core::romaji::parse_romaji_toml(&content), "Error: {}");
    println!("OK: {} mappings", map.len());
}

pub fn settings_export() {
    print!("{}", skk_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        skk_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: input.punctuation={:?}, input.kana_key={}, dictionary.commit_interval={}, dictionary.completion_limit={}",
        s.input.punctuation, s.input.kana_key, s.dictionary.commit_interval, s.dictionary.completion_limit
    );
}

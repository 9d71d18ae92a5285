use std::fs;
use std::path::Path;
use std::process;

use serde::Serialize;
use skk_core::candidates::complete_keys;
use skk_core::dict::{source, Lookup, SystemDictionary};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Open a compiled dictionary, exiting when it cannot be used.
fn open_dict(dict_file: &str) -> SystemDictionary {
    let path = Path::new(dict_file);
    die!(
        SystemDictionary::try_open(path).map(|_| ()),
        "Error opening {dict_file}: {}"
    );
    SystemDictionary::open(path)
}

pub fn compile(input_file: &str, output_file: &str, encoding: &str) {
    let bytes = die!(fs::read(input_file), "Error reading {input_file}: {}");
    let text = die!(
        source::decode_text(&bytes, encoding),
        "Error decoding {input_file}: {}"
    );

    let import = source::parse_jisyo(&text);
    eprintln!(
        "Parsed {} readings ({} candidates), skipped {} lines",
        import.entries.len(),
        import.candidate_count(),
        import.skipped
    );

    let written = die!(
        source::write_dictionary(&import, Path::new(output_file)),
        "Error writing dictionary: {}"
    );

    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {output_file}: {written} entries ({:.1} MB)",
        file_size as f64 / 1_048_576.0
    );
}

#[derive(Serialize)]
struct LookupResult<'a> {
    reading: &'a str,
    candidates: Vec<LookupCandidate>,
}

#[derive(Serialize)]
struct LookupCandidate {
    text: String,
    annotation: Option<String>,
}

pub fn lookup(dict_file: &str, reading: &str, json: bool) {
    let dict = open_dict(dict_file);
    let candidates = dict.lookup(reading).unwrap_or_default();

    if json {
        let result = LookupResult {
            reading,
            candidates: candidates
                .into_iter()
                .map(|c| LookupCandidate {
                    text: c.text,
                    annotation: c.annotation,
                })
                .collect(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&result).expect("JSON serialization failed")
        );
        return;
    }

    if candidates.is_empty() {
        println!("{reading}: not found");
        return;
    }
    println!("{reading}: {} candidates", candidates.len());
    for (i, c) in candidates.iter().enumerate() {
        match &c.annotation {
            Some(note) => println!("  {:>3}. {}  ; {note}", i + 1, c.text),
            None => println!("  {:>3}. {}", i + 1, c.text),
        }
    }
}

pub fn complete(dict_file: &str, key: &str, limit: usize, literal: bool) {
    let dict = open_dict(dict_file);
    let keys = complete_keys(&dict, key, literal, limit);
    if keys.is_empty() {
        println!("(no completions)");
        return;
    }
    for k in &keys {
        println!("{k}");
    }
}

pub fn info(dict_file: &str) {
    let dict = open_dict(dict_file);
    let mut readings = 0usize;
    let mut okuri_ari = 0usize;
    let mut candidates = 0usize;
    let mut from = String::new();

    loop {
        let batch = dict.scan_from(&from, 1024);
        let Some((last, _)) = batch.last() else {
            break;
        };
        let next = format!("{last}\u{0}");
        for (key, value) in &batch {
            readings += 1;
            if key.chars().last().is_some_and(|c| c.is_ascii_alphabetic()) {
                okuri_ari += 1;
            }
            candidates += skk_core::dict::parse_raw_value(value).map_or(0, |v| v.len());
        }
        if batch.len() < 1024 {
            break;
        }
        from = next;
    }

    println!("Dictionary: {dict_file}");
    println!("  readings:   {readings} ({okuri_ari} okuri-ari)");
    println!("  candidates: {candidates}");
}

//! Import of SKK-JISYO text dictionaries into the redb store format.
//!
//! Each non-comment line reads `reading /cand1/cand2/.../`. Okuri-ari
//! readings end with the consonant marker (`かk`). Bracketed okurigana
//! blocks (`/[く/書/]/`) are dropped; only the plain candidate list is kept.

use std::collections::BTreeMap;
use std::path::Path;

use encoding_rs::Encoding;
use redb::Database;
use tracing::{debug, warn};

use super::store;
use super::{format_value, DictError};

/// Parsed dictionary text, ready to be written.
#[derive(Debug, Default)]
pub struct JisyoImport {
    pub entries: BTreeMap<String, Vec<String>>,
    /// Lines that were neither comments nor valid entries.
    pub skipped: usize,
}

impl JisyoImport {
    pub fn candidate_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// Decode raw dictionary bytes. SKK-JISYO files are traditionally EUC-JP.
pub fn decode_text(bytes: &[u8], label: &str) -> Result<String, DictError> {
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| DictError::Parse(format!("unknown encoding: {label}")))?;
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            encoding = used.name(),
            "malformed byte sequences replaced while decoding"
        );
    }
    Ok(text.into_owned())
}

/// Parse one line. Comments and blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<(String, Vec<String>)>, DictError> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() || line.starts_with(';') {
        return Ok(None);
    }
    let (key, value) = line
        .split_once(' ')
        .ok_or_else(|| DictError::Parse(format!("missing separator: {line}")))?;
    let value = value.trim();
    if key.is_empty() || !value.starts_with('/') || !value.ends_with('/') {
        return Err(DictError::Parse(format!("malformed entry: {line}")));
    }

    let mut candidates: Vec<String> = Vec::new();
    let mut in_okuri_block = false;
    for seg in value.split('/').skip(1) {
        if in_okuri_block {
            if seg == "]" {
                in_okuri_block = false;
            }
            continue;
        }
        if seg.starts_with('[') {
            in_okuri_block = true;
            continue;
        }
        if !seg.is_empty() && !candidates.iter().any(|c| c == seg) {
            candidates.push(seg.to_string());
        }
    }
    if candidates.is_empty() {
        return Err(DictError::Parse(format!("no candidates: {line}")));
    }
    Ok(Some((key.to_string(), candidates)))
}

/// Parse a whole dictionary text. Duplicate readings are merged in order of
/// appearance.
pub fn parse_jisyo(text: &str) -> JisyoImport {
    let mut import = JisyoImport::default();
    for (lineno, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some((key, candidates))) => {
                let slot = import.entries.entry(key).or_default();
                for c in candidates {
                    if !slot.contains(&c) {
                        slot.push(c);
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                debug!(line = lineno + 1, error = %e, "skipping dictionary line");
                import.skipped += 1;
            }
        }
    }
    import
}

/// Write `import` to a redb file at `path`, replacing any previous contents.
pub fn write_dictionary(import: &JisyoImport, path: &Path) -> Result<usize, DictError> {
    let db = Database::create(path).map_err(redb::Error::from)?;
    let rows: Vec<(&str, String)> = import
        .entries
        .iter()
        .map(|(k, v)| (k.as_str(), format_value(v)))
        .collect();
    let written = store::replace_all(&db, rows.iter().map(|(k, v)| (*k, v.as_str())))?;
    Ok(written)
}

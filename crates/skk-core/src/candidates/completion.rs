use crate::dict::Lookup;

/// Keys following `key` in store order, for completion suggestions.
///
/// The first scanned key is kept unless it equals `key`; the next `limit`
/// positions are then examined. Outside literal mode, a key that is exactly
/// one character longer than `key` and ends in an ASCII letter is skipped.
/// Those are okuri-ari readings (`かk`), not words. Skipped keys still use
/// up a position, and keys are not required to share `key` as a prefix.
pub fn complete_keys(dict: &dyn Lookup, key: &str, literal: bool, limit: usize) -> Vec<String> {
    let mut scanned = dict.scan_from(key, limit + 1).into_iter().map(|(k, _)| k);
    let Some(first) = scanned.next() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    if first != key {
        out.push(first);
    }

    let key_len = key.chars().count();
    for k in scanned {
        if !literal && is_okuri_marker_key(&k, key_len) {
            continue;
        }
        out.push(k);
    }
    out
}

fn is_okuri_marker_key(k: &str, key_len: usize) -> bool {
    let mut chars = k.chars();
    k.chars().count() == key_len + 1 && chars.nth(key_len).is_some_and(|c| c.is_ascii_alphabetic())
}

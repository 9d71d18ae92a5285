use std::collections::BTreeMap;
use std::sync::OnceLock;

use lexime_trie::{DoubleArray, TrieSearch};

use super::config::{parse_romaji_toml, RomajiConfigError};
use super::table::DEFAULT_TOML;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Debug, PartialEq)]
pub enum TrieLookupResult {
    None,
    Prefix,
    Exact(String),
    ExactAndPrefix(String),
}

pub struct RomajiTrie {
    da: DoubleArray<u8>,
    values: Vec<String>,
}

impl RomajiTrie {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RomajiConfigError> {
        // Validate eagerly
        parse_romaji_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RomajiConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static RomajiTrie {
        static INSTANCE: OnceLock<RomajiTrie> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let map = parse_romaji_toml(toml_str).expect("romaji TOML must be valid");
            RomajiTrie::from_map(&map)
        })
    }

    /// Build from a romaji → kana table. Value ids follow key order.
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        // BTreeMap iteration is sorted, which the double-array build requires.
        let keys: Vec<&[u8]> = map.keys().map(|r| r.as_bytes()).collect();
        let values: Vec<String> = map.values().cloned().collect();
        let da = DoubleArray::<u8>::build(&keys);
        RomajiTrie { da, values }
    }

    pub fn lookup(&self, romaji: &str) -> TrieLookupResult {
        let pr = self.da.probe(romaji.as_bytes());
        match (pr.value, pr.has_children) {
            (None, false) => TrieLookupResult::None,
            (None, true) => TrieLookupResult::Prefix,
            (Some(id), false) => TrieLookupResult::Exact(self.values[id as usize].clone()),
            (Some(id), true) => TrieLookupResult::ExactAndPrefix(self.values[id as usize].clone()),
        }
    }
}

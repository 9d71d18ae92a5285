//! Romaji-to-kana transliteration for SKK input.
//!
//! A trie built from a TOML table answers exact/prefix queries; the
//! [`Transliterator`] layers the incremental SKK rules on top of it: sokuon
//! (っ) on doubled consonants, hatsuon (ん) before consonants, and
//! full-width punctuation substitution.

mod config;
mod convert;
mod punctuation;
mod table;
mod trie;

pub use config::{parse_romaji_toml, RomajiConfigError};
pub use convert::{RomajiStep, Transliterator};
pub use punctuation::{full_width_symbol, PunctuationStyle};
pub use table::default_toml;
pub use trie::{RomajiTrie, TrieLookupResult};

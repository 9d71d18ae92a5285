//! Reading-keyed dictionary stores.
//!
//! Both stores keep SKK-style values (`/cand1/cand2/`) in a redb table named
//! `skk_dict`. `SystemDictionary` is read-only and degrades to empty when its
//! file is unusable; `UserDictionary` (see [`crate::user_dict`]) additionally
//! implements [`Mutate`] for learning.

mod entry;
pub mod source;
pub(crate) mod store;
mod system;
#[cfg(test)]
mod tests;

pub use entry::{format_value, parse_raw_value, parse_value, Candidate};
pub use system::SystemDictionary;

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("storage error: {0}")]
    Storage(#[from] redb::Error),

    #[error("dictionary table `{0}` not found")]
    MissingTable(&'static str),

    #[error("invalid candidate value: {0:?}")]
    InvalidValue(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Read access shared by the system and user stores.
pub trait Lookup: Send + Sync {
    /// Candidates stored under `key`. Absent keys, unreadable stores and
    /// malformed values all yield `None`.
    fn lookup(&self, key: &str) -> Option<Vec<Candidate>>;

    /// Up to `limit` `(key, raw value)` pairs in key order, starting at the
    /// first key not less than `from`.
    fn scan_from(&self, from: &str, limit: usize) -> Vec<(String, String)>;
}

/// Write access, implemented only by the user store.
pub trait Mutate {
    /// Put `candidate` at the front of the list stored for `reading`,
    /// dropping any earlier occurrence of the same value.
    fn record_choice(&mut self, reading: &str, candidate: &str);

    /// Force buffered writes to disk. Failures are logged, never returned.
    fn commit_changes(&mut self);
}

/// A store that can both answer lookups and learn from choices.
pub trait LearningStore: Lookup + Mutate {}

impl<T: Lookup + Mutate> LearningStore for T {}

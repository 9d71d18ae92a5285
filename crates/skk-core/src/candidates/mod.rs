//! Candidate assembly: merging the two stores and key completion.

mod completion;
mod merge;

pub use completion::complete_keys;
pub use merge::merge;

use crate::dict::{Candidate, Lookup};

/// Look `key` up in both stores and merge the results, user entries first.
/// `None` means neither store knows the key.
pub fn lookup_merged(system: &dyn Lookup, user: &dyn Lookup, key: &str) -> Option<Vec<Candidate>> {
    merge(system.lookup(key), user.lookup(key))
}

use std::collections::HashSet;

use crate::dict::Candidate;

/// Merge system and user candidates for one reading.
///
/// User candidates come first in their stored order; system candidates
/// follow in theirs. A display text appears at most once, keeping its first
/// occurrence. Returns `None` only when both sources are absent.
pub fn merge(
    system: Option<Vec<Candidate>>,
    user: Option<Vec<Candidate>>,
) -> Option<Vec<Candidate>> {
    if system.is_none() && user.is_none() {
        return None;
    }
    let mut seen: HashSet<String> = HashSet::new();
    let merged: Vec<Candidate> = user
        .into_iter()
        .flatten()
        .chain(system.into_iter().flatten())
        .filter(|c| seen.insert(c.text.clone()))
        .collect();
    Some(merged)
}

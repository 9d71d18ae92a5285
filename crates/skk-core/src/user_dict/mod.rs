//! Learning user dictionary.
//!
//! Every chosen candidate is promoted to the front of its reading's list.
//! Writes land in an in-memory overlay first and reach the redb file in one
//! transaction per flush: every `commit_interval` recorded choices, on an
//! explicit `commit_changes`, and when the dictionary is dropped. Losing the
//! overlay on abnormal termination is accepted.


use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::Path;

use redb::Database;
use tracing::{debug, error, info, warn};

use crate::dict::store;
use crate::dict::{format_value, parse_raw_value, Candidate, DictError, Lookup, Mutate};

const STORE: &str = "user";

pub struct UserDictionary {
    db: Database,
    /// Values written since the last successful flush, keyed by reading.
    pending: BTreeMap<String, String>,
    recorded: usize,
    commit_interval: usize,
}

impl UserDictionary {
    /// Open or create the user dictionary at `path`. A file without the
    /// dictionary table gets an empty one.
    pub fn open(path: &Path, commit_interval: usize) -> Result<Self, DictError> {
        let db = Database::create(path).map_err(redb::Error::from)?;
        if !store::table_exists(&db)? {
            store::ensure_table(&db)?;
            info!(path = %path.display(), "created empty user dictionary");
        }
        Ok(Self::with_db(db, commit_interval))
    }

    /// A user dictionary that lives only in memory.
    pub fn in_memory(commit_interval: usize) -> Result<Self, DictError> {
        let db = store::in_memory()?;
        store::ensure_table(&db)?;
        Ok(Self::with_db(db, commit_interval))
    }

    fn with_db(db: Database, commit_interval: usize) -> Self {
        Self {
            db,
            pending: BTreeMap::new(),
            recorded: 0,
            commit_interval: commit_interval.max(1),
        }
    }

    /// Number of readings with unflushed changes.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Write the overlay to disk. On failure the overlay is kept so a later
    /// flush can retry.
    pub fn flush(&mut self) -> Result<usize, DictError> {
        if self.pending.is_empty() {
            return Ok(0);
        }
        let written = store::write_all(
            &self.db,
            self.pending.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )?;
        self.pending.clear();
        debug!(written, "user dictionary flushed");
        Ok(written)
    }

    /// Every entry, overlay included, sorted by reading.
    pub fn entries(&self) -> Result<Vec<(String, Vec<Candidate>)>, DictError> {
        let mut merged: BTreeMap<String, String> = store::read_all(&self.db)?.into_iter().collect();
        for (k, v) in &self.pending {
            merged.insert(k.clone(), v.clone());
        }
        Ok(merged
            .into_iter()
            .filter_map(|(k, v)| store::decode_candidates(STORE, &k, &v).map(|c| (k, c)))
            .collect())
    }

    fn current_value(&self, key: &str) -> Option<String> {
        if let Some(v) = self.pending.get(key) {
            return Some(v.clone());
        }
        match store::read_value(&self.db, key) {
            Ok(v) => v,
            Err(e) => {
                warn!(key, error = %e, "user dictionary read failed");
                None
            }
        }
    }
}

impl Lookup for UserDictionary {
    fn lookup(&self, key: &str) -> Option<Vec<Candidate>> {
        let raw = self.current_value(key)?;
        store::decode_candidates(STORE, key, &raw)
    }

    fn scan_from(&self, from: &str, limit: usize) -> Vec<(String, String)> {
        let mut merged: BTreeMap<String, String> = store::scan_logged(&self.db, STORE, from, limit)
            .into_iter()
            .collect();
        let overlay = self
            .pending
            .range::<str, _>((Bound::Included(from), Bound::Unbounded));
        for (k, v) in overlay.take(limit) {
            merged.insert(k.clone(), v.clone());
        }
        merged.into_iter().take(limit).collect()
    }
}

impl Mutate for UserDictionary {
    fn record_choice(&mut self, reading: &str, candidate: &str) {
        if reading.is_empty() || candidate.is_empty() || candidate.contains('/') {
            warn!(reading, candidate, "refusing to store unrepresentable entry");
            return;
        }

        let mut values = vec![candidate.to_string()];
        if let Some(old) = self.current_value(reading) {
            match parse_raw_value(&old) {
                Ok(old) => values.extend(old.into_iter().filter(|v| v != candidate)),
                Err(e) => warn!(reading, error = %e, "replacing malformed user dictionary value"),
            }
        }
        self.pending
            .insert(reading.to_string(), format_value(&values));
        self.recorded += 1;
        debug!(reading, candidate, recorded = self.recorded, "recorded choice");

        if self.recorded % self.commit_interval == 0 {
            self.commit_changes();
        }
    }

    fn commit_changes(&mut self) {
        if let Err(e) = self.flush() {
            error!(pending = self.pending.len(), error = %e, "user dictionary flush failed");
        }
    }
}

impl Drop for UserDictionary {
    fn drop(&mut self) {
        self.commit_changes();
    }
}

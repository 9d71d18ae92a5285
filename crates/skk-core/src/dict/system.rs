use std::path::Path;

use redb::Database;
use tracing::{debug, warn};

use super::store::{self, TABLE_NAME};
use super::{format_value, Candidate, DictError, Lookup};

const STORE: &str = "system";

/// Read-only dictionary shipped with the engine.
///
/// A missing or unusable file is not an error: the dictionary simply answers
/// every query with nothing, leaving the user dictionary to carry on.
pub struct SystemDictionary {
    db: Option<Database>,
}

impl SystemDictionary {
    /// Open `path`, degrading to an empty dictionary on failure. The failure is
    /// logged once, here.
    pub fn open(path: &Path) -> Self {
        match Self::try_open(path) {
            Ok(db) => {
                debug!(path = %path.display(), "system dictionary opened");
                Self { db: Some(db) }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "system dictionary unavailable");
                Self::empty()
            }
        }
    }

    /// Open `path`, reporting why it cannot be used.
    pub fn try_open(path: &Path) -> Result<Database, DictError> {
        if !path.is_file() {
            return Err(DictError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }
        let db = Database::open(path).map_err(redb::Error::from)?;
        if !store::table_exists(&db)? {
            return Err(DictError::MissingTable(TABLE_NAME));
        }
        Ok(db)
    }

    pub fn empty() -> Self {
        Self { db: None }
    }

    /// Build an in-memory dictionary from `(reading, candidates)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, DictError>
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: AsRef<str>,
    {
        let db = store::in_memory()?;
        store::ensure_table(&db)?;
        let rows: Vec<(String, String)> = entries
            .into_iter()
            .map(|(key, cands)| (key.as_ref().to_string(), format_value(&cands)))
            .collect();
        store::write_all(&db, rows.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        Ok(Self { db: Some(db) })
    }

    pub fn is_available(&self) -> bool {
        self.db.is_some()
    }
}

impl Lookup for SystemDictionary {
    fn lookup(&self, key: &str) -> Option<Vec<Candidate>> {
        let db = self.db.as_ref()?;
        store::lookup_logged(db, STORE, key)
    }

    fn scan_from(&self, from: &str, limit: usize) -> Vec<(String, String)> {
        match &self.db {
            Some(db) => store::scan_logged(db, STORE, from, limit),
            None => Vec::new(),
        }
    }
}

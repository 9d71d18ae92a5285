//! Thin helpers over the redb table shared by both stores.

use redb::{Database, ReadableTable, TableDefinition, TableError};
use tracing::warn;

use super::{parse_value, Candidate};

/// Name of the table holding the reading → value mapping.
pub(crate) const TABLE_NAME: &str = "skk_dict";

pub(crate) const TABLE: TableDefinition<&str, &str> = TableDefinition::new(TABLE_NAME);

pub(crate) fn in_memory() -> Result<Database, redb::Error> {
    let backend = redb::backends::InMemoryBackend::new();
    Ok(Database::builder().create_with_backend(backend)?)
}

pub(crate) fn table_exists(db: &Database) -> Result<bool, redb::Error> {
    let txn = db.begin_read()?;
    match txn.open_table(TABLE) {
        Ok(_) => Ok(true),
        Err(TableError::TableDoesNotExist(_)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Create the table if missing.
pub(crate) fn ensure_table(db: &Database) -> Result<(), redb::Error> {
    let txn = db.begin_write()?;
    txn.open_table(TABLE)?;
    txn.commit()?;
    Ok(())
}

pub(crate) fn read_value(db: &Database, key: &str) -> Result<Option<String>, redb::Error> {
    let txn = db.begin_read()?;
    let table = txn.open_table(TABLE)?;
    let value = table.get(key)?.map(|v| v.value().to_string());
    Ok(value)
}

pub(crate) fn scan(
    db: &Database,
    from: &str,
    limit: usize,
) -> Result<Vec<(String, String)>, redb::Error> {
    let txn = db.begin_read()?;
    let table = txn.open_table(TABLE)?;
    let mut out = Vec::with_capacity(limit);
    for item in table.range(from..)?.take(limit) {
        let (k, v) = item?;
        out.push((k.value().to_string(), v.value().to_string()));
    }
    Ok(out)
}

pub(crate) fn read_all(db: &Database) -> Result<Vec<(String, String)>, redb::Error> {
    let txn = db.begin_read()?;
    let table = txn.open_table(TABLE)?;
    let mut out = Vec::new();
    for item in table.iter()? {
        let (k, v) = item?;
        out.push((k.value().to_string(), v.value().to_string()));
    }
    Ok(out)
}

/// Write all pairs in a single transaction. Returns the number written.
pub(crate) fn write_all<'a, I>(db: &Database, entries: I) -> Result<usize, redb::Error>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let txn = db.begin_write()?;
    let mut written = 0;
    {
        let mut table = txn.open_table(TABLE)?;
        for (k, v) in entries {
            table.insert(k, v)?;
            written += 1;
        }
    }
    txn.commit()?;
    Ok(written)
}

/// Parse a stored value, logging and discarding malformed ones.
pub(crate) fn decode_candidates(store: &str, key: &str, raw: &str) -> Option<Vec<Candidate>> {
    match parse_value(raw) {
        Ok(candidates) => Some(candidates),
        Err(e) => {
            warn!(store, key, error = %e, "ignoring malformed dictionary value");
            None
        }
    }
}

/// Exact lookup with read failures treated as "not found".
pub(crate) fn lookup_logged(db: &Database, store: &str, key: &str) -> Option<Vec<Candidate>> {
    match read_value(db, key) {
        Ok(Some(raw)) => decode_candidates(store, key, &raw),
        Ok(None) => None,
        Err(e) => {
            warn!(store, key, error = %e, "dictionary read failed");
            None
        }
    }
}

pub(crate) fn scan_logged(
    db: &Database,
    store: &str,
    from: &str,
    limit: usize,
) -> Vec<(String, String)> {
    scan(db, from, limit).unwrap_or_else(|e| {
        warn!(store, from, error = %e, "dictionary scan failed");
        Vec::new()
    })
}

/// Replace the whole table with `entries` in one transaction.
pub(crate) fn replace_all<'a, I>(db: &Database, entries: I) -> Result<usize, redb::Error>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let txn = db.begin_write()?;
    txn.delete_table(TABLE)?;
    let mut written = 0;
    {
        let mut table = txn.open_table(TABLE)?;
        for (k, v) in entries {
            table.insert(k, v)?;
            written += 1;
        }
    }
    txn.commit()?;
    Ok(written)
}

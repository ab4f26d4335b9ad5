//! Ledger state gateway
//!
//! The lifecycle engine consumes the ledger through a narrow key-value
//! gateway: fresh reads, a single terminal write per operation, and an
//! ordered range scan. Transaction ordering, consensus, and commit
//! semantics belong to the ledger itself and are out of scope here.
//!
//! Two adapters are provided:
//! - [`MemoryLedger`]: a `BTreeMap`-backed gateway with deterministic
//!   transaction ids, used by tests and embedded runs
//! - [`SqliteLedger`]: a durable gateway over SQLite with WAL mode
//!   (feature `sqlite`)

use std::collections::BTreeMap;
use std::ops::Bound;
use thiserror::Error;

#[cfg(feature = "sqlite")]
use rusqlite::{params, Connection, OpenFlags};
#[cfg(feature = "sqlite")]
use std::path::Path;
#[cfg(feature = "sqlite")]
use tracing::{debug, info};

/// Errors surfaced by a ledger gateway, passed through to callers unchanged.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ledger failure: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Key-value access to ledger-resident state.
///
/// Every read is a fresh lookup; implementations must not cache across
/// calls. `range_scan` returns entries in ascending key order over the
/// half-open interval `[start_key, end_key)`; an empty bound is open.
pub trait LedgerGateway {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn put(&mut self, key: &str, value: &[u8]) -> Result<()>;

    fn range_scan(&self, start_key: &str, end_key: &str) -> Result<Vec<(String, Vec<u8>)>>;

    /// Identifier of the transaction the current invocation runs under.
    fn current_transaction_id(&self) -> String;
}

/// In-memory gateway with deterministic transaction ids.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: BTreeMap<String, Vec<u8>>,
    tx_seq: u64,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl LedgerGateway for MemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.state.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.tx_seq += 1;
        self.state.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn range_scan(&self, start_key: &str, end_key: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let lower = if start_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start_key.to_string())
        };
        let upper = if end_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end_key.to_string())
        };

        Ok(self
            .state
            .range((lower, upper))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn current_transaction_id(&self) -> String {
        format!("tx-{:08}", self.tx_seq)
    }
}

/// Durable gateway over SQLite.
///
/// WAL journal mode keeps writes crash-safe; each `put` runs in its own
/// transaction so a failed write leaves no partial state.
#[cfg(feature = "sqlite")]
pub struct SqliteLedger {
    conn: Connection,
    node_id: String,
    tx_seq: u64,
}

#[cfg(feature = "sqlite")]
impl SqliteLedger {
    /// Create or open ledger state at the specified path.
    pub fn open(path: impl AsRef<Path>, node_id: impl Into<String>) -> Result<Self> {
        let node_id = node_id.into();
        let path = path.as_ref();

        info!(
            node_id = %node_id,
            path = %path.display(),
            "Opening ledger state"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::init_schema(&conn)?;

        Ok(Self {
            conn,
            node_id,
            tx_seq: 0,
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS ledger_state (
                state_key TEXT PRIMARY KEY,
                state_value BLOB NOT NULL
            );
            "#,
        )?;

        Ok(())
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }
}

#[cfg(feature = "sqlite")]
impl LedgerGateway for SqliteLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        use rusqlite::OptionalExtension;

        let value = self
            .conn
            .query_row(
                "SELECT state_value FROM ledger_state WHERE state_key = ?1",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO ledger_state (state_key, state_value) VALUES (?1, ?2)
            ON CONFLICT(state_key) DO UPDATE SET state_value = excluded.state_value
            "#,
            params![key, value],
        )?;
        tx.commit()?;

        self.tx_seq += 1;

        debug!(
            node_id = %self.node_id,
            key = %key,
            "Ledger state written"
        );

        Ok(())
    }

    fn range_scan(&self, start_key: &str, end_key: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT state_key, state_value FROM ledger_state
            WHERE (?1 = '' OR state_key >= ?1)
              AND (?2 = '' OR state_key < ?2)
            ORDER BY state_key ASC
            "#,
        )?;

        let entries = stmt
            .query_map(params![start_key, end_key], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn current_transaction_id(&self) -> String {
        format!("{}-tx-{:08}", self.node_id, self.tx_seq)
    }
}

//! `SQLite` storage for the session.
//!
//! Session fields are kept in a namespaced key-value `preferences` table so
//! the same file can hold other per-app settings later without a schema
//! change.

// SQLite operations need to hold the lock for the duration of the operation.
#![allow(clippy::significant_drop_tightening)]

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::error::{Result, SessionError};
use super::types::Session;

/// Namespace all session keys live under.
pub const PREFERENCES_NAMESPACE: &str = "com.cherami.cherami";

/// Key holding the session token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the logged-in handle.
pub const USERNAME_KEY: &str = "username";

/// `SQLite`-backed session store.
///
/// Thread-safe wrapper around a `SQLite` connection. Reads vastly outnumber
/// writes; a single mutex is enough.
///
/// Every call blocks on the mutex and on `SQLite`. Async callers run them
/// inline, which holds up a runtime worker only for a two-row lookup. Move
/// the calls to `tokio::task::spawn_blocking` if the store grows past the
/// session keys.
pub struct SessionStore {
    conn: Mutex<Connection>,
    namespace: String,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Opens (or creates) the store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or initialized.
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn, PREFERENCES_NAMESPACE)
    }

    /// Creates an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, PREFERENCES_NAMESPACE)
    }

    fn with_connection(conn: Connection, namespace: &str) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
            namespace: namespace.to_string(),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| SessionError::Storage(format!("Failed to acquire database lock: {e}")))
    }

    /// Initializes the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS preferences (
                namespace TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY (namespace, key)
            );
            ",
        )?;

        Ok(())
    }

    /// Returns the stored session.
    ///
    /// Missing keys yield absent fields; a fresh store returns
    /// [`Session::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self) -> Result<Session> {
        let conn = self.lock()?;

        Ok(Session {
            token: read_value(&conn, &self.namespace, TOKEN_KEY)?,
            username: read_value(&conn, &self.namespace, USERNAME_KEY)?,
        })
    }

    /// Replaces the stored session.
    ///
    /// Absent fields remove the corresponding key. Both keys are written in
    /// one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn set(&self, session: &Session) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        write_value(&tx, &self.namespace, TOKEN_KEY, session.token.as_deref())?;
        write_value(&tx, &self.namespace, USERNAME_KEY, session.username.as_deref())?;

        tx.commit()?;
        debug!(
            "event=session_set module=session status=ok authenticated={}",
            session.is_authenticated()
        );
        Ok(())
    }

    /// Removes the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn clear(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "DELETE FROM preferences WHERE namespace = ?1 AND key IN (?2, ?3)",
            params![&self.namespace, TOKEN_KEY, USERNAME_KEY],
        )?;

        debug!("event=session_clear module=session status=ok");
        Ok(())
    }
}

fn read_value(conn: &Connection, namespace: &str, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM preferences WHERE namespace = ?1 AND key = ?2",
            params![namespace, key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

fn write_value(conn: &Connection, namespace: &str, key: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(value) => {
            conn.execute(
                r"
                INSERT INTO preferences (namespace, key, value)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(namespace, key) DO UPDATE SET value = excluded.value
                ",
                params![namespace, key, value],
            )?;
        }
        None => {
            conn.execute(
                "DELETE FROM preferences WHERE namespace = ?1 AND key = ?2",
                params![namespace, key],
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_returns_empty_session() {
        let store = SessionStore::in_memory().unwrap();
        assert_eq!(store.get().unwrap(), Session::default());
    }

    #[test]
    fn set_and_get_session() {
        let store = SessionStore::in_memory().unwrap();
        let session = Session::new("abc", "bob");

        store.set(&session).unwrap();

        assert_eq!(store.get().unwrap(), session);
    }

    #[test]
    fn set_overwrites_existing() {
        let store = SessionStore::in_memory().unwrap();
        store.set(&Session::new("abc", "bob")).unwrap();
        store.set(&Session::new("def", "alice")).unwrap();

        let session = store.get().unwrap();
        assert_eq!(session.token(), Some("def"));
        assert_eq!(session.username(), Some("alice"));
    }

    #[test]
    fn set_with_absent_field_removes_key() {
        let store = SessionStore::in_memory().unwrap();
        store.set(&Session::new("abc", "bob")).unwrap();

        store
            .set(&Session {
                token: None,
                username: Some("bob".to_string()),
            })
            .unwrap();

        let session = store.get().unwrap();
        assert!(session.token().is_none());
        assert_eq!(session.username(), Some("bob"));
    }

    #[test]
    fn clear_removes_session() {
        let store = SessionStore::in_memory().unwrap();
        store.set(&Session::new("abc", "bob")).unwrap();

        store.clear().unwrap();

        assert_eq!(store.get().unwrap(), Session::default());
    }

    #[test]
    fn clear_on_empty_store_succeeds() {
        let store = SessionStore::in_memory().unwrap();
        store.clear().unwrap();
        assert!(!store.get().unwrap().is_authenticated());
    }

    #[test]
    fn clear_leaves_other_namespaces_alone() {
        let store = SessionStore::in_memory().unwrap();
        store.set(&Session::new("abc", "bob")).unwrap();
        {
            let conn = store.lock().unwrap();
            write_value(&conn, "other.app", TOKEN_KEY, Some("xyz")).unwrap();
        }

        store.clear().unwrap();

        let conn = store.lock().unwrap();
        assert_eq!(
            read_value(&conn, "other.app", TOKEN_KEY).unwrap(),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn debug_does_not_leak_connection() {
        let store = SessionStore::in_memory().unwrap();
        let debug_str = format!("{store:?}");
        assert!(debug_str.contains(PREFERENCES_NAMESPACE));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn inline_reads_from_runtime_tasks() {
        let store = std::sync::Arc::new(SessionStore::in_memory().unwrap());
        store.set(&Session::new("abc", "bob")).unwrap();

        let reads: Vec<_> = (0..8)
            .map(|_| {
                let store = std::sync::Arc::clone(&store);
                tokio::spawn(async move { store.get().unwrap() })
            })
            .collect();

        for read in reads {
            assert_eq!(read.await.unwrap().token.as_deref(), Some("abc"));
        }
    }
}

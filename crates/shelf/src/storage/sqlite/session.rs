//! Request-scoped SQLite sessions.
//!
//! Every repository operation opens its own connection through the
//! [`SessionFactory`] and closes it again when the operation finishes. No
//! connection is shared between requests.

use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use shelf_core::storage::{RepositoryError, Result};
use tokio_rusqlite::Connection;

use super::error::map_tokio_rusqlite_error;

/// Opens and closes sessions against a single database file.
#[derive(Debug, Clone)]
pub struct SessionFactory {
    path: PathBuf,
    busy_timeout: Duration,
    open_sessions: Arc<AtomicUsize>,
}

/// A connection owned by exactly one unit of work.
///
/// Dropping a session without calling [`SessionFactory::release`] still
/// closes the connection, since the driver thread exits once its handle is
/// gone.
pub struct Session {
    conn: Connection,
    _tracker: OpenSession,
}

/// Decrements the open-session count when dropped.
struct OpenSession(Arc<AtomicUsize>);

impl Drop for OpenSession {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SessionFactory {
    pub fn new(path: impl Into<PathBuf>, busy_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            busy_timeout,
            open_sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of sessions acquired but not yet released or dropped.
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }

    /// Opens a new session. The database file is created if it doesn't exist.
    pub async fn acquire(&self) -> Result<Session> {
        let conn = Connection::open(&self.path).await.map_err(|e| {
            RepositoryError::ConnectionFailed(format!(
                "Cannot open {}: {e}",
                self.path.display()
            ))
        })?;

        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        let session = Session {
            conn,
            _tracker: OpenSession(self.open_sessions.clone()),
        };

        let busy_timeout = self.busy_timeout;
        session
            .call(move |conn| {
                conn.busy_timeout(busy_timeout)
                    .map_err(tokio_rusqlite::Error::Rusqlite)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Session"))?;

        tracing::trace!(path = %self.path.display(), "Session acquired");

        Ok(session)
    }

    /// Closes a session.
    ///
    /// Failing to close is logged and otherwise ignored: the work done in the
    /// session has already succeeded or failed on its own.
    pub async fn release(&self, session: Session) {
        let Session { conn, _tracker } = session;

        if let Err(err) = conn.close().await {
            tracing::warn!(error = %err, "Failed to close session cleanly");
        }

        tracing::trace!(
            path = %self.path.display(),
            open = self.open_sessions().saturating_sub(1),
            "Session released"
        );
    }
}

impl Session {
    /// Runs a closure against the underlying connection on the driver thread.
    pub async fn call<F, R>(&self, function: F) -> std::result::Result<R, tokio_rusqlite::Error>
    where
        F: FnOnce(&mut rusqlite::Connection) -> std::result::Result<R, tokio_rusqlite::Error>
            + Send
            + 'static,
        R: Send + 'static,
    {
        self.conn.call(function).await
    }
}

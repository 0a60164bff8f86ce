//! Execution against a FairCom server.
//!
//! A [`Connection`] owns one login session on a [`Transport`]; cursors borrow
//! the connection, rewrite each statement for the configured dialect, and
//! turn the returned field-keyed records into positional rows.

pub mod cursor;
pub mod http;
pub mod transport;

pub use cursor::{ColumnDescription, Cursor, CursorState, Row};
pub use http::HttpTransport;
pub use transport::{Field, QueryResult, Record, Transport, TransportError};

use crate::config::ConnectOptions;
use crate::error::{FaircomError, FaircomResult};
use crate::transpiler::Dialect;

/// Interface version of the connection/cursor API.
pub const API_LEVEL: &str = "2.0";
/// Threads may share the module, but not connections.
pub const THREAD_SAFETY: u8 = 1;
/// `WHERE name = ?`
pub const PARAM_STYLE: &str = "qmark";

pub struct Connection<T: Transport> {
    transport: T,
    options: ConnectOptions,
    closed: bool,
}

impl Connection<HttpTransport> {
    /// Log in over HTTP at `options.endpoint()`.
    pub fn open(options: ConnectOptions) -> FaircomResult<Self> {
        let transport = HttpTransport::new(options.endpoint())?;
        Self::connect(options, transport)
    }
}

impl<T: Transport> Connection<T> {
    /// Log in once; the session is reused by every cursor.
    pub fn connect(options: ConnectOptions, mut transport: T) -> FaircomResult<Self> {
        tracing::debug!(
            host = %options.host,
            port = options.port,
            database = %options.database,
            "connecting"
        );
        transport.login(&options.username, &options.password)?;
        Ok(Self {
            transport,
            options,
            closed: false,
        })
    }

    pub fn cursor(&self) -> FaircomResult<Cursor<'_, T>> {
        self.ensure_open()?;
        Ok(Cursor::new(self))
    }

    /// Statements are auto-committed by the server.
    pub fn commit(&self) -> FaircomResult<()> {
        self.ensure_open()
    }

    pub fn rollback(&self) -> FaircomResult<()> {
        self.ensure_open()
    }

    /// End the session. Closing twice is fine.
    pub fn close(&mut self) -> FaircomResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.transport.close()?;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn database(&self) -> &str {
        &self.options.database
    }

    pub fn dialect(&self) -> Dialect {
        self.options.dialect
    }

    pub fn options(&self) -> &ConnectOptions {
        &self.options
    }

    // The JSON API exposes no catalog queries; callers get empty metadata.

    pub fn schema_names(&self) -> FaircomResult<Vec<String>> {
        self.ensure_open()?;
        Ok(Vec::new())
    }

    pub fn table_names(&self, _schema: Option<&str>) -> FaircomResult<Vec<String>> {
        self.ensure_open()?;
        Ok(Vec::new())
    }

    pub fn columns(&self, _table: &str) -> FaircomResult<Vec<ColumnDescription>> {
        self.ensure_open()?;
        Ok(Vec::new())
    }

    pub(crate) fn ensure_open(&self) -> FaircomResult<()> {
        if self.closed {
            Err(FaircomError::Programming("connection is closed".into()))
        } else {
            Ok(())
        }
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> Drop for Connection<T> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "failed to close session");
        }
    }
}

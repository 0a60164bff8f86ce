//! Row cursor over a [`Connection`].

use serde_json::Value as JsonValue;

use super::transport::{Field, Record, Transport};
use super::Connection;
use crate::ast::Params;
use crate::error::{FaircomError, FaircomResult};
use crate::rewriter::StatementRewriter;

/// A positional row, ordered like [`Cursor::description`].
pub type Row = Vec<JsonValue>;

/// Name and type code of one result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescription {
    pub name: String,
    pub type_code: String,
}

impl From<&Field> for ColumnDescription {
    fn from(field: &Field) -> Self {
        Self {
            name: field.name.clone(),
            type_code: field.type_code.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Unexecuted,
    Executed,
    /// Every row of the last result has been fetched.
    Exhausted,
    Closed,
}

pub struct Cursor<'c, T: Transport> {
    connection: &'c Connection<T>,
    rewriter: StatementRewriter,
    state: CursorState,
    description: Option<Vec<ColumnDescription>>,
    rows: Vec<Record>,
    position: usize,
    rowcount: i64,
    /// Default batch size for [`Cursor::fetchmany`].
    pub arraysize: usize,
}

impl<'c, T: Transport> Cursor<'c, T> {
    pub(crate) fn new(connection: &'c Connection<T>) -> Self {
        Self {
            connection,
            rewriter: StatementRewriter::new(connection.dialect()),
            state: CursorState::Unexecuted,
            description: None,
            rows: Vec::new(),
            position: 0,
            rowcount: -1,
            arraysize: 1,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Columns of the last result set; `None` for statements without one.
    pub fn description(&self) -> Option<&[ColumnDescription]> {
        self.description.as_deref()
    }

    /// Affected rows for writes, returned rows for reads, -1 before execute.
    pub fn rowcount(&self) -> i64 {
        self.rowcount
    }

    /// Prepare `sql` for FairCom and run it.
    ///
    /// `SELECT`/`WITH` statements go through the read call, everything else
    /// through the write call.
    pub fn execute(&mut self, sql: &str, params: impl Into<Params>) -> FaircomResult<()> {
        if self.state == CursorState::Closed {
            return Err(FaircomError::Programming("cursor is closed".into()));
        }
        self.connection.ensure_open()?;

        let (prepared, params) = self.rewriter.prepare(sql, params.into())?;
        let database = self.connection.database();
        let transport = self.connection.transport();

        let span = tracing::debug_span!("execute", read = is_read(&prepared));
        let _enter = span.enter();
        tracing::debug!(sql = %prepared, params = params.len(), "executing");

        let result = (if is_read(&prepared) {
            transport.execute_sql(database, &prepared, &params)
        } else {
            transport.run_sql_statements(database, &prepared, &params)
        })
        .map_err(|e| {
            tracing::warn!(error = %e, "statement failed");
            FaircomError::from(e)
        })?;

        self.description = if result.fields.is_empty() {
            None
        } else {
            Some(result.fields.iter().map(ColumnDescription::from).collect())
        };
        self.rowcount = result
            .affected_record_count
            .or(result.returned_record_count)
            .unwrap_or(result.data.len() as i64);
        self.rows = result.data;
        self.position = 0;
        self.state = CursorState::Executed;
        Ok(())
    }

    /// Run the same statement once per parameter set.
    pub fn executemany<I, P>(&mut self, sql: &str, param_sets: I) -> FaircomResult<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<Params>,
    {
        for params in param_sets {
            self.execute(sql, params)?;
        }
        Ok(())
    }

    /// Next row, or `None` once the result is exhausted.
    pub fn fetchone(&mut self) -> FaircomResult<Option<Row>> {
        match self.state {
            CursorState::Unexecuted => {
                return Err(FaircomError::Programming("no statement executed".into()));
            }
            CursorState::Closed => return Err(FaircomError::Programming("cursor is closed".into())),
            CursorState::Executed | CursorState::Exhausted => {}
        }

        let Some(record) = self.rows.get(self.position) else {
            self.state = CursorState::Exhausted;
            return Ok(None);
        };
        let row = self.to_row(record);
        self.position += 1;
        Ok(Some(row))
    }

    /// Up to `size` rows (default [`Cursor::arraysize`]).
    pub fn fetchmany(&mut self, size: Option<usize>) -> FaircomResult<Vec<Row>> {
        let size = size.unwrap_or(self.arraysize);
        let mut rows = Vec::with_capacity(size);
        while rows.len() < size {
            match self.fetchone()? {
                Some(row) => rows.push(row),
                None => break,
            }
        }
        Ok(rows)
    }

    pub fn fetchall(&mut self) -> FaircomResult<Vec<Row>> {
        let mut rows = Vec::new();
        while let Some(row) = self.fetchone()? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Drop the pending result. Closing twice is fine.
    pub fn close(&mut self) {
        self.rows.clear();
        self.description = None;
        self.state = CursorState::Closed;
    }

    fn to_row(&self, record: &Record) -> Row {
        match &self.description {
            Some(columns) => columns
                .iter()
                .map(|c| record.get(&c.name).cloned().unwrap_or(JsonValue::Null))
                .collect(),
            None => record.values().cloned().collect(),
        }
    }
}

/// Iterates remaining rows.
///
/// Iteration ends at the end of data and also on misuse (a cursor that was
/// never executed or is closed yields nothing). Call [`Cursor::fetchone`] to
/// see those errors.
impl<T: Transport> Iterator for Cursor<'_, T> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        match self.fetchone() {
            Ok(row) => row,
            Err(e) => {
                tracing::debug!(error = %e, "cursor iteration stopped");
                None
            }
        }
    }
}

fn is_read(sql: &str) -> bool {
    let head = sql.trim_start();
    ["SELECT", "WITH"].iter().any(|kw| {
        head.get(..kw.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(kw))
    })
}

//! The seam between the cursor and whatever talks to the server.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use crate::ast::Params;
use crate::error::FaircomError;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-zero `errorCode`.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<TransportError> for FaircomError {
    fn from(err: TransportError) -> Self {
        FaircomError::Database(err.to_string())
    }
}

/// One column of a result set, as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_code: String,
}

/// A field-keyed record.
pub type Record = Map<String, JsonValue>;

/// Result of a read or write call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub data: Vec<Record>,
    #[serde(default)]
    pub affected_record_count: Option<i64>,
    #[serde(default)]
    pub returned_record_count: Option<i64>,
}

/// Executes already-prepared SQL against a FairCom server.
///
/// Implementations are not expected to retry; a failure is reported once and
/// surfaced to the caller as a database error.
pub trait Transport {
    fn login(&mut self, username: &str, password: &str) -> Result<(), TransportError>;

    /// Run a query that returns rows.
    fn execute_sql(
        &self,
        database: &str,
        sql: &str,
        params: &Params,
    ) -> Result<QueryResult, TransportError>;

    /// Run DDL/DML.
    fn run_sql_statements(
        &self,
        database: &str,
        sql: &str,
        params: &Params,
    ) -> Result<QueryResult, TransportError>;

    fn close(&mut self) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_result_wire_shape() {
        let json = r#"{
            "fields": [{"name": "id", "type": "integer"}, {"name": "name", "type": "varchar"}],
            "data": [{"name": "a", "id": 1}],
            "returnedRecordCount": 1
        }"#;
        let result: QueryResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.fields[1].name, "name");
        assert_eq!(result.fields[0].type_code, "integer");
        assert_eq!(result.data[0]["id"], JsonValue::from(1));
        assert_eq!(result.returned_record_count, Some(1));
        assert_eq!(result.affected_record_count, None);
    }

    #[test]
    fn test_transport_error_becomes_database_error() {
        let err: FaircomError = TransportError::Api {
            code: 4001,
            message: "no such table".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Database error: API error 4001: no such table");
    }
}

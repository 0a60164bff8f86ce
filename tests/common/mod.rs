//! In-memory transport for cursor tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use faircom::ast::Params;
use faircom::engine::{QueryResult, Transport, TransportError};
use serde_json::json;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String, String),
    Read(String, Params),
    Write(String, Params),
    Close,
}

#[derive(Default)]
pub struct MockTransport {
    pub calls: Rc<RefCell<Vec<Call>>>,
    responses: RefCell<VecDeque<Result<QueryResult, TransportError>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, result: QueryResult) -> Self {
        self.responses.borrow_mut().push_back(Ok(result));
        self
    }

    pub fn fail(self, err: TransportError) -> Self {
        self.responses.borrow_mut().push_back(Err(err));
        self
    }

    fn next(&self) -> Result<QueryResult, TransportError> {
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(QueryResult::default()))
    }
}

impl Transport for MockTransport {
    fn login(&mut self, username: &str, password: &str) -> Result<(), TransportError> {
        self.calls
            .borrow_mut()
            .push(Call::Login(username.to_string(), password.to_string()));
        Ok(())
    }

    fn execute_sql(&self, _db: &str, sql: &str, params: &Params) -> Result<QueryResult, TransportError> {
        self.calls
            .borrow_mut()
            .push(Call::Read(sql.to_string(), params.clone()));
        self.next()
    }

    fn run_sql_statements(
        &self,
        _db: &str,
        sql: &str,
        params: &Params,
    ) -> Result<QueryResult, TransportError> {
        self.calls
            .borrow_mut()
            .push(Call::Write(sql.to_string(), params.clone()));
        self.next()
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.calls.borrow_mut().push(Call::Close);
        Ok(())
    }
}

/// Three people, with `data` keys deliberately out of field order.
pub fn people() -> QueryResult {
    serde_json::from_value(json!({
        "fields": [{"name": "id", "type": "integer"}, {"name": "name", "type": "varchar"}],
        "data": [
            {"name": "Ada", "id": 1},
            {"name": "Brian", "id": 2},
            {"id": 3, "name": "Cleo"}
        ],
        "returnedRecordCount": 3
    }))
    .unwrap()
}

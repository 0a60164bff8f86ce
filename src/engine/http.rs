//! JSON DB API over HTTP.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::transport::{QueryResult, Transport, TransportError};
use crate::ast::Params;

const API: &str = "db";

/// Request envelope shared by every action.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Request<'a> {
    api: &'static str,
    action: &'static str,
    params: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    auth_token: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Response<R> {
    result: Option<R>,
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    error_message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Session {
    auth_token: String,
}

/// Blocking [`Transport`] speaking the FairCom JSON DB API.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            auth_token: None,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn call<R: DeserializeOwned>(
        &self,
        action: &'static str,
        params: serde_json::Value,
    ) -> Result<Option<R>, TransportError> {
        let request = Request {
            api: API,
            action,
            params,
            auth_token: self.auth_token.as_deref(),
        };
        tracing::debug!(action, endpoint = %self.endpoint, "json api request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(|e| TransportError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(TransportError::Http(format!("{}: {}", status, body)));
        }

        let body: Response<R> = response
            .json()
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        if body.error_code != 0 {
            return Err(TransportError::Api {
                code: body.error_code,
                message: body.error_message,
            });
        }
        Ok(body.result)
    }

    fn sql_params(database: &str, params: &Params) -> serde_json::Value {
        let mut value = json!({ "databaseName": database });
        if !params.is_empty() {
            value["sqlParams"] = json!(params);
        }
        value
    }
}

impl Transport for HttpTransport {
    fn login(&mut self, username: &str, password: &str) -> Result<(), TransportError> {
        let session = self
            .call::<Session>(
                "createSession",
                json!({ "username": username, "password": password }),
            )?
            .ok_or_else(|| TransportError::Decode("createSession returned no result".into()))?;
        self.auth_token = Some(session.auth_token);
        Ok(())
    }

    fn execute_sql(
        &self,
        database: &str,
        sql: &str,
        params: &Params,
    ) -> Result<QueryResult, TransportError> {
        let mut body = Self::sql_params(database, params);
        body["sql"] = json!(sql);
        Ok(self.call("getRecordsUsingSql", body)?.unwrap_or_default())
    }

    fn run_sql_statements(
        &self,
        database: &str,
        sql: &str,
        params: &Params,
    ) -> Result<QueryResult, TransportError> {
        let mut body = Self::sql_params(database, params);
        body["sqlStatements"] = json!([sql]);
        Ok(self.call("runSqlStatements", body)?.unwrap_or_default())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        if self.auth_token.is_none() {
            return Ok(());
        }
        let result = self.call::<serde_json::Value>("deleteSession", json!({}));
        self.auth_token = None;
        result.map(|_| ())
    }
}

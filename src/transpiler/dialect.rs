use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::sql::offset_fetch::OffsetFetchGenerator;
use super::sql::top_skip::TopSkipGenerator;
use super::traits::SqlGenerator;
use crate::error::FaircomError;

/// Name the dialect registers under.
pub const DIALECT_NAME: &str = "faircom";
/// Driver the dialect is paired with.
pub const DRIVER_NAME: &str = "jsonapi";
/// Parser family the compiler descends from.
pub const PARSER_FAMILY: &str = "tsql";

/// FairCom pagination profiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// `SELECT TOP n SKIP m ...`
    #[default]
    TopSkip,
    /// `SELECT TOP n ...` / `... OFFSET m ROWS FETCH NEXT n ROWS ONLY`
    OffsetFetch,
}

impl Dialect {
    pub fn generator(&self) -> Box<dyn SqlGenerator> {
        match self {
            Dialect::TopSkip => Box::new(TopSkipGenerator),
            Dialect::OffsetFetch => Box::new(OffsetFetchGenerator),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::TopSkip => "top-skip",
            Dialect::OffsetFetch => "offset-fetch",
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = FaircomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top-skip" | "topskip" | "faircom" => Ok(Dialect::TopSkip),
            "offset-fetch" | "offsetfetch" | "tsql" => Ok(Dialect::OffsetFetch),
            other => Err(FaircomError::Config(format!("unknown dialect '{}'", other))),
        }
    }
}

/// Feature flags advertised to query builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub supports_statement_cache: bool,
    pub supports_alter: bool,
    pub supports_native_boolean: bool,
    pub supports_sequences: bool,
    pub supports_identity_columns: bool,
    pub supports_multivalues_insert: bool,
    pub supports_unicode_statements: bool,
    pub requires_name_normalize: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            supports_statement_cache: true,
            supports_alter: true,
            supports_native_boolean: false,
            supports_sequences: false,
            supports_identity_columns: true,
            supports_multivalues_insert: true,
            supports_unicode_statements: true,
            requires_name_normalize: true,
        }
    }
}

/// Resolve a registry name (`faircom`, `faircom+jsonapi`) to a dialect.
pub fn lookup(name: &str) -> Option<Dialect> {
    let (dialect, driver) = match name.split_once('+') {
        Some((d, drv)) => (d, Some(drv)),
        None => (name, None),
    };
    if !dialect.eq_ignore_ascii_case(DIALECT_NAME) {
        return None;
    }
    match driver {
        None => Some(Dialect::default()),
        Some(drv) if drv.eq_ignore_ascii_case(DRIVER_NAME) => Some(Dialect::default()),
        Some(_) => None,
    }
}

use super::expr::{ClauseValue, Expr};
use super::values::Value;

/// One entry of the projection list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: Expr,
    pub alias: Option<String>,
}

impl From<Expr> for SelectItem {
    fn from(expr: Expr) -> Self {
        Self { expr, alias: None }
    }
}

impl From<&str> for SelectItem {
    fn from(name: &str) -> Self {
        if name == "*" {
            Expr::Star.into()
        } else {
            Expr::col(name).into()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub expr: Expr,
    pub desc: bool,
}

/// A structured SELECT as produced by a query builder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStmt {
    pub distinct: bool,
    pub columns: Vec<SelectItem>,
    pub from: Option<String>,
    pub filters: Vec<Expr>,
    pub group_by: Vec<Expr>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<ClauseValue>,
    pub offset: Option<ClauseValue>,
}

impl SelectStmt {
    /// Start a `SELECT ... FROM table`.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            from: Some(table.into()),
            ..Default::default()
        }
    }

    pub fn columns<I, C>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<SelectItem>,
    {
        self.columns.extend(cols.into_iter().map(Into::into));
        self
    }

    pub fn column_as(mut self, expr: Expr, alias: impl Into<String>) -> Self {
        self.columns.push(SelectItem {
            expr,
            alias: Some(alias.into()),
        });
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn filter(mut self, expr: Expr) -> Self {
        self.filters.push(expr);
        self
    }

    pub fn group_by(mut self, expr: impl Into<Expr>) -> Self {
        self.group_by.push(expr.into());
        self
    }

    pub fn order_by(mut self, column: &str) -> Self {
        self.order_by.push(OrderBy {
            expr: Expr::col(column),
            desc: false,
        });
        self
    }

    pub fn order_by_desc(mut self, column: &str) -> Self {
        self.order_by.push(OrderBy {
            expr: Expr::col(column),
            desc: true,
        });
        self
    }

    pub fn limit(mut self, value: impl Into<ClauseValue>) -> Self {
        self.limit = Some(value.into());
        self
    }

    pub fn offset(mut self, value: impl Into<ClauseValue>) -> Self {
        self.offset = Some(value.into());
        self
    }
}

/// Column types the DDL compiler knows how to spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    SmallInt,
    Integer,
    BigInt,
    Boolean,
    Float,
    Double,
    Numeric(u8, u8),
    Varchar(Option<u32>),
    Text,
    Date,
    Time,
    Timestamp,
}

impl SqlType {
    pub fn is_integer(&self) -> bool {
        matches!(self, SqlType::SmallInt | SqlType::Integer | SqlType::BigInt)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: SqlType,
    pub primary_key: bool,
    /// Only honoured on integer primary keys.
    pub autoincrement: bool,
    pub nullable: bool,
    pub default: Option<Value>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, ty: SqlType) -> Self {
        Self {
            name: name.into(),
            ty,
            primary_key: false,
            autoincrement: true,
            nullable: true,
            default: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn no_autoincrement(mut self) -> Self {
        self.autoincrement = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Whether this column is emitted with `IDENTITY(1,1)`.
    pub fn is_identity(&self) -> bool {
        self.primary_key && self.autoincrement && self.ty.is_integer()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl CreateTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }
}

/// Any statement the dialect compiler can emit.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStmt),
    CreateTable(CreateTable),
    DropTable(String),
}

impl From<SelectStmt> for Statement {
    fn from(stmt: SelectStmt) -> Self {
        Statement::Select(stmt)
    }
}

impl From<CreateTable> for Statement {
    fn from(stmt: CreateTable) -> Self {
        Statement::CreateTable(stmt)
    }
}

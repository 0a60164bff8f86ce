use super::values::Value;

/// A bound parameter: rendered as a placeholder, carrying the value it was bound with.
#[derive(Debug, Clone, PartialEq)]
pub struct BindParam {
    /// Parameter key (used for diagnostics only).
    pub key: String,
    /// The value the caller originally bound.
    pub value: Value,
    /// Value after the builder's processing, when it differs from `value`.
    pub effective: Option<Value>,
}

impl BindParam {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            effective: None,
        }
    }

    /// Attach the processed value; pagination falls back to it when the
    /// original does not resolve to an integer.
    pub fn with_effective(mut self, value: impl Into<Value>) -> Self {
        self.effective = Some(value.into());
        self
    }
}

/// Binary operators understood by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Like,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::Lte => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Gte => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Like => "LIKE",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
        }
    }
}

/// Scalar expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `*`
    Star,
    /// Column reference, optionally qualified (`t.col`).
    Column(String),
    /// Literal embedded in the SQL text.
    Literal(Value),
    /// Bound parameter, rendered as `?` unless literal binds are requested.
    Param(BindParam),
    /// String concatenation (`a || b` in portable SQL).
    Concat(Vec<Expr>),
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    /// Function call. `CONCAT(...)` is rewritten into a `+` chain.
    Function { name: String, args: Vec<Expr> },
}

impl Expr {
    pub fn col(name: impl Into<String>) -> Self {
        Expr::Column(name.into())
    }

    pub fn lit(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn param(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::Param(BindParam::new(key, value))
    }

    pub fn func(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }

    pub fn binary(self, op: BinaryOp, right: impl Into<Expr>) -> Self {
        Expr::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right.into()),
        }
    }

    pub fn equals(self, right: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    pub fn concat(self, right: impl Into<Expr>) -> Self {
        match self {
            Expr::Concat(mut parts) => {
                parts.push(right.into());
                Expr::Concat(parts)
            }
            left => Expr::Concat(vec![left, right.into()]),
        }
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::Column(name.to_string())
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Literal(value)
    }
}

impl From<BindParam> for Expr {
    fn from(param: BindParam) -> Self {
        Expr::Param(param)
    }
}

/// A LIMIT or OFFSET node as handed over by a query builder.
///
/// The variants are the representations the extractor knows how to resolve,
/// tried in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseValue {
    /// Plain integer.
    Int(i64),
    /// Literal node exposing its value directly.
    Literal(Value),
    /// Bound parameter carrying an original (and possibly effective) value.
    Bound(BindParam),
    /// Limit/offset wrapper around another representation.
    Wrapped(Box<ClauseValue>),
    /// Arbitrary expression; resolved by rendering it with literal binds.
    Expr(Expr),
}

impl ClauseValue {
    pub fn wrap(inner: impl Into<ClauseValue>) -> Self {
        ClauseValue::Wrapped(Box::new(inner.into()))
    }
}

impl From<i64> for ClauseValue {
    fn from(n: i64) -> Self {
        ClauseValue::Int(n)
    }
}

impl From<i32> for ClauseValue {
    fn from(n: i32) -> Self {
        ClauseValue::Int(n as i64)
    }
}

impl From<u32> for ClauseValue {
    fn from(n: u32) -> Self {
        ClauseValue::Int(n as i64)
    }
}

impl From<BindParam> for ClauseValue {
    fn from(param: BindParam) -> Self {
        ClauseValue::Bound(param)
    }
}

impl From<Expr> for ClauseValue {
    fn from(expr: Expr) -> Self {
        ClauseValue::Expr(expr)
    }
}

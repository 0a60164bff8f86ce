//! Expression rendering.

use crate::ast::{BinaryOp, Expr, Value};

use super::sql::top_skip::TopSkipGenerator;
use super::traits::SqlGenerator;

/// Renders expressions, collecting bound values in placeholder order.
pub struct ExprWriter<'g> {
    generator: &'g dyn SqlGenerator,
    literal_binds: bool,
    params: Vec<Value>,
}

impl<'g> ExprWriter<'g> {
    pub fn new(generator: &'g dyn SqlGenerator, literal_binds: bool) -> Self {
        Self {
            generator,
            literal_binds,
            params: Vec::new(),
        }
    }

    pub fn into_params(self) -> Vec<Value> {
        self.params
    }

    pub fn write(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Star => "*".to_string(),
            Expr::Column(name) => self.generator.format_path(name),
            Expr::Literal(v) => v.to_literal(),
            Expr::Param(p) => {
                if self.literal_binds {
                    p.effective.as_ref().unwrap_or(&p.value).to_literal()
                } else {
                    self.params
                        .push(p.effective.clone().unwrap_or_else(|| p.value.clone()));
                    self.generator.placeholder().to_string()
                }
            }
            Expr::Concat(parts) => self.concat(parts),
            Expr::Function { name, args } if name.eq_ignore_ascii_case("concat") => {
                self.concat(args)
            }
            Expr::Function { name, args } => {
                let args: Vec<String> = args.iter().map(|a| self.write(a)).collect();
                format!("{}({})", name.to_uppercase(), args.join(", "))
            }
            Expr::Binary { left, op, right } => {
                let l = self.operand(left, *op);
                let r = self.operand(right, *op);
                format!("{} {} {}", l, op.as_sql(), r)
            }
        }
    }

    fn concat(&mut self, parts: &[Expr]) -> String {
        let mut flat = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                Expr::Concat(inner) => flat.push(self.concat(inner)),
                Expr::Function { name, args } if name.eq_ignore_ascii_case("concat") => {
                    flat.push(self.concat(args))
                }
                other => flat.push(self.operand(other, BinaryOp::Add)),
            }
        }
        flat.join(self.generator.concat_operator())
    }

    /// Nested binaries with a different operator get parenthesized.
    fn operand(&mut self, expr: &Expr, parent: BinaryOp) -> String {
        match expr {
            Expr::Binary { op, .. } if *op != parent => format!("({})", self.write(expr)),
            _ => self.write(expr),
        }
    }
}

/// Render an expression with every bound parameter inlined as a literal.
pub fn render_literal(expr: &Expr) -> String {
    ExprWriter::new(&TopSkipGenerator, true).write(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_uses_plus() {
        let e = Expr::col("first").concat(Expr::lit(" ")).concat(Expr::col("last"));
        assert_eq!(render_literal(&e), "first + ' ' + last");
    }

    #[test]
    fn test_concat_function_flattened() {
        let e = Expr::func("CONCAT", vec![Expr::col("a"), Expr::lit("-"), Expr::col("b")]);
        assert_eq!(render_literal(&e), "a + '-' + b");
    }

    #[test]
    fn test_modulo() {
        let e = Expr::col("id").binary(BinaryOp::Mod, Expr::lit(2));
        assert_eq!(render_literal(&e), "id % 2");
    }

    #[test]
    fn test_reserved_column_is_quoted() {
        assert_eq!(render_literal(&Expr::col("t.user")), "t.\"user\"");
    }

    #[test]
    fn test_params_collected_in_order() {
        let generator = TopSkipGenerator;
        let mut w = ExprWriter::new(&generator, false);
        let e = Expr::col("a")
            .equals(Expr::param("p1", 1))
            .binary(BinaryOp::And, Expr::col("b").equals(Expr::param("p2", "x")));
        assert_eq!(w.write(&e), "(a = ?) AND (b = ?)");
        assert_eq!(w.into_params(), vec![Value::Int(1), Value::from("x")]);
    }
}

//! SELECT SQL generation.

use crate::ast::{BinaryOp, Expr, SelectStmt};
use crate::error::FaircomResult;
use crate::extract::extract_opt;
use crate::transpiler::dialect::Dialect;
use crate::transpiler::expr::ExprWriter;
use crate::transpiler::pagination::Placement;
use crate::transpiler::{CompileOptions, Compiled};

pub fn build_select(
    stmt: &SelectStmt,
    dialect: Dialect,
    options: CompileOptions,
) -> FaircomResult<Compiled> {
    let generator = dialect.generator();
    let limit = extract_opt(stmt.limit.as_ref())?;
    let offset = extract_opt(stmt.offset.as_ref())?;
    let pagination = generator.pagination(limit, offset);

    let mut writer = ExprWriter::new(generator.as_ref(), options.literal_binds);
    let mut sql = String::from("SELECT ");

    // TOP/SKIP sits ahead of DISTINCT
    if let Some(clause) = &pagination {
        if clause.placement == Placement::PreColumns {
            sql.push_str(&clause.text);
            sql.push(' ');
        }
    }

    if stmt.distinct {
        sql.push_str("DISTINCT ");
    }

    if stmt.columns.is_empty() {
        sql.push('*');
    } else {
        let cols: Vec<String> = stmt
            .columns
            .iter()
            .map(|item| match &item.alias {
                Some(alias) => format!(
                    "{} AS {}",
                    writer.write(&item.expr),
                    generator.format_identifier(alias)
                ),
                None => writer.write(&item.expr),
            })
            .collect();
        sql.push_str(&cols.join(", "));
    }

    if let Some(table) = &stmt.from {
        sql.push_str(" FROM ");
        sql.push_str(&generator.format_path(table));
    }

    if !stmt.filters.is_empty() {
        let conds: Vec<String> = stmt
            .filters
            .iter()
            .map(|f| match f {
                Expr::Binary {
                    op: BinaryOp::Or, ..
                } if stmt.filters.len() > 1 => format!("({})", writer.write(f)),
                _ => writer.write(f),
            })
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&conds.join(" AND "));
    }

    if !stmt.group_by.is_empty() {
        let groups: Vec<String> = stmt.group_by.iter().map(|g| writer.write(g)).collect();
        sql.push_str(" GROUP BY ");
        sql.push_str(&groups.join(", "));
    }

    if !stmt.order_by.is_empty() {
        let orders: Vec<String> = stmt
            .order_by
            .iter()
            .map(|o| {
                let e = writer.write(&o.expr);
                if o.desc { format!("{} DESC", e) } else { e }
            })
            .collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&orders.join(", "));
    }

    if let Some(clause) = &pagination {
        if clause.placement == Placement::AfterOrderBy {
            sql.push(' ');
            sql.push_str(&clause.text);
        }
    }

    Ok(Compiled {
        sql,
        params: writer.into_params(),
    })
}

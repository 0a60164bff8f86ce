//! CREATE / DROP TABLE generation.

use crate::ast::{ColumnDef, CreateTable};
use crate::transpiler::dialect::Dialect;
use crate::transpiler::traits::SqlGenerator;

pub fn build_create_table(table: &CreateTable, dialect: Dialect) -> String {
    let generator = dialect.generator();
    let mut defs: Vec<String> = table
        .columns
        .iter()
        .map(|c| column_spec(c, generator.as_ref()))
        .collect();

    let pk: Vec<String> = table
        .columns
        .iter()
        .filter(|c| c.primary_key)
        .map(|c| generator.format_identifier(&c.name))
        .collect();
    if !pk.is_empty() {
        defs.push(format!("PRIMARY KEY ({})", pk.join(", ")));
    }

    format!(
        "CREATE TABLE {} ({})",
        generator.format_path(&table.name),
        defs.join(", ")
    )
}

pub fn build_drop_table(name: &str, dialect: Dialect) -> String {
    format!("DROP TABLE {}", dialect.generator().format_path(name))
}

/// `name TYPE [IDENTITY(1,1)] [DEFAULT v] [NOT NULL]`
fn column_spec(column: &ColumnDef, generator: &dyn SqlGenerator) -> String {
    let mut spec = format!(
        "{} {}",
        generator.format_identifier(&column.name),
        generator.type_name(&column.ty)
    );
    if column.is_identity() {
        spec.push(' ');
        spec.push_str(generator.identity_clause());
    }
    if let Some(default) = &column.default {
        spec.push_str(" DEFAULT ");
        spec.push_str(&default.to_literal());
    }
    if !column.nullable {
        spec.push_str(" NOT NULL");
    }
    spec
}

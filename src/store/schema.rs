//! SQL rendered from the attribute registry. Table and column names only
//! ever come from [`Category`] and [`Attribute`]; values are always bound.

use crate::model::{Attribute, Category};

pub const BUILDS_TABLE: &str = "builds";

/// `ground_speed, water_speed, ...` in canonical order.
pub fn stat_columns() -> String {
    Attribute::ALL
        .iter()
        .map(|a| a.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn stat_column_defs() -> String {
    Attribute::ALL
        .iter()
        .map(|a| format!("\t{} REAL NOT NULL DEFAULT 0", a))
        .collect::<Vec<_>>()
        .join(",\n")
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

pub fn component_table(category: Category) -> String {
    let size = if category == Category::Driver {
        ",\n\tsize TEXT"
    } else {
        ""
    };
    format!(
        "CREATE TABLE {} (\n\tid INTEGER PRIMARY KEY,\n{}{}\n)",
        category.table(),
        stat_column_defs(),
        size
    )
}

pub fn names_table(category: Category) -> String {
    format!(
        "CREATE TABLE {} (\n\tid INTEGER NOT NULL,\n\tname TEXT NOT NULL\n)",
        category.names_table()
    )
}

pub fn names_index(category: Category) -> String {
    format!(
        "CREATE INDEX {0}_id_idx ON {0} (id)",
        category.names_table()
    )
}

pub fn builds_table() -> String {
    let ids = Category::ALL
        .iter()
        .map(|c| format!("\t{} INTEGER NOT NULL", c.id_column()))
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "CREATE TABLE {} (\n\tid INTEGER PRIMARY KEY,\n{},\n{}\n)",
        BUILDS_TABLE,
        ids,
        stat_column_defs()
    )
}

pub fn insert_component(category: Category) -> String {
    let (size_col, extra) = if category == Category::Driver {
        (", size", 1)
    } else {
        ("", 0)
    };
    format!(
        "INSERT INTO {} (id, {}{}) VALUES ({})",
        category.table(),
        stat_columns(),
        size_col,
        placeholders(1 + Attribute::ALL.len() + extra)
    )
}

pub fn insert_name(category: Category) -> String {
    format!("INSERT INTO {} (id, name) VALUES (?, ?)", category.names_table())
}

pub fn insert_build() -> String {
    let ids = Category::ALL
        .iter()
        .map(|c| c.id_column())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} (id, {}, {}) VALUES ({})",
        BUILDS_TABLE,
        ids,
        stat_columns(),
        placeholders(1 + Category::ALL.len() + Attribute::ALL.len())
    )
}

pub fn select_components(category: Category) -> String {
    let size = if category == Category::Driver { ", size" } else { "" };
    format!(
        "SELECT id, {}{} FROM {} ORDER BY id",
        stat_columns(),
        size,
        category.table()
    )
}

pub fn select_names(category: Category) -> String {
    format!(
        "SELECT name FROM {} WHERE id = ? ORDER BY rowid",
        category.names_table()
    )
}

/// Build read with one `b.<column> >= ?` / `<= ?` clause per filter.
pub fn select_builds(conditions: &[(Attribute, &str)]) -> String {
    let ids = Category::ALL
        .iter()
        .map(|c| format!("b.{}", c.id_column()))
        .collect::<Vec<_>>()
        .join(", ");
    let stats = Attribute::ALL
        .iter()
        .map(|a| format!("b.{}", a))
        .collect::<Vec<_>>()
        .join(", ");
    let mut sql = format!("SELECT {}, {} FROM {} AS b", ids, stats, BUILDS_TABLE);

    if !conditions.is_empty() {
        let clauses = conditions
            .iter()
            .map(|(attribute, op)| format!("b.{} {} ?", attribute, op))
            .collect::<Vec<_>>()
            .join(" AND ");
        sql.push_str(" WHERE ");
        sql.push_str(&clauses);
    }

    sql.push_str(" ORDER BY b.id");
    sql
}

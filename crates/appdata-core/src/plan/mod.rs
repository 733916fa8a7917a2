//! Load plans
//!
//! A [`LoadPlan`] is everything the loader needs to replace the dataset: one
//! [`TableLoad`] per table, the statements that suspend integrity enforcement
//! before the load, and the post-commit statements. The post-commit work is
//! split: `reseed` re-anchors identity sequences and only ever follows a
//! commit, while `restore` undoes the suspensions and also runs after a
//! rollback.

pub mod catalog;
pub mod table;
pub mod value;

use std::collections::BTreeMap;

pub use table::Table;
pub use value::{BindValue, Row};

/// How a table's existing rows are discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Qualifier-free `DELETE`
    Delete,
    /// Whole-table truncation; used for the large review tables
    Truncate,
}

/// Delete statement, insert statement and row batch of one table
#[derive(Debug, Clone, PartialEq)]
pub struct TableLoad {
    pub table: Table,
    pub delete_mode: DeleteMode,
    pub delete_sql: String,
    pub insert_sql: String,
    pub rows: Vec<Row>,
}

impl TableLoad {
    /// Empty load unit for `table` using the catalog statements
    pub fn from_catalog(table: Table) -> Self {
        let statements = catalog::statements(table);
        Self {
            table,
            delete_mode: statements.delete_mode,
            delete_sql: statements.delete_sql.to_string(),
            insert_sql: statements.insert_sql.to_string(),
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadPlan {
    pub preload: Vec<String>,
    /// Kept in insert order
    pub tables: Vec<TableLoad>,
    pub reseed: Vec<String>,
    pub restore: Vec<String>,
}

impl LoadPlan {
    /// A plan with every table present, no rows, and the catalog's
    /// preload, reseed and restore statements
    pub fn empty() -> Self {
        Self {
            preload: catalog::PRELOAD.iter().map(|s| s.to_string()).collect(),
            tables: Table::INSERT_ORDER
                .into_iter()
                .map(TableLoad::from_catalog)
                .collect(),
            reseed: catalog::RESEED.iter().map(|s| s.to_string()).collect(),
            restore: catalog::RESTORE.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Post-commit statements in execution order: reseed, then restore
    pub fn postload(&self) -> impl Iterator<Item = &str> {
        self.reseed
            .iter()
            .chain(&self.restore)
            .map(String::as_str)
    }

    pub fn table(&self, table: Table) -> Option<&TableLoad> {
        self.tables.iter().find(|t| t.table == table)
    }

    pub fn table_mut(&mut self, table: Table) -> Option<&mut TableLoad> {
        self.tables.iter_mut().find(|t| t.table == table)
    }

    /// Row batch of `table`; empty if the plan has no unit for it
    pub fn rows(&self, table: Table) -> &[Row] {
        self.table(table).map(|t| t.rows.as_slice()).unwrap_or(&[])
    }

    /// Units in delete order (children first)
    pub fn delete_sequence(&self) -> impl Iterator<Item = &TableLoad> {
        Table::DELETE_ORDER
            .into_iter()
            .filter_map(move |t| self.table(t))
    }

    /// Units in insert order (parents first)
    pub fn insert_sequence(&self) -> impl Iterator<Item = &TableLoad> {
        Table::INSERT_ORDER
            .into_iter()
            .filter_map(move |t| self.table(t))
    }

    pub fn row_counts(&self) -> BTreeMap<Table, usize> {
        self.tables.iter().map(|t| (t.table, t.rows.len())).collect()
    }
}

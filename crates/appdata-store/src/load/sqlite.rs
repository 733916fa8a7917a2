//! SQLite implementation of the load session

use appdata_core::errors::ExError;
use appdata_core::{BindValue, Row};
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{Connection, ToSql, Transaction, TransactionBehavior};

use super::session::{LoadSession, SessionSource};
use crate::errors::{Result, SessionError};

/// Text form of timestamps in the store; sorts chronologically
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Binds a [`BindValue`] as a SQLite value
pub struct SqlBind<'a>(pub &'a BindValue);

impl ToSql for SqlBind<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            BindValue::Null => ToSqlOutput::Owned(Value::Null),
            BindValue::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            BindValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            BindValue::Timestamp(ts) => {
                ToSqlOutput::Owned(Value::Text(ts.format(TIMESTAMP_FORMAT).to_string()))
            }
        })
    }
}

/// A load session over a borrowed connection
///
/// The transaction is opened with `BEGIN IMMEDIATE`, taking the write lock
/// before the first delete so concurrent replacements queue instead of
/// failing halfway.
pub struct SqliteSession<'c> {
    conn: &'c Connection,
    tx: Option<Transaction<'c>>,
}

impl<'c> SqliteSession<'c> {
    pub fn new(conn: &'c Connection) -> Result<Self> {
        if !conn.is_autocommit() {
            return Err(SessionError::TransactionInProgress.into());
        }
        Ok(Self { conn, tx: None })
    }

    fn statement_error(err: impl Into<SessionError>, sql: &str) -> ExError {
        let err: SessionError = err.into();
        ExError::from(err).with_statement(sql)
    }
}

impl LoadSession for SqliteSession<'_> {
    fn begin(&mut self) -> Result<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(|e| Self::statement_error(e, "BEGIN IMMEDIATE"))?;
        self.tx = Some(tx);
        Ok(())
    }

    fn execute(&mut self, sql: &str) -> Result<usize> {
        self.conn
            .execute(sql, [])
            .map_err(|e| Self::statement_error(e, sql))
    }

    fn execute_many(&mut self, sql: &str, rows: &[Row]) -> Result<usize> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| Self::statement_error(e, sql))?;

        let mut affected = 0;
        for row in rows {
            let names: Vec<String> = row.names().map(|n| format!(":{}", n)).collect();
            let binds: Vec<SqlBind<'_>> = row.iter().map(|(_, v)| SqlBind(v)).collect();
            for name in &names {
                if stmt.parameter_index(name).ok().flatten().is_none() {
                    return Err(Self::statement_error(
                        SessionError::UnknownParameter {
                            name: name[1..].to_string(),
                        },
                        sql,
                    ));
                }
            }
            // bindings survive a statement reset, so an unbound parameter
            // would silently reuse the previous row's value
            for index in 1..=stmt.parameter_count() {
                let bound = stmt
                    .parameter_name(index)
                    .is_some_and(|p| names.iter().any(|n| n == p));
                if !bound {
                    return Err(Self::statement_error(
                        SessionError::MissingParameter {
                            name: stmt
                                .parameter_name(index)
                                .map_or_else(|| format!("?{}", index), str::to_string),
                        },
                        sql,
                    ));
                }
            }
            let params: Vec<(&str, &dyn ToSql)> = names
                .iter()
                .zip(&binds)
                .map(|(n, b)| (n.as_str(), b as &dyn ToSql))
                .collect();
            affected += stmt
                .execute(params.as_slice())
                .map_err(|e| Self::statement_error(e, sql))?;
        }
        Ok(affected)
    }

    fn commit(&mut self) -> Result<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| Self::statement_error(SessionError::NoTransaction, "COMMIT"))?;
        // a failed COMMIT drops `tx`, which rolls back
        tx.commit().map_err(|e| Self::statement_error(e, "COMMIT"))
    }

    fn rollback(&mut self) -> Result<()> {
        match self.tx.take() {
            Some(tx) => tx
                .rollback()
                .map_err(|e| Self::statement_error(e, "ROLLBACK")),
            None if !self.conn.is_autocommit() => self
                .conn
                .execute_batch("ROLLBACK")
                .map_err(|e| Self::statement_error(e, "ROLLBACK")),
            None => Ok(()),
        }
    }

    fn release(&mut self) -> Result<()> {
        // an unfinished transaction never outlives the session
        self.rollback()
    }
}

impl SessionSource for Connection {
    type Session<'a> = SqliteSession<'a>;

    fn acquire(&mut self) -> Result<SqliteSession<'_>> {
        SqliteSession::new(self)
    }
}

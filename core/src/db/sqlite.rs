// Bookshelf
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Common utilities to interact with an SQLite database.

use crate::db::{Db, DbError, DbResult, Executor, TxExecutor};
use async_trait::async_trait;
use log::{info, warn};
use sqlx::Transaction;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use time::Date;
use time::format_description::FormatItem;
use time::macros::format_description;

/// Format used to store dates as text, which is also the format SQLite's date functions expect.
const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Takes a raw SQLx error `e` and converts it to our generic error type.
///
/// Foreign key violations are reported as generic backend errors: the caller referenced a row
/// that does not exist or tried to delete a row that others still reference.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::RowNotFound => DbError::NotFound,
        e if e.to_string().contains("UNIQUE constraint failed") => DbError::AlreadyExists,
        e => DbError::BackendError(e.to_string()),
    }
}

/// Returns true if `conn_str` names an in-memory database.
fn is_in_memory(conn_str: &str) -> bool {
    conn_str.contains(":memory:") || conn_str.contains("mode=memory")
}

/// Opens a connection pool against the database at `conn_str`.
///
/// `conn_str` can be a path, a `sqlite:` URI or `:memory:`.  Foreign key enforcement is enabled
/// on every connection.
///
/// In-memory databases vanish when their last connection closes, so their pool holds a single
/// connection that is never recycled.  Callers must not hold more than one executor at a time
/// against them.  File-backed databases get a regular pool.
pub async fn connect(conn_str: &str) -> DbResult<SqliteDb> {
    let options = SqliteConnectOptions::from_str(conn_str)
        .map_err(map_sqlx_error)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool_options = if is_in_memory(conn_str) {
        SqlitePoolOptions::new().max_connections(1).idle_timeout(None).max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };
    let pool = pool_options.connect_with(options).await.map_err(map_sqlx_error)?;
    info!("Connected to SQLite database {}", conn_str);
    Ok(SqliteDb { pool })
}

/// A generic database executor implementation for SQLite.
#[derive(Debug)]
pub enum SqliteExecutor {
    /// An executor backed by a pool.  Operations issued via this executor aren't guaranteed to
    /// happen on the same connection.
    PoolExec(PoolConnection<Sqlite>),

    /// An executor backed by a transaction.
    TxExec(Transaction<'static, Sqlite>),
}

impl SqliteExecutor {
    /// Returns the raw connection to pass to `sqlx` queries.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        match self {
            SqliteExecutor::PoolExec(conn) => &mut **conn,
            SqliteExecutor::TxExec(tx) => &mut **tx,
        }
    }

    /// Commits the transaction if this executor is backed by one.
    ///
    /// Calling this on a non-transaction-based executor results in a panic.
    pub(super) async fn commit(self) -> DbResult<()> {
        match self {
            SqliteExecutor::PoolExec(_) => unreachable!("Do not call commit on direct executors"),
            SqliteExecutor::TxExec(tx) => tx.commit().await.map_err(map_sqlx_error),
        }
    }
}

/// A database instance backed by a SQLite database.
pub struct SqliteDb {
    /// Shared SQLite connection pool.  This is a cloneable type that all concurrent
    /// transactions can use concurrently.
    pool: SqlitePool,
}

impl Drop for SqliteDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("Dropping connection without having called close() first");
        }
    }
}

#[async_trait]
impl Db for SqliteDb {
    async fn ex(&self) -> DbResult<Executor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(Executor::Sqlite(SqliteExecutor::PoolExec(conn)))
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(TxExecutor(Executor::Sqlite(SqliteExecutor::TxExec(tx))))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Helper function to initialize the database with a `schema` made of multiple statements.
pub async fn run_schema(e: &mut SqliteExecutor, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(e.conn()).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Converts a date as extracted from the database into a `Date`.
pub fn build_date(raw: &str) -> DbResult<Date> {
    Date::parse(raw, DATE_FORMAT)
        .map_err(|e| DbError::DataIntegrityError(format!("Invalid date '{}': {}", raw, e)))
}

/// Converts a date into the textual representation stored in the database.
pub fn unpack_date(date: Date) -> String {
    date.format(DATE_FORMAT).expect("Dates with a four-digit year must always be formattable")
}

/// Test utilities for the SQLite connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Initializes an in-memory test database.
    pub async fn setup() -> SqliteDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        connect(":memory:").await.unwrap()
    }
}

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

//! Configuration of the server, read from environment variables.

#[cfg(feature = "postgres")]
use bookshelf_core::db::postgres::{PostgresDb, PostgresOptions};
#[cfg(any(feature = "sqlite", test))]
use bookshelf_core::db::sqlite;
use bookshelf_core::db::{Db, DbResult};
use bookshelf_core::env::get_optional_var;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

/// Prefix of the environment variables that configure the server.
const PREFIX: &str = "BOOKSHELF";

/// Prefix of the environment variables that configure the PostgreSQL connection.
#[cfg(feature = "postgres")]
const PGSQL_PREFIX: &str = "PGSQL_PROD";

/// Port to listen on when `BOOKSHELF_PORT` is not set.
const DEFAULT_PORT: u16 = 3000;

/// SQLite database to open when `BOOKSHELF_SQLITE_URI` is not set.
#[cfg(any(feature = "sqlite", test))]
const DEFAULT_SQLITE_URI: &str = "sqlite::memory:";

/// Database to connect to.
#[derive(Debug)]
pub enum DbConfig {
    /// A PostgreSQL server.
    #[cfg(feature = "postgres")]
    Postgres(PostgresOptions),

    /// A SQLite database, identified by its path or URI.
    #[cfg(any(feature = "sqlite", test))]
    Sqlite(String),
}

impl DbConfig {
    /// Opens the database described by this configuration.
    pub async fn connect(self) -> DbResult<Arc<dyn Db + Send + Sync>> {
        match self {
            #[cfg(feature = "postgres")]
            DbConfig::Postgres(opts) => Ok(Arc::new(PostgresDb::connect(opts)?)),

            #[cfg(any(feature = "sqlite", test))]
            DbConfig::Sqlite(uri) => Ok(Arc::new(sqlite::connect(&uri).await?)),
        }
    }
}

/// Configuration of the server.
#[derive(Debug)]
pub struct Config {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Database backing the service.
    pub db: DbConfig,
}

/// Reads the PostgreSQL connection options.
#[cfg(feature = "postgres")]
fn postgres_from_env() -> Result<DbConfig, String> {
    Ok(DbConfig::Postgres(PostgresOptions::from_env(PGSQL_PREFIX)?))
}

/// Fails because this build cannot talk to PostgreSQL.
#[cfg(not(feature = "postgres"))]
fn postgres_from_env() -> Result<DbConfig, String> {
    Err("PostgreSQL support is not compiled in".to_owned())
}

/// Reads the location of the SQLite database.
///
/// In-memory databases are served over a single connection, so requests against them are
/// serialized.  Point `BOOKSHELF_SQLITE_URI` at a file to get a regular pool.
#[cfg(any(feature = "sqlite", test))]
fn sqlite_from_env() -> Result<DbConfig, String> {
    let uri = get_optional_var::<String>(PREFIX, "SQLITE_URI")?
        .unwrap_or_else(|| DEFAULT_SQLITE_URI.to_owned());
    Ok(DbConfig::Sqlite(uri))
}

/// Fails because this build cannot talk to SQLite.
#[cfg(not(any(feature = "sqlite", test)))]
fn sqlite_from_env() -> Result<DbConfig, String> {
    Err("SQLite support is not compiled in".to_owned())
}

impl Config {
    /// Reads the configuration from `BOOKSHELF_*` variables and, for PostgreSQL, from
    /// `PGSQL_PROD_*` variables.
    pub fn from_env() -> Result<Self, String> {
        let port = get_optional_var::<u16>(PREFIX, "PORT")?.unwrap_or(DEFAULT_PORT);
        let ip = get_optional_var::<IpAddr>(PREFIX, "BIND")?
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

        let db = match get_optional_var::<String>(PREFIX, "DB")?.as_deref() {
            None | Some("postgres") => postgres_from_env()?,
            Some("sqlite") => sqlite_from_env()?,
            Some(other) => {
                return Err(format!("Unknown database type '{}' in {}_DB", other, PREFIX));
            }
        };

        Ok(Self { bind_addr: SocketAddr::new(ip, port), db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::db::Executor;

    /// Variables that can affect the configuration, all unset.
    const NO_VARS: [(&str, Option<&str>); 12] = [
        ("BOOKSHELF_PORT", None),
        ("BOOKSHELF_BIND", None),
        ("BOOKSHELF_DB", None),
        ("BOOKSHELF_SQLITE_URI", None),
        ("PGSQL_PROD_HOST", None),
        ("PGSQL_PROD_PORT", None),
        ("PGSQL_PROD_DATABASE", None),
        ("PGSQL_PROD_USERNAME", None),
        ("PGSQL_PROD_PASSWORD", None),
        ("PGSQL_PROD_MIN_CONNECTIONS", None),
        ("PGSQL_PROD_MAX_CONNECTIONS", None),
        ("PGSQL_PROD_MAX_RETRIES", None),
    ];

    /// Runs `f` with all configuration variables unset except for those in `overrides`.
    fn with_config_vars<F: FnOnce()>(overrides: &[(&'static str, &'static str)], f: F) {
        let mut vars = NO_VARS.to_vec();
        for &(name, value) in overrides {
            vars.retain(|&(n, _)| n != name);
            vars.push((name, Some(value)));
        }
        temp_env::with_vars(vars, f);
    }

    #[test]
    fn test_sqlite_defaults() {
        with_config_vars(&[("BOOKSHELF_DB", "sqlite")], || {
            let config = Config::from_env().unwrap();
            assert_eq!(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000), config.bind_addr);
            match config.db {
                DbConfig::Sqlite(uri) => assert_eq!("sqlite::memory:", uri),
                #[allow(unreachable_patterns)]
                db => panic!("Unexpected database config {:?}", db),
            }
        });
    }

    #[test]
    fn test_sqlite_all_set() {
        let overrides = [
            ("BOOKSHELF_PORT", "8080"),
            ("BOOKSHELF_BIND", "0.0.0.0"),
            ("BOOKSHELF_DB", "sqlite"),
            ("BOOKSHELF_SQLITE_URI", "/tmp/books.db"),
        ];
        with_config_vars(&overrides, || {
            let config = Config::from_env().unwrap();
            assert_eq!("0.0.0.0:8080".parse::<SocketAddr>().unwrap(), config.bind_addr);
            match config.db {
                DbConfig::Sqlite(uri) => assert_eq!("/tmp/books.db", uri),
                #[allow(unreachable_patterns)]
                db => panic!("Unexpected database config {:?}", db),
            }
        });
    }

    #[test]
    fn test_invalid_port() {
        with_config_vars(&[("BOOKSHELF_DB", "sqlite"), ("BOOKSHELF_PORT", "http")], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.contains("BOOKSHELF_PORT"), "{}", err);
        });
    }

    #[test]
    fn test_invalid_bind() {
        with_config_vars(&[("BOOKSHELF_DB", "sqlite"), ("BOOKSHELF_BIND", "localhost")], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.contains("BOOKSHELF_BIND"), "{}", err);
        });
    }

    #[test]
    fn test_unknown_db() {
        with_config_vars(&[("BOOKSHELF_DB", "mysql")], || {
            assert_eq!(
                "Unknown database type 'mysql' in BOOKSHELF_DB",
                Config::from_env().unwrap_err()
            );
        });
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_postgres_is_default() {
        let overrides = [
            ("PGSQL_PROD_HOST", "db.example.com"),
            ("PGSQL_PROD_PORT", "5433"),
            ("PGSQL_PROD_DATABASE", "books"),
            ("PGSQL_PROD_USERNAME", "librarian"),
            ("PGSQL_PROD_PASSWORD", "secret"),
        ];
        with_config_vars(&overrides, || {
            let config = Config::from_env().unwrap();
            match config.db {
                DbConfig::Postgres(opts) => {
                    assert_eq!("db.example.com", opts.host);
                    assert_eq!(5433, opts.port);
                    assert_eq!("books", opts.database);
                    assert_eq!("librarian", opts.username);
                    assert_eq!("secret", opts.password);
                }
                db => panic!("Unexpected database config {:?}", db),
            }
        });
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_postgres_missing_vars() {
        with_config_vars(&[("BOOKSHELF_DB", "postgres")], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.contains("PGSQL_PROD_HOST"), "{}", err);
        });
    }

    #[cfg(not(feature = "postgres"))]
    #[test]
    fn test_postgres_not_compiled_in() {
        with_config_vars(&[], || {
            assert_eq!("PostgreSQL support is not compiled in", Config::from_env().unwrap_err());
        });
    }

    #[tokio::test]
    async fn test_connect_sqlite() {
        let db = DbConfig::Sqlite(":memory:".to_owned()).connect().await.unwrap();
        match db.ex().await.unwrap() {
            Executor::Sqlite(_) => (),
            #[allow(unreachable_patterns)]
            _ => panic!("Expected a SQLite executor"),
        }
        db.close().await;
    }
}

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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::{Author, AuthorId, Book, BookId, PublicationDate};
#[cfg(feature = "postgres")]
use bookshelf_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use bookshelf_core::db::sqlite::{self, build_date};
use bookshelf_core::db::{DbError, DbResult, Executor};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
#[cfg(feature = "postgres")]
use time::Date;

mod authors;
pub(crate) use authors::*;
mod books;
pub(crate) use books::*;

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Author {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let first_name: String = row.try_get("first_name").map_err(postgres::map_sqlx_error)?;
        let last_name: String = row.try_get("last_name").map_err(postgres::map_sqlx_error)?;

        Ok(Author::new(AuthorId::new(id), first_name, last_name))
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Book {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(postgres::map_sqlx_error)?;
        let date_published: Date =
            row.try_get("date_published").map_err(postgres::map_sqlx_error)?;
        let is_fiction: bool = row.try_get("is_fiction").map_err(postgres::map_sqlx_error)?;
        let author_id: i32 = row.try_get("author_id").map_err(postgres::map_sqlx_error)?;
        let first_name: String = row.try_get("first_name").map_err(postgres::map_sqlx_error)?;
        let last_name: String = row.try_get("last_name").map_err(postgres::map_sqlx_error)?;

        let author = Author::new(AuthorId::new(author_id), first_name, last_name);
        Ok(Book::new(
            BookId::new(id),
            title,
            PublicationDate::from_date(date_published),
            is_fiction,
            author,
        ))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Author {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let first_name: String = row.try_get("first_name").map_err(sqlite::map_sqlx_error)?;
        let last_name: String = row.try_get("last_name").map_err(sqlite::map_sqlx_error)?;

        Ok(Author::new(AuthorId::new(id), first_name, last_name))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Book {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(sqlite::map_sqlx_error)?;
        let date_published: String =
            row.try_get("date_published").map_err(sqlite::map_sqlx_error)?;
        let is_fiction: bool = row.try_get("is_fiction").map_err(sqlite::map_sqlx_error)?;
        let author_id: i32 = row.try_get("author_id").map_err(sqlite::map_sqlx_error)?;
        let first_name: String = row.try_get("first_name").map_err(sqlite::map_sqlx_error)?;
        let last_name: String = row.try_get("last_name").map_err(sqlite::map_sqlx_error)?;

        let author = Author::new(AuthorId::new(author_id), first_name, last_name);
        Ok(Book::new(
            BookId::new(id),
            title,
            PublicationDate::from_date(build_date(&date_published)?),
            is_fiction,
            author,
        ))
    }
}

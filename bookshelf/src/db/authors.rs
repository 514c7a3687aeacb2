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

//! Operations on the `authors` table.

use crate::model::{Author, AuthorId, AuthorPatch, NewAuthor};
#[cfg(feature = "postgres")]
use bookshelf_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use bookshelf_core::db::sqlite;
use bookshelf_core::db::{DbError, DbResult, Executor};
use futures::TryStreamExt;

/// Gets all authors, sorted by their identifier.
pub(crate) async fn list_authors(ex: &mut Executor) -> DbResult<Vec<Author>> {
    let query_str = "SELECT id, first_name, last_name FROM authors ORDER BY id";
    let mut authors = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                authors.push(Author::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                authors.push(Author::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(authors)
}

/// Gets the author identified by `id`, or `None` if it does not exist.
pub(crate) async fn get_author(ex: &mut Executor, id: AuthorId) -> DbResult<Option<Author>> {
    let row = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, first_name, last_name FROM authors WHERE id = $1";
            sqlx::query(query_str)
                .bind(id.as_i32())
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .map(Author::try_from)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, first_name, last_name FROM authors WHERE id = ?";
            sqlx::query(query_str)
                .bind(id.as_i32())
                .fetch_optional(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
                .map(Author::try_from)
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    row.transpose()
}

/// Creates a new author from `author` and returns it with its newly-assigned identifier.
pub(crate) async fn create_author(ex: &mut Executor, author: &NewAuthor) -> DbResult<Author> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO authors (first_name, last_name) VALUES ($1, $2)
                RETURNING id, first_name, last_name";
            let row = sqlx::query(query_str)
                .bind(author.first_name().as_str())
                .bind(author.last_name().as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Author::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO authors (first_name, last_name) VALUES (?, ?)
                RETURNING id, first_name, last_name";
            let row = sqlx::query(query_str)
                .bind(author.first_name().as_str())
                .bind(author.last_name().as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Author::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Applies `patch` to the existing author `id` and returns the author after the update.
pub(crate) async fn update_author(
    ex: &mut Executor,
    patch: &AuthorPatch,
    id: AuthorId,
) -> DbResult<Author> {
    let row = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE authors
                SET first_name = COALESCE($1, first_name), last_name = COALESCE($2, last_name)
                WHERE id = $3
                RETURNING id, first_name, last_name";
            sqlx::query(query_str)
                .bind(patch.first_name().as_deref())
                .bind(patch.last_name().as_deref())
                .bind(id.as_i32())
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .map(Author::try_from)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE authors
                SET first_name = COALESCE(?, first_name), last_name = COALESCE(?, last_name)
                WHERE id = ?
                RETURNING id, first_name, last_name";
            sqlx::query(query_str)
                .bind(patch.first_name().as_deref())
                .bind(patch.last_name().as_deref())
                .bind(id.as_i32())
                .fetch_optional(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
                .map(Author::try_from)
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    row.unwrap_or(Err(DbError::NotFound))
}

/// Deletes the existing author `id`.
///
/// Fails if any book still references the author.
pub(crate) async fn delete_author(ex: &mut Executor, id: AuthorId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM authors WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i32())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM authors WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_i32())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}

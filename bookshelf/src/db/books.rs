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

//! Operations on the `books` table.

use crate::model::{AuthorId, Book, BookId, BookPatch, NewBook};
#[cfg(feature = "postgres")]
use bookshelf_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use bookshelf_core::db::sqlite::{self, unpack_date};
use bookshelf_core::db::{DbError, DbResult, Executor};
use futures::TryStreamExt;
use sqlx::Row;

/// Query prefix that reads books joined with their authors.
const SELECT_BOOKS: &str = "
    SELECT b.id, b.title, b.date_published, b.is_fiction,
        a.id AS author_id, a.first_name, a.last_name
    FROM books b JOIN authors a ON a.id = b.author_id";

/// Gets all books, sorted by their identifier.
pub(crate) async fn list_books(ex: &mut Executor) -> DbResult<Vec<Book>> {
    let query_str = format!("{} ORDER BY b.id", SELECT_BOOKS);
    let mut books = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let mut rows = sqlx::query(&query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                books.push(Book::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let mut rows = sqlx::query(&query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                books.push(Book::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(books)
}

/// Gets the book identified by `id`.
pub(crate) async fn get_book(ex: &mut Executor, id: BookId) -> DbResult<Book> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!("{} WHERE b.id = $1", SELECT_BOOKS);
            let row = sqlx::query(&query_str)
                .bind(id.as_i32())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Book::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!("{} WHERE b.id = ?", SELECT_BOOKS);
            let row = sqlx::query(&query_str)
                .bind(id.as_i32())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Book::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Creates a new book from `book` and returns it with its newly-assigned identifier.
///
/// The author referenced by the book must exist.
pub(crate) async fn create_book(ex: &mut Executor, book: &NewBook) -> DbResult<Book> {
    let id: i32 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO books (title, date_published, is_fiction, author_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(book.title().as_str())
                .bind(book.date_published().as_date())
                .bind(*book.is_fiction())
                .bind(book.author_id().as_i32())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO books (title, date_published, is_fiction, author_id)
                VALUES (?, ?, ?, ?)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(book.title().as_str())
                .bind(unpack_date(book.date_published().as_date()))
                .bind(*book.is_fiction())
                .bind(book.author_id().as_i32())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("id").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    get_book(ex, BookId::new(id)).await
}

/// Applies `patch` to the existing book `id` and returns the book after the update.
///
/// If the patch changes the author, the new author must exist.
pub(crate) async fn update_book(
    ex: &mut Executor,
    patch: &BookPatch,
    id: BookId,
) -> DbResult<Book> {
    let author_id = patch.author_id().map(AuthorId::as_i32);

    let updated = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE books
                SET
                    title = COALESCE($1, title),
                    date_published = COALESCE($2, date_published),
                    is_fiction = COALESCE($3, is_fiction),
                    author_id = COALESCE($4, author_id)
                WHERE id = $5
                RETURNING id";
            sqlx::query(query_str)
                .bind(patch.title().as_deref())
                .bind(patch.date_published().map(|d| d.as_date()))
                .bind(*patch.is_fiction())
                .bind(author_id)
                .bind(id.as_i32())
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .is_some()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE books
                SET
                    title = COALESCE(?, title),
                    date_published = COALESCE(?, date_published),
                    is_fiction = COALESCE(?, is_fiction),
                    author_id = COALESCE(?, author_id)
                WHERE id = ?
                RETURNING id";
            sqlx::query(query_str)
                .bind(patch.title().as_deref())
                .bind(patch.date_published().map(|d| unpack_date(d.as_date())))
                .bind(*patch.is_fiction())
                .bind(author_id)
                .bind(id.as_i32())
                .fetch_optional(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
                .is_some()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    if !updated {
        return Err(DbError::NotFound);
    }
    get_book(ex, id).await
}

/// Deletes the existing book `id`.
pub(crate) async fn delete_book(ex: &mut Executor, id: BookId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM books WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i32())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM books WHERE id = ?";
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

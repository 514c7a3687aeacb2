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

//! Operations on one book.

use crate::db;
use crate::driver::Driver;
use crate::model::{Book, BookId, BookPatch};
use bookshelf_core::db::DbError;
use bookshelf_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Deletes the existing book `id`.
    pub(crate) async fn delete_book(self, id: BookId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_book(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Gets the book identified by `id`.
    pub(crate) async fn get_book(self, id: BookId) -> DriverResult<Book> {
        match db::get_book(&mut self.db.ex().await?, id).await {
            Ok(book) => Ok(book),
            Err(DbError::NotFound) => Err(DriverError::NotFound(format!("Book {} not found", id))),
            Err(e) => Err(e.into()),
        }
    }

    /// Applies `patch` to the existing book `id`.  If the patch changes the author, the new
    /// author must exist.
    pub(crate) async fn update_book(self, id: BookId, patch: BookPatch) -> DriverResult<Book> {
        let mut tx = self.db.begin().await?;
        let book = db::update_book(tx.ex(), &patch, id).await?;
        tx.commit().await?;
        Ok(book)
    }
}

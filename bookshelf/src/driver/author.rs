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

//! Operations on one author.

use crate::db;
use crate::driver::Driver;
use crate::model::{Author, AuthorId, AuthorPatch};
use bookshelf_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Deletes the existing author `id`, which must not be referenced by any book.
    pub(crate) async fn delete_author(self, id: AuthorId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_author(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Gets the author identified by `id`.
    pub(crate) async fn get_author(self, id: AuthorId) -> DriverResult<Author> {
        match db::get_author(&mut self.db.ex().await?, id).await? {
            Some(author) => Ok(author),
            None => Err(DriverError::NotFound(format!("Author {} not found", id))),
        }
    }

    /// Applies `patch` to the existing author `id`.
    pub(crate) async fn update_author(
        self,
        id: AuthorId,
        patch: AuthorPatch,
    ) -> DriverResult<Author> {
        let mut tx = self.db.begin().await?;
        let author = db::update_author(tx.ex(), &patch, id).await?;
        tx.commit().await?;
        Ok(author)
    }
}

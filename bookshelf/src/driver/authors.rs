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

//! Operations on the collection of authors.

use crate::db;
use crate::driver::Driver;
use crate::model::{Author, NewAuthor};
use bookshelf_core::driver::DriverResult;

impl Driver {
    /// Gets all existing authors.
    pub(crate) async fn list_authors(self) -> DriverResult<Vec<Author>> {
        let authors = db::list_authors(&mut self.db.ex().await?).await?;
        Ok(authors)
    }

    /// Creates a new author from `author`.
    pub(crate) async fn create_author(self, author: NewAuthor) -> DriverResult<Author> {
        let mut tx = self.db.begin().await?;
        let author = db::create_author(tx.ex(), &author).await?;
        tx.commit().await?;
        Ok(author)
    }
}

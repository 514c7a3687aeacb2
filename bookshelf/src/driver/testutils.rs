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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use bookshelf_core::db::{Db, Executor};
use std::sync::Arc;

/// State of a running test against an in-memory database with the schema already in place.
pub(crate) struct TestContext {
    /// The database backing the driver, to inspect or alter it behind the driver's back.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the database and the driver.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(bookshelf_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Obtains a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns a copy of the driver under test.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Creates an author directly in the database.
    pub(crate) async fn create_author(&self, first_name: &str, last_name: &str) -> Author {
        let author = NewAuthor::new(first_name.to_owned(), last_name.to_owned());
        db::create_author(&mut self.ex().await, &author).await.unwrap()
    }

    /// Creates a book directly in the database, with a fixed publication date.
    pub(crate) async fn create_book(&self, title: &str, is_fiction: bool, author: &Author) -> Book {
        let book = NewBook::new(
            title.to_owned(),
            PublicationDate::parse("2010-06-15").unwrap(),
            is_fiction,
            *author.id(),
        );
        db::create_book(&mut self.ex().await, &book).await.unwrap()
    }

    /// Gets an author directly from the database, if it exists.
    pub(crate) async fn get_author(&self, id: AuthorId) -> Option<Author> {
        db::get_author(&mut self.ex().await, id).await.unwrap()
    }

    /// Gets a book directly from the database, if it exists.
    pub(crate) async fn get_book(&self, id: BookId) -> Option<Book> {
        match db::get_book(&mut self.ex().await, id).await {
            Ok(book) => Some(book),
            Err(bookshelf_core::db::DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }
}

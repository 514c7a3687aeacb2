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

//! Test utilities for the REST API.

use crate::driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;

/// State of a running test against the full router.
pub(crate) struct TestContext {
    /// Context of the driver backing the router, used to manipulate the database directly.
    driver: driver::testutils::TestContext,

    /// The router under test.
    app: Router,
}

impl TestContext {
    /// Initializes the database, the driver and the router.
    pub(crate) async fn setup() -> Self {
        let driver = driver::testutils::TestContext::setup().await;
        let app = app(driver.driver());
        Self { driver, app }
    }

    /// Returns a copy of the router to issue a request against.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Creates an author directly in the database.
    pub(crate) async fn create_author(&self, first_name: &str, last_name: &str) -> Author {
        self.driver.create_author(first_name, last_name).await
    }

    /// Creates a book directly in the database.
    pub(crate) async fn create_book(&self, title: &str, is_fiction: bool, author: &Author) -> Book {
        self.driver.create_book(title, is_fiction, author).await
    }

    /// Gets an author directly from the database, if it exists.
    pub(crate) async fn get_author(&self, id: AuthorId) -> Option<Author> {
        self.driver.get_author(id).await
    }

    /// Gets a book directly from the database, if it exists.
    pub(crate) async fn get_book(&self, id: BookId) -> Option<Book> {
        self.driver.get_book(id).await
    }
}

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

//! API to get one book.

use crate::driver::Driver;
use crate::model::BookId;
use crate::rest::parse_path_id;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use bookshelf_core::rest::{EmptyBody, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let id = parse_path_id::<BookId>(&id)?;
    let book = driver.get_book(id).await?;
    Ok(Json(book))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use bookshelf_core::rest::testutils::*;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::GET, format!("/books/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let author = context.create_author("A", "B").await;
        context.create_book("First", false, &author).await;
        let book = context.create_book("Second", true, &author).await;

        let response = OneShotBuilder::new(context.into_app(), route(&book.id().to_string()))
            .send_empty()
            .await
            .expect_json::<Book>()
            .await;
        assert_eq!(book, response);
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        let author = context.create_author("A", "B").await;
        context.create_book("First", false, &author).await;

        OneShotBuilder::new(context.into_app(), route("2"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Book 2 not found")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route("1.5"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("Invalid book id '1.5'")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route("1"));
}

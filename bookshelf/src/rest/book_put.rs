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

//! API to update some of the fields of a book.

use crate::driver::Driver;
use crate::model::{AuthorId, BookId, BookPatch, PublicationDate};
use crate::rest::parse_path_id;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Json, http};
use bookshelf_core::rest::{FieldValidator, RestError, RestResult};
use serde_json::Value;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> RestResult<impl IntoResponse> {
    let mut fields = FieldValidator::new(&body)?;
    let title = fields.optional::<String>("title");
    let date_published = fields.optional::<PublicationDate>("datePublished");
    let is_fiction = fields.optional::<bool>("isFiction");
    let author_id = fields.optional::<AuthorId>("authorId");
    fields.finish()?;
    let id = parse_path_id::<BookId>(&id)?;

    let book = driver
        .update_book(id, BookPatch::new(title, date_published, is_fiction, author_id))
        .await
        .map_err(RestError::unhandled)?;
    Ok((http::StatusCode::CREATED, Json(book)))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use bookshelf_core::rest::testutils::*;
    use serde_json::json;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::PUT, format!("/books/{}", id))
    }

    #[tokio::test]
    async fn test_update_only_is_fiction() {
        let context = TestContext::setup().await;

        let author = context.create_author("A", "B").await;
        let book = context.create_book("Title", false, &author).await;

        let response = OneShotBuilder::new(context.app(), route(&book.id().to_string()))
            .send_json(json!({"isFiction": true}))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Book>()
            .await;
        let exp_book =
            Book::new(*book.id(), "Title".to_owned(), *book.date_published(), true, author);
        assert_eq!(exp_book, response);

        assert_eq!(Some(exp_book), context.get_book(*book.id()).await);
    }

    #[tokio::test]
    async fn test_update_all_fields() {
        let context = TestContext::setup().await;

        let author1 = context.create_author("A", "B").await;
        let author2 = context.create_author("C", "D").await;
        let book = context.create_book("Title", false, &author1).await;

        let request = json!({
            "title": "New title",
            "datePublished": "1999/12/31",
            "isFiction": "true",
            "authorId": author2.id(),
        });
        let response = OneShotBuilder::new(context.app(), route(&book.id().to_string()))
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Book>()
            .await;
        let exp_book = Book::new(
            *book.id(),
            "New title".to_owned(),
            PublicationDate::parse("1999-12-31").unwrap(),
            true,
            author2,
        );
        assert_eq!(exp_book, response);
    }

    #[tokio::test]
    async fn test_null_fields_are_unchanged() {
        let context = TestContext::setup().await;

        let author = context.create_author("A", "B").await;
        let book = context.create_book("Title", true, &author).await;

        let request = json!({
            "title": null,
            "datePublished": null,
            "isFiction": null,
            "authorId": null,
        });
        let response = OneShotBuilder::new(context.into_app(), route(&book.id().to_string()))
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Book>()
            .await;
        assert_eq!(book, response);
    }

    #[tokio::test]
    async fn test_wrong_types() {
        let context = TestContext::setup().await;

        let author = context.create_author("A", "B").await;
        let book = context.create_book("Title", true, &author).await;

        let request = json!({
            "title": "Valid",
            "datePublished": "31/12/1999",
            "isFiction": 3,
        });
        OneShotBuilder::new(context.app(), route(&book.id().to_string()))
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_field_errors(&["datePublished", "isFiction"])
            .await;

        let id = *book.id();
        assert_eq!(Some(book), context.get_book(id).await);
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route("3"))
            .send_json(json!({"title": "X"}))
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("not found")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route("abc"))
            .send_json(json!({"isFiction": false}))
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("Invalid book id 'abc'")
            .await;
    }

    #[tokio::test]
    async fn test_unknown_author() {
        let context = TestContext::setup().await;

        let author = context.create_author("A", "B").await;
        let book = context.create_book("Title", true, &author).await;

        OneShotBuilder::new(context.app(), route(&book.id().to_string()))
            .send_json(json!({"title": "X", "authorId": 100}))
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("FOREIGN KEY")
            .await;

        let id = *book.id();
        assert_eq!(Some(book), context.get_book(id).await);
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route("1"));
}

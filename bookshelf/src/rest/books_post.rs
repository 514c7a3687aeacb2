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

//! API to create a new book.

use crate::driver::Driver;
use crate::model::{AuthorId, NewBook, PublicationDate};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, http};
use bookshelf_core::rest::{FieldValidator, RestError, RestResult};
use serde_json::Value;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(body): Json<Value>,
) -> RestResult<impl IntoResponse> {
    let mut fields = FieldValidator::new(&body)?;
    let title = fields.required::<String>("title");
    let date_published = fields.required::<PublicationDate>("datePublished");
    let is_fiction = fields.required::<bool>("isFiction");
    let author_id = fields.required::<AuthorId>("authorId");
    fields.finish()?;

    let (Some(title), Some(date_published), Some(is_fiction), Some(author_id)) =
        (title, date_published, is_fiction, author_id)
    else {
        unreachable!("finish() rejects bodies with missing required fields");
    };

    let book = driver
        .create_book(NewBook::new(title, date_published, is_fiction, author_id))
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

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/books".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let author = context.create_author("Ursula", "Le Guin").await;

        let request = json!({
            "title": "The Dispossessed",
            "datePublished": "1974-05-01",
            "isFiction": true,
            "authorId": author.id(),
        });
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Book>()
            .await;
        assert_eq!("The Dispossessed", response.title());
        assert_eq!("1974-05-01", response.date_published().to_string());
        assert!(*response.is_fiction());
        assert_eq!(&author, response.author());

        let id = *response.id();
        assert_eq!(Some(response), context.get_book(id).await);
    }

    #[tokio::test]
    async fn test_lenient_types() {
        let context = TestContext::setup().await;

        let author = context.create_author("Ursula", "Le Guin").await;

        let request = json!({
            "title": "Lavinia",
            "datePublished": "2008/04/21",
            "isFiction": "1",
            "authorId": author.id().to_string(),
        });
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Book>()
            .await;
        assert_eq!("2008-04-21", response.date_published().to_string());
        assert!(*response.is_fiction());
        assert_eq!(&author, response.author());
    }

    #[tokio::test]
    async fn test_missing_author_id() {
        let context = TestContext::setup().await;

        context.create_author("A", "B").await;

        let request = json!({
            "title": "Some title",
            "datePublished": "2020-01-01",
            "isFiction": false,
        });
        let errors = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_field_errors(&["authorId"])
            .await;
        assert_eq!(None, errors[0].value);

        assert!(context.get_book(BookId::new(1)).await.is_none());
    }

    #[tokio::test]
    async fn test_all_fields_invalid() {
        let context = TestContext::setup().await;

        let request = json!({
            "title": 5,
            "datePublished": "yesterday",
            "isFiction": "maybe",
            "authorId": "first",
        });
        let errors = OneShotBuilder::new(context.into_app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_field_errors(&["title", "datePublished", "isFiction", "authorId"])
            .await;
        assert_eq!(Some(json!("yesterday")), errors[1].value);
    }

    #[tokio::test]
    async fn test_unknown_author() {
        let context = TestContext::setup().await;

        let request = json!({
            "title": "Some title",
            "datePublished": "2020-01-01",
            "isFiction": false,
            "authorId": 8,
        });
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("FOREIGN KEY")
            .await;

        assert!(context.get_book(BookId::new(1)).await.is_none());
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route());
}

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

//! API to delete an author.

use crate::driver::Driver;
use crate::model::AuthorId;
use crate::rest::parse_path_id;
use axum::extract::{Path, State};
use axum::http;
use axum::response::IntoResponse;
use bookshelf_core::rest::{EmptyBody, RestError, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let id = parse_path_id::<AuthorId>(&id)?;
    driver.delete_author(id).await.map_err(RestError::unhandled)?;
    Ok(http::StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http;
    use bookshelf_core::rest::testutils::*;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::DELETE, format!("/authors/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let author1 = context.create_author("A", "B").await;
        let author2 = context.create_author("C", "D").await;

        OneShotBuilder::new(context.app(), route(&author1.id().to_string()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        assert!(context.get_author(*author1.id()).await.is_none());
        assert!(context.get_author(*author2.id()).await.is_some());
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route("1"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("not found")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let context = TestContext::setup().await;

        let author = context.create_author("A", "B").await;

        OneShotBuilder::new(context.app(), route("NaN"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("Invalid author id 'NaN'")
            .await;

        assert!(context.get_author(*author.id()).await.is_some());
    }

    #[tokio::test]
    async fn test_referenced_by_book() {
        let context = TestContext::setup().await;

        let author = context.create_author("A", "B").await;
        context.create_book("Title", true, &author).await;

        OneShotBuilder::new(context.app(), route(&author.id().to_string()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("FOREIGN KEY")
            .await;

        assert!(context.get_author(*author.id()).await.is_some());
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route("1"));
}

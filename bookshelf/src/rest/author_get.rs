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

//! API to get one author.

use crate::driver::Driver;
use crate::model::AuthorId;
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
    let id = parse_path_id::<AuthorId>(&id)?;
    let author = driver.get_author(id).await?;
    Ok(Json(author))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use bookshelf_core::rest::testutils::*;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::GET, format!("/authors/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        context.create_author("A", "B").await;
        let author = context.create_author("C", "D").await;

        let response = OneShotBuilder::new(context.into_app(), route(&author.id().to_string()))
            .send_empty()
            .await
            .expect_json::<Author>()
            .await;
        assert_eq!(author, response);
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        context.create_author("A", "B").await;

        OneShotBuilder::new(context.into_app(), route("2"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Author 2 not found")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route("abc"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("Invalid author id 'abc'")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route("1"));
}

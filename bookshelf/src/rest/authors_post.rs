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

//! API to create a new author.

use crate::driver::Driver;
use crate::model::NewAuthor;
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
    let first_name = fields.required::<String>("firstName");
    let last_name = fields.required::<String>("lastName");
    fields.finish()?;

    let (Some(first_name), Some(last_name)) = (first_name, last_name) else {
        unreachable!("finish() rejects bodies with missing required fields");
    };

    let author = driver
        .create_author(NewAuthor::new(first_name, last_name))
        .await
        .map_err(RestError::unhandled)?;
    Ok((http::StatusCode::CREATED, Json(author)))
}

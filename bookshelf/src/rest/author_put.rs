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

//! API to update some of the fields of an author.

use crate::driver::Driver;
use crate::model::{AuthorId, AuthorPatch};
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
    let first_name = fields.optional::<String>("firstName");
    let last_name = fields.optional::<String>("lastName");
    fields.finish()?;
    let id = parse_path_id::<AuthorId>(&id)?;

    let author = driver
        .update_author(id, AuthorPatch::new(first_name, last_name))
        .await
        .map_err(RestError::unhandled)?;
    Ok((http::StatusCode::CREATED, Json(author)))
}

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

//! Entry point to the REST server.

use crate::driver::Driver;
use crate::model::{AuthorId, PublicationDate};
use axum::Router;
use bookshelf_core::model::ModelError;
use bookshelf_core::rest::{FieldValue, RestError, RestResult};
use serde_json::Value;
use std::str::FromStr;
use tower_http::cors::CorsLayer;

mod author_delete;
mod author_get;
mod author_put;
mod authors_get;
mod authors_post;
mod book_delete;
mod book_get;
mod book_put;
mod books_get;
mod books_post;
#[cfg(test)]
mod testutils;

/// Dates are accepted as strings in any of the formats understood by `PublicationDate::parse`.
impl FieldValue for PublicationDate {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().and_then(|s| PublicationDate::parse(s).ok())
    }
}

impl FieldValue for AuthorId {
    fn from_json(value: &Value) -> Option<Self> {
        i32::from_json(value).map(AuthorId::new)
    }
}

/// Parses the `raw` identifier extracted from a request path.
///
/// An unparseable id is not classified as a client error: it fails like any other lookup of a
/// row that cannot exist.
fn parse_path_id<I: FromStr<Err = ModelError>>(raw: &str) -> RestResult<I> {
    raw.parse::<I>().map_err(|e| RestError::InternalError(e.to_string()))
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;
    Router::new()
        .route("/authors", get(authors_get::handler).post(authors_post::handler))
        .route(
            "/authors/:id",
            get(author_get::handler).put(author_put::handler).delete(author_delete::handler),
        )
        .route("/books", get(books_get::handler).post(books_post::handler))
        .route(
            "/books/:id",
            get(book_get::handler).put(book_put::handler).delete(book_delete::handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(driver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_path_id() {
        assert_eq!(AuthorId::new(15), parse_path_id::<AuthorId>("15").unwrap());
        match parse_path_id::<AuthorId>("NaN") {
            Err(RestError::InternalError(msg)) => assert!(msg.contains("Invalid author id 'NaN'")),
            e => panic!("Must have failed with an InternalError but got: {:?}", e),
        }
    }

    #[test]
    fn test_publication_date_from_json() {
        let exp = PublicationDate::parse("2003-04-05").ok();
        assert_eq!(exp, PublicationDate::from_json(&json!("2003-04-05")));
        assert_eq!(exp, PublicationDate::from_json(&json!("2003/04/05")));
        assert_eq!(None, PublicationDate::from_json(&json!("April 5th")));
        assert_eq!(None, PublicationDate::from_json(&json!(20030405)));
        assert_eq!(None, PublicationDate::from_json(&json!(null)));
    }

    #[test]
    fn test_author_id_from_json() {
        assert_eq!(Some(AuthorId::new(3)), AuthorId::from_json(&json!(3)));
        assert_eq!(Some(AuthorId::new(3)), AuthorId::from_json(&json!("3")));
        assert_eq!(None, AuthorId::from_json(&json!(3.5)));
        assert_eq!(None, AuthorId::from_json(&json!("three")));
        assert_eq!(None, AuthorId::from_json(&json!(1u64 << 40)));
        assert_eq!(None, AuthorId::from_json(&json!(true)));
    }
}

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

//! Layer-generic building blocks for the bookshelf service.
//!
//! The service adheres to the following layered architecture, and every layer has a counterpart
//! module in this crate that holds the pieces that are not specific to books or authors:
//!
//! 1.  `model`: High-level data types that represent concepts in the domain of the application.
//!     There should be no logic in here beyond validating values at construction time.
//!
//! 1.  `db`: The persistence layer.  Services provide free functions that take an `Executor` and
//!     issue the queries for each supported database system.
//!
//! 1.  `driver`: The business logic layer.  Services provide their own `Driver` type that holds
//!     the database handle and coordinates access to it.
//!
//! 1.  `rest`: The HTTP layer.  Services provide their own `axum::Router` and back every API with
//!     a `Driver`.
//!
//! 1.  `main`: The app launcher, which gathers configuration from environment variables (see the
//!     `env` module) and starts serving.
//!
//! There are result and error types in every layer, such as `DbResult` and `DbError`.  Errors
//! float to the top of the app using the `?` operator and are translated to HTTP status codes
//! once returned from the REST layer.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;

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

//! REST service to manage a collection of authors and the books they wrote.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use bookshelf_core::db::Db;
use log::{info, warn};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub mod config;
pub mod db;
pub(crate) mod driver;
use driver::Driver;
pub(crate) mod model;
mod rest;
use rest::app;

/// Waits for the user to request the server to stop.
async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Interrupted; shutting down"),
        Err(e) => {
            warn!("Cannot listen for interrupts; will run until killed: {}", e);
            futures::future::pending::<()>().await;
        }
    }
}

/// Serves the application on `listener` with the already-initialized `db` until `shutdown`
/// completes, and then closes the database.
async fn serve_until<F>(
    listener: TcpListener,
    db: Arc<dyn Db + Send + Sync>,
    shutdown: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let driver = Driver::new(db.clone());
    let app = app(driver);

    let result = axum::serve(listener, app).with_graceful_shutdown(shutdown).await;
    db.close().await;
    result
}

/// Instantiates all resources to serve the application on `bind_addr` until interrupted.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose
/// many crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
) -> io::Result<()> {
    let bind_addr = bind_addr.into();
    let listener = TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    serve_until(listener, db, interrupted()).await
}

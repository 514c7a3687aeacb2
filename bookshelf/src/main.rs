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

//! Entry point to the bookshelf service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use bookshelf::config::Config;
use bookshelf::db::init_schema;
use bookshelf::serve;
use log::info;
use std::process;

/// Sets up the database described by the environment and serves the application.
async fn run() -> Result<(), String> {
    let config = Config::from_env()?;
    info!("Using database {:?}", config.db);

    let db = config.db.connect().await.map_err(|e| e.to_string())?;
    {
        let mut ex = db.ex().await.map_err(|e| e.to_string())?;
        init_schema(&mut ex).await.map_err(|e| e.to_string())?;
    }

    serve(config.bind_addr, db).await.map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("bookshelf: {}", e);
        process::exit(1);
    }
}

// ParkAPI
// Copyright 2025 The parkapi authors
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

//! REST service for an amusement park's attractions catalog.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use log::info;
use std::error::Error;
use std::net::SocketAddr;

mod db;
mod driver;
use driver::Driver;
mod env;
pub(crate) mod model;
mod rest;
pub use rest::BaseUrls;

/// Instantiates all resources to serve the application on `bind_addr`.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose
/// many crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    conn_str: &str,
    base_urls: BaseUrls,
) -> Result<(), Box<dyn Error>> {
    let db = db::connect(conn_str).await?;
    let mut conn = db.acquire().await.map_err(db::map_sqlx_error)?;
    db::init_schema(&mut conn).await?;
    drop(conn);

    let driver = Driver::new(db, base_urls);
    let app = rest::app(driver);

    let addr = bind_addr.into();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving requests at {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

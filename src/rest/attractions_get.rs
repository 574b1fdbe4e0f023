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

//! API to get the collection of attractions, optionally filtered by area.

use crate::driver::Driver;
use crate::model::AreaId;
use crate::rest::{AttractionBody, EmptyBody, RestError};
use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

/// Query parameters accepted by this API.
#[derive(Deserialize)]
pub(crate) struct AttractionsQuery {
    /// If present, restricts the collection to the attractions of this area.
    area: Option<AreaId>,
}

/// API handler.
///
/// The entries come back in whatever order the database produced them; callers must not rely
/// on any specific order.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Query(query): Query<AttractionsQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let base_urls = driver.base_urls();
    let attractions = driver.get_attractions(query.area).await?;

    let bodies = attractions
        .into_iter()
        .map(|attraction| AttractionBody::new(attraction, &base_urls))
        .collect::<Vec<AttractionBody>>();
    Ok(Json(bodies))
}

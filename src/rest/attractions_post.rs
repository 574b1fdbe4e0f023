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

//! API to create a new attraction.

use crate::driver::Driver;
use crate::rest::{AttractionBody, AttractionRequest, RestError};
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<AttractionRequest>,
) -> Result<impl IntoResponse, RestError> {
    let base_urls = driver.base_urls();
    let attraction = driver.create_attraction(request.name, request.area_id).await?;
    Ok(Json(AttractionBody::new(attraction, &base_urls)))
}

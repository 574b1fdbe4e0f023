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

//! Entry point to the REST server.
//!
//! Every API is put in its own `.rs` file, using a name like `<entity>_<method>.rs`.  This may
//! seem overkill, but putting every API in its own file makes it easy to ensure all the
//! integration tests for the given API truly belong to that API.
//!
//! More specifically, the `tests` module within an API defines a `route` method that returns the
//! HTTP method and the API path under test.  All integration tests within the module then rely on
//! `route` to obtain this information, ensuring that they all test the desired API.

use crate::driver::{Driver, DriverError};
use crate::model::{Area, AreaId, AttractionId, AttractionName};
use async_trait::async_trait;
use axum::body::HttpBody;
use axum::extract::{FromRequest, Request};
use axum::response::IntoResponse;
use axum::{Json, Router, http};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

mod attraction_get;
mod attraction_put;
mod attractions_get;
mod attractions_post;
mod base_urls;
pub use base_urls::BaseUrls;
#[cfg(test)]
pub(crate) mod testutils;

/// Frontend errors.  These are the errors that are visible to the user on failed requests.
#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum RestError {
    /// Catch-all error type for all unexpected errors.
    #[error("{0}")]
    InternalError(String),

    /// Indicates that a write referenced an entity that does not exist.
    #[error("{0}")]
    InvalidReference(String),

    /// Indicates that a requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Indicates that a request that should have empty content did not.
    #[error("Content should be empty")]
    PayloadNotEmpty,
}

impl From<DriverError> for RestError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::BackendError(_) => RestError::InternalError(e.to_string()),
            DriverError::InvalidReference(_) => RestError::InvalidReference(e.to_string()),
            DriverError::NotFound(_) => RestError::NotFound(e.to_string()),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            RestError::InternalError(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
            RestError::InvalidReference(_) => http::StatusCode::CONFLICT,
            RestError::NotFound(_) => http::StatusCode::NOT_FOUND,
            RestError::PayloadNotEmpty => http::StatusCode::PAYLOAD_TOO_LARGE,
        };

        let response = ErrorResponse { message: self.to_string() };

        (status, Json(response)).into_response()
    }
}

/// Representation of the details of an error response.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct ErrorResponse {
    /// Textual representation of the error message.
    pub(crate) message: String,
}

/// A request body extractor that forbids any content.
///
/// Any API that doesn't expect a body should use this to ensure we don't get garbage data that we
/// don't care about.  This future-proofs the service.
pub(crate) struct EmptyBody {}

#[async_trait]
impl<S> FromRequest<S> for EmptyBody
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        if req.into_body().is_end_stream() {
            Ok(EmptyBody {})
        } else {
            Err(RestError::PayloadNotEmpty)
        }
    }
}

/// JSON representation of an attraction, including its self-link and its area expanded inline.
#[derive(Getters, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct AttractionBody {
    /// Identifier of the attraction.
    id: AttractionId,

    /// Absolute link to this same resource.
    url: String,

    /// Descriptive name of the attraction.
    name: AttractionName,

    /// The area the attraction belongs to.
    area: Area,
}

impl AttractionBody {
    /// Builds the wire representation of `attraction`, deriving the self-link from `base_urls`.
    pub(crate) fn new(attraction: crate::model::Attraction, base_urls: &BaseUrls) -> Self {
        let (id, name, area) = attraction.into_parts();
        let url =
            base_urls.generate_backend_url(&format!("attractions/{}", id.as_i64())).to_string();
        Self { id, url, name, area }
    }
}

/// Payload accepted by the create and update APIs.
///
/// Both fields are required: there is no partial-update support, so every call must supply the
/// full new state of the attraction.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct AttractionRequest {
    /// New name for the attraction.
    pub(crate) name: AttractionName,

    /// Identifier of the area the attraction belongs to.
    pub(crate) area_id: AreaId,
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;
    Router::new()
        .route("/attractions", get(attractions_get::handler).post(attractions_post::handler))
        .route("/attractions/:id", get(attraction_get::handler).put(attraction_put::handler))
        .with_state(driver)
}

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

//! The `BaseUrls` type.

use crate::env::get_required_var;
use url::Url;

/// Common error message for URLs built via hardcoded values.
const URL_MUST_BE_VALID: &str = "URLs built in-process must be valid";

/// Checks if `base` has the right format to be a base URL and returns an error if it is not.
///
/// Joining a relative path onto a base without a trailing slash replaces the last path segment
/// instead of appending, so the check requires the join to be an exact append.
fn ensure_valid_base(base: &Url) -> Result<(), String> {
    let joined = base.join("x").expect(URL_MUST_BE_VALID);
    if joined.as_str() != format!("{}x", base) {
        return Err(format!("URL '{}' cannot be a base: missing trailing slash", base));
    }
    Ok(())
}

/// Contains the base URL of the service and allows building absolute URLs within it.
///
/// The attraction representations returned by the REST layer carry a self-link, and those links
/// must be absolute no matter which address the service happens to listen on.  The base URL is
/// therefore injected configuration, not something derived from individual requests.
#[cfg_attr(test, derive(Debug, Eq, PartialEq))]
pub struct BaseUrls {
    /// The base URL to the service (ourselves).
    backend: Url,
}

impl BaseUrls {
    /// Creates a set of base URLs from an already-parsed URL.
    pub fn new(backend: Url) -> Result<Self, String> {
        ensure_valid_base(&backend)?;
        Ok(Self { backend })
    }

    /// Creates a set of base URLs from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_BACKEND_BASE_URL`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let backend = get_required_var::<Url>(prefix, "BACKEND_BASE_URL")?;
        Self::new(backend)
    }

    /// Creates a set of base URLs from a fixed string, which must represent a valid URL.
    #[cfg(test)]
    pub(crate) fn from_str(backend: &'static str) -> Self {
        let backend = Url::parse(backend).unwrap();
        Self::new(backend).unwrap()
    }

    /// Generates an absolute URL to the service for the given relative `path`.
    pub(crate) fn generate_backend_url(&self, path: &str) -> Url {
        self.backend.join(path).expect(URL_MUST_BE_VALID)
    }
}

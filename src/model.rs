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

//! High-level data types for the attractions catalog.

use derive_getters::Getters;
use derive_more::Constructor;
use serde::{de::Visitor, Deserialize, Serialize};

/// Maximum length of an attraction or area name as specified in the schema.
pub(crate) const MAX_NAME_LENGTH: usize = 100;

/// Errors raised when validating untrusted domain data.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub(crate) struct ModelError(pub(crate) String);

/// Result type for this module.
pub(crate) type ModelResult<T> = Result<T, ModelError>;

/// Identifier of a persisted attraction, assigned by the database.
#[derive(Clone, Constructor, Copy, Deserialize, Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(transparent)]
pub(crate) struct AttractionId(i64);

impl AttractionId {
    /// Returns the identifier as the `i64` the database stores.
    pub(crate) fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Identifier of a persisted area, assigned by the database.
#[derive(Clone, Constructor, Copy, Deserialize, Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(transparent)]
pub(crate) struct AreaId(i64);

impl AreaId {
    /// Returns the identifier as the `i64` the database stores.
    pub(crate) fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Represents a well-formed attraction name.
///
/// Names are free text but must not be empty and must fit in the column that
/// backs them.
#[derive(Clone, Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(transparent)]
pub(crate) struct AttractionName(String);

impl AttractionName {
    /// Creates a new attraction name from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        if s.is_empty() {
            return Err(ModelError("Attraction name cannot be empty".to_owned()));
        }
        if s.len() > MAX_NAME_LENGTH {
            return Err(ModelError("Attraction name is too long".to_owned()));
        }

        Ok(Self(s))
    }

    /// Returns a string view of the name.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
impl From<&'static str> for AttractionName {
    /// Creates a new attraction name from a hardcoded string, which must be valid.
    fn from(name: &'static str) -> Self {
        AttractionName::new(name).expect("Hardcoded attraction names must be valid")
    }
}

/// A deserialization visitor for an `AttractionName`.
struct AttractionNameVisitor;

impl Visitor<'_> for AttractionNameVisitor {
    type Value = AttractionName;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        AttractionName::new(v).map_err(|e| E::custom(e.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        AttractionName::new(v).map_err(|e| E::custom(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for AttractionName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_string(AttractionNameVisitor)
    }
}

/// An area of the park, which groups zero or more attractions.
///
/// Areas are managed outside of this service: the handlers only ever read
/// them to expand the relation in attraction representations.
#[derive(Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Clone, Debug, Deserialize, PartialEq))]
pub(crate) struct Area {
    /// Identifier of the area.
    id: AreaId,

    /// Descriptive name of the area.
    name: String,
}

/// A single ride or exhibit of the park, owned by exactly one area.
#[derive(Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct Attraction {
    /// Identifier of the attraction.
    id: AttractionId,

    /// Descriptive name of the attraction.
    name: AttractionName,

    /// The area this attraction belongs to, expanded from its foreign key.
    area: Area,
}

impl Attraction {
    /// Splits the attraction into its parts, consuming it.
    pub(crate) fn into_parts(self) -> (AttractionId, AttractionName, Area) {
        (self.id, self.name, self.area)
    }
}

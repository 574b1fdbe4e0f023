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

//! Operations on the attractions resource.

use crate::db;
use crate::driver::{Driver, DriverResult};
use crate::model::*;

impl Driver {
    /// Gets the attraction with the given `id`, with its area expanded.
    pub(crate) async fn get_attraction(self, id: AttractionId) -> DriverResult<Attraction> {
        let mut conn = self.db.acquire().await.map_err(db::map_sqlx_error)?;
        let attraction = db::get_attraction(&mut conn, id).await?;
        Ok(attraction)
    }

    /// Gets all attractions, optionally restricted to those that belong to `area`.
    pub(crate) async fn get_attractions(
        self,
        area: Option<AreaId>,
    ) -> DriverResult<Vec<Attraction>> {
        let mut conn = self.db.acquire().await.map_err(db::map_sqlx_error)?;
        let attractions = db::get_attractions(&mut conn, area).await?;
        Ok(attractions)
    }

    /// Creates a new attraction with the given fields and returns it with its area expanded.
    ///
    /// The insert and the read-back that expands the area happen in the same transaction so
    /// the returned representation cannot observe a concurrent modification.
    pub(crate) async fn create_attraction(
        self,
        name: AttractionName,
        area: AreaId,
    ) -> DriverResult<Attraction> {
        let mut tx = self.db.begin().await.map_err(db::map_sqlx_error)?;
        let id = db::create_attraction(&mut *tx, &name, area).await?;
        let attraction = db::get_attraction(&mut *tx, id).await?;
        tx.commit().await.map_err(db::map_sqlx_error)?;
        Ok(attraction)
    }

    /// Overwrites both mutable fields of the attraction with the given `id`.
    pub(crate) async fn update_attraction(
        self,
        id: AttractionId,
        name: AttractionName,
        area: AreaId,
    ) -> DriverResult<()> {
        let mut conn = self.db.acquire().await.map_err(db::map_sqlx_error)?;
        db::update_attraction(&mut conn, id, &name, area).await?;
        Ok(())
    }
}

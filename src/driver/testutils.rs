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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::BaseUrls;
use sqlx::SqlitePool;

/// State for a test that drives the business layer directly.
pub(crate) struct TestContext {
    /// Direct access to the database that backs the driver.
    db: SqlitePool,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes a driver against an in-memory database.
    pub(crate) async fn setup() -> Self {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        let db = db::connect(":memory:").await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        db::init_schema(&mut conn).await.unwrap();
        drop(conn);
        let driver = Driver::new(db.clone(), BaseUrls::from_str("http://localhost:1234/"));
        Self { db, driver }
    }

    /// Returns a copy of the driver under test, as needed by its one-shot operations.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Seeds an area directly in the database.
    pub(crate) async fn create_area(&self, name: &str) -> AreaId {
        db::create_area(&mut self.db.acquire().await.unwrap(), name).await.unwrap()
    }

    /// Seeds an attraction directly in the database.
    pub(crate) async fn create_attraction(&self, name: &'static str, area: AreaId) -> AttractionId {
        db::create_attraction(
            &mut self.db.acquire().await.unwrap(),
            &AttractionName::from(name),
            area,
        )
        .await
        .unwrap()
    }

    /// Reads an attraction back directly from the database, bypassing the driver.
    pub(crate) async fn get_attraction(&self, id: AttractionId) -> Attraction {
        db::get_attraction(&mut self.db.acquire().await.unwrap(), id).await.unwrap()
    }
}

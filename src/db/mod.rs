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

//! Database abstraction in terms of the operations needed by the service.
//!
//! All operations take a `SqliteConnection` so that the caller decides whether
//! they run against a pooled connection or inside an open transaction.

use crate::model::*;
use futures::TryStreamExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqliteConnection, SqlitePool};
use std::str::FromStr;

/// Schema used to initialize the database.
const SCHEMA: &str = include_str!("sqlite.sql");

/// Database errors.  Any unexpected errors that come from the database are classified as
/// `BackendError`, but errors we know about have more specific types.
#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum DbError {
    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates a failure processing the data that already exists in the database.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// Indicates that a write referenced an entity that does not exist.
    #[error("Referenced entity does not exist")]
    InvalidReference,

    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub(crate) type DbResult<T> = Result<T, DbError>;

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub(crate) fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::RowNotFound => DbError::NotFound,
        e if e.to_string().contains("FOREIGN KEY constraint failed") => DbError::InvalidReference,
        e => DbError::BackendError(e.to_string()),
    }
}

/// Opens the database identified by `conn_str` and returns its connection pool.
///
/// Referential integrity enforcement is a per-connection setting in SQLite, so
/// it must be part of the connection options and not of the schema.
pub(crate) async fn connect(conn_str: &str) -> DbResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(conn_str)
        .map_err(map_sqlx_error)?
        .create_if_missing(true)
        .foreign_keys(true);

    // An in-memory database is private to the connection that opened it, so the pool
    // must never hand out a second connection nor recycle the one it has.
    let mut pool_options = SqlitePoolOptions::new();
    if conn_str.contains(":memory:") {
        pool_options = pool_options.max_connections(1).idle_timeout(None).max_lifetime(None);
    }

    pool_options.connect_with(options).await.map_err(map_sqlx_error)
}

/// Initializes the database schema.
pub(crate) async fn init_schema(conn: &mut SqliteConnection) -> DbResult<()> {
    sqlx::raw_sql(SCHEMA).execute(conn).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Gets the attraction with the given `id`, expanding its area.
pub(crate) async fn get_attraction(
    conn: &mut SqliteConnection,
    id: AttractionId,
) -> DbResult<Attraction> {
    let query_str = "
        SELECT attractions.name AS name, areas.id AS area_id, areas.name AS area_name
        FROM attractions JOIN areas ON areas.id = attractions.area_id
        WHERE attractions.id = ?
    ";
    let row = sqlx::query(query_str)
        .bind(id.as_i64())
        .fetch_one(conn)
        .await
        .map_err(map_sqlx_error)?;
    let name: String = row.try_get("name").map_err(map_sqlx_error)?;
    let area_id: i64 = row.try_get("area_id").map_err(map_sqlx_error)?;
    let area_name: String = row.try_get("area_name").map_err(map_sqlx_error)?;

    Ok(Attraction::new(id, AttractionName::new(name)?, Area::new(AreaId::new(area_id), area_name)))
}

/// Gets all attractions, optionally restricted to those that belong to `area`.
///
/// The rows come back in whatever order the database produces them; no
/// ordering is part of the contract.
pub(crate) async fn get_attractions(
    conn: &mut SqliteConnection,
    area: Option<AreaId>,
) -> DbResult<Vec<Attraction>> {
    let mut query = match area {
        Some(_) => sqlx::query(
            "
            SELECT attractions.id AS id, attractions.name AS name,
                areas.id AS area_id, areas.name AS area_name
            FROM attractions JOIN areas ON areas.id = attractions.area_id
            WHERE areas.id = ?
            ",
        ),
        None => sqlx::query(
            "
            SELECT attractions.id AS id, attractions.name AS name,
                areas.id AS area_id, areas.name AS area_name
            FROM attractions JOIN areas ON areas.id = attractions.area_id
            ",
        ),
    };
    if let Some(area) = area {
        query = query.bind(area.as_i64());
    }

    let mut rows = query.fetch(conn);
    let mut attractions = vec![];
    while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(map_sqlx_error)?;
        let area_id: i64 = row.try_get("area_id").map_err(map_sqlx_error)?;
        let area_name: String = row.try_get("area_name").map_err(map_sqlx_error)?;
        attractions.push(Attraction::new(
            AttractionId::new(id),
            AttractionName::new(name)?,
            Area::new(AreaId::new(area_id), area_name),
        ));
    }
    Ok(attractions)
}

/// Persists a new attraction with the given fields and returns its identifier.
pub(crate) async fn create_attraction(
    conn: &mut SqliteConnection,
    name: &AttractionName,
    area: AreaId,
) -> DbResult<AttractionId> {
    let query_str = "INSERT INTO attractions (name, area_id) VALUES (?, ?)";
    let done = sqlx::query(query_str)
        .bind(name.as_str())
        .bind(area.as_i64())
        .execute(conn)
        .await
        .map_err(map_sqlx_error)?;
    Ok(AttractionId::new(done.last_insert_rowid()))
}

/// Overwrites both mutable fields of the attraction with the given `id`.
pub(crate) async fn update_attraction(
    conn: &mut SqliteConnection,
    id: AttractionId,
    name: &AttractionName,
    area: AreaId,
) -> DbResult<()> {
    let query_str = "UPDATE attractions SET name = ?, area_id = ? WHERE id = ?";
    let done = sqlx::query(query_str)
        .bind(name.as_str())
        .bind(area.as_i64())
        .bind(id.as_i64())
        .execute(conn)
        .await
        .map_err(map_sqlx_error)?;
    if done.rows_affected() == 0 {
        return Err(DbError::NotFound);
    } else if done.rows_affected() != 1 {
        return Err(DbError::BackendError("Update affected more than one row".to_owned()));
    }
    Ok(())
}

/// Persists a new area with the given `name` and returns its identifier.
///
/// Areas are managed outside of this service; this exists so that tests can
/// seed the table the attractions reference.
#[cfg(test)]
pub(crate) async fn create_area(conn: &mut SqliteConnection, name: &str) -> DbResult<AreaId> {
    let query_str = "INSERT INTO areas (name) VALUES (?)";
    let done =
        sqlx::query(query_str).bind(name).execute(conn).await.map_err(map_sqlx_error)?;
    Ok(AreaId::new(done.last_insert_rowid()))
}

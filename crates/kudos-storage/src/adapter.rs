// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StoreAdapter trait.

use async_trait::async_trait;
use tracing::debug;

use kudos_config::model::StorageConfig;
use kudos_core::{
    AdapterType, HealthStatus, KudosError, NewPicture, PictureEntry, PluginAdapter, PointsRecord,
    StoreAdapter,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed store for the points and pictures collections.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules.
pub struct SqliteStore {
    db: Database,
    path: String,
}

impl SqliteStore {
    /// Opens the database described by `config`, running migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, KudosError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "SQLite store initialized");
        Ok(Self {
            db,
            path: config.database_path.clone(),
        })
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Checkpoints the WAL before the process exits.
    pub async fn close(&self) -> Result<(), KudosError> {
        self.db.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, KudosError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl StoreAdapter for SqliteStore {
    async fn load_points(&self) -> Result<Vec<PointsRecord>, KudosError> {
        queries::points::load_points(&self.db).await
    }

    async fn replace_points(&self, records: &[PointsRecord]) -> Result<(), KudosError> {
        queries::points::replace_points(&self.db, records).await
    }

    async fn load_pictures(&self) -> Result<Vec<PictureEntry>, KudosError> {
        queries::pictures::load_pictures(&self.db).await
    }

    async fn append_picture(&self, picture: &NewPicture) -> Result<String, KudosError> {
        queries::pictures::append_picture(&self.db, picture).await
    }

    async fn update_picture(&self, entry: &PictureEntry) -> Result<(), KudosError> {
        queries::pictures::update_picture(&self.db, entry).await
    }
}

// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store adapter trait for the durable points and pictures collections.

use async_trait::async_trait;

use crate::error::KudosError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{NewPicture, PictureEntry, PointsRecord};

/// Durable backing store for the two collections the engine mirrors.
///
/// The engine only needs list semantics: load everything, append one,
/// update one by id, or replace the whole collection. Each call is an
/// independent, best-effort write; nothing spans multiple calls.
#[async_trait]
pub trait StoreAdapter: PluginAdapter {
    /// Loads every points record.
    async fn load_points(&self) -> Result<Vec<PointsRecord>, KudosError>;

    /// Replaces the points collection wholesale with `records`.
    async fn replace_points(&self, records: &[PointsRecord]) -> Result<(), KudosError>;

    /// Loads every picture entry in insertion order.
    async fn load_pictures(&self) -> Result<Vec<PictureEntry>, KudosError>;

    /// Appends a picture with zero appearances and returns the id the store assigned.
    async fn append_picture(&self, picture: &NewPicture) -> Result<String, KudosError>;

    /// Overwrites the stored picture whose id matches `entry.id`.
    async fn update_picture(&self, entry: &PictureEntry) -> Result<(), KudosError>;
}

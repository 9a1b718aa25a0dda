// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory store adapter for deterministic testing.
//!
//! `MemoryStore` implements `StoreAdapter` over two vectors. Each operation
//! can be made to fail on demand so tests can observe write-through handling.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use kudos_core::traits::adapter::PluginAdapter;
use kudos_core::traits::store::StoreAdapter;
use kudos_core::types::{AdapterType, HealthStatus, NewPicture, PictureEntry, PointsRecord};
use kudos_core::KudosError;

/// A mock store for testing.
///
/// Ids are assigned as `pic-1`, `pic-2`, ... in append order.
#[derive(Default)]
pub struct MemoryStore {
    points: Mutex<Vec<PointsRecord>>,
    pictures: Mutex<Vec<PictureEntry>>,
    next_id: AtomicU64,
    fail_points_writes: AtomicBool,
    fail_appends: AtomicBool,
    fail_picture_loads: AtomicBool,
    fail_updates: AtomicBool,
    replace_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with points records.
    pub fn with_points(records: Vec<PointsRecord>) -> Self {
        Self {
            points: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Create a store pre-seeded with pictures.
    pub fn with_pictures(entries: Vec<PictureEntry>) -> Self {
        let next_id = entries.len() as u64;
        Self {
            pictures: Mutex::new(entries),
            next_id: AtomicU64::new(next_id),
            ..Self::default()
        }
    }

    /// Make `replace_points` fail until reset.
    pub fn fail_points_writes(&self, fail: bool) {
        self.fail_points_writes.store(fail, Ordering::SeqCst);
    }

    /// Make `append_picture` fail until reset.
    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// Make `load_pictures` fail until reset.
    pub fn fail_picture_loads(&self, fail: bool) {
        self.fail_picture_loads.store(fail, Ordering::SeqCst);
    }

    /// Make `update_picture` fail until reset.
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the stored points collection.
    pub async fn points(&self) -> Vec<PointsRecord> {
        self.points.lock().await.clone()
    }

    /// Snapshot of the stored pictures collection.
    pub async fn pictures(&self) -> Vec<PictureEntry> {
        self.pictures.lock().await.clone()
    }

    /// Number of `replace_points` calls, including failed ones.
    pub fn replace_calls(&self) -> usize {
        self.replace_calls.load(Ordering::SeqCst)
    }

    /// Number of `update_picture` calls, including failed ones.
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    fn injected(collection: &str, op: &str) -> KudosError {
        KudosError::StoreWriteFailed {
            collection: collection.to_string(),
            message: format!("injected {op} failure"),
        }
    }
}

#[async_trait]
impl PluginAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory-store"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, KudosError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl StoreAdapter for MemoryStore {
    async fn load_points(&self) -> Result<Vec<PointsRecord>, KudosError> {
        Ok(self.points.lock().await.clone())
    }

    async fn replace_points(&self, records: &[PointsRecord]) -> Result<(), KudosError> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_points_writes.load(Ordering::SeqCst) {
            return Err(Self::injected("points", "replace"));
        }
        *self.points.lock().await = records.to_vec();
        Ok(())
    }

    async fn load_pictures(&self) -> Result<Vec<PictureEntry>, KudosError> {
        if self.fail_picture_loads.load(Ordering::SeqCst) {
            return Err(KudosError::Storage {
                source: "injected load failure".into(),
            });
        }
        Ok(self.pictures.lock().await.clone())
    }

    async fn append_picture(&self, picture: &NewPicture) -> Result<String, KudosError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(Self::injected("pictures", "append"));
        }
        let id = format!("pic-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.pictures.lock().await.push(PictureEntry {
            id: id.clone(),
            media_url: picture.media_url.clone(),
            caption: picture.caption.clone(),
            appearances: 0,
        });
        Ok(id)
    }

    async fn update_picture(&self, entry: &PictureEntry) -> Result<(), KudosError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(Self::injected("pictures", "update"));
        }
        let mut pictures = self.pictures.lock().await;
        match pictures.iter_mut().find(|p| p.id == entry.id) {
            Some(stored) => {
                *stored = entry.clone();
                Ok(())
            }
            None => Err(KudosError::NotFound {
                what: format!("stored picture {}", entry.id),
            }),
        }
    }
}

// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The engine: ledger, catalog, and rotation plus their write-through.
//!
//! Every mutation is applied in memory first and then written through to the
//! store with a single best-effort call. A failed write is logged and reported
//! in the returned [`Applied`]; the in-memory state stays authoritative.

use std::sync::Arc;

use kudos_core::{
    Applied, EarnSignal, KudosError, NewPicture, PictureEntry, PointsRecord, StoreAdapter,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, clean_caption};
use crate::ledger::{Ledger, PointAwards};
use crate::rotation::Rotation;

/// Owns all mutable bot state. Not shared: reach it through an
/// [`EngineHandle`](crate::actor::EngineHandle).
pub struct Engine {
    ledger: Ledger,
    catalog: Catalog,
    rotation: Rotation,
    store: Arc<dyn StoreAdapter>,
    rng: StdRng,
}

impl Engine {
    /// Creates an engine with empty mirrors and an entropy-seeded RNG.
    pub fn new(store: Arc<dyn StoreAdapter>, awards: PointAwards) -> Self {
        Self::with_rng(store, awards, StdRng::from_entropy())
    }

    /// Creates an engine with a caller-supplied RNG (seeded in tests).
    pub fn with_rng(store: Arc<dyn StoreAdapter>, awards: PointAwards, rng: StdRng) -> Self {
        Self {
            ledger: Ledger::new(awards),
            catalog: Catalog::default(),
            rotation: Rotation::default(),
            store,
            rng,
        }
    }

    /// Loads both collections from the store into the mirrors.
    pub async fn load_from_store(&mut self) -> Result<(), KudosError> {
        let points = self.store.load_points().await?;
        let pictures = self.store.load_pictures().await?;
        info!(
            users = points.len(),
            pictures = pictures.len(),
            "loaded collections from store"
        );
        self.ledger.load(points);
        self.catalog.load(pictures);
        Ok(())
    }

    /// Replaces the catalog mirror directly, without touching the store.
    pub fn seed_pictures(&mut self, entries: Vec<PictureEntry>) {
        self.catalog.load(entries);
    }

    pub fn points(&self) -> &[PointsRecord] {
        self.ledger.records()
    }

    pub fn pictures(&self) -> &[PictureEntry] {
        self.catalog.entries()
    }

    async fn sync_points(&self) -> Result<(), KudosError> {
        self.store.replace_points(self.ledger.records()).await
    }

    async fn sync_picture(&self, entry: &PictureEntry) -> Result<(), KudosError> {
        self.store.update_picture(entry).await
    }

    fn applied<T>(value: T, collection: &str, result: Result<(), KudosError>) -> Applied<T> {
        match result {
            Ok(()) => Applied::synced(value),
            Err(e) => {
                warn!(collection, error = %e, "write-through failed, keeping in-memory state");
                Applied::unsynced(value, e.to_string())
            }
        }
    }

    // --- Ledger ---

    /// Awards points for `signal` and writes the ledger through. Returns the new balance.
    pub async fn earn(&mut self, user_id: &str, signal: EarnSignal) -> Applied<i64> {
        let balance = self.ledger.earn(user_id, signal);
        debug!(user_id, %signal, balance, "points earned");
        let result = self.sync_points().await;
        Self::applied(balance, "points", result)
    }

    pub fn balance(&self, user_id: &str) -> Result<i64, KudosError> {
        self.ledger.balance(user_id)
    }

    /// Transfers points. Rejected transfers change nothing and write nothing.
    pub async fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: i64,
    ) -> Result<Applied<()>, KudosError> {
        self.ledger.transfer(from, to, amount)?;
        info!(from, to, amount, "transfer complete");
        let result = self.sync_points().await;
        Ok(Self::applied((), "points", result))
    }

    pub fn standings(&self) -> Vec<PointsRecord> {
        self.ledger.standings()
    }

    // --- Catalog ---

    /// Stores a new picture and refreshes the catalog mirror from the store.
    ///
    /// If the append fails nothing changes and `StoreWriteFailed` is returned.
    /// If only the refresh fails, the entry is added locally under the id the
    /// store assigned and the result is marked unsynced.
    pub async fn submit(
        &mut self,
        media_url: &str,
        caption: &str,
    ) -> Result<Applied<PictureEntry>, KudosError> {
        let picture = NewPicture {
            media_url: media_url.to_string(),
            caption: clean_caption(caption),
        };

        let id = self
            .store
            .append_picture(&picture)
            .await
            .map_err(|e| match e {
                KudosError::StoreWriteFailed { .. } => e,
                other => KudosError::StoreWriteFailed {
                    collection: "pictures".to_string(),
                    message: other.to_string(),
                },
            })?;

        let fallback = PictureEntry {
            id: id.clone(),
            media_url: picture.media_url,
            caption: picture.caption,
            appearances: 0,
        };

        let mut sync = match self.store.load_pictures().await {
            Ok(entries) => {
                self.catalog.load(entries);
                Ok(())
            }
            Err(e) => {
                warn!(id = %id, error = %e, "catalog reload failed, inserting submission locally");
                Err(format!("catalog reload failed: {e}"))
            }
        };

        let entry = match self.catalog.entries().iter().find(|entry| entry.id == id) {
            Some(entry) => entry.clone(),
            None => {
                if sync.is_ok() {
                    warn!(id = %id, "reloaded catalog is missing the submission, inserting locally");
                    sync = Err(format!("reloaded catalog is missing {id}"));
                }
                self.catalog.upsert(fallback.clone());
                fallback
            }
        };
        info!(id = %entry.id, caption = %entry.caption, "picture submitted");

        Ok(match sync {
            Ok(()) => Applied::synced(entry),
            Err(reason) => Applied::unsynced(entry, reason),
        })
    }

    /// Dispenses the picture whose caption matches `caption`.
    ///
    /// Returns the entry as it was before its counter was incremented.
    pub async fn find_by_caption(
        &mut self,
        caption: &str,
    ) -> Result<Applied<PictureEntry>, KudosError> {
        let index = self
            .catalog
            .position_by_caption(caption)
            .ok_or_else(|| KudosError::NotFound {
                what: format!("picture captioned {:?}", caption.trim()),
            })?;
        self.dispense(index).await
    }

    /// Dispenses a picture chosen uniformly among the least shown.
    ///
    /// Returns the entry as it was before its counter was incremented.
    pub async fn select_least_shown(&mut self) -> Result<Applied<PictureEntry>, KudosError> {
        let index = self
            .catalog
            .pick_least_shown(&mut self.rng)
            .ok_or_else(|| KudosError::NotFound {
                what: "pictures in catalog".to_string(),
            })?;
        self.dispense(index).await
    }

    async fn dispense(&mut self, index: usize) -> Result<Applied<PictureEntry>, KudosError> {
        let (before, after) = self
            .catalog
            .record_appearance(index)
            .ok_or_else(|| KudosError::Internal(format!("catalog index {index} out of range")))?;
        debug!(id = %after.id, appearances = after.appearances, "picture dispensed");
        let result = self.sync_picture(&after).await;
        Ok(Self::applied(before, "pictures", result))
    }

    /// Next picture from the shuffled rotation. Appearance counters are untouched.
    pub fn next_rotation(&mut self) -> Result<PictureEntry, KudosError> {
        self.rotation.next(self.catalog.entries(), &mut self.rng)
    }

    pub fn list_captions_sorted(&self) -> Vec<String> {
        self.catalog.captions_sorted()
    }

    pub fn top_by_appearances(&self, n: usize) -> Vec<PictureEntry> {
        self.catalog.top_by_appearances(n)
    }
}

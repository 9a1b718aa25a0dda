// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory picture catalog.
//!
//! Pure state and selection logic. Persistence and randomness are supplied
//! by the engine so every rule here can be tested synchronously.

use std::sync::LazyLock;

use kudos_core::PictureEntry;
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;

static EMBEDDED_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("embedded url pattern is valid"));

/// Removes embedded `http(s)://` links from a submitted caption, trims it and
/// collapses runs of whitespace to single spaces.
pub fn clean_caption(raw: &str) -> String {
    EMBEDDED_URL
        .replace_all(raw, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The mirrored picture catalog in store order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<PictureEntry>,
}

impl Catalog {
    /// Replaces the mirror with entries loaded from the store.
    pub fn load(&mut self, entries: Vec<PictureEntry>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[PictureEntry] {
        &self.entries
    }

    /// Inserts an entry locally, replacing one with the same id.
    pub fn upsert(&mut self, entry: PictureEntry) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Index of the first entry whose caption equals `query`, ignoring case
    /// and surrounding whitespace.
    pub fn position_by_caption(&self, query: &str) -> Option<usize> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .position(|e| e.caption.trim().to_lowercase() == query)
    }

    /// Picks uniformly among the entries tied for the fewest appearances.
    pub fn pick_least_shown<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        let minimum = self.entries.iter().map(|e| e.appearances).min()?;
        let candidates: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.appearances == minimum)
            .map(|(i, _)| i)
            .collect();
        candidates.choose(rng).copied()
    }

    /// Increments the appearance counter at `index`.
    ///
    /// Returns the entry as it was before and after the increment.
    pub fn record_appearance(&mut self, index: usize) -> Option<(PictureEntry, PictureEntry)> {
        let entry = self.entries.get_mut(index)?;
        let before = entry.clone();
        entry.appearances = entry.appearances.saturating_add(1);
        Some((before, entry.clone()))
    }

    /// Every caption, sorted case-insensitively with the raw caption as tie-break.
    pub fn captions_sorted(&self) -> Vec<String> {
        let mut captions: Vec<String> = self.entries.iter().map(|e| e.caption.clone()).collect();
        captions.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        captions
    }

    /// The `n` most dispensed entries. Entries never dispensed are excluded.
    pub fn top_by_appearances(&self, n: usize) -> Vec<PictureEntry> {
        let mut shown: Vec<PictureEntry> = self
            .entries
            .iter()
            .filter(|e| e.appearances > 0)
            .cloned()
            .collect();
        shown.sort_by(|a, b| b.appearances.cmp(&a.appearances));
        shown.truncate(n);
        shown
    }
}

// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shuffled, non-repeating rotation over the catalog.
//!
//! The queue holds snapshots. Dispensing from it never touches the catalog's
//! appearance counters.

use std::collections::VecDeque;

use kudos_core::{KudosError, PictureEntry};
use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Default)]
pub struct Rotation {
    queue: VecDeque<PictureEntry>,
}

impl Rotation {
    /// Number of entries left in the current cycle.
    #[cfg(test)]
    fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Pops the next entry, reshuffling a fresh snapshot of `catalog` when the
    /// current cycle is exhausted.
    pub fn next<R: Rng + ?Sized>(
        &mut self,
        catalog: &[PictureEntry],
        rng: &mut R,
    ) -> Result<PictureEntry, KudosError> {
        if self.queue.is_empty() {
            let mut cycle = catalog.to_vec();
            cycle.shuffle(rng);
            self.queue = cycle.into();
        }
        self.queue.pop_front().ok_or_else(|| KudosError::NotFound {
            what: "pictures to rotate".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn entries(ids: &[&str]) -> Vec<PictureEntry> {
        ids.iter()
            .map(|id| PictureEntry {
                id: (*id).into(),
                media_url: format!("https://v.groupme.com/{id}.mp4"),
                caption: id.to_uppercase(),
                appearances: 0,
            })
            .collect()
    }

    #[test]
    fn full_drain_is_a_permutation_then_reshuffles() {
        let catalog = entries(&["a", "b", "c"]);
        let mut rotation = Rotation::default();
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen: Vec<String> = (0..3)
            .map(|_| rotation.next(&catalog, &mut rng).unwrap().id)
            .collect();
        seen.sort();
        assert_eq!(seen, vec!["a", "b", "c"]);
        assert_eq!(rotation.remaining(), 0);

        rotation.next(&catalog, &mut rng).unwrap();
        assert_eq!(rotation.remaining(), 2);
    }

    #[test]
    fn mid_cycle_additions_wait_for_next_shuffle() {
        let mut catalog = entries(&["a", "b"]);
        let mut rotation = Rotation::default();
        let mut rng = StdRng::seed_from_u64(3);

        let first = rotation.next(&catalog, &mut rng).unwrap();
        catalog.extend(entries(&["z"]));
        let second = rotation.next(&catalog, &mut rng).unwrap();
        assert_ne!(first.id, "z");
        assert_ne!(second.id, "z");

        let mut next_cycle: Vec<String> = (0..3)
            .map(|_| rotation.next(&catalog, &mut rng).unwrap().id)
            .collect();
        next_cycle.sort();
        assert_eq!(next_cycle, vec!["a", "b", "z"]);
    }

    #[test]
    fn empty_catalog_is_not_found() {
        let mut rotation = Rotation::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            rotation.next(&[], &mut rng),
            Err(KudosError::NotFound { .. })
        ));
    }

    #[test]
    fn every_ordering_eventually_appears() {
        let catalog = entries(&["a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(11);
        let mut orderings = std::collections::HashSet::new();
        for _ in 0..300 {
            let mut rotation = Rotation::default();
            let order: Vec<String> = (0..3)
                .map(|_| rotation.next(&catalog, &mut rng).unwrap().id)
                .collect();
            orderings.insert(order);
        }
        assert_eq!(orderings.len(), 6);
    }
}

// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory points ledger.
//!
//! The ledger is the only code that mutates [`PointsRecord`]s. It performs no
//! I/O; the engine writes the whole collection through after each mutation.

use kudos_config::model::PointsConfig;
use kudos_core::{EarnSignal, KudosError, PointsRecord};

/// Points awarded per [`EarnSignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointAwards {
    pub command: i64,
    pub text: i64,
    pub media: i64,
}

impl PointAwards {
    pub fn for_signal(&self, signal: EarnSignal) -> i64 {
        match signal {
            EarnSignal::CommandUsed => self.command,
            EarnSignal::TextMessageSent => self.text,
            EarnSignal::MediaAttached => self.media,
        }
    }
}

impl Default for PointAwards {
    fn default() -> Self {
        Self::from(&PointsConfig::default())
    }
}

impl From<&PointsConfig> for PointAwards {
    fn from(config: &PointsConfig) -> Self {
        Self {
            command: config.command,
            text: config.text,
            media: config.media,
        }
    }
}

/// Point balances keyed by user id, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<PointsRecord>,
    awards: PointAwards,
}

impl Ledger {
    pub fn new(awards: PointAwards) -> Self {
        Self {
            records: Vec::new(),
            awards,
        }
    }

    /// Replaces the mirror with records loaded from the store.
    ///
    /// Negative balances are clamped to zero and duplicate ids keep their first record.
    pub fn load(&mut self, records: Vec<PointsRecord>) {
        self.records.clear();
        for mut record in records {
            if self.position(&record.user_id).is_some() {
                continue;
            }
            record.points = record.points.max(0);
            self.records.push(record);
        }
    }

    pub fn records(&self) -> &[PointsRecord] {
        &self.records
    }

    fn position(&self, user_id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.user_id == user_id)
    }

    fn entry(&mut self, user_id: &str) -> &mut PointsRecord {
        let index = match self.position(user_id) {
            Some(index) => index,
            None => {
                self.records.push(PointsRecord::new(user_id));
                self.records.len() - 1
            }
        };
        &mut self.records[index]
    }

    /// Awards the points for `signal`, creating the record at zero if absent.
    ///
    /// Returns the new balance.
    pub fn earn(&mut self, user_id: &str, signal: EarnSignal) -> i64 {
        let award = self.awards.for_signal(signal).max(0);
        let record = self.entry(user_id);
        record.points = record.points.saturating_add(award);
        record.points
    }

    /// Current balance, or `UserNotFound` when the user has never been scored.
    pub fn balance(&self, user_id: &str) -> Result<i64, KudosError> {
        self.position(user_id)
            .map(|index| self.records[index].points)
            .ok_or_else(|| KudosError::UserNotFound {
                user_id: user_id.to_string(),
            })
    }

    /// Moves `amount` points from `from` to `to`.
    ///
    /// A missing sender has a balance of zero. The recipient is created at zero
    /// if absent. Either both balances change or neither does.
    pub fn transfer(&mut self, from: &str, to: &str, amount: i64) -> Result<(), KudosError> {
        if amount < 0 {
            return Err(KudosError::InvalidAmount { amount });
        }

        let balance = self.position(from).map_or(0, |i| self.records[i].points);
        if balance < amount {
            return Err(KudosError::InsufficientFunds {
                user_id: from.to_string(),
                balance,
                amount,
            });
        }

        if from == to {
            return Ok(());
        }

        let credited = self
            .position(to)
            .map_or(0, |i| self.records[i].points)
            .checked_add(amount)
            .ok_or_else(|| KudosError::Internal(format!("balance overflow crediting {to}")))?;

        if amount > 0 {
            self.entry(from).points = balance - amount;
        }
        self.entry(to).points = credited;
        Ok(())
    }

    /// Records sorted by points descending. Ties keep first-seen order.
    pub fn standings(&self) -> Vec<PointsRecord> {
        let mut standings = self.records.clone();
        standings.sort_by(|a, b| b.points.cmp(&a.points));
        standings
    }
}

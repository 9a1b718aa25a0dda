// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Kudos group bot.
//!
//! This crate provides the error taxonomy, the ledger and catalog record
//! types, the platform-neutral inbound/outbound message types, and the
//! adapter traits every external collaborator implements.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::KudosError;
pub use types::{
    AdapterType, Applied, Attachment, EarnSignal, HealthStatus, InboundEvent, Member, NewPicture,
    OutboundAttachment, OutboundMessage, PictureEntry, PointsRecord, SenderKind, SyncStatus,
};

pub use traits::{OutboundClient, PluginAdapter, RosterClient, StoreAdapter};

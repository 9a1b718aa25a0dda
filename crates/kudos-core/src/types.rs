// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits, the engine, and the bot.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the role an adapter plays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Store,
    Outbound,
    Roster,
}

// --- Ledger and catalog records ---

/// A user's point balance. `points` is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsRecord {
    pub user_id: String,
    pub points: i64,
}

impl PointsRecord {
    /// A fresh record with a zero balance.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            points: 0,
        }
    }
}

/// A submitted piece of media with its caption and dispense counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureEntry {
    /// Store-assigned unique identifier.
    pub id: String,
    pub media_url: String,
    pub caption: String,
    /// Number of times this entry has been dispensed. Never decreases.
    pub appearances: u64,
}

/// A picture that has not been assigned an id by the store yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPicture {
    pub media_url: String,
    pub caption: String,
}

/// What a user did to earn points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EarnSignal {
    /// The message was a bot command.
    CommandUsed,
    /// A plain text message.
    TextMessageSent,
    /// The message carried a media attachment. Outranks the other two.
    MediaAttached,
}

// --- Inbound events ---

/// Who authored an inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SenderKind {
    Human,
    Bot,
}

/// An attachment on an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// An image or video.
    Media { url: String },
    /// A user mention. `ranges` pair up with `user_ids` by position.
    Mention {
        user_ids: Vec<String>,
        ranges: Vec<Range<usize>>,
    },
    /// Anything else the platform sends (locations, emoji, files).
    Other { kind: String },
}

/// A chat event received from the intake, normalized away from the platform's wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Raw message text. May be empty for media-only posts.
    pub text: String,
    /// Platform sender identifier (the bot's own id for bot posts).
    pub sender_id: String,
    pub sender_kind: SenderKind,
    /// The originating user account. Points are keyed by this.
    pub user_id: String,
    /// Display name at the time of posting.
    pub sender_name: String,
    pub attachments: Vec<Attachment>,
}

impl InboundEvent {
    /// Returns `true` if the event was posted by a bot, including this one.
    pub fn is_from_bot(&self) -> bool {
        self.sender_kind == SenderKind::Bot
    }

    /// Returns the first media url attached, if any.
    pub fn first_media(&self) -> Option<&str> {
        self.attachments.iter().find_map(|a| match a {
            Attachment::Media { url } => Some(url.as_str()),
            _ => None,
        })
    }

    /// Returns the user ids of the first mention attachment, if any.
    pub fn mentioned_users(&self) -> Option<&[String]> {
        self.attachments.iter().find_map(|a| match a {
            Attachment::Mention { user_ids, .. } => Some(user_ids.as_slice()),
            _ => None,
        })
    }
}

// --- Outbound messages ---

/// An attachment on an outbound post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundAttachment {
    Media {
        url: String,
    },
    /// `ranges[i]` is the `[start, end)` character span of `text` that tags `user_ids[i]`.
    Mention {
        user_ids: Vec<String>,
        ranges: Vec<Range<usize>>,
    },
}

/// A message to post to the group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutboundMessage {
    pub text: String,
    pub attachments: Vec<OutboundAttachment>,
}

impl OutboundMessage {
    /// A text-only message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    /// A captioned media post.
    pub fn media(caption: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: caption.into(),
            attachments: vec![OutboundAttachment::Media { url: url.into() }],
        }
    }
}

/// A member of the group roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user_id: String,
    pub nickname: String,
}

// --- Write-through outcomes ---

/// Whether a write-through to the store landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Synced,
    /// The in-memory mutation stands; the store is behind until the next successful write.
    Failed { reason: String },
}

impl SyncStatus {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncStatus::Synced)
    }
}

/// The result of a mutation that was applied in memory and written through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied<T> {
    pub value: T,
    pub sync: SyncStatus,
}

impl<T> Applied<T> {
    pub fn synced(value: T) -> Self {
        Self {
            value,
            sync: SyncStatus::Synced,
        }
    }

    pub fn unsynced(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            sync: SyncStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    /// Discards the sync status.
    pub fn into_value(self) -> T {
        self.value
    }
}

// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for inbound events.

use std::ops::Range;

use kudos_core::types::{Attachment, InboundEvent, PictureEntry, SenderKind};

/// A plain text message from a human group member.
pub fn human(user_id: &str, name: &str, text: &str) -> InboundEvent {
    InboundEvent {
        text: text.to_string(),
        sender_id: user_id.to_string(),
        sender_kind: SenderKind::Human,
        user_id: user_id.to_string(),
        sender_name: name.to_string(),
        attachments: Vec::new(),
    }
}

/// A message posted by a bot (this one or another).
pub fn bot(text: &str) -> InboundEvent {
    InboundEvent {
        text: text.to_string(),
        sender_id: "bot-1".to_string(),
        sender_kind: SenderKind::Bot,
        user_id: "bot-1".to_string(),
        sender_name: "kudos".to_string(),
        attachments: Vec::new(),
    }
}

/// Adds a media attachment.
pub fn with_media(mut event: InboundEvent, url: &str) -> InboundEvent {
    event.attachments.push(Attachment::Media {
        url: url.to_string(),
    });
    event
}

/// Adds a mention attachment tagging `user_ids`.
pub fn with_mentions(mut event: InboundEvent, user_ids: &[&str]) -> InboundEvent {
    let ranges: Vec<Range<usize>> = user_ids.iter().map(|_| 0..0).collect();
    event.attachments.push(Attachment::Mention {
        user_ids: user_ids.iter().map(|id| (*id).to_string()).collect(),
        ranges,
    });
    event
}

/// A catalog entry with a fixed id.
pub fn picture(id: &str, caption: &str, appearances: u64) -> PictureEntry {
    PictureEntry {
        id: id.to_string(),
        media_url: format!("https://i.groupme.com/{id}.jpeg"),
        caption: caption.to_string(),
        appearances,
    }
}

// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GroupMe JSON shapes and their conversion to and from the core types.
//!
//! GroupMe mention loci are `[start, length]` pairs; the core works with
//! `[start, end)` ranges.

use std::ops::Range;

use kudos_core::{Attachment, InboundEvent, Member, OutboundAttachment, OutboundMessage, SenderKind};
use serde::{Deserialize, Serialize};

/// The callback body GroupMe posts for every group message.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// `null` for media-only posts.
    #[serde(default)]
    pub text: Option<String>,
    /// `user`, `bot`, or `system`.
    #[serde(default)]
    pub sender_type: String,
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attachments: Vec<WireAttachment>,
}

/// An inbound attachment. Only the fields the bot reads are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct WireAttachment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub user_ids: Vec<String>,
    #[serde(default)]
    pub loci: Vec<[usize; 2]>,
}

impl From<WireAttachment> for Attachment {
    fn from(wire: WireAttachment) -> Self {
        match (wire.kind.as_str(), wire.url) {
            ("image" | "video", Some(url)) => Attachment::Media { url },
            ("mentions", _) => Attachment::Mention {
                ranges: wire.loci.iter().map(|&locus| locus_to_range(locus)).collect(),
                user_ids: wire.user_ids,
            },
            _ => Attachment::Other { kind: wire.kind },
        }
    }
}

impl From<WebhookPayload> for InboundEvent {
    fn from(payload: WebhookPayload) -> Self {
        // System notices (joins, renames) are not member activity.
        let sender_kind = match payload.sender_type.as_str() {
            "bot" | "system" => SenderKind::Bot,
            _ => SenderKind::Human,
        };
        InboundEvent {
            text: payload.text.unwrap_or_default(),
            sender_id: payload.sender_id,
            sender_kind,
            user_id: payload.user_id,
            sender_name: payload.name,
            attachments: payload.attachments.into_iter().map(Attachment::from).collect(),
        }
    }
}

fn locus_to_range([start, length]: [usize; 2]) -> Range<usize> {
    start..start.saturating_add(length)
}

fn range_to_locus(range: &Range<usize>) -> [usize; 2] {
    [range.start, range.end.saturating_sub(range.start)]
}

/// Body of `POST /bots/post`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotPost {
    pub bot_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<PostAttachment>,
}

/// An outbound attachment as GroupMe expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PostAttachment {
    Image {
        url: String,
    },
    Video {
        url: String,
        preview_url: String,
    },
    Mentions {
        user_ids: Vec<String>,
        loci: Vec<[usize; 2]>,
    },
}

impl From<&OutboundAttachment> for PostAttachment {
    fn from(attachment: &OutboundAttachment) -> Self {
        match attachment {
            OutboundAttachment::Media { url } if url.contains(".jpeg") => {
                PostAttachment::Image { url: url.clone() }
            }
            OutboundAttachment::Media { url } => PostAttachment::Video {
                url: url.clone(),
                preview_url: url.clone(),
            },
            OutboundAttachment::Mention { user_ids, ranges } => PostAttachment::Mentions {
                user_ids: user_ids.clone(),
                loci: ranges.iter().map(range_to_locus).collect(),
            },
        }
    }
}

impl BotPost {
    pub fn new(bot_id: &str, message: &OutboundMessage) -> Self {
        Self {
            bot_id: bot_id.to_string(),
            text: message.text.clone(),
            attachments: message.attachments.iter().map(PostAttachment::from).collect(),
        }
    }
}

/// Envelope of `GET /groups/:id`.
#[derive(Debug, Deserialize)]
pub struct GroupEnvelope {
    pub response: GroupResponse,
}

#[derive(Debug, Deserialize)]
pub struct GroupResponse {
    #[serde(default)]
    pub members: Vec<WireMember>,
}

#[derive(Debug, Deserialize)]
pub struct WireMember {
    pub user_id: String,
    pub nickname: String,
}

impl From<WireMember> for Member {
    fn from(wire: WireMember) -> Self {
        Member {
            user_id: wire.user_id,
            nickname: wire.nickname,
        }
    }
}

// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds messages that tag group members.
//!
//! Ranges are `[start, end)` character offsets into the final text, found by
//! walking the text as it is assembled.

use std::ops::Range;

use kudos_core::{Member, OutboundAttachment, OutboundMessage};

/// Accumulates text and mention ranges side by side.
#[derive(Debug, Default)]
struct MentionBuilder {
    text: String,
    len: usize,
    user_ids: Vec<String>,
    ranges: Vec<Range<usize>>,
}

impl MentionBuilder {
    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
        self.len += text.chars().count();
    }

    fn push_mention(&mut self, member: &Member) {
        let start = self.len;
        self.push_text("@");
        self.push_text(&member.nickname);
        self.user_ids.push(member.user_id.clone());
        self.ranges.push(start..self.len);
    }

    fn finish(self) -> OutboundMessage {
        OutboundMessage {
            text: self.text,
            attachments: vec![OutboundAttachment::Mention {
                user_ids: self.user_ids,
                ranges: self.ranges,
            }],
        }
    }
}

/// Tags every member in `members`, separated by single spaces.
pub fn mention_all(members: &[Member]) -> OutboundMessage {
    let mut builder = MentionBuilder::default();
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            builder.push_text(" ");
        }
        builder.push_mention(member);
    }
    builder.finish()
}

/// Tags one randomly selected member, optionally saying what for.
pub fn selected(member: &Member, reason: Option<&str>) -> OutboundMessage {
    let mut builder = MentionBuilder::default();
    builder.push_mention(member);
    if let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) {
        builder.push_text(", you have been randomly selected for ");
        builder.push_text(reason);
        builder.push_text(".");
    }
    builder.finish()
}

/// Members whose nickname carries the `[tag]` marker, ignoring case. `all` matches everyone.
pub fn members_tagged<'a>(members: &'a [Member], tag: &str) -> Vec<&'a Member> {
    let tag = tag.to_lowercase();
    if tag == "all" {
        return members.iter().collect();
    }
    let marker = format!("[{tag}]");
    members
        .iter()
        .filter(|m| m.nickname.to_lowercase().contains(&marker))
        .collect()
}

// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply text for the ledger and catalog commands.

use std::collections::HashMap;

use kudos_core::{PictureEntry, PointsRecord};

const CAPTION_SEPARATOR: &str = ", ";

pub fn balance(nickname: &str, points: i64) -> String {
    format!("{nickname}'s current balance is {points} points.")
}

pub fn no_balance(nickname: &str) -> String {
    format!("{nickname} has no points yet.")
}

/// One `rank. nickname: points` line per record. Unknown users show their id.
pub fn leaderboard(standings: &[PointsRecord], nicknames: &HashMap<String, String>) -> String {
    standings
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let name = nicknames
                .get(&record.user_id)
                .map_or(record.user_id.as_str(), String::as_str);
            format!("{}. {}: {}", i + 1, name, record.points)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `rank. caption - appearances` line per entry.
pub fn top_pictures(entries: &[PictureEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {} - {}", i + 1, entry.caption, entry.appearances))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Joins captions with `", "` into as few messages as fit `max_len` characters each.
///
/// Every caption appears exactly once. A caption longer than `max_len` is
/// split across messages of its own.
pub fn paginate_captions(captions: &[String], max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let separator_len = CAPTION_SEPARATOR.chars().count();
    let mut pages = Vec::new();
    let mut page = String::new();
    let mut page_len = 0;

    for caption in captions {
        let caption_len = caption.chars().count();

        if caption_len > max_len {
            if !page.is_empty() {
                pages.push(std::mem::take(&mut page));
                page_len = 0;
            }
            let chars: Vec<char> = caption.chars().collect();
            pages.extend(chars.chunks(max_len).map(|chunk| chunk.iter().collect()));
            continue;
        }

        let needed = if page.is_empty() {
            caption_len
        } else {
            separator_len + caption_len
        };
        if page_len + needed > max_len {
            pages.push(std::mem::take(&mut page));
            page_len = 0;
        }
        if !page.is_empty() {
            page.push_str(CAPTION_SEPARATOR);
            page_len += separator_len;
        }
        page.push_str(caption);
        page_len += caption_len;
    }

    if !page.is_empty() {
        pages.push(page);
    }
    pages
}

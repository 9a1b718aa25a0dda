// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classifies an inbound event into the activity it earns points for.

use kudos_core::{EarnSignal, InboundEvent};

use crate::command::is_command;

/// Media outranks commands, which outrank plain text.
pub fn earn_signal(event: &InboundEvent, prefix: char) -> EarnSignal {
    if event.first_media().is_some() {
        EarnSignal::MediaAttached
    } else if is_command(&event.text, prefix) {
        EarnSignal::CommandUsed
    } else {
        EarnSignal::TextMessageSent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kudos_core::Attachment;
    use kudos_test_utils::fixtures::{human, with_media};

    #[test]
    fn media_beats_command() {
        let event = with_media(human("u1", "Al", "/submit cat"), "https://i.groupme.com/c.jpeg");
        assert_eq!(earn_signal(&event, '/'), EarnSignal::MediaAttached);
    }

    #[test]
    fn command_and_text() {
        assert_eq!(earn_signal(&human("u1", "Al", "/ping"), '/'), EarnSignal::CommandUsed);
        assert_eq!(earn_signal(&human("u1", "Al", "hi"), '/'), EarnSignal::TextMessageSent);
    }

    #[test]
    fn bare_prefix_scores_as_command() {
        assert_eq!(earn_signal(&human("u1", "Al", "/"), '/'), EarnSignal::CommandUsed);
    }

    #[test]
    fn non_media_attachments_do_not_count_as_media() {
        let mut event = human("u1", "Al", "look");
        event.attachments.push(Attachment::Other {
            kind: "location".into(),
        });
        assert_eq!(earn_signal(&event, '/'), EarnSignal::TextMessageSent);
    }
}

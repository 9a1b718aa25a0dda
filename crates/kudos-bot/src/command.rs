// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command grammar and the closed set of bot commands.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Every command the bot understands.
///
/// Names are matched lower-cased. Anything else resolves to [`CommandKind::Unknown`],
/// which dispatches to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CommandKind {
    Bal,
    Commands,
    Leaderboard,
    #[strum(to_string = "listpics", serialize = "picslist")]
    ListPics,
    Mention,
    Mock,
    MockPrev,
    Pay,
    Pic,
    Ping,
    Pog,
    Say,
    Select,
    Shout,
    ShoutPrev,
    Shrug,
    Shuffle,
    Submit,
    TopPics,
    Uwu,
    UwuPrev,
    Unknown,
}

impl CommandKind {
    /// Resolves an already lower-cased command name.
    pub fn resolve(name: &str) -> Self {
        CommandKind::from_str(name).unwrap_or(CommandKind::Unknown)
    }

    /// All real commands, in listing order.
    pub fn known() -> impl Iterator<Item = CommandKind> {
        CommandKind::iter().filter(|kind| *kind != CommandKind::Unknown)
    }
}

/// A parsed command message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub kind: CommandKind,
    /// The lower-cased name as typed.
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// Arguments joined back into free text.
    pub fn rest(&self) -> String {
        self.args.join(" ")
    }
}

/// Returns `true` if `text` starts with the command prefix.
///
/// This decides scoring and whether the message is remembered as the
/// previous one. A bare prefix counts even though [`parse`] rejects it.
pub fn is_command(text: &str, prefix: char) -> bool {
    text.starts_with(prefix)
}

/// Parses `text` as a command to dispatch.
///
/// Dispatchable commands start with `prefix` and are at least two characters
/// long. The remainder is trimmed and split on whitespace; the first token
/// lower-cased is the name.
pub fn parse(text: &str, prefix: char) -> Option<ParsedCommand> {
    if !is_command(text, prefix) || text.chars().count() < 2 {
        return None;
    }
    let mut tokens = text[prefix.len_utf8()..].split_whitespace();
    let name = tokens.next()?.to_lowercase();
    Some(ParsedCommand {
        kind: CommandKind::resolve(&name),
        name,
        args: tokens.map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_args() {
        let cmd = parse("/PAY @bob 5", '/').unwrap();
        assert_eq!(cmd.kind, CommandKind::Pay);
        assert_eq!(cmd.name, "pay");
        assert_eq!(cmd.args, vec!["@bob", "5"]);
        assert_eq!(cmd.rest(), "@bob 5");
    }

    #[test]
    fn requires_prefix_and_two_characters() {
        assert!(parse("/", '/').is_none());
        assert!(parse("hello", '/').is_none());
        assert!(parse(" /ping", '/').is_none());
        assert!(parse("!ping", '!').is_some());
    }

    #[test]
    fn bare_prefix_is_a_command_but_not_dispatchable() {
        assert!(is_command("/", '/'));
        assert!(parse("/", '/').is_none());
        assert!(!is_command("hi /ping", '/'));
    }

    #[test]
    fn whitespace_only_after_prefix_is_not_a_command() {
        assert!(parse("/   ", '/').is_none());
    }

    #[test]
    fn aliases_resolve_to_the_same_kind() {
        assert_eq!(CommandKind::resolve("listpics"), CommandKind::ListPics);
        assert_eq!(CommandKind::resolve("picslist"), CommandKind::ListPics);
        assert_eq!(CommandKind::ListPics.to_string(), "listpics");
    }

    #[test]
    fn unknown_names_are_unknown() {
        assert_eq!(parse("/frobnicate", '/').unwrap().kind, CommandKind::Unknown);
        assert_eq!(CommandKind::resolve("unknown"), CommandKind::Unknown);
    }

    #[test]
    fn known_excludes_unknown() {
        assert!(CommandKind::known().all(|k| k != CommandKind::Unknown));
        assert!(CommandKind::known().any(|k| k == CommandKind::ShoutPrev));
    }
}

// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command dispatch.
//!
//! Handlers are orchestration only: they call the engine and roster, build
//! replies, and hand them to the outbound client. User-facing failures
//! (unknown user, bad amount, overdraft, missing picture) become replies or
//! silence; anything else is returned to the caller to log.

use std::collections::HashMap;
use std::sync::Arc;

use kudos_core::{
    Attachment, KudosError, Member, OutboundClient, OutboundMessage, PictureEntry, RosterClient,
};
use kudos_engine::EngineHandle;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::command::{CommandKind, ParsedCommand};
use crate::{format, mention, text};

/// Number of entries the `toppics` command lists.
pub const TOP_PICTURES: usize = 10;

const SHRUG: &str = "¯\\_(ツ)_/¯";
const POG_IMAGE: &str = "https://i.groupme.com/128x128.png.89c49b2a867c42f3a2d8f077f9c8681b";

/// Who sent a command and what came with it.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// User id the sender's points are keyed by.
    pub user_id: String,
    pub sender_name: String,
    pub attachments: Vec<Attachment>,
    /// The last non-command message seen before this one.
    pub previous_text: Option<String>,
}

impl CommandContext {
    fn first_mention(&self) -> Option<&str> {
        self.attachments.iter().find_map(|a| match a {
            Attachment::Mention { user_ids, .. } => user_ids.first().map(String::as_str),
            _ => None,
        })
    }

    fn first_media(&self) -> Option<&str> {
        self.attachments.iter().find_map(|a| match a {
            Attachment::Media { url } => Some(url.as_str()),
            _ => None,
        })
    }
}

/// Routes parsed commands to their handlers.
pub struct Dispatcher {
    engine: EngineHandle,
    outbound: Arc<dyn OutboundClient>,
    roster: Arc<dyn RosterClient>,
    prefix: char,
    max_message_len: usize,
}

impl Dispatcher {
    pub fn new(
        engine: EngineHandle,
        outbound: Arc<dyn OutboundClient>,
        roster: Arc<dyn RosterClient>,
        prefix: char,
        max_message_len: usize,
    ) -> Self {
        Self {
            engine,
            outbound,
            roster,
            prefix,
            max_message_len,
        }
    }

    /// Runs the handler for `command` and posts its replies in order.
    pub async fn dispatch(
        &self,
        command: &ParsedCommand,
        ctx: &CommandContext,
    ) -> Result<(), KudosError> {
        let replies = self.respond(command, ctx).await?;
        debug!(command = %command.name, replies = replies.len(), "command handled");
        for reply in replies {
            self.outbound.post(reply).await?;
        }
        Ok(())
    }

    /// Computes the replies for `command` without posting them.
    pub async fn respond(
        &self,
        command: &ParsedCommand,
        ctx: &CommandContext,
    ) -> Result<Vec<OutboundMessage>, KudosError> {
        let rest = command.rest();
        match command.kind {
            CommandKind::Bal => self.balance(ctx).await,
            CommandKind::Pay => self.pay(command, ctx).await,
            CommandKind::Leaderboard => self.leaderboard().await,
            CommandKind::Pic => self.picture(&rest).await,
            CommandKind::Shuffle => self.shuffle().await,
            CommandKind::Submit => self.submit(&rest, ctx).await,
            CommandKind::ListPics => self.list_pictures().await,
            CommandKind::TopPics => self.top_pictures().await,
            CommandKind::Mention => self.mention(command).await,
            CommandKind::Select => self.select(&rest).await,
            CommandKind::Ping => Ok(vec![OutboundMessage::text("Pong!")]),
            CommandKind::Pog => Ok(vec![OutboundMessage::media("", POG_IMAGE)]),
            CommandKind::Say => Ok(non_empty(rest)),
            CommandKind::Shout => Ok(non_empty(text::shout(&rest))),
            CommandKind::ShoutPrev => Ok(previous(ctx, text::shout)),
            CommandKind::Mock => Ok(non_empty(text::mock(&rest, &mut rand::thread_rng()))),
            CommandKind::MockPrev => Ok(previous(ctx, |t| text::mock(t, &mut rand::thread_rng()))),
            CommandKind::Uwu => Ok(non_empty_then(&rest, |t| text::uwu(t, &mut rand::thread_rng()))),
            CommandKind::UwuPrev => Ok(previous(ctx, |t| text::uwu(t, &mut rand::thread_rng()))),
            CommandKind::Shrug => Ok(vec![OutboundMessage::text(SHRUG)]),
            CommandKind::Commands => Ok(vec![OutboundMessage::text(self.command_list())]),
            CommandKind::Unknown => Ok(Vec::new()),
        }
    }

    fn command_list(&self) -> String {
        CommandKind::known()
            .map(|kind| format!("{}{kind}", self.prefix))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Roster lookup that degrades to an empty list so replies can fall back to ids.
    async fn members_or_empty(&self) -> Vec<Member> {
        match self.roster.members().await {
            Ok(members) => members,
            Err(e) => {
                warn!(error = %e, "roster lookup failed, falling back to user ids");
                Vec::new()
            }
        }
    }

    async fn nickname_of(&self, user_id: &str, fallback: &str) -> String {
        self.members_or_empty()
            .await
            .into_iter()
            .find(|m| m.user_id == user_id)
            .map(|m| m.nickname)
            .unwrap_or_else(|| fallback.to_string())
    }

    async fn balance(&self, ctx: &CommandContext) -> Result<Vec<OutboundMessage>, KudosError> {
        let (target, fallback) = match ctx.first_mention() {
            Some(mentioned) => (mentioned, mentioned),
            None => (ctx.user_id.as_str(), ctx.sender_name.as_str()),
        };
        let nickname = self.nickname_of(target, fallback).await;
        let reply = match self.engine.balance(target).await {
            Ok(points) => format::balance(&nickname, points),
            Err(KudosError::UserNotFound { .. }) => format::no_balance(&nickname),
            Err(e) => return reply_for(e),
        };
        Ok(vec![OutboundMessage::text(reply)])
    }

    async fn pay(
        &self,
        command: &ParsedCommand,
        ctx: &CommandContext,
    ) -> Result<Vec<OutboundMessage>, KudosError> {
        let Some(recipient) = ctx.first_mention() else {
            return Ok(Vec::new());
        };
        let Some(amount) = command.args.last().and_then(|a| a.parse::<i64>().ok()) else {
            return Ok(Vec::new());
        };

        match self.engine.transfer(&ctx.user_id, recipient, amount).await {
            Ok(_) => Ok(vec![OutboundMessage::text("Transaction complete.")]),
            Err(e) => reply_for(e),
        }
    }

    async fn leaderboard(&self) -> Result<Vec<OutboundMessage>, KudosError> {
        let standings = self.engine.standings().await?;
        if standings.is_empty() {
            return Ok(Vec::new());
        }
        let nicknames: HashMap<String, String> = self
            .members_or_empty()
            .await
            .into_iter()
            .map(|m| (m.user_id, m.nickname))
            .collect();
        Ok(vec![OutboundMessage::text(format::leaderboard(
            &standings, &nicknames,
        ))])
    }

    async fn picture(&self, caption: &str) -> Result<Vec<OutboundMessage>, KudosError> {
        let result = if caption.trim().is_empty() {
            self.engine.select_least_shown().await
        } else {
            self.engine.find_by_caption(caption).await
        };
        match result {
            Ok(applied) => Ok(vec![media_post(applied.value)]),
            Err(e) => reply_for(e),
        }
    }

    async fn shuffle(&self) -> Result<Vec<OutboundMessage>, KudosError> {
        match self.engine.next_rotation().await {
            Ok(entry) => Ok(vec![media_post(entry)]),
            Err(e) => reply_for(e),
        }
    }

    async fn submit(
        &self,
        caption: &str,
        ctx: &CommandContext,
    ) -> Result<Vec<OutboundMessage>, KudosError> {
        let Some(media_url) = ctx.first_media() else {
            return Ok(Vec::new());
        };
        match self.engine.submit(media_url, caption).await {
            Ok(_) => Ok(vec![OutboundMessage::text("Submission received!")]),
            Err(KudosError::StoreWriteFailed { collection, message }) => {
                warn!(%collection, %message, "submission not stored");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn list_pictures(&self) -> Result<Vec<OutboundMessage>, KudosError> {
        let captions = self.engine.list_captions_sorted().await?;
        Ok(format::paginate_captions(&captions, self.max_message_len)
            .into_iter()
            .map(OutboundMessage::text)
            .collect())
    }

    async fn top_pictures(&self) -> Result<Vec<OutboundMessage>, KudosError> {
        let top = self.engine.top_by_appearances(TOP_PICTURES).await?;
        if top.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![OutboundMessage::text(format::top_pictures(&top))])
    }

    async fn mention(&self, command: &ParsedCommand) -> Result<Vec<OutboundMessage>, KudosError> {
        let Some(tag) = command.args.first() else {
            return Ok(Vec::new());
        };
        let members = self.roster.members().await?;
        let tagged: Vec<Member> = mention::members_tagged(&members, tag)
            .into_iter()
            .cloned()
            .collect();
        if tagged.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![mention::mention_all(&tagged)])
    }

    async fn select(&self, reason: &str) -> Result<Vec<OutboundMessage>, KudosError> {
        let members = self.roster.members().await?;
        let chosen = members.choose(&mut rand::thread_rng()).cloned();
        Ok(chosen
            .map(|member| vec![mention::selected(&member, Some(reason))])
            .unwrap_or_default())
    }
}

/// Answers a user-facing error with its reply, or with silence when it has
/// none. Every other error is returned for the event loop to log.
fn reply_for(err: KudosError) -> Result<Vec<OutboundMessage>, KudosError> {
    if !err.is_user_facing() {
        return Err(err);
    }
    let reply = match err {
        KudosError::InvalidAmount { .. } => "You cannot send negative points.",
        KudosError::InsufficientFunds { .. } => {
            "You do not have sufficient points for this transaction."
        }
        _ => return Ok(Vec::new()),
    };
    Ok(vec![OutboundMessage::text(reply)])
}

fn media_post(entry: PictureEntry) -> OutboundMessage {
    OutboundMessage::media(entry.caption, entry.media_url)
}

fn non_empty(text: String) -> Vec<OutboundMessage> {
    if text.trim().is_empty() {
        Vec::new()
    } else {
        vec![OutboundMessage::text(text)]
    }
}

fn non_empty_then(input: &str, transform: impl FnOnce(&str) -> String) -> Vec<OutboundMessage> {
    if input.trim().is_empty() {
        Vec::new()
    } else {
        vec![OutboundMessage::text(transform(input))]
    }
}

fn previous(ctx: &CommandContext, transform: impl FnOnce(&str) -> String) -> Vec<OutboundMessage> {
    match ctx.previous_text.as_deref() {
        Some(prev) => non_empty_then(prev, transform),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_rejections_become_replies() {
        let replies = reply_for(KudosError::InvalidAmount { amount: -2 }).unwrap();
        assert_eq!(replies[0].text, "You cannot send negative points.");

        let replies = reply_for(KudosError::InsufficientFunds {
            user_id: "u1".into(),
            balance: 1,
            amount: 4,
        })
        .unwrap();
        assert_eq!(
            replies[0].text,
            "You do not have sufficient points for this transaction."
        );
    }

    #[test]
    fn catalog_misses_are_silent() {
        let replies = reply_for(KudosError::NotFound {
            what: "picture".into(),
        })
        .unwrap();
        assert!(replies.is_empty());
    }

    #[test]
    fn internal_errors_propagate() {
        let err = reply_for(KudosError::Internal("engine task stopped".into())).unwrap_err();
        assert!(matches!(err, KudosError::Internal(_)));
        assert!(reply_for(KudosError::StoreWriteFailed {
            collection: "pictures".into(),
            message: "offline".into(),
        })
        .is_err());
    }
}

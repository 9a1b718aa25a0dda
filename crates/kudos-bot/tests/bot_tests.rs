// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event loop and command dispatch against mock collaborators.

use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use kudos_bot::{BotLoop, Dispatcher};
use kudos_core::{InboundEvent, OutboundAttachment, PointsRecord};
use kudos_engine::{Engine, EngineHandle, PointAwards, spawn};
use kudos_test_utils::fixtures::{bot, human, picture, with_media, with_mentions};
use kudos_test_utils::{MemoryStore, MockOutbound, MockRoster};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

struct Harness {
    store: Arc<MemoryStore>,
    outbound: Arc<MockOutbound>,
    roster: Arc<MockRoster>,
    engine: EngineHandle,
    bot: BotLoop,
}

impl Harness {
    async fn new(store: MemoryStore, max_message_len: usize) -> Self {
        let store = Arc::new(store);
        let mut engine = Engine::with_rng(
            store.clone(),
            PointAwards::default(),
            StdRng::seed_from_u64(21),
        );
        engine.load_from_store().await.unwrap();
        let (engine, _task) = spawn(engine);

        let outbound = Arc::new(MockOutbound::new());
        let roster = Arc::new(MockRoster::new(&[
            ("u1", "Al"),
            ("u2", "Bo [ops]"),
            ("u3", "Cy [OPS]"),
        ]));
        let dispatcher = Arc::new(Dispatcher::new(
            engine.clone(),
            outbound.clone(),
            roster.clone(),
            '/',
            max_message_len,
        ));
        let bot = BotLoop::new(engine.clone(), dispatcher, '/');
        Self {
            store,
            outbound,
            roster,
            engine,
            bot,
        }
    }

    async fn send(&mut self, event: InboundEvent) {
        if let Some(task) = self.bot.handle_event(event) {
            task.await.unwrap();
        }
    }

    async fn texts(&self) -> Vec<String> {
        self.outbound.sent_texts().await
    }
}

fn record(user_id: &str, points: i64) -> PointsRecord {
    PointsRecord {
        user_id: user_id.to_string(),
        points,
    }
}

#[tokio::test]
async fn bot_events_are_ignored_entirely() {
    let mut h = Harness::new(MemoryStore::new(), 1000).await;
    h.send(bot("/ping")).await;
    h.send(bot("hello")).await;

    assert!(h.texts().await.is_empty());
    assert!(h.store.points().await.is_empty());
    assert_eq!(h.store.replace_calls(), 0);

    // The bot's own text never becomes the previous message.
    h.send(bot("from the bot")).await;
    h.send(human("u1", "Al", "/shoutprev")).await;
    assert!(h.texts().await.is_empty());
}

#[tokio::test]
async fn messages_earn_points_by_kind() {
    let mut h = Harness::new(MemoryStore::new(), 1000).await;
    h.send(human("u1", "Al", "hello")).await;
    h.send(human("u1", "Al", "/frobnicate")).await;
    h.send(with_media(human("u1", "Al", ""), "https://i.groupme.com/a.jpeg")).await;

    assert_eq!(h.engine.balance("u1").await.unwrap(), 2 + 1 + 3);
    // Unknown commands produce nothing.
    assert!(h.texts().await.is_empty());
}

#[tokio::test]
async fn bare_prefix_scores_as_command_and_is_not_remembered() {
    let mut h = Harness::new(MemoryStore::new(), 1000).await;
    h.send(human("u1", "Al", "quiet words")).await;
    h.send(human("u1", "Al", "/")).await;
    h.send(human("u1", "Al", "/shoutprev")).await;

    assert_eq!(h.engine.balance("u1").await.unwrap(), 2 + 1 + 1);
    assert_eq!(h.texts().await, vec!["QUIET WORDS"]);
}

#[tokio::test]
async fn balance_counts_the_command_itself() {
    let mut h = Harness::new(MemoryStore::new(), 1000).await;
    h.send(human("u1", "Al", "/bal")).await;
    assert_eq!(h.texts().await, vec!["Al's current balance is 1 points."]);
}

#[tokio::test]
async fn balance_of_mentioned_user_without_record() {
    let mut h = Harness::new(MemoryStore::new(), 1000).await;
    h.send(with_mentions(human("u1", "Al", "/bal @Bo"), &["u2"])).await;
    assert_eq!(h.texts().await, vec!["Bo [ops] has no points yet."]);
}

#[tokio::test]
async fn balance_falls_back_to_sender_name_when_roster_fails() {
    let mut h = Harness::new(MemoryStore::with_points(vec![record("u1", 4)]), 1000).await;
    h.roster.fail(true);
    h.send(human("u1", "Alfred", "/bal")).await;
    assert_eq!(h.texts().await, vec!["Alfred's current balance is 5 points."]);
}

#[tokio::test]
async fn pay_moves_points_to_the_mentioned_user() {
    let mut h = Harness::new(MemoryStore::with_points(vec![record("u1", 10)]), 1000).await;
    h.send(with_mentions(human("u1", "Al", "/pay @Bo 4"), &["u2"])).await;

    assert_eq!(h.texts().await, vec!["Transaction complete."]);
    assert_eq!(h.engine.balance("u1").await.unwrap(), 10 + 1 - 4);
    assert_eq!(h.engine.balance("u2").await.unwrap(), 4);
    assert_eq!(h.store.points().await, vec![record("u1", 7), record("u2", 4)]);
}

#[tokio::test]
async fn pay_rejections_reply_and_change_nothing() {
    let mut h = Harness::new(MemoryStore::with_points(vec![record("u1", 2)]), 1000).await;
    h.send(with_mentions(human("u1", "Al", "/pay @Bo -1"), &["u2"])).await;
    h.send(with_mentions(human("u1", "Al", "/pay @Bo 50"), &["u2"])).await;

    assert_eq!(
        h.texts().await,
        vec![
            "You cannot send negative points.",
            "You do not have sufficient points for this transaction."
        ]
    );
    assert_eq!(h.engine.balance("u1").await.unwrap(), 4);
    assert!(h.engine.balance("u2").await.is_err());
}

#[tokio::test]
async fn pay_without_mention_or_amount_is_silent() {
    let mut h = Harness::new(MemoryStore::with_points(vec![record("u1", 9)]), 1000).await;
    h.send(human("u1", "Al", "/pay Bo 3")).await;
    h.send(with_mentions(human("u1", "Al", "/pay @Bo lots"), &["u2"])).await;
    assert!(h.texts().await.is_empty());
}

#[tokio::test]
async fn submit_then_fetch_by_caption() {
    let mut h = Harness::new(MemoryStore::new(), 1000).await;
    h.send(with_media(
        human("u1", "Al", "/submit Sunset https://example.com/x"),
        "https://i.groupme.com/s.jpeg",
    ))
    .await;
    h.send(human("u2", "Bo", "/pic sunset")).await;

    let sent = h.outbound.sent_messages().await;
    assert_eq!(sent[0].text, "Submission received!");
    assert_eq!(sent[1].text, "Sunset");
    assert_eq!(
        sent[1].attachments,
        vec![OutboundAttachment::Media {
            url: "https://i.groupme.com/s.jpeg".into()
        }]
    );
    assert_eq!(h.store.pictures().await[0].appearances, 1);
}

#[tokio::test]
async fn submit_without_media_and_caption_miss_are_silent() {
    let mut h = Harness::new(MemoryStore::new(), 1000).await;
    h.send(human("u1", "Al", "/submit nothing attached")).await;
    h.send(human("u1", "Al", "/pic nothing attached")).await;
    assert!(h.texts().await.is_empty());
}

#[tokio::test]
async fn listpics_paginates_sorted_captions() {
    let pictures = vec![
        picture("p1", "walrus", 0),
        picture("p2", "Aardvark", 0),
        picture("p3", "mongoose", 0),
        picture("p4", "capybara", 0),
    ];
    let mut h = Harness::new(MemoryStore::with_pictures(pictures), 20).await;
    h.send(human("u1", "Al", "/picslist")).await;

    assert_eq!(
        h.texts().await,
        vec!["Aardvark, capybara", "mongoose, walrus"]
    );
}

#[tokio::test]
async fn toppics_lists_dispensed_pictures_only() {
    let pictures = vec![
        picture("p1", "one", 0),
        picture("p2", "two", 5),
        picture("p3", "three", 2),
    ];
    let mut h = Harness::new(MemoryStore::with_pictures(pictures), 1000).await;
    h.send(human("u1", "Al", "/toppics")).await;
    assert_eq!(h.texts().await, vec!["1. two - 5\n2. three - 2"]);
}

#[tokio::test]
async fn shuffle_posts_media_without_counting() {
    let mut h = Harness::new(
        MemoryStore::with_pictures(vec![picture("p1", "only", 0)]),
        1000,
    )
    .await;
    h.send(human("u1", "Al", "/shuffle")).await;
    h.send(human("u1", "Al", "/shuffle")).await;

    assert_eq!(h.texts().await, vec!["only", "only"]);
    assert_eq!(h.store.pictures().await[0].appearances, 0);
}

#[tokio::test]
async fn mention_tags_members_with_exact_ranges() {
    let mut h = Harness::new(MemoryStore::new(), 1000).await;
    h.send(human("u1", "Al", "/mention ops")).await;

    let sent = h.outbound.sent_messages().await;
    assert_eq!(sent.len(), 1);
    let message = &sent[0];
    assert_eq!(message.text, "@Bo [ops] @Cy [OPS]");
    let OutboundAttachment::Mention { user_ids, ranges } = &message.attachments[0] else {
        panic!("expected a mention attachment");
    };
    assert_eq!(user_ids, &vec!["u2".to_string(), "u3".to_string()]);
    let expected: Vec<Range<usize>> = vec![0..9, 10..19];
    assert_eq!(ranges, &expected);
}

#[tokio::test]
async fn mention_with_no_match_is_silent() {
    let mut h = Harness::new(MemoryStore::new(), 1000).await;
    h.send(human("u1", "Al", "/mention dev")).await;
    h.send(human("u1", "Al", "/mention")).await;
    assert!(h.texts().await.is_empty());
}

#[tokio::test]
async fn select_tags_someone_from_the_roster() {
    let mut h = Harness::new(MemoryStore::new(), 1000).await;
    h.send(human("u1", "Al", "/select cleanup duty")).await;

    let texts = h.texts().await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with('@'));
    assert!(texts[0].ends_with(", you have been randomly selected for cleanup duty."));
}

#[tokio::test]
async fn echo_commands() {
    let mut h = Harness::new(MemoryStore::new(), 1000).await;
    h.send(human("u1", "Al", "quiet words")).await;
    h.send(human("u1", "Al", "/shoutprev")).await;
    h.send(human("u1", "Al", "/shout hey you")).await;
    h.send(human("u1", "Al", "/say")).await;
    h.send(human("u1", "Al", "/say echo")).await;
    h.send(human("u1", "Al", "/ping")).await;
    h.send(human("u1", "Al", "/shrug")).await;

    assert_eq!(
        h.texts().await,
        vec!["QUIET WORDS", "HEY YOU", "echo", "Pong!", "¯\\_(ツ)_/¯"]
    );
}

#[tokio::test]
async fn leaderboard_uses_nicknames_and_falls_back_to_ids() {
    let mut h = Harness::new(
        MemoryStore::with_points(vec![record("u1", 3), record("u9", 8)]),
        1000,
    )
    .await;
    h.send(human("u1", "Al", "/leaderboard")).await;
    assert_eq!(h.texts().await, vec!["1. u9: 8\n2. Al: 4"]);
}

#[tokio::test]
async fn commands_lists_every_command_with_prefix() {
    let mut h = Harness::new(MemoryStore::new(), 1000).await;
    h.send(human("u1", "Al", "/commands")).await;
    let texts = h.texts().await;
    assert!(texts[0].starts_with("/bal, /commands"));
    assert!(texts[0].contains("/listpics"));
    assert!(!texts[0].contains("unknown"));
}

#[tokio::test]
async fn run_exits_on_cancel_after_draining_handlers() {
    let h = Harness::new(MemoryStore::new(), 1000).await;
    let outbound = h.outbound.clone();
    let (tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();
    let loop_task = tokio::spawn(h.bot.run(rx, cancel.clone()));

    tx.send(human("u1", "Al", "/ping")).await.unwrap();
    assert!(outbound.wait_for(1, Duration::from_secs(2)).await);

    cancel.cancel();
    loop_task.await.unwrap();
    assert_eq!(outbound.sent_texts().await, vec!["Pong!"]);
}

// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end engine tests through the task handle.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use kudos_core::{EarnSignal, KudosError, PointsRecord};
use kudos_engine::{Engine, PointAwards, spawn};
use kudos_test_utils::MemoryStore;
use kudos_test_utils::fixtures::picture;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn record(user_id: &str, points: i64) -> PointsRecord {
    PointsRecord {
        user_id: user_id.to_string(),
        points,
    }
}

async fn engine_over(store: Arc<MemoryStore>, seed: u64) -> Engine {
    let mut engine = Engine::with_rng(store, PointAwards::default(), StdRng::seed_from_u64(seed));
    engine.load_from_store().await.unwrap();
    engine
}

#[tokio::test]
async fn scenario_a_valid_transfer() {
    let store = Arc::new(MemoryStore::with_points(vec![record("u1", 5)]));
    let (handle, _task) = spawn(engine_over(store.clone(), 1).await);

    let applied = handle.transfer("u1", "u2", 3).await.unwrap();
    assert!(applied.sync.is_synced());
    assert_eq!(handle.balance("u1").await.unwrap(), 2);
    assert_eq!(handle.balance("u2").await.unwrap(), 3);
    assert_eq!(store.points().await, vec![record("u1", 2), record("u2", 3)]);
}

#[tokio::test]
async fn scenario_b_overdraft_leaves_ledger_unchanged() {
    let store = Arc::new(MemoryStore::with_points(vec![record("u1", 5)]));
    let (handle, _task) = spawn(engine_over(store.clone(), 1).await);

    let err = handle.transfer("u1", "u2", 10).await.unwrap_err();
    assert!(matches!(err, KudosError::InsufficientFunds { .. }));
    assert_eq!(handle.balance("u1").await.unwrap(), 5);
    assert!(matches!(
        handle.balance("u2").await,
        Err(KudosError::UserNotFound { .. })
    ));
}

#[tokio::test]
async fn scenario_c_least_shown_splits_between_tied_minimums() {
    let entries = vec![picture("a", "A", 0), picture("b", "B", 2), picture("c", "C", 0)];
    let store = Arc::new(MemoryStore::with_pictures(entries.clone()));
    let mut engine = Engine::with_rng(store, PointAwards::default(), StdRng::seed_from_u64(99));

    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..1000 {
        engine.seed_pictures(entries.clone());
        let winner = engine.select_least_shown().await.unwrap().into_value();
        assert_eq!(winner.appearances, 0);
        *counts.entry(winner.id).or_default() += 1;
    }

    assert_eq!(counts.get("b"), None);
    let a = counts.get("a").copied().unwrap_or_default();
    let c = counts.get("c").copied().unwrap_or_default();
    assert_eq!(a + c, 1000);
    assert!((400..=600).contains(&a), "a won {a} times");
}

#[tokio::test]
async fn scenario_d_rotation_is_a_permutation_then_reshuffles() {
    let store = Arc::new(MemoryStore::with_pictures(vec![
        picture("a", "A", 0),
        picture("b", "B", 0),
        picture("c", "C", 0),
    ]));
    let (handle, _task) = spawn(engine_over(store.clone(), 17).await);

    let mut first_cycle = HashSet::new();
    for _ in 0..3 {
        first_cycle.insert(handle.next_rotation().await.unwrap().id);
    }
    assert_eq!(first_cycle.len(), 3);

    // The fourth call starts a new cycle rather than failing.
    let fourth = handle.next_rotation().await.unwrap();
    assert!(first_cycle.contains(&fourth.id));

    // Rotation is independent of the least-shown counters.
    assert!(store.pictures().await.iter().all(|p| p.appearances == 0));
}

#[tokio::test]
async fn least_shown_dispense_raises_exactly_one_counter() {
    let store = Arc::new(MemoryStore::with_pictures(vec![
        picture("a", "A", 1),
        picture("b", "B", 0),
        picture("c", "C", 3),
    ]));
    let (handle, _task) = spawn(engine_over(store.clone(), 4).await);

    let winner = handle.select_least_shown().await.unwrap().into_value();
    assert_eq!(winner.id, "b");

    let after: Vec<u64> = store.pictures().await.iter().map(|p| p.appearances).collect();
    assert_eq!(after, vec![1, 1, 3]);
}

#[tokio::test]
async fn concurrent_earns_are_serialized() {
    let store = Arc::new(MemoryStore::new());
    let (handle, _task) = spawn(engine_over(store.clone(), 2).await);

    let mut tasks = Vec::new();
    for i in 0..50 {
        let handle = handle.clone();
        tasks.push(tokio::spawn(async move {
            let user = if i % 2 == 0 { "even" } else { "odd" };
            handle.earn(user, EarnSignal::TextMessageSent).await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(handle.balance("even").await.unwrap(), 50);
    assert_eq!(handle.balance("odd").await.unwrap(), 50);
    let stored: i64 = store.points().await.iter().map(|r| r.points).sum();
    assert_eq!(stored, 100);
}

#[tokio::test]
async fn concurrent_transfers_conserve_total() {
    let store = Arc::new(MemoryStore::with_points(vec![record("a", 100), record("b", 100)]));
    let (handle, _task) = spawn(engine_over(store.clone(), 3).await);

    let mut tasks = Vec::new();
    for i in 0..40 {
        let handle = handle.clone();
        tasks.push(tokio::spawn(async move {
            let (from, to) = if i % 3 == 0 { ("b", "a") } else { ("a", "b") };
            let _ = handle.transfer(from, to, 7).await;
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let a = handle.balance("a").await.unwrap();
    let b = handle.balance("b").await.unwrap();
    assert_eq!(a + b, 200);
    assert!(a >= 0 && b >= 0);
}

#[tokio::test]
async fn submit_then_list_and_top() {
    let store = Arc::new(MemoryStore::new());
    let (handle, _task) = spawn(engine_over(store.clone(), 8).await);

    handle.submit("https://i.groupme.com/1.jpeg", "zebra").await.unwrap();
    handle.submit("https://i.groupme.com/2.jpeg", "Apple").await.unwrap();
    handle.find_by_caption("zebra").await.unwrap();

    assert_eq!(
        handle.list_captions_sorted().await.unwrap(),
        vec!["Apple", "zebra"]
    );
    let top = handle.top_by_appearances(10).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].caption, "zebra");
}

#[tokio::test]
async fn standings_are_sorted_highest_first() {
    let store = Arc::new(MemoryStore::with_points(vec![
        record("low", 1),
        record("high", 9),
        record("mid", 4),
    ]));
    let (handle, _task) = spawn(engine_over(store, 1).await);
    let ids: Vec<String> = handle
        .standings()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.user_id)
        .collect();
    assert_eq!(ids, vec!["high", "mid", "low"]);
}

#[tokio::test]
async fn task_stops_when_handles_drop() {
    let (handle, task) = spawn(engine_over(Arc::new(MemoryStore::new()), 1).await);
    drop(handle);
    task.await.unwrap();
}

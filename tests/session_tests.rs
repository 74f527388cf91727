//! Session state machine behavior seen from outside the core crate

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use eco_quest::core::{CompletionNotifier, ItemPool, Session, SharedNotifier};
use eco_quest::types::{CompletionReport, GameKind, SessionStatus};

#[derive(Default)]
struct CountingNotifier {
    calls: AtomicU32,
    last_reward: AtomicU32,
}

impl CompletionNotifier for CountingNotifier {
    fn notify(&self, report: CompletionReport) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_reward.store(report.reward_xp, Ordering::SeqCst);
    }
}

fn with_counter(kind: GameKind) -> (Session, Arc<CountingNotifier>) {
    let counter = Arc::new(CountingNotifier::default());
    let mut session = Session::new(kind);
    let shared: SharedNotifier = counter.clone();
    session.set_notifier(shared);
    (session, counter)
}

#[test]
fn test_sorter_streak_scoring() {
    let mut session = Session::new(GameKind::WasteSorter);
    session.start();

    let points: Vec<u32> = (0..3)
        .map(|_| session.record_outcome(true).unwrap().points)
        .collect();
    assert_eq!(points, vec![10, 12, 14]);
    assert_eq!(session.score(), 36);
    assert_eq!(session.streak(), 3);
}

#[test]
fn test_cleanup_miss_resets_streak() {
    let mut session = Session::new(GameKind::PollutionCleanup);
    session.start();

    assert_eq!(session.record_outcome(true).unwrap().points, 5);
    assert_eq!(session.record_outcome(true).unwrap().points, 7);

    let miss = session.record_outcome(false).unwrap();
    assert_eq!(miss.points, 0);
    assert_eq!(miss.streak, 0);
    // A miss does not consume progress in the cleanup game.
    assert_eq!(session.progress(), 2);

    assert_eq!(session.record_outcome(true).unwrap().points, 5);
    assert_eq!(session.score(), 17);
}

#[test]
fn test_sorter_wrong_answer_still_advances() {
    let mut session = Session::new(GameKind::WasteSorter);
    session.start();
    session.record_outcome(false);
    assert_eq!(session.progress(), 1);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_reaching_target_notifies_once() {
    let (mut session, counter) = with_counter(GameKind::WasteSorter);
    session.start();

    for _ in 0..10 {
        session.record_outcome(true);
    }
    assert_eq!(session.status(), SessionStatus::Finished);
    assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
    assert_eq!(counter.last_reward.load(Ordering::SeqCst), session.score());

    // Later input is ignored and cannot notify again.
    assert!(session.record_outcome(true).is_none());
    assert!(session.finish().is_none());
    assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_timer_expiry_finishes_session() {
    let (mut session, counter) = with_counter(GameKind::PollutionCleanup);
    session.start();
    assert_eq!(session.time_remaining(), Some(30));

    session.record_outcome(true);
    for _ in 0..29 {
        assert!(!session.tick());
    }
    assert!(session.tick());
    assert!(session.is_finished());
    assert_eq!(session.time_remaining(), Some(0));

    assert!(!session.tick());
    assert_eq!(counter.calls.load(Ordering::SeqCst), 1);
    assert_eq!(counter.last_reward.load(Ordering::SeqCst), 5);

    let report = session.take_completion().unwrap();
    assert_eq!(report.items_processed, 1);
    assert!(session.take_completion().is_none());
}

#[test]
fn test_untimed_session_ignores_ticks() {
    let mut session = Session::new(GameKind::EcoMemory);
    session.start();
    assert!(!session.tick());
    assert_eq!(session.time_remaining(), None);
    assert!(session.is_active());
}

#[test]
fn test_restart_starts_fresh_episode() {
    let (mut session, counter) = with_counter(GameKind::WasteSorter);
    session.start();
    for _ in 0..10 {
        session.record_outcome(true);
    }
    let first_episode = session.episode_id();

    session.start();
    assert!(session.is_active());
    assert_eq!(session.score(), 0);
    assert_eq!(session.progress(), 0);
    assert_eq!(session.episode_id(), first_episode + 1);
    assert!(!session.notified());

    // The notifier carries over to the new episode.
    for _ in 0..10 {
        session.record_outcome(true);
    }
    assert_eq!(counter.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_idle_session_ignores_outcomes() {
    let mut session = Session::new(GameKind::TriviaQuiz);
    assert!(session.record_outcome(true).is_none());
    assert_eq!(session.status(), SessionStatus::Idle);
}

#[test]
fn test_item_pool_never_repeats_before_refill() {
    let mut pool = ItemPool::new(vec![1, 2, 3, 4], 99);
    let mut seen: Vec<i32> = (0..4).map(|_| pool.draw().unwrap()).collect();
    seen.sort();
    assert_eq!(seen, vec![1, 2, 3, 4]);
    assert!(pool.is_exhausted());
    assert_eq!(pool.refills(), 0);

    assert!(pool.draw().is_some());
    assert_eq!(pool.refills(), 1);
    assert_eq!(pool.remaining(), 3);
}

#[test]
fn test_empty_pool_draws_nothing() {
    let mut pool: ItemPool<u8> = ItemPool::new(Vec::new(), 1);
    assert!(pool.draw().is_none());
}

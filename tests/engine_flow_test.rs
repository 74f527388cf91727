//! Engine flows: app navigation with rewards, frame timers, async clock

use std::sync::{Arc, Mutex};
use std::time::Duration;

use eco_quest::core::{Game, SharedNotifier};
use eco_quest::engine::{
    App, RewardsHandler, Route, RouteQueue, Screen, SessionClock, SessionDriver,
};
use eco_quest::profile::{MemoryStore, ProfileService};
use eco_quest::types::{Command, GameKind, WasteBin, HUB_ROUTE};

fn logged_in_app() -> App<MemoryStore> {
    let mut service = ProfileService::load(MemoryStore::new());
    service.login("kid@school.org").unwrap();
    App::new(service, 2024)
}

#[test]
fn test_sorter_round_pays_profile_and_returns_to_hub() {
    let mut app = logged_in_app();
    app.handle(Command::Digit(1));
    assert_eq!(app.screen(), Screen::Playing);

    for _ in 0..10 {
        let bin = match app.game() {
            Some(Game::Sorter(g)) => g.current().unwrap().bin,
            other => panic!("expected sorter, got {other:?}"),
        };
        let index = WasteBin::ALL.iter().position(|b| *b == bin).unwrap();
        app.handle(Command::Digit(index as u8 + 1));
    }

    let report = match app.screen() {
        Screen::Result(report) => report,
        other => panic!("expected result screen, got {other:?}"),
    };
    // 10 + 12 + ... + 28
    assert_eq!(report.final_score, 190);
    assert_eq!(report.reward_xp, 190);
    assert_eq!(app.profile().unwrap().xp, 190);

    app.handle(Command::Select);
    assert_eq!(app.screen(), Screen::Hub);
}

#[test]
fn test_leaving_mid_round_pays_nothing() {
    let mut app = logged_in_app();
    app.navigate(Route::Game(GameKind::EcoMemory));
    app.handle(Command::Select);
    app.handle(Command::Back);
    assert_eq!(app.screen(), Screen::Hub);
    assert!(app.game().is_none());
    assert_eq!(app.profile().unwrap().xp, 0);
}

#[test]
fn test_cleanup_times_out_through_frame_updates() {
    let mut app = logged_in_app();
    app.navigate(Route::Game(GameKind::PollutionCleanup));

    let mut finished = false;
    for _ in 0..(30_000 / 100) {
        if app.update(100).finished {
            finished = true;
            break;
        }
    }
    assert!(finished);
    assert!(matches!(app.screen(), Screen::Result(_)));
    assert_eq!(app.message(), Some("Time's up!"));
}

#[test]
fn test_memory_mismatch_hides_after_delay() {
    let mut driver = SessionDriver::for_kind(GameKind::EcoMemory, 5);
    assert!(driver.start());

    let (a, b) = match driver.game() {
        Game::Memory(m) => {
            let deck = m.deck();
            let b = (1..deck.len())
                .find(|&i| deck[i].card.pair_id != deck[0].card.pair_id)
                .unwrap();
            (0, b)
        }
        _ => unreachable!(),
    };
    if let Game::Memory(m) = driver.game_mut() {
        m.flip(a);
        m.flip(b);
        assert!(m.needs_settle());
    }

    // The first frame after the mismatch only starts the delay.
    assert!(!driver.update(16).settled);
    assert!(!driver.update(599).settled);
    assert!(driver.update(1).settled);

    match driver.game() {
        Game::Memory(m) => assert!(m.flipped().is_empty()),
        _ => unreachable!(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_clock_round_credits_xp_and_navigates_once() {
    let mut service = ProfileService::load(MemoryStore::new());
    service.login("kid@school.org").unwrap();
    let profile = Arc::new(Mutex::new(service));
    let routes = Arc::new(RouteQueue::new());
    let notifier: SharedNotifier =
        Arc::new(RewardsHandler::new(Arc::clone(&profile), routes.clone()));

    let mut game = Game::new(GameKind::PollutionCleanup, 8);
    game.set_notifier(notifier);
    game.start();
    let game = Arc::new(Mutex::new(game));

    let mut clock = SessionClock::start(Arc::clone(&game));
    tokio::time::sleep(Duration::from_millis(1_300)).await;

    let expected = {
        let mut g = game.lock().unwrap();
        let Game::Cleanup(cleanup) = &mut *g else {
            unreachable!()
        };
        let ids: Vec<u32> = cleanup.field().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 2);
        for id in ids {
            cleanup.clean(id);
        }
        cleanup.session().score()
    };
    assert_eq!(expected, 12);

    tokio::time::sleep(Duration::from_secs(30)).await;
    clock.finished().await;
    assert!(!clock.is_running());

    assert!(game.lock().unwrap().session().is_finished());
    assert_eq!(profile.lock().unwrap().current().unwrap().xp, 12);
    assert_eq!(routes.drain(), vec![HUB_ROUTE.to_string()]);
}

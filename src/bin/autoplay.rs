//! Headless autoplay: a bot plays every mini-game once against an in-memory
//! profile and prints a JSON report.
//!
//! Useful as a smoke test of the whole stack without a terminal. The cleanup
//! round runs on the async session clock in real time (up to 30s).

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use eco_quest::core::{Game, SharedNotifier};
use eco_quest::engine::{ArcadeConfig, RewardsHandler, RouteQueue, SessionClock, SharedGame};
use eco_quest::profile::{MemoryStore, ProfileService};
use eco_quest::types::{CompletionReport, Difficulty, GameKind};

/// How often the bot clicks during the cleanup round.
const CLEAN_EVERY_MS: u64 = 250;

type SharedProfile = Arc<Mutex<ProfileService<MemoryStore>>>;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let config = ArcadeConfig::from_env();
    let mut service = ProfileService::load(MemoryStore::new());
    service.login("autoplay@ecoquest.local")?;
    let profile: SharedProfile = Arc::new(Mutex::new(service));
    let routes = Arc::new(RouteQueue::new());
    let notifier: SharedNotifier = Arc::new(RewardsHandler::new(
        Arc::clone(&profile),
        routes.clone(),
    ));

    let mut rounds = Vec::new();
    for (i, kind) in GameKind::ALL.into_iter().enumerate() {
        let seed = config.seed.wrapping_add(i as u32);
        let report = play(kind, seed, notifier.clone()).await?;
        log::info!("{} finished: {:?}", kind.as_str(), report);
        rounds.push(round_json(kind, report));
    }

    let player = profile
        .lock()
        .map_err(|_| anyhow!("profile lock poisoned"))?
        .current()
        .cloned();
    let summary = json!({
        "seed": config.seed,
        "rounds": rounds,
        "routes": routes.drain(),
        "player": player.map(|p| json!({
            "name": p.name,
            "xp": p.xp,
            "level": p.level,
            "badges": p.badges,
        })),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn play(
    kind: GameKind,
    seed: u32,
    notifier: SharedNotifier,
) -> Result<Option<CompletionReport>> {
    let mut game = Game::new(kind, seed);
    game.set_notifier(notifier);
    if let Game::Quiz(quiz) = &mut game {
        quiz.choose_difficulty(Difficulty::Hard);
    }
    game.start();

    if kind == GameKind::PollutionCleanup {
        return play_cleanup(Arc::new(Mutex::new(game))).await;
    }
    solve(&mut game);
    Ok(game.take_completion())
}

/// Play a turn-based game to the end with perfect answers.
fn solve(game: &mut Game) {
    match game {
        Game::Sorter(g) => {
            while let Some(item) = g.current() {
                g.sort(item.bin);
                g.present_next();
            }
        }
        Game::Memory(g) => {
            while g.session().is_active() {
                let deck = g.deck();
                let Some(first) = deck.iter().position(|c| !c.solved) else {
                    break;
                };
                let pair = deck[first].card.pair_id;
                let Some(second) = deck
                    .iter()
                    .enumerate()
                    .position(|(i, c)| i != first && !c.solved && c.card.pair_id == pair)
                else {
                    break;
                };
                g.flip(first);
                g.flip(second);
            }
        }
        Game::Quiz(g) => {
            while let Some(question) = g.current_question() {
                g.choose(question.answer);
                g.submit();
                if !g.advance() {
                    break;
                }
            }
        }
        Game::Cleanup(_) => {}
    }
}

async fn play_cleanup(game: SharedGame) -> Result<Option<CompletionReport>> {
    let mut clock = SessionClock::start(Arc::clone(&game));

    let mut ticker = tokio::time::interval(Duration::from_millis(CLEAN_EVERY_MS));
    loop {
        ticker.tick().await;
        let mut g = game.lock().map_err(|_| anyhow!("game lock poisoned"))?;
        if !g.session().is_active() {
            break;
        }
        if let Game::Cleanup(cleanup) = &mut *g {
            if let Some(id) = cleanup.field().first().map(|p| p.id) {
                cleanup.clean(id);
            }
        }
    }
    clock.stop();

    let mut g = game.lock().map_err(|_| anyhow!("game lock poisoned"))?;
    Ok(g.take_completion())
}

fn round_json(kind: GameKind, report: Option<CompletionReport>) -> Value {
    match report {
        Some(r) => json!({
            "game": kind.as_str(),
            "score": r.final_score,
            "items": r.items_processed,
            "xp": r.reward_xp,
        }),
        None => json!({ "game": kind.as_str(), "finished": false }),
    }
}

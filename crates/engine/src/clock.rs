//! Async timers for a shared game, for hosts that run on tokio instead of a
//! frame loop.
//!
//! Each cadence is one spawned task. Tasks exit on their own once the
//! session leaves `Active`; [`SessionClock::stop`] and `Drop` abort them so
//! no callback outlives the clock.
//!
//! A task only notices the end of a round on its next tick, so a round that
//! input finishes between ticks leaves the tasks parked for up to one period.
//! Hosts should call [`SessionClock::stop`] as soon as the round is over.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::core::Game;
use crate::types::{GameKind, CLEANUP_SPAWN_INTERVAL_MS, COUNTDOWN_TICK_MS};

pub type SharedGame = Arc<Mutex<Game>>;

#[derive(Debug)]
pub struct SessionClock {
    tasks: Vec<JoinHandle<()>>,
}

impl SessionClock {
    /// Spawn the countdown (time-boxed games) and the spawner (cleanup)
    /// on the current runtime. The game should already be started.
    pub fn start(game: SharedGame) -> Self {
        let (timed, spawns) = match game.lock() {
            Ok(g) => (
                g.session().rules().is_time_boxed(),
                g.kind() == GameKind::PollutionCleanup,
            ),
            Err(_) => (false, false),
        };

        let mut tasks = Vec::new();
        if timed {
            tasks.push(tokio::spawn(run_every(
                Arc::clone(&game),
                COUNTDOWN_TICK_MS,
                |g| {
                    g.tick();
                },
            )));
        }
        if spawns {
            tasks.push(tokio::spawn(run_every(
                Arc::clone(&game),
                CLEANUP_SPAWN_INTERVAL_MS,
                |g| {
                    g.spawn();
                },
            )));
        }
        log::debug!("session clock started with {} task(s)", tasks.len());
        Self { tasks }
    }

    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|t| !t.is_finished())
    }

    pub fn stop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    /// Wait until every task has exited on its own.
    pub async fn finished(&mut self) {
        for task in self.tasks.drain(..) {
            if let Err(err) = task.await {
                if !err.is_cancelled() {
                    log::error!("session clock task failed: {err}");
                }
            }
        }
    }
}

impl Drop for SessionClock {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_every(game: SharedGame, period_ms: u32, step: fn(&mut Game)) {
    let mut ticker = interval(Duration::from_millis(u64::from(period_ms)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        if !step_once(&game, step) {
            return;
        }
    }
}

/// Apply one step under the lock. Returns whether the timer should keep going.
fn step_once(game: &SharedGame, step: fn(&mut Game)) -> bool {
    let Ok(mut g) = game.lock() else {
        log::error!("game lock poisoned; stopping timer");
        return false;
    };
    if !g.session().is_active() {
        return false;
    }
    step(&mut g);
    g.session().is_active()
}

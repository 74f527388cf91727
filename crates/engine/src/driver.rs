//! Frame-loop driver: owns one game plus its timers.
//!
//! The countdown runs only for time-boxed games, the spawner only for the
//! cleanup game, and the hide timer only while a memory mismatch is face up.
//! All three are disarmed as soon as the session leaves `Active`.

use crate::cadence::Cadence;
use crate::core::{Game, SharedNotifier};
use crate::types::{GameKind, CLEANUP_SPAWN_INTERVAL_MS, COUNTDOWN_TICK_MS, MEMORY_HIDE_DELAY_MS};

/// What one [`SessionDriver::update`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStep {
    pub ticks: u32,
    pub spawns: u32,
    pub settled: bool,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct SessionDriver {
    game: Game,
    countdown: Cadence,
    spawner: Cadence,
    hide: Cadence,
}

impl SessionDriver {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            countdown: Cadence::new(COUNTDOWN_TICK_MS),
            spawner: Cadence::new(CLEANUP_SPAWN_INTERVAL_MS),
            hide: Cadence::new(MEMORY_HIDE_DELAY_MS),
        }
    }

    pub fn for_kind(kind: GameKind, seed: u32) -> Self {
        Self::new(Game::new(kind, seed))
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Direct access for player input. Call [`Self::sync`] afterwards so
    /// timers stop if the input finished the round.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn set_notifier(&mut self, notifier: SharedNotifier) {
        self.game.set_notifier(notifier);
    }

    pub fn countdown(&self) -> &Cadence {
        &self.countdown
    }

    pub fn spawner(&self) -> &Cadence {
        &self.spawner
    }

    pub fn start(&mut self) -> bool {
        if !self.game.start() {
            return false;
        }
        self.hide.disarm();
        if self.game.session().rules().is_time_boxed() {
            self.countdown.arm();
        } else {
            self.countdown.disarm();
        }
        if self.game.kind() == GameKind::PollutionCleanup {
            self.spawner.arm();
        } else {
            self.spawner.disarm();
        }
        log::debug!("driver started {}", self.game.kind().as_str());
        true
    }

    pub fn abandon(&mut self) {
        self.game.abandon();
        self.disarm_all();
    }

    /// Stop every timer once the session is no longer active.
    pub fn sync(&mut self) {
        if !self.game.session().is_active() {
            self.disarm_all();
        }
    }

    fn disarm_all(&mut self) {
        self.countdown.disarm();
        self.spawner.disarm();
        self.hide.disarm();
    }

    /// Feed frame time to the timers and apply what fired.
    pub fn update(&mut self, elapsed_ms: u32) -> DriverStep {
        let mut step = DriverStep::default();
        if !self.game.session().is_active() {
            self.disarm_all();
            return step;
        }

        for _ in 0..self.countdown.advance(elapsed_ms) {
            step.ticks += 1;
            if self.game.tick() {
                step.finished = true;
                break;
            }
        }

        if !step.finished {
            for _ in 0..self.spawner.advance(elapsed_ms) {
                if self.game.spawn() {
                    step.spawns += 1;
                }
            }
            step.settled = self.update_hide(elapsed_ms);
        }

        self.sync();
        step
    }

    fn update_hide(&mut self, elapsed_ms: u32) -> bool {
        let Game::Memory(memory) = &mut self.game else {
            return false;
        };
        if !memory.needs_settle() {
            self.hide.disarm();
            return false;
        }
        if !self.hide.is_armed() {
            self.hide.arm();
            return false;
        }
        if self.hide.advance(elapsed_ms) == 0 {
            return false;
        }
        self.hide.disarm();
        memory.settle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FlipResult;
    use crate::types::{SessionStatus, CLEANUP_TIME_LIMIT_SECS};

    #[test]
    fn countdown_finishes_cleanup() {
        let mut d = SessionDriver::for_kind(GameKind::PollutionCleanup, 3);
        assert!(d.start());
        assert!(d.countdown().is_armed());
        assert_eq!(d.game().session().rules().time_limit_secs, Some(CLEANUP_TIME_LIMIT_SECS));

        let step = d.update(1000);
        assert_eq!(step.ticks, 1);
        assert_eq!(d.game().snapshot().time_remaining, Some(29));

        let step = d.update(60_000);
        assert!(step.finished);
        assert_eq!(d.game().session().status(), SessionStatus::Finished);
        assert!(!d.countdown().is_armed());
        assert!(!d.spawner().is_armed());
        assert_eq!(d.update(5000), DriverStep::default());
    }

    #[test]
    fn spawner_fills_field() {
        let mut d = SessionDriver::for_kind(GameKind::PollutionCleanup, 4);
        d.start();
        match d.game() {
            Game::Cleanup(g) => assert!(g.field().is_empty()),
            _ => unreachable!(),
        }
        let step = d.update(1200);
        assert_eq!(step.spawns, 2);
        match d.game() {
            Game::Cleanup(g) => assert_eq!(g.field().len(), 2),
            _ => unreachable!(),
        }
    }

    #[test]
    fn untimed_games_do_not_tick() {
        let mut d = SessionDriver::for_kind(GameKind::WasteSorter, 5);
        d.start();
        assert!(!d.countdown().is_armed());
        assert_eq!(d.update(10_000).ticks, 0);
        assert!(d.game().session().is_active());
    }

    #[test]
    fn mismatch_hides_after_delay() {
        let mut d = SessionDriver::for_kind(GameKind::EcoMemory, 6);
        d.start();
        let Game::Memory(m) = d.game_mut() else {
            unreachable!()
        };
        let pair = m.deck()[0].card.pair_id;
        let other = (1..m.deck().len())
            .find(|&i| m.deck()[i].card.pair_id != pair)
            .unwrap();
        m.flip(0);
        assert!(matches!(m.flip(other), FlipResult::Mismatched(_)));

        assert!(!d.update(16).settled);
        assert!(!d.update(300).settled);
        assert!(d.update(300).settled);
        let Game::Memory(m) = d.game() else {
            unreachable!()
        };
        assert!(m.flipped().is_empty());
    }

    #[test]
    fn abandon_disarms() {
        let mut d = SessionDriver::for_kind(GameKind::PollutionCleanup, 7);
        d.start();
        d.abandon();
        assert!(!d.countdown().is_armed());
        assert!(!d.spawner().is_armed());
        assert_eq!(d.game().session().status(), SessionStatus::Idle);
    }
}

//! One enum over the four mini-games so hosts can drive whichever is on screen.

use crate::cleanup::PollutionCleanup;
use crate::memory::EcoMemory;
use crate::quiz::TriviaQuiz;
use crate::session::{Session, SharedNotifier};
use crate::snapshot::SessionSnapshot;
use crate::sorter::WasteSorter;
use crate::types::{CompletionReport, Difficulty, GameKind};

#[derive(Debug, Clone)]
pub enum Game {
    Sorter(WasteSorter),
    Cleanup(PollutionCleanup),
    Memory(EcoMemory),
    Quiz(TriviaQuiz),
}

impl Game {
    pub fn new(kind: GameKind, seed: u32) -> Self {
        match kind {
            GameKind::WasteSorter => Game::Sorter(WasteSorter::new(seed)),
            GameKind::PollutionCleanup => Game::Cleanup(PollutionCleanup::new(seed)),
            GameKind::EcoMemory => Game::Memory(EcoMemory::new(seed)),
            GameKind::TriviaQuiz => Game::Quiz(TriviaQuiz::new()),
        }
    }

    pub fn kind(&self) -> GameKind {
        self.session().game()
    }

    pub fn session(&self) -> &Session {
        match self {
            Game::Sorter(g) => g.session(),
            Game::Cleanup(g) => g.session(),
            Game::Memory(g) => g.session(),
            Game::Quiz(g) => g.session(),
        }
    }

    fn session_mut(&mut self) -> &mut Session {
        match self {
            Game::Sorter(g) => g.session_mut(),
            Game::Cleanup(g) => g.session_mut(),
            Game::Memory(g) => g.session_mut(),
            Game::Quiz(g) => g.session_mut(),
        }
    }

    pub fn set_notifier(&mut self, notifier: SharedNotifier) {
        self.session_mut().set_notifier(notifier);
    }

    /// Start a round. The quiz falls back to its last (or default) difficulty.
    pub fn start(&mut self) -> bool {
        match self {
            Game::Sorter(g) => g.start(),
            Game::Cleanup(g) => g.start(),
            Game::Memory(g) => g.start(),
            Game::Quiz(g) => {
                if g.difficulty().is_none() {
                    g.choose_difficulty(Difficulty::default());
                }
                return g.start();
            }
        }
        true
    }

    /// Countdown second; only time-boxed games react.
    pub fn tick(&mut self) -> bool {
        match self {
            Game::Cleanup(g) => g.tick(),
            other => other.session_mut().tick(),
        }
    }

    /// Spawner step; only the cleanup game spawns.
    pub fn spawn(&mut self) -> bool {
        match self {
            Game::Cleanup(g) => g.spawn().is_some(),
            _ => false,
        }
    }

    pub fn abandon(&mut self) {
        match self {
            Game::Sorter(g) => g.abandon(),
            Game::Cleanup(g) => g.abandon(),
            Game::Memory(g) => g.abandon(),
            Game::Quiz(g) => g.abandon(),
        }
    }

    pub fn take_completion(&mut self) -> Option<CompletionReport> {
        self.session_mut().take_completion()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_starts() {
        for kind in GameKind::ALL {
            let mut game = Game::new(kind, 17);
            assert_eq!(game.kind(), kind);
            assert!(game.start());
            assert!(game.session().is_active());
        }
    }

    #[test]
    fn test_only_cleanup_spawns_and_ticks() {
        let mut sorter = Game::new(GameKind::WasteSorter, 1);
        sorter.start();
        assert!(!sorter.spawn());
        assert!(!sorter.tick());

        let mut cleanup = Game::new(GameKind::PollutionCleanup, 1);
        cleanup.start();
        assert!(cleanup.spawn());
        cleanup.tick();
        assert_eq!(cleanup.snapshot().time_remaining, Some(29));
    }

    #[test]
    fn test_abandon_returns_to_idle() {
        let mut game = Game::new(GameKind::EcoMemory, 1);
        game.start();
        game.abandon();
        assert!(!game.session().is_active());
        assert!(game.take_completion().is_none());
    }
}

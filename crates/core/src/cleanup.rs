//! Pollution cleanup - click pollutants before the 30 second timer runs out
//!
//! A bounded spawner adds one pollutant per spawn cadence while the session
//! is active, never exceeding [`CLEANUP_MAX_POLLUTANTS`] on the field.
//! Cleaning a pollutant is a success; clicking empty ground is a miss that
//! breaks the streak without consuming progress.

use arrayvec::ArrayVec;

use crate::catalog::POLLUTANTS;
use crate::rng::{ItemPool, SimpleRng};
use crate::session::{Session, SharedNotifier};
use crate::types::{GameKind, OutcomeResult, CLEANUP_MAX_POLLUTANTS};

/// A pollutant currently on the field. Coordinates are percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pollutant {
    pub id: u32,
    pub glyph: &'static str,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

#[derive(Debug, Clone)]
pub struct PollutionCleanup {
    session: Session,
    field: ArrayVec<Pollutant, CLEANUP_MAX_POLLUTANTS>,
    kinds: ItemPool<&'static str>,
    rng: SimpleRng,
    next_id: u32,
}

impl PollutionCleanup {
    pub fn new(seed: u32) -> Self {
        Self {
            session: Session::new(GameKind::PollutionCleanup),
            field: ArrayVec::new(),
            kinds: ItemPool::new(POLLUTANTS.to_vec(), seed),
            rng: SimpleRng::new(seed.rotate_left(16)),
            next_id: 0,
        }
    }

    pub fn set_notifier(&mut self, notifier: SharedNotifier) {
        self.session.set_notifier(notifier);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn field(&self) -> &[Pollutant] {
        &self.field
    }

    pub fn is_field_full(&self) -> bool {
        self.field.is_full()
    }

    pub fn start(&mut self) {
        self.session.start();
        self.field.clear();
        self.kinds.refill();
        self.next_id = 0;
    }

    /// Spawner step: add one pollutant if active and below the cap.
    pub fn spawn(&mut self) -> Option<Pollutant> {
        if !self.session.is_active() || self.field.is_full() {
            return None;
        }
        let glyph = self.kinds.draw()?;

        self.next_id = self.next_id.wrapping_add(1);
        let pollutant = Pollutant {
            id: self.next_id,
            glyph,
            x: self.rng.next_unit() * 75.0 + 5.0,
            y: self.rng.next_unit() * 70.0 + 5.0,
            size: self.rng.next_unit() * 20.0 + 30.0,
        };
        self.field.push(pollutant);
        Some(pollutant)
    }

    /// Alias for [`spawn`](Self::spawn): presenting an item means spawning it.
    pub fn present_next(&mut self) -> Option<Pollutant> {
        self.spawn()
    }

    /// Clean the pollutant with `id`. Unknown ids are rejected.
    pub fn clean(&mut self, id: u32) -> Option<OutcomeResult> {
        if !self.session.is_active() {
            return None;
        }
        let idx = self.field.iter().position(|p| p.id == id)?;
        self.field.remove(idx);

        let outcome = self.session.record_outcome(true)?;
        if outcome.finished {
            self.field.clear();
        }
        Some(outcome)
    }

    /// A click that hit nothing.
    pub fn miss(&mut self) -> Option<OutcomeResult> {
        self.session.record_outcome(false)
    }

    /// One countdown second. Returns `true` when time ran out.
    pub fn tick(&mut self) -> bool {
        let timed_out = self.session.tick();
        if timed_out {
            self.field.clear();
        }
        timed_out
    }

    /// Pollutant nearest to a point (percent coordinates), if any.
    pub fn nearest(&self, x: f32, y: f32) -> Option<&Pollutant> {
        self.field.iter().min_by(|a, b| {
            let da = (a.x - x).powi(2) + (a.y - y).powi(2);
            let db = (b.x - x).powi(2) + (b.y - y).powi(2);
            da.total_cmp(&db)
        })
    }

    pub fn abandon(&mut self) {
        self.session.abandon();
        self.field.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SessionStatus, CLEANUP_TIME_LIMIT_SECS};

    fn started(seed: u32) -> PollutionCleanup {
        let mut game = PollutionCleanup::new(seed);
        game.start();
        game
    }

    #[test]
    fn test_spawn_requires_active_session() {
        let mut game = PollutionCleanup::new(1);
        assert!(game.spawn().is_none());
        game.start();
        assert!(game.spawn().is_some());
    }

    #[test]
    fn test_spawner_caps_field() {
        let mut game = started(2);
        for _ in 0..(CLEANUP_MAX_POLLUTANTS + 5) {
            game.spawn();
        }
        assert_eq!(game.field().len(), CLEANUP_MAX_POLLUTANTS);
        assert!(game.is_field_full());
        assert!(game.spawn().is_none());
    }

    #[test]
    fn test_spawned_positions_are_in_range() {
        let mut game = started(3);
        for _ in 0..CLEANUP_MAX_POLLUTANTS {
            let p = game.spawn().unwrap();
            assert!((5.0..80.0).contains(&p.x));
            assert!((5.0..75.0).contains(&p.y));
            assert!((30.0..50.0).contains(&p.size));
        }
    }

    #[test]
    fn test_clean_scores_with_combo() {
        let mut game = started(4);
        let a = game.spawn().unwrap();
        let b = game.spawn().unwrap();

        let first = game.clean(a.id).unwrap();
        assert_eq!(first.points, 5);
        assert_eq!(first.streak, 1);

        let second = game.clean(b.id).unwrap();
        assert_eq!(second.points, 7);
        assert_eq!(second.streak, 2);

        assert_eq!(game.session().score(), 12);
        assert!(game.field().is_empty());
    }

    #[test]
    fn test_clean_unknown_id_is_rejected() {
        let mut game = started(5);
        game.spawn();
        assert!(game.clean(9999).is_none());
        assert_eq!(game.session().progress(), 0);
    }

    #[test]
    fn test_miss_breaks_streak_without_progress() {
        let mut game = started(6);
        let a = game.spawn().unwrap();
        game.clean(a.id);
        let miss = game.miss().unwrap();
        assert_eq!(miss.streak, 0);
        assert_eq!(game.session().progress(), 1);
    }

    #[test]
    fn test_timeout_finishes_below_target() {
        let mut game = started(7);
        let a = game.spawn().unwrap();
        game.clean(a.id);
        game.spawn();

        for _ in 0..(CLEANUP_TIME_LIMIT_SECS - 1) {
            assert!(!game.tick());
        }
        assert!(game.tick());
        assert_eq!(game.session().status(), SessionStatus::Finished);
        assert!(game.session().progress() < game.session().target());
        assert!(game.field().is_empty());
        assert!(game.spawn().is_none());
    }

    #[test]
    fn test_nearest_picks_closest() {
        let mut game = started(8);
        for _ in 0..5 {
            game.spawn();
        }
        let target = game.field()[2];
        let found = game.nearest(target.x, target.y).unwrap();
        assert_eq!(found.id, target.id);
    }
}

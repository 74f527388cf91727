//! Waste sorter - sort ten items into compost, recycle, or trash
//!
//! Every sort consumes the current item whether or not it was right, so a
//! round always lasts exactly [`SORTER_TARGET`](crate::types::SORTER_TARGET)
//! items. Correct sorts build a streak worth `10 + 2 * streak` points.

use crate::catalog::{WasteItem, WASTE_ITEMS};
use crate::rng::ItemPool;
use crate::session::{Session, SharedNotifier};
use crate::types::{GameKind, OutcomeResult, WasteBin};

/// Feedback for one sort, shown before the next item appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortFeedback {
    pub item: &'static WasteItem,
    pub chosen: WasteBin,
    pub outcome: OutcomeResult,
}

impl SortFeedback {
    pub fn correct(&self) -> bool {
        self.outcome.success
    }

    pub fn fact(&self) -> &'static str {
        self.item.fact
    }
}

#[derive(Debug, Clone)]
pub struct WasteSorter {
    session: Session,
    pool: ItemPool<&'static WasteItem>,
    current: Option<&'static WasteItem>,
    last_feedback: Option<SortFeedback>,
}

impl WasteSorter {
    pub fn new(seed: u32) -> Self {
        Self {
            session: Session::new(GameKind::WasteSorter),
            pool: ItemPool::new(WASTE_ITEMS.iter().collect::<Vec<_>>(), seed),
            current: None,
            last_feedback: None,
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

    pub fn current(&self) -> Option<&'static WasteItem> {
        self.current
    }

    pub fn last_feedback(&self) -> Option<&SortFeedback> {
        self.last_feedback.as_ref()
    }

    pub fn pool(&self) -> &ItemPool<&'static WasteItem> {
        &self.pool
    }

    /// Start (or restart) a round and present the first item.
    pub fn start(&mut self) {
        self.session.start();
        self.pool.refill();
        self.current = None;
        self.last_feedback = None;
        self.present_next();
    }

    /// Draw the next item to sort. Only valid while the round is active.
    pub fn present_next(&mut self) -> Option<&'static WasteItem> {
        if !self.session.is_active() {
            return None;
        }
        self.current = self.pool.draw();
        self.current
    }

    /// Sort the current item into `bin`.
    ///
    /// Returns `None` when there is nothing to sort (no current item or the
    /// round is not active).
    pub fn sort(&mut self, bin: WasteBin) -> Option<SortFeedback> {
        if !self.session.is_active() {
            return None;
        }
        let item = self.current.take()?;
        let outcome = self.session.record_outcome(item.bin == bin)?;

        let feedback = SortFeedback {
            item,
            chosen: bin,
            outcome,
        };
        self.last_feedback = Some(feedback);
        Some(feedback)
    }

    /// Leave the round without reporting a result.
    pub fn abandon(&mut self) {
        self.session.abandon();
        self.current = None;
        self.last_feedback = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SessionStatus, SORTER_TARGET};

    fn wrong_bin(bin: WasteBin) -> WasteBin {
        match bin {
            WasteBin::Compost => WasteBin::Trash,
            WasteBin::Recycle => WasteBin::Compost,
            WasteBin::Trash => WasteBin::Recycle,
        }
    }

    #[test]
    fn test_start_presents_first_item() {
        let mut game = WasteSorter::new(5);
        assert!(game.current().is_none());
        game.start();
        assert!(game.current().is_some());
        assert_eq!(game.pool().remaining(), WASTE_ITEMS.len() - 1);
    }

    #[test]
    fn test_three_correct_sorts() {
        let mut game = WasteSorter::new(5);
        game.start();

        let mut points = Vec::new();
        for _ in 0..3 {
            let bin = game.current().unwrap().bin;
            points.push(game.sort(bin).unwrap().outcome.points);
            game.present_next();
        }
        assert_eq!(points, vec![10, 12, 14]);
        assert_eq!(game.session().score(), 36);
    }

    #[test]
    fn test_wrong_sort_still_advances() {
        let mut game = WasteSorter::new(9);
        game.start();
        let item = game.current().unwrap();
        let fb = game.sort(wrong_bin(item.bin)).unwrap();
        assert!(!fb.correct());
        assert_eq!(fb.fact(), item.fact);
        assert_eq!(game.session().progress(), 1);
        assert_eq!(game.session().streak(), 0);
    }

    #[test]
    fn test_sort_without_item_is_rejected() {
        let mut game = WasteSorter::new(1);
        assert!(game.sort(WasteBin::Trash).is_none());

        game.start();
        let bin = game.current().unwrap().bin;
        game.sort(bin);
        // Current item consumed; the next must be presented first.
        assert!(game.sort(bin).is_none());
    }

    #[test]
    fn test_round_finishes_after_target_items() {
        let mut game = WasteSorter::new(3);
        game.start();
        for _ in 0..SORTER_TARGET {
            let bin = game.current().unwrap().bin;
            game.sort(bin);
            game.present_next();
        }
        assert_eq!(game.session().status(), SessionStatus::Finished);
        assert!(game.current().is_none());
        assert!(game.present_next().is_none());
    }

    #[test]
    fn test_no_repeats_within_a_cycle() {
        let mut game = WasteSorter::new(11);
        game.start();
        let mut seen = vec![game.current().unwrap().id];
        for _ in 0..(SORTER_TARGET - 1) {
            let bin = game.current().unwrap().bin;
            game.sort(bin);
            let next = game.present_next().unwrap();
            assert!(!seen.contains(&next.id));
            seen.push(next.id);
        }
    }
}

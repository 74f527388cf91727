use crate::types::{GameKind, SessionStatus};

/// Plain copy of a session's counters, used by views and the autoplay report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub game: GameKind,
    pub status: SessionStatus,
    pub score: u32,
    pub progress: u32,
    pub target: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub time_remaining: Option<u32>,
    pub episode_id: u32,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Progress as a rounded percentage of the target.
    pub fn percent_complete(&self) -> u32 {
        if self.target == 0 {
            return 100;
        }
        (self.progress * 100 + self.target / 2) / self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn snapshot_mirrors_session_counters() {
        let mut s = Session::new(GameKind::WasteSorter);
        s.start();
        s.record_outcome(true);

        let snap = s.snapshot();
        assert!(snap.playable());
        assert_eq!(snap.score, 10);
        assert_eq!(snap.progress, 1);
        assert_eq!(snap.target, 10);
        assert_eq!(snap.percent_complete(), 10);
    }

    #[test]
    fn percent_complete_rounds() {
        let mut snap = Session::new(GameKind::EcoMemory).snapshot();
        snap.progress = 1;
        assert_eq!(snap.percent_complete(), 17); // 1/6
        snap.target = 0;
        assert_eq!(snap.percent_complete(), 100);
    }
}

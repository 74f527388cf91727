//! Scoring module - streak points, end-of-session rewards, profile levels
//!
//! Points inside a session come from [`SessionRules::points_for`]; this module
//! adds the reward rules applied when a session finishes and the XP level
//! curve used by profiles and the leaderboard.

use crate::types::{
    Difficulty, SessionRules, MEMORY_MOVE_PENALTY, MEMORY_REWARD_CEILING, MEMORY_REWARD_FLOOR,
    XP_PER_LEVEL,
};

/// Points for a success made with `streak` consecutive successes before it.
pub fn streak_points(rules: &SessionRules, streak: u32) -> u32 {
    rules.points_for(streak)
}

/// Eco memory reward: fewer moves earn more XP, never below the floor.
pub fn memory_reward(moves: u32) -> u32 {
    MEMORY_REWARD_CEILING
        .saturating_sub(moves.saturating_mul(MEMORY_MOVE_PENALTY))
        .max(MEMORY_REWARD_FLOOR)
}

/// Trivia reward: the difficulty XP, only for a flawless round.
pub fn quiz_reward(difficulty: Difficulty, correct: u32, total: u32) -> u32 {
    if total > 0 && correct == total {
        difficulty.flawless_xp()
    } else {
        0
    }
}

/// Profile level for a total XP value (level 1 starts at 0 XP).
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// Progress within the current level as a rounded percentage.
pub fn level_progress_percent(xp: u32) -> u32 {
    let within = xp % XP_PER_LEVEL;
    ((within * 100 + XP_PER_LEVEL / 2) / XP_PER_LEVEL).min(100)
}

/// How a finished session converts its counters into reward XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RewardRule {
    /// Reward equals the final score.
    #[default]
    Score,
    /// Memory-style reward: penalized per attempt.
    MovePenalty,
    /// Quiz-style reward: difficulty XP only when nothing was missed.
    Flawless(Difficulty),
}

impl RewardRule {
    /// Reward for a finished session.
    ///
    /// `attempts` counts every recorded outcome; `progress`/`target` are the
    /// session's item counters.
    pub fn reward(
        &self,
        score: u32,
        attempts: u32,
        failures: u32,
        progress: u32,
        target: u32,
    ) -> u32 {
        match self {
            RewardRule::Score => score,
            RewardRule::MovePenalty => memory_reward(attempts),
            RewardRule::Flawless(difficulty) => {
                quiz_reward(*difficulty, progress.saturating_sub(failures), target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CLEANUP_RULES, SORTER_RULES};

    #[test]
    fn test_streak_points() {
        assert_eq!(streak_points(&SORTER_RULES, 0), 10);
        assert_eq!(streak_points(&SORTER_RULES, 1), 12);
        assert_eq!(streak_points(&CLEANUP_RULES, 0), 5);
        assert_eq!(streak_points(&CLEANUP_RULES, 1), 7);
    }

    #[test]
    fn test_memory_reward() {
        assert_eq!(memory_reward(0), 60);
        assert_eq!(memory_reward(6), 48);
        assert_eq!(memory_reward(25), 10);
        assert_eq!(memory_reward(40), 10); // Floor
    }

    #[test]
    fn test_quiz_reward() {
        assert_eq!(quiz_reward(Difficulty::Hard, 10, 10), 5);
        assert_eq!(quiz_reward(Difficulty::Moderate, 10, 10), 4);
        assert_eq!(quiz_reward(Difficulty::Easy, 9, 10), 0);
        assert_eq!(quiz_reward(Difficulty::Easy, 0, 0), 0);
    }

    #[test]
    fn test_levels() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(999), 1);
        assert_eq!(level_for_xp(1000), 2);
        assert_eq!(level_for_xp(3310), 4);
    }

    #[test]
    fn test_level_progress() {
        assert_eq!(level_progress_percent(0), 0);
        assert_eq!(level_progress_percent(3120), 12);
        assert_eq!(level_progress_percent(2895), 90);
        assert_eq!(level_progress_percent(1999), 100);
    }

    #[test]
    fn test_reward_rules() {
        assert_eq!(RewardRule::Score.reward(36, 3, 0, 3, 10), 36);
        assert_eq!(RewardRule::MovePenalty.reward(60, 8, 2, 6, 6), 44);
        assert_eq!(
            RewardRule::Flawless(Difficulty::Hard).reward(10, 10, 0, 10, 10),
            5
        );
        assert_eq!(
            RewardRule::Flawless(Difficulty::Hard).reward(9, 10, 1, 10, 10),
            0
        );
        // Ended early: not flawless even without misses.
        assert_eq!(
            RewardRule::Flawless(Difficulty::Easy).reward(4, 4, 0, 4, 10),
            0
        );
    }
}

//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the arcade.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (session logic, terminal rendering, profile rewards).
//!
//! # Session Rules
//!
//! Every mini-game is an instance of the same timed/scored session shape,
//! parameterized by a [`SessionRules`] value:
//!
//! | Game | Target | Base | Streak bonus | Time limit | Wrong answer |
//! |------|--------|------|--------------|------------|--------------|
//! | Waste sorter | 10 | 10 | 2 | - | advances |
//! | Pollution cleanup | 40 | 5 | 2 | 30s | retry |
//! | Eco memory | 6 pairs | 10 | 2 | - | retry |
//! | Trivia quiz | 10 | 1 | 0 | - | advances |
//!
//! Points for a success are `base + streak * streak_bonus`, using the streak
//! *before* the success is counted.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Terminal loop timestep |
//! | `COUNTDOWN_TICK_MS` | 1000 | One countdown step for time-boxed games |
//! | `CLEANUP_SPAWN_INTERVAL_MS` | 600 | Pollutant spawner cadence |
//! | `MEMORY_HIDE_DELAY_MS` | 600 | Mismatched cards stay visible this long |
//!
//! # Examples
//!
//! ```
//! use eco_quest_types::{GameKind, WasteBin, SessionStatus, SORTER_RULES};
//!
//! assert_eq!(GameKind::from_str("waste-sorting"), Some(GameKind::WasteSorter));
//! assert_eq!(WasteBin::from_str("Compost"), Some(WasteBin::Compost));
//! assert_eq!(SessionStatus::Idle.as_str(), "idle");
//! assert_eq!(SORTER_RULES.points_for(2), 14);
//! ```

/// Terminal loop timestep in milliseconds.
pub const TICK_MS: u32 = 16;

/// One countdown step (one real-time second).
pub const COUNTDOWN_TICK_MS: u32 = 1000;

/// Route of the game hub; completion handlers navigate back here.
pub const HUB_ROUTE: &str = "/games";

/// Namespaced key the player profile is stored under.
pub const PROFILE_KEY: &str = "eco_user";

/// XP needed per profile level.
pub const XP_PER_LEVEL: u32 = 1000;

pub const SORTER_TARGET: u32 = 10;
pub const SORTER_BASE_POINTS: u32 = 10;
pub const SORTER_STREAK_BONUS: u32 = 2;

pub const CLEANUP_TARGET: u32 = 40;
pub const CLEANUP_BASE_POINTS: u32 = 5;
pub const CLEANUP_STREAK_BONUS: u32 = 2;
pub const CLEANUP_TIME_LIMIT_SECS: u32 = 30;
pub const CLEANUP_SPAWN_INTERVAL_MS: u32 = 600;
/// Maximum number of pollutants on the field at once.
pub const CLEANUP_MAX_POLLUTANTS: usize = 20;

pub const MEMORY_PAIRS: u32 = 6;
pub const MEMORY_BASE_POINTS: u32 = 10;
pub const MEMORY_STREAK_BONUS: u32 = 2;
pub const MEMORY_HIDE_DELAY_MS: u32 = 600;
/// Memory reward is `max(FLOOR, CEILING - moves * PENALTY)`.
pub const MEMORY_REWARD_CEILING: u32 = 60;
pub const MEMORY_REWARD_FLOOR: u32 = 10;
pub const MEMORY_MOVE_PENALTY: u32 = 2;

pub const QUIZ_BASE_POINTS: u32 = 1;
pub const QUIZ_STREAK_BONUS: u32 = 0;

/// Lifecycle of a single play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Active,
    Finished,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Active => "active",
            SessionStatus::Finished => "finished",
        }
    }
}

/// Whether a failed attempt still consumes one item of progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailurePolicy {
    /// Every outcome advances progress (the item is gone either way).
    AlwaysAdvance,
    /// Only successes advance; failures may be retried.
    AdvanceOnSuccess,
}

/// Constant per-game session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionRules {
    pub target: u32,
    pub base_points: u32,
    pub streak_bonus: u32,
    pub time_limit_secs: Option<u32>,
    pub failure_policy: FailurePolicy,
}

impl SessionRules {
    /// Points awarded for a success made while `streak` successes precede it.
    pub const fn points_for(&self, streak: u32) -> u32 {
        self.base_points
            .saturating_add(streak.saturating_mul(self.streak_bonus))
    }

    pub const fn is_time_boxed(&self) -> bool {
        self.time_limit_secs.is_some()
    }
}

pub const SORTER_RULES: SessionRules = SessionRules {
    target: SORTER_TARGET,
    base_points: SORTER_BASE_POINTS,
    streak_bonus: SORTER_STREAK_BONUS,
    time_limit_secs: None,
    failure_policy: FailurePolicy::AlwaysAdvance,
};

pub const CLEANUP_RULES: SessionRules = SessionRules {
    target: CLEANUP_TARGET,
    base_points: CLEANUP_BASE_POINTS,
    streak_bonus: CLEANUP_STREAK_BONUS,
    time_limit_secs: Some(CLEANUP_TIME_LIMIT_SECS),
    failure_policy: FailurePolicy::AdvanceOnSuccess,
};

pub const MEMORY_RULES: SessionRules = SessionRules {
    target: MEMORY_PAIRS,
    base_points: MEMORY_BASE_POINTS,
    streak_bonus: MEMORY_STREAK_BONUS,
    time_limit_secs: None,
    failure_policy: FailurePolicy::AdvanceOnSuccess,
};

/// The quiz target is the number of questions in the catalog.
pub const QUIZ_RULES: SessionRules = SessionRules {
    target: 10,
    base_points: QUIZ_BASE_POINTS,
    streak_bonus: QUIZ_STREAK_BONUS,
    time_limit_secs: None,
    failure_policy: FailurePolicy::AlwaysAdvance,
};

/// The mini-games offered by the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    WasteSorter,
    PollutionCleanup,
    EcoMemory,
    TriviaQuiz,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::WasteSorter,
        GameKind::EcoMemory,
        GameKind::PollutionCleanup,
        GameKind::TriviaQuiz,
    ];

    /// Parse a game from its route slug (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_start_matches('/').to_lowercase().as_str() {
            "waste-sorting" => Some(GameKind::WasteSorter),
            "pollution-cleanup" => Some(GameKind::PollutionCleanup),
            "eco-memory" => Some(GameKind::EcoMemory),
            "trivia-quiz" | "quiz" => Some(GameKind::TriviaQuiz),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::WasteSorter => "waste-sorting",
            GameKind::PollutionCleanup => "pollution-cleanup",
            GameKind::EcoMemory => "eco-memory",
            GameKind::TriviaQuiz => "trivia-quiz",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameKind::WasteSorter => "Waste Sorter",
            GameKind::PollutionCleanup => "Pollution Cleanup",
            GameKind::EcoMemory => "Eco Memory",
            GameKind::TriviaQuiz => "Eco Trivia",
        }
    }

    pub fn rules(&self) -> SessionRules {
        match self {
            GameKind::WasteSorter => SORTER_RULES,
            GameKind::PollutionCleanup => CLEANUP_RULES,
            GameKind::EcoMemory => MEMORY_RULES,
            GameKind::TriviaQuiz => QUIZ_RULES,
        }
    }
}

/// Destination bins in the waste sorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WasteBin {
    Compost,
    Recycle,
    Trash,
}

impl WasteBin {
    pub const ALL: [WasteBin; 3] = [WasteBin::Compost, WasteBin::Recycle, WasteBin::Trash];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compost" => Some(WasteBin::Compost),
            "recycle" => Some(WasteBin::Recycle),
            "trash" => Some(WasteBin::Trash),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteBin::Compost => "compost",
            WasteBin::Recycle => "recycle",
            WasteBin::Trash => "trash",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            WasteBin::Compost => "Food & organic waste",
            WasteBin::Recycle => "Paper, plastic, glass",
            WasteBin::Trash => "Non-recyclables",
        }
    }
}

/// Quiz difficulty chosen before a round starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "moderate" => Some(Difficulty::Moderate),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
        }
    }

    /// XP for a flawless round.
    pub fn flawless_xp(&self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Moderate => 4,
            Difficulty::Hard => 5,
        }
    }
}

/// Result of recording one outcome on an active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeResult {
    pub success: bool,
    /// Points added by this outcome (0 on failure).
    pub points: u32,
    /// Streak after the outcome was applied.
    pub streak: u32,
    /// Whether this outcome completed the session.
    pub finished: bool,
}

/// Payload delivered to the completion notifier when a session finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionReport {
    pub game: GameKind,
    pub final_score: u32,
    pub items_processed: u32,
    pub reward_xp: u32,
}

/// Player commands, independent of the key that produced them.
///
/// Each screen gives these its own meaning; a command a screen does not use
/// is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    /// Confirm: sort, flip, clean, submit, open.
    Select,
    /// Leave the current screen (abandons a running game).
    Back,
    /// Direct pick, 1-based.
    Digit(u8),
    /// Replay the current or last game.
    Restart,
    Leaderboard,
    Profile,
    /// Switch the leaderboard between class and school.
    ToggleScope,
    /// Focus the leaderboard search box.
    Search,
    /// Typed character while a text field has focus.
    Char(char),
    Backspace,
    Quit,
}

/// How keys should be read for the screen on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Navigate,
    /// A text field has focus; letters are text, not shortcuts.
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorter_points_follow_streak() {
        assert_eq!(SORTER_RULES.points_for(0), 10);
        assert_eq!(SORTER_RULES.points_for(1), 12);
        assert_eq!(SORTER_RULES.points_for(2), 14);
    }

    #[test]
    fn cleanup_points_follow_streak() {
        assert_eq!(CLEANUP_RULES.points_for(0), 5);
        assert_eq!(CLEANUP_RULES.points_for(1), 7);
        assert!(CLEANUP_RULES.is_time_boxed());
        assert!(!SORTER_RULES.is_time_boxed());
    }

    #[test]
    fn points_saturate_instead_of_overflowing() {
        let rules = SessionRules {
            streak_bonus: u32::MAX,
            ..SORTER_RULES
        };
        assert_eq!(rules.points_for(3), u32::MAX);
    }

    #[test]
    fn game_kind_round_trips_through_route_slug() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(GameKind::from_str("/eco-memory"), Some(GameKind::EcoMemory));
        assert_eq!(GameKind::from_str("planet-defender"), None);
    }

    #[test]
    fn difficulty_xp_table() {
        assert_eq!(Difficulty::Easy.flawless_xp(), 2);
        assert_eq!(Difficulty::Moderate.flawless_xp(), 4);
        assert_eq!(Difficulty::Hard.flawless_xp(), 5);
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
    }
}

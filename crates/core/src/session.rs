//! Session module - the timed/scored state machine shared by every mini-game
//!
//! A [`Session`] drives one play-through: `Idle -> Active -> Finished`.
//! Games embed a session and translate player input into
//! [`Session::record_outcome`] calls; time-boxed games also forward one
//! [`Session::tick`] per real-time second.
//!
//! Finishing is the only externally observable effect: the registered
//! [`CompletionNotifier`] is called exactly once per session instance.

use std::fmt;
use std::sync::Arc;

use crate::scoring::RewardRule;
use crate::snapshot::SessionSnapshot;
use crate::types::{
    CompletionReport, FailurePolicy, GameKind, OutcomeResult, SessionRules, SessionStatus,
};

/// Receives the final report of a finished session.
pub trait CompletionNotifier: Send + Sync {
    fn notify(&self, report: CompletionReport);
}

/// Shared handle to a completion notifier; restarts hand it to the new instance.
pub type SharedNotifier = Arc<dyn CompletionNotifier>;

#[derive(Clone)]
pub struct Session {
    game: GameKind,
    rules: SessionRules,
    reward_rule: RewardRule,
    status: SessionStatus,
    score: u32,
    progress: u32,
    streak: u32,
    best_streak: u32,
    /// Every recorded outcome, successful or not.
    attempts: u32,
    failures: u32,
    time_remaining: Option<u32>,
    /// Monotonic play-through id (increments on restart).
    episode_id: u32,
    notifier: Option<SharedNotifier>,
    notified: bool,
    /// Report of the finished session (consumed by polling hosts).
    completion: Option<CompletionReport>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("game", &self.game)
            .field("status", &self.status)
            .field("score", &self.score)
            .field("progress", &self.progress)
            .field("streak", &self.streak)
            .field("time_remaining", &self.time_remaining)
            .field("episode_id", &self.episode_id)
            .field("has_notifier", &self.notifier.is_some())
            .field("notified", &self.notified)
            .finish()
    }
}

impl Session {
    /// Create an idle session using the game's default rules.
    pub fn new(game: GameKind) -> Self {
        Self::with_rules(game, game.rules())
    }

    pub fn with_rules(game: GameKind, rules: SessionRules) -> Self {
        Self {
            game,
            rules,
            reward_rule: RewardRule::Score,
            status: SessionStatus::Idle,
            score: 0,
            progress: 0,
            streak: 0,
            best_streak: 0,
            attempts: 0,
            failures: 0,
            time_remaining: None,
            episode_id: 0,
            notifier: None,
            notified: false,
            completion: None,
        }
    }

    pub fn set_notifier(&mut self, notifier: SharedNotifier) {
        self.notifier = Some(notifier);
    }

    pub fn clear_notifier(&mut self) {
        self.notifier = None;
    }

    pub fn set_reward_rule(&mut self, rule: RewardRule) {
        self.reward_rule = rule;
    }

    pub fn game(&self) -> GameKind {
        self.game
    }

    pub fn rules(&self) -> &SessionRules {
        &self.rules
    }

    pub fn reward_rule(&self) -> RewardRule {
        self.reward_rule
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn target(&self) -> u32 {
        self.rules.target
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Whether the completion notifier has fired for this instance.
    pub fn notified(&self) -> bool {
        self.notified
    }

    /// Replace this instance with a fresh idle one.
    ///
    /// Rules, reward rule and notifier carry over; counters, the pending
    /// completion and the notified flag do not.
    pub fn reset(&mut self) {
        let next_episode = self.episode_id.wrapping_add(1);
        let mut fresh = Self::with_rules(self.game, self.rules);
        fresh.reward_rule = self.reward_rule;
        fresh.notifier = self.notifier.take();
        fresh.episode_id = next_episode;
        *self = fresh;
    }

    /// Begin a play-through.
    ///
    /// A session that is not idle is discarded and replaced first, so this
    /// always starts from zeroed counters.
    pub fn start(&mut self) {
        if self.status != SessionStatus::Idle {
            self.reset();
        }

        self.score = 0;
        self.progress = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.attempts = 0;
        self.failures = 0;
        self.time_remaining = self.rules.time_limit_secs;
        self.status = SessionStatus::Active;

        log::debug!(
            "{} session {} started (target {}, time limit {:?})",
            self.game.as_str(),
            self.episode_id,
            self.rules.target,
            self.rules.time_limit_secs
        );
    }

    /// Record one player outcome. Ignored unless active.
    pub fn record_outcome(&mut self, success: bool) -> Option<OutcomeResult> {
        if self.status != SessionStatus::Active {
            return None;
        }

        self.attempts = self.attempts.saturating_add(1);

        let points = if success {
            // Bonus uses the streak before this success is counted.
            let points = self.rules.points_for(self.streak);
            self.score = self.score.saturating_add(points);
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            self.advance();
            points
        } else {
            self.streak = 0;
            self.failures = self.failures.saturating_add(1);
            if self.rules.failure_policy == FailurePolicy::AlwaysAdvance {
                self.advance();
            }
            0
        };

        let finished = self.check_completion();

        Some(OutcomeResult {
            success,
            points,
            streak: self.streak,
            finished,
        })
    }

    fn advance(&mut self) {
        if self.progress < self.rules.target {
            self.progress += 1;
        }
    }

    /// One countdown second for time-boxed sessions.
    ///
    /// Returns `true` when this tick ended the session.
    pub fn tick(&mut self) -> bool {
        if self.status != SessionStatus::Active {
            return false;
        }
        let Some(remaining) = self.time_remaining else {
            return false;
        };

        let remaining = remaining.saturating_sub(1);
        self.time_remaining = Some(remaining);

        if remaining == 0 {
            log::debug!("{} session {} timed out", self.game.as_str(), self.episode_id);
            self.finish();
            return true;
        }
        false
    }

    /// Finish the session once the target is reached.
    pub fn check_completion(&mut self) -> bool {
        if self.status == SessionStatus::Active && self.progress >= self.rules.target {
            self.finish();
            return true;
        }
        false
    }

    /// Transition to `Finished`, compute the reward, and notify once.
    ///
    /// Returns the report, or `None` if the session was not active.
    pub fn finish(&mut self) -> Option<CompletionReport> {
        if self.status != SessionStatus::Active {
            return None;
        }
        self.status = SessionStatus::Finished;

        let report = CompletionReport {
            game: self.game,
            final_score: self.score,
            items_processed: self.progress,
            reward_xp: self.reward_rule.reward(
                self.score,
                self.attempts,
                self.failures,
                self.progress,
                self.rules.target,
            ),
        };
        self.completion = Some(report);

        log::info!(
            "{} session {} finished: score {}, items {}, reward {} XP",
            self.game.as_str(),
            self.episode_id,
            report.final_score,
            report.items_processed,
            report.reward_xp
        );

        if !self.notified {
            self.notified = true;
            if let Some(notifier) = &self.notifier {
                notifier.notify(report);
            }
        }

        Some(report)
    }

    /// Drop an active session without notifying (player navigated away).
    pub fn abandon(&mut self) {
        if self.status == SessionStatus::Active {
            log::debug!("{} session {} abandoned", self.game.as_str(), self.episode_id);
        }
        self.reset();
    }

    /// Take the completion report of a finished session (at most once).
    pub fn take_completion(&mut self) -> Option<CompletionReport> {
        self.completion.take()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            game: self.game,
            status: self.status,
            score: self.score,
            progress: self.progress,
            target: self.rules.target,
            streak: self.streak,
            best_streak: self.best_streak,
            time_remaining: self.time_remaining,
            episode_id: self.episode_id,
        }
    }
}

//! Trivia quiz - ten eco questions asked in order
//!
//! The player picks a difficulty before the round; only a flawless round
//! earns that difficulty's XP. Every submitted answer advances the round.

use crate::catalog::{Question, TRIVIA_QUESTIONS};
use crate::scoring::RewardRule;
use crate::session::{Session, SharedNotifier};
use crate::types::{Difficulty, GameKind, OutcomeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub chosen: usize,
    pub answer_index: usize,
    pub outcome: OutcomeResult,
}

impl AnswerFeedback {
    pub fn correct(&self) -> bool {
        self.outcome.success
    }
}

#[derive(Debug, Clone)]
pub struct TriviaQuiz {
    session: Session,
    questions: &'static [Question],
    current: usize,
    selected: Option<usize>,
    locked: bool,
    difficulty: Option<Difficulty>,
}

impl TriviaQuiz {
    pub fn new() -> Self {
        Self {
            session: Session::new(GameKind::TriviaQuiz),
            questions: &TRIVIA_QUESTIONS,
            current: 0,
            selected: None,
            locked: false,
            difficulty: None,
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

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based index of the question on screen.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Pick the difficulty for the next round. Not allowed mid-round.
    pub fn choose_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.session.is_active() {
            return false;
        }
        self.difficulty = Some(difficulty);
        true
    }

    /// Start a round. Requires a difficulty to have been chosen.
    pub fn start(&mut self) -> bool {
        let Some(difficulty) = self.difficulty else {
            return false;
        };
        self.session.set_reward_rule(RewardRule::Flawless(difficulty));
        self.session.start();
        self.current = 0;
        self.selected = None;
        self.locked = false;
        true
    }

    /// The question being asked, if the round is active.
    pub fn present_next(&self) -> Option<&'static Question> {
        if !self.session.is_active() {
            return None;
        }
        self.questions.get(self.current)
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        self.present_next()
    }

    /// Select an option. Ignored once the answer is locked in.
    pub fn choose(&mut self, option: usize) -> bool {
        let Some(question) = self.present_next() else {
            return false;
        };
        if self.locked || option >= question.options.len() {
            return false;
        }
        self.selected = Some(option);
        true
    }

    /// Lock in the selected option and record the outcome.
    pub fn submit(&mut self) -> Option<AnswerFeedback> {
        let question = self.present_next()?;
        if self.locked {
            return None;
        }
        let chosen = self.selected?;
        self.locked = true;

        let outcome = self.session.record_outcome(chosen == question.answer)?;
        Some(AnswerFeedback {
            chosen,
            answer_index: question.answer,
            outcome,
        })
    }

    /// Move past a locked answer to the next question.
    pub fn advance(&mut self) -> bool {
        if !self.locked || !self.session.is_active() {
            return false;
        }
        self.current += 1;
        self.selected = None;
        self.locked = false;
        true
    }

    /// Share of questions already answered, rounded.
    pub fn percent_complete(&self) -> u32 {
        let total = self.total() as u32;
        if total == 0 {
            return 100;
        }
        let done = self.session.progress();
        (done * 100 + total / 2) / total
    }

    /// Start over; optionally forget the difficulty to show the picker again.
    pub fn restart(&mut self, reset_difficulty: bool) -> bool {
        if reset_difficulty {
            self.session.reset();
            self.difficulty = None;
            self.current = 0;
            self.selected = None;
            self.locked = false;
            return false;
        }
        self.start()
    }

    pub fn abandon(&mut self) {
        self.session.abandon();
        self.current = 0;
        self.selected = None;
        self.locked = false;
    }
}

impl Default for TriviaQuiz {
    fn default() -> Self {
        Self::new()
    }
}

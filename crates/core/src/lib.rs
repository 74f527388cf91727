//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the session state machine and the four eco mini-games
//! built on it. It has **no dependencies** on terminals, timers, or storage:
//!
//! - **Deterministic**: the same seed deals the same items and decks
//! - **Total**: every operation succeeds; invalid calls are reported as no-ops
//! - **Event-driven**: hosts call in on player input and timer callbacks
//!
//! # Module Structure
//!
//! - [`session`]: `Idle -> Active -> Finished` machine with streak scoring
//! - [`rng`]: seeded LCG and the no-repeat [`ItemPool`]
//! - [`scoring`]: reward rules and the XP level curve
//! - [`catalog`]: static items, cards, questions, hub tiles
//! - [`sorter`], [`cleanup`], [`memory`], [`quiz`]: the mini-games
//! - [`game`]: one enum over all games for hosts
//!
//! # Example
//!
//! ```
//! use eco_quest_core::WasteSorter;
//!
//! let mut game = WasteSorter::new(12345);
//! game.start();
//!
//! let bin = game.current().unwrap().bin;
//! let feedback = game.sort(bin).unwrap();
//! assert!(feedback.correct());
//! assert_eq!(game.session().score(), 10);
//! ```
//!
//! # Timing
//!
//! Time-boxed games expect one [`Session::tick`] per real-time second and the
//! cleanup spawner one [`PollutionCleanup::spawn`] per 600ms; the engine crate
//! owns those cadences.

pub mod catalog;
pub mod cleanup;
pub mod game;
pub mod memory;
pub mod quiz;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod sorter;

pub use eco_quest_types as types;

pub use catalog::{HubEntry, MemoryCard, Question, WasteItem, HUB_ENTRIES};
pub use cleanup::{Pollutant, PollutionCleanup};
pub use game::Game;
pub use memory::{DeckCard, EcoMemory, FlipResult};
pub use quiz::{AnswerFeedback, TriviaQuiz};
pub use rng::{ItemPool, SimpleRng};
pub use scoring::{level_for_xp, level_progress_percent, RewardRule};
pub use session::{CompletionNotifier, Session, SharedNotifier};
pub use snapshot::SessionSnapshot;
pub use sorter::{SortFeedback, WasteSorter};

//! Player profile, persistence and leaderboards.
//!
//! - [`Profile`] and its [`Avatar`] are serialized as camelCase JSON
//! - [`ProfileStore`] abstracts where that JSON lives
//!   ([`MemoryStore`] for tests, [`JsonFileStore`] on disk)
//! - [`ProfileService`] owns the current user and implements [`XpSink`]
//! - [`Leaderboard`] ranks the player against a seeded roster

pub mod avatar;
pub mod error;
pub mod leaderboard;
pub mod profile;
pub mod service;
pub mod store;

pub use eco_quest_types as types;

pub use avatar::{Avatar, AVATAR_CHOICES, DEFAULT_AVATAR};
pub use error::{AuthError, ProfileError, StoreError};
pub use leaderboard::{rank_by_xp, roster, Leaderboard, RankedStudent, Scope, Student};
pub use profile::{Profile, DEFAULT_NAME, FIRST_STEPS_BADGE};
pub use service::{ProfileService, SignUp, XpSink};
pub use store::{JsonFileStore, MemoryStore, ProfileStore};

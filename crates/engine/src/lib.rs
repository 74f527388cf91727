//! Runtime glue between the pure games and a host.
//!
//! - [`cadence`] and [`driver`]: frame-loop timers for one running game
//! - [`clock`]: the same timers as tokio tasks over a shared game
//! - [`rewards`]: completion handler that banks XP and routes to the hub
//! - [`app`]: screens, routes and command handling for the terminal front-end
//! - [`config`]: `ECO_QUEST_*` environment settings

pub mod app;
pub mod cadence;
pub mod clock;
pub mod config;
pub mod driver;
pub mod rewards;

pub use eco_quest_core as core;
pub use eco_quest_profile as profile;
pub use eco_quest_types as types;

pub use app::{App, FormField, LeaderboardView, Route, Screen, SignUpForm, CLEAN_RADIUS};
pub use cadence::Cadence;
pub use clock::{SessionClock, SharedGame};
pub use config::ArcadeConfig;
pub use driver::{DriverStep, SessionDriver};
pub use rewards::{Navigator, RewardsHandler, RouteQueue};

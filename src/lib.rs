//! EcoQuest arcade (workspace facade crate).
//!
//! Re-exports the member crates under one name so binaries, tests and benches
//! can write `eco_quest::{core,engine,input,profile,term,types}`.

pub use eco_quest_core as core;
pub use eco_quest_engine as engine;
pub use eco_quest_input as input;
pub use eco_quest_profile as profile;
pub use eco_quest_term as term;
pub use eco_quest_types as types;

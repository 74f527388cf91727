use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::TICK_MS;

pub const DEFAULT_PROFILE_PATH: &str = "eco_quest_profile.json";

/// Runtime settings, read from `ECO_QUEST_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcadeConfig {
    pub profile_path: PathBuf,
    pub seed: u32,
    pub tick_ms: u32,
    pub log_path: Option<String>,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            profile_path: PathBuf::from(DEFAULT_PROFILE_PATH),
            seed: time_seed(),
            tick_ms: TICK_MS,
            log_path: None,
        }
    }
}

impl ArcadeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset, blank or unparsable values fall
    /// back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let profile_path = get("ECO_QUEST_PROFILE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE_PATH));
        let seed = get("ECO_QUEST_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(time_seed);
        let tick_ms = get("ECO_QUEST_TICK_MS")
            .and_then(|s| s.parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(TICK_MS);
        let log_path = get("ECO_QUEST_LOG_PATH");

        Self {
            profile_path,
            seed,
            tick_ms,
            log_path,
        }
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = ArcadeConfig::from_env();
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ArcadeConfig::from_lookup(lookup(&[]));
        assert_eq!(config.profile_path, PathBuf::from(DEFAULT_PROFILE_PATH));
        assert_eq!(config.tick_ms, TICK_MS);
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn test_reads_values() {
        let config = ArcadeConfig::from_lookup(lookup(&[
            ("ECO_QUEST_PROFILE_PATH", "/tmp/me.json"),
            ("ECO_QUEST_SEED", "42"),
            ("ECO_QUEST_TICK_MS", "33"),
            ("ECO_QUEST_LOG_PATH", "  quest.log "),
        ]));
        assert_eq!(config.profile_path, PathBuf::from("/tmp/me.json"));
        assert_eq!(config.seed, 42);
        assert_eq!(config.tick_ms, 33);
        assert_eq!(config.log_path.as_deref(), Some("quest.log"));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = ArcadeConfig::from_lookup(lookup(&[
            ("ECO_QUEST_TICK_MS", "0"),
            ("ECO_QUEST_LOG_PATH", "   "),
        ]));
        assert_eq!(config.tick_ms, TICK_MS);
        assert_eq!(config.log_path, None);
    }
}

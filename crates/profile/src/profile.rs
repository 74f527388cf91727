//! The persisted player profile.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::avatar::Avatar;
use eco_quest_core::level_for_xp;

/// Name used when the player leaves it blank.
pub const DEFAULT_NAME: &str = "Student";

/// Badge granted the first time a quest pays out XP.
pub const FIRST_STEPS_BADGE: &str = "first-steps";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ProfileRecord")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub xp: u32,
    pub avatar: Avatar,
    pub badges: Vec<String>,
    /// Always `level_for_xp(xp)`; recomputed on load.
    pub level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
}

/// On-disk form. Older records may lack any field but `id`, and a stored
/// `level` is not trusted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRecord {
    id: String,
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    xp: u32,
    #[serde(default)]
    avatar: Avatar,
    #[serde(default)]
    badges: Vec<String>,
    #[serde(default)]
    age: Option<AgeRepr>,
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    school: Option<String>,
}

/// Ages arrive as numbers, or as the text typed into a form.
#[derive(Deserialize)]
#[serde(untagged)]
enum AgeRepr {
    Number(u32),
    Text(String),
}

impl AgeRepr {
    fn value(self) -> Option<u32> {
        match self {
            AgeRepr::Number(n) => Some(n),
            AgeRepr::Text(t) => t.trim().parse().ok(),
        }
    }
}

impl From<ProfileRecord> for Profile {
    fn from(r: ProfileRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            level: level_for_xp(r.xp),
            xp: r.xp,
            avatar: r.avatar,
            badges: r.badges,
            age: r.age.and_then(AgeRepr::value),
            class_name: r.class_name,
            school: r.school,
        }
    }
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

impl Profile {
    /// Fresh profile with a random id, zero XP and level 1.
    pub fn new(name: &str, email: &str, avatar: Avatar) -> Self {
        let name = name.trim();
        Self {
            id: Uuid::new_v4().to_string(),
            name: if name.is_empty() {
                default_name()
            } else {
                name.to_string()
            },
            email: email.trim().to_string(),
            xp: 0,
            avatar,
            badges: Vec::new(),
            level: 1,
            age: None,
            class_name: None,
            school: None,
        }
    }

    /// Add XP, keep the level in step and grant the first-quest badge.
    /// Returns the new total.
    pub fn add_xp(&mut self, amount: u32) -> u32 {
        if amount == 0 {
            return self.xp;
        }
        self.xp = self.xp.saturating_add(amount);
        self.level = level_for_xp(self.xp);
        self.award_badge(FIRST_STEPS_BADGE);
        self.xp
    }

    /// Grant a badge once. Returns `false` if it was already held.
    pub fn award_badge(&mut self, badge: &str) -> bool {
        if self.has_badge(badge) {
            return false;
        }
        self.badges.push(badge.to_string());
        true
    }

    pub fn has_badge(&self, badge: &str) -> bool {
        self.badges.iter().any(|b| b == badge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_becomes_student() {
        let p = Profile::new("   ", "kid@school.org", Avatar::default());
        assert_eq!(p.name, "Student");
        assert_eq!(p.level, 1);
        assert!(!p.id.is_empty());
    }

    #[test]
    fn add_xp_levels_up_and_badges_once() {
        let mut p = Profile::new("Mia", "mia@x", Avatar::default());
        assert_eq!(p.add_xp(0), 0);
        assert!(p.badges.is_empty());

        assert_eq!(p.add_xp(990), 990);
        assert_eq!(p.level, 1);
        assert_eq!(p.add_xp(20), 1010);
        assert_eq!(p.level, 2);
        assert_eq!(p.badges, vec![FIRST_STEPS_BADGE.to_string()]);
    }

    #[test]
    fn serde_uses_camel_case_and_defaults() {
        let json = r#"{"id":"1","email":"a@b","className":"10-A"}"#;
        let p: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(p.name, "Student");
        assert_eq!(p.xp, 0);
        assert_eq!(p.level, 1);
        assert_eq!(p.class_name.as_deref(), Some("10-A"));
        assert_eq!(p.avatar, Avatar::default());

        let out = serde_json::to_value(&p).unwrap();
        assert_eq!(out["className"], "10-A");
        assert!(out.get("school").is_none());
    }

    #[test]
    fn level_follows_xp_on_load() {
        let json = r#"{"id":"1","name":"Asha","email":"a@b","xp":2500,"avatar":"🦉"}"#;
        let p: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(p.level, 3);

        let stale = r#"{"id":"2","xp":1200,"level":7}"#;
        let p: Profile = serde_json::from_str(stale).unwrap();
        assert_eq!(p.level, level_for_xp(1200));
    }

    #[test]
    fn age_round_trips_and_is_omitted_when_unknown() {
        let p: Profile = serde_json::from_str(r#"{"id":"1","age":12}"#).unwrap();
        assert_eq!(p.age, Some(12));
        assert_eq!(serde_json::to_value(&p).unwrap()["age"], 12);

        let typed: Profile = serde_json::from_str(r#"{"id":"2","age":"13"}"#).unwrap();
        assert_eq!(typed.age, Some(13));
        let blank: Profile = serde_json::from_str(r#"{"id":"3","age":""}"#).unwrap();
        assert_eq!(blank.age, None);

        let p = Profile::new("Mia", "mia@x", Avatar::default());
        assert!(serde_json::to_value(&p).unwrap().get("age").is_none());
    }
}

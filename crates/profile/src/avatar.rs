//! Player avatar: an emoji or an image reference, decided once at load time.

use serde::{Deserialize, Serialize};

/// Default avatar when a profile has none.
pub const DEFAULT_AVATAR: &str = "🪴";

/// Avatars offered on the sign-up form.
pub const AVATAR_CHOICES: [&str; 8] = ["🌱", "🌳", "🐢", "🦉", "🐝", "🦋", "🐧", "🐼"];

const IMAGE_PREFIXES: [&str; 6] = ["http:", "https:", "data:", "/", "./", "../"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", from = "AvatarRepr")]
pub enum Avatar {
    Emoji { value: String },
    ImageRef { url: String },
}

impl Avatar {
    /// Classify a raw avatar string. URLs, data URIs and paths are images;
    /// anything else is shown as an emoji.
    pub fn classify(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }
        if IMAGE_PREFIXES.iter().any(|p| raw.starts_with(p)) {
            Avatar::ImageRef {
                url: raw.to_string(),
            }
        } else {
            Avatar::Emoji {
                value: raw.to_string(),
            }
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Avatar::ImageRef { .. })
    }

    /// Text to show in a terminal: the emoji itself, or a marker for images.
    pub fn label(&self) -> &str {
        match self {
            Avatar::Emoji { value } => value,
            Avatar::ImageRef { .. } => "[img]",
        }
    }
}

impl Default for Avatar {
    fn default() -> Self {
        Avatar::Emoji {
            value: DEFAULT_AVATAR.to_string(),
        }
    }
}

/// On-disk forms: the tagged object, or a legacy bare string.
#[derive(Deserialize)]
#[serde(untagged)]
enum AvatarRepr {
    Tagged(TaggedAvatar),
    Raw(String),
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum TaggedAvatar {
    Emoji { value: String },
    ImageRef { url: String },
}

impl From<AvatarRepr> for Avatar {
    fn from(repr: AvatarRepr) -> Self {
        match repr {
            AvatarRepr::Tagged(TaggedAvatar::Emoji { value }) => Avatar::Emoji { value },
            AvatarRepr::Tagged(TaggedAvatar::ImageRef { url }) => Avatar::ImageRef { url },
            AvatarRepr::Raw(raw) => Avatar::classify(&raw),
        }
    }
}

//! Mojang profile records, as served by the ashcon.app proxy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A resolved player profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MojangProfile {
    pub uuid: Uuid,
    pub username: String,
    #[serde(default)]
    pub username_history: Vec<UsernameChange>,
    pub textures: Textures,
    #[serde(default)]
    pub legacy: bool,
    #[serde(default)]
    pub demo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsernameChange {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Textures {
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub slim: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin: Option<TextureUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cape: Option<TextureUrl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureUrl {
    pub url: String,
}

impl MojangProfile {
    /// The uuid without dashes.
    pub fn short_uuid(&self) -> String {
        self.uuid.simple().to_string()
    }

    /// How many times the account changed its name.
    pub fn name_changes(&self) -> usize {
        self.username_history.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decodes_a_trimmed_ashcon_body() {
        let body = serde_json::json!({
            "uuid": "069a79f4-44e9-4726-a5be-fca90e38aaf5",
            "username": "Notch",
            "username_history": [
                {"username": "Notch"}
            ],
            "textures": {
                "custom": true,
                "slim": false,
                "skin": {"url": "http://textures.minecraft.net/texture/abc"}
            },
            "created_at": "2009-06-01"
        });
        let profile: MojangProfile = serde_json::from_value(body).unwrap();
        assert_eq!(profile.username, "Notch");
        assert_eq!(profile.short_uuid(), "069a79f444e94726a5befca90e38aaf5");
        assert_eq!(profile.name_changes(), 0);
        assert!(!profile.legacy);
        assert!(profile.textures.cape.is_none());
    }
}

//! Notification channel configuration and the sender seam.
//!
//! Delivery lives outside the core: implementors of [`ChannelSender`] make
//! the actual provider calls. This module fixes the typed configuration for
//! each supported channel so a missing or misspelled field fails at load
//! time instead of silently disabling a push.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::message::PushMessage;
use crate::Result;

/// Supported delivery channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Dingtalk,
    Wechat,
    Bark,
    Ntfy,
    Telegram,
    Email,
    ServerChan,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 7] = [
        Self::Dingtalk,
        Self::Wechat,
        Self::Bark,
        Self::Ntfy,
        Self::Telegram,
        Self::Email,
        Self::ServerChan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dingtalk => "dingtalk",
            Self::Wechat => "wechat",
            Self::Bark => "bark",
            Self::Ntfy => "ntfy",
            Self::Telegram => "telegram",
            Self::Email => "email",
            Self::ServerChan => "serverchan",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dingtalk" => Some(Self::Dingtalk),
            "wechat" => Some(Self::Wechat),
            "bark" => Some(Self::Bark),
            "ntfy" => Some(Self::Ntfy),
            "telegram" => Some(Self::Telegram),
            "email" => Some(Self::Email),
            "serverchan" => Some(Self::ServerChan),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// DingTalk group-robot webhook settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DingtalkConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub webhook_url: String,
    /// Phone numbers to @-mention, comma separated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_objects: Option<String>,
    #[serde(default)]
    pub at_all: bool,
}

/// WeChat Work group-robot webhook settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WechatConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub webhook_url: String,
}

/// Bark push settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BarkConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub webhook_url: String,
    /// Bark interruption level (active, timeSensitive, passive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupt_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
}

/// ntfy topic settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NtfyConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub server_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub api_token: String,
    /// Target chat ID (user, group, or channel).
    #[serde(default)]
    pub chat_id: String,
}

/// SMTP email settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub smtp_server: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub recipient_email: String,
}

/// ServerChan settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerChanConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub sendkey: String,
    #[serde(default = "default_serverchan_channel")]
    pub channel: u32,
    #[serde(default = "default_serverchan_tags")]
    pub tags: String,
}

fn default_serverchan_channel() -> u32 {
    9
}

fn default_serverchan_tags() -> String {
    "Live Status Update".to_string()
}

impl Default for ServerChanConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            sendkey: String::new(),
            channel: default_serverchan_channel(),
            tags: default_serverchan_tags(),
        }
    }
}

/// Tagged per-channel configuration: one case per channel, carrying only that
/// channel's required fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChannelConfig {
    Dingtalk(DingtalkConfig),
    Wechat(WechatConfig),
    Bark(BarkConfig),
    Ntfy(NtfyConfig),
    Telegram(TelegramConfig),
    Email(EmailConfig),
    ServerChan(ServerChanConfig),
}

impl ChannelConfig {
    pub fn kind(&self) -> ChannelKind {
        match self {
            Self::Dingtalk(_) => ChannelKind::Dingtalk,
            Self::Wechat(_) => ChannelKind::Wechat,
            Self::Bark(_) => ChannelKind::Bark,
            Self::Ntfy(_) => ChannelKind::Ntfy,
            Self::Telegram(_) => ChannelKind::Telegram,
            Self::Email(_) => ChannelKind::Email,
            Self::ServerChan(_) => ChannelKind::ServerChan,
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Dingtalk(c) => c.enabled,
            Self::Wechat(c) => c.enabled,
            Self::Bark(c) => c.enabled,
            Self::Ntfy(c) => c.enabled,
            Self::Telegram(c) => c.enabled,
            Self::Email(c) => c.enabled,
            Self::ServerChan(c) => c.enabled,
        }
    }
}

/// Delivery seam implemented by external channel collaborators.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// Which channel this sender delivers to.
    fn kind(&self) -> ChannelKind;

    /// Whether the sender is configured and switched on.
    fn is_enabled(&self) -> bool;

    /// Deliver one message. A failure is per-channel and never aborts
    /// sibling sends.
    async fn send(&self, message: &PushMessage) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in ChannelKind::ALL {
            assert_eq!(ChannelKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ChannelKind::parse("pager"), None);
    }

    #[test]
    fn test_tagged_config_round_trip() {
        let config = ChannelConfig::Telegram(TelegramConfig {
            enabled: true,
            api_token: "123:ABC".to_string(),
            chat_id: "-100200300".to_string(),
        });
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"type\":\"telegram\""));

        let back: ChannelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), ChannelKind::Telegram);
        assert!(back.is_enabled());
    }

    #[test]
    fn test_serverchan_defaults() {
        let config: ServerChanConfig = serde_json::from_str("{\"sendkey\": \"SCT1\"}").unwrap();
        assert!(!config.enabled);
        assert_eq!(config.channel, 9);
        assert_eq!(config.tags, "Live Status Update");
    }

    #[test]
    fn test_disabled_by_default() {
        let config: ChannelConfig =
            serde_json::from_str("{\"type\": \"bark\", \"webhook_url\": \"https://bark.example\"}")
                .unwrap();
        assert_eq!(config.kind(), ChannelKind::Bark);
        assert!(!config.is_enabled());
    }
}

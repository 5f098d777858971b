//! Typed application settings.
//!
//! Every knob is a named, typed field; a misspelled key in the settings
//! document simply fails to round-trip instead of silently reading as off.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::mux::ContainerKind;
use crate::notification::NotificationSettings;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub capture: CaptureSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureSettings {
    /// Directory recordings land in.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub container: ContainerKind,
    #[serde(default)]
    pub segmented: bool,
    /// Segment length in seconds; only read when `segmented` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_duration_secs: Option<u32>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("downloads")
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            container: ContainerKind::default(),
            segmented: false,
            segment_duration_secs: None,
        }
    }
}

impl Settings {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::ChannelKind;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.capture.output_dir, PathBuf::from("downloads"));
        assert!(!settings.capture.segmented);
        assert!(settings.notifications.stream_start_notification_enabled);
        assert!(settings.notifications.channels.is_empty());
    }

    #[test]
    fn test_parse_full_document() {
        let json = r#"{
            "capture": {
                "output_dir": "/srv/recordings",
                "container": "mp4",
                "segmented": true,
                "segment_duration_secs": 1800
            },
            "notifications": {
                "only_notify_no_record": true,
                "channels": [
                    {"type": "bark", "enabled": true, "webhook_url": "https://bark.example/key"},
                    {"type": "serverchan", "sendkey": "SCT1"}
                ]
            }
        }"#;

        let settings = Settings::from_json_str(json).unwrap();
        assert_eq!(settings.capture.container, ContainerKind::Mp4Family);
        assert_eq!(settings.capture.segment_duration_secs, Some(1800));
        assert!(settings.notifications.only_notify_no_record);
        assert_eq!(settings.notifications.channels.len(), 2);
        assert_eq!(settings.notifications.channels[0].kind(), ChannelKind::Bark);
        assert!(settings.notifications.channels[0].is_enabled());
        assert!(!settings.notifications.channels[1].is_enabled());
        assert!(settings.notifications.any_channel_enabled());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{}").unwrap();

        let settings = Settings::from_json_file(&path).unwrap();
        assert_eq!(settings.capture.container, ContainerKind::TransportStream);
    }

    #[test]
    fn test_unknown_channel_type_is_rejected() {
        let json = r#"{"notifications": {"channels": [{"type": "fax"}]}}"#;
        assert!(Settings::from_json_str(json).is_err());
    }

    #[test]
    fn test_misspelled_key_is_rejected() {
        let json = r#"{"capture": {"output_dri": "/srv/recordings"}}"#;
        assert!(Settings::from_json_str(json).is_err());

        let json = r#"{"notifications": {"only_notify_no_recrd": true}}"#;
        assert!(Settings::from_json_str(json).is_err());
    }
}

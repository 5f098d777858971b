use serde::{Deserialize, Serialize};

/// Scheduler-reported status signal for a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordingStatus {
    /// Nothing unusual to report.
    #[default]
    Normal,
    /// The monitor loop is actively polling this recording's platform.
    Monitoring,
    /// The capture process failed.
    RecordingError,
    /// The liveness probe failed.
    LiveStatusCheckError,
    /// Monitoring is on but the current time is outside the scheduled window.
    NotInScheduledCheck,
}

impl RecordingStatus {
    pub const ALL: [RecordingStatus; 5] = [
        Self::Normal,
        Self::Monitoring,
        Self::RecordingError,
        Self::LiveStatusCheckError,
        Self::NotInScheduledCheck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Monitoring => "MONITORING",
            Self::RecordingError => "RECORDING_ERROR",
            Self::LiveStatusCheckError => "LIVE_STATUS_CHECK_ERROR",
            Self::NotInScheduledCheck => "NOT_IN_SCHEDULED_CHECK",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NORMAL" => Some(Self::Normal),
            "MONITORING" => Some(Self::Monitoring),
            "RECORDING_ERROR" => Some(Self::RecordingError),
            "LIVE_STATUS_CHECK_ERROR" => Some(Self::LiveStatusCheckError),
            "NOT_IN_SCHEDULED_CHECK" => Some(Self::NotInScheduledCheck),
            _ => None,
        }
    }

    /// Whether this signal marks the recording as failed.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::RecordingError | Self::LiveStatusCheckError)
    }
}

impl std::fmt::Display for RecordingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recording slot as the external scheduler reports it.
///
/// The scheduler/monitor mutates these signals; the core only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    pub title: String,
    pub platform_key: String,
    /// Capture is actively writing data.
    #[serde(default)]
    pub is_recording: bool,
    /// The platform reports the stream as up.
    #[serde(default)]
    pub is_live: bool,
    /// Monitoring is enabled for this recording.
    #[serde(default)]
    pub monitor_status: bool,
    #[serde(default)]
    pub status_info: RecordingStatus,
    /// The user stopped this capture on purpose.
    #[serde(default)]
    pub manually_stopped: bool,
    /// Per-recording master switch for outbound pushes.
    #[serde(default = "default_true")]
    pub enabled_message_push: bool,
}

fn default_true() -> bool {
    true
}

impl Recording {
    pub fn new(title: impl Into<String>, platform_key: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            platform_key: platform_key.into(),
            is_recording: false,
            is_live: false,
            monitor_status: false,
            status_info: RecordingStatus::Normal,
            manually_stopped: false,
            enabled_message_push: true,
        }
    }

    pub fn with_recording(mut self, v: bool) -> Self {
        self.is_recording = v;
        self
    }

    pub fn with_live(mut self, v: bool) -> Self {
        self.is_live = v;
        self
    }

    pub fn with_monitoring(mut self, v: bool) -> Self {
        self.monitor_status = v;
        self
    }

    pub fn with_status(mut self, status: RecordingStatus) -> Self {
        self.status_info = status;
        self
    }

    pub fn with_manually_stopped(mut self, v: bool) -> Self {
        self.manually_stopped = v;
        self
    }

    pub fn with_message_push(mut self, v: bool) -> Self {
        self.enabled_message_push = v;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in RecordingStatus::ALL {
            assert_eq!(RecordingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RecordingStatus::parse("bogus"), None);
    }

    #[test]
    fn test_error_statuses() {
        assert!(RecordingStatus::RecordingError.is_error());
        assert!(RecordingStatus::LiveStatusCheckError.is_error());
        assert!(!RecordingStatus::Normal.is_error());
        assert!(!RecordingStatus::NotInScheduledCheck.is_error());
    }

    #[test]
    fn test_new_recording_defaults() {
        let rec = Recording::new("morning show", "twitch");
        assert!(!rec.is_recording);
        assert!(!rec.manually_stopped);
        assert!(rec.enabled_message_push);
        assert_eq!(rec.status_info, RecordingStatus::Normal);
    }
}

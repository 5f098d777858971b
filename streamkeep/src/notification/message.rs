use serde::{Deserialize, Serialize};

use super::channels::ChannelKind;
use crate::domain::Recording;

/// Which edge of a recording's lifecycle triggered the push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    Start,
    End,
}

/// Rendered push content, shared by every channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
}

impl PushMessage {
    /// Render the title/body for a transition.
    pub fn render(transition: TransitionKind, recording: &Recording) -> Self {
        match transition {
            TransitionKind::Start => Self {
                title: "Live stream started".to_string(),
                body: format!(
                    "{} [{}] just went live.",
                    recording.title, recording.platform_key
                ),
            },
            TransitionKind::End => Self {
                title: "Live stream ended".to_string(),
                body: format!(
                    "{} [{}] finished streaming.",
                    recording.title, recording.platform_key
                ),
            },
        }
    }
}

/// Per-channel result of one push fan-out.
#[derive(Debug, Clone, Serialize)]
pub struct PushOutcome {
    pub channel: ChannelKind,
    pub success: bool,
    pub error: Option<String>,
}

/// One gate evaluation: the rendered content plus each configured channel's
/// individual send decision. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct PushDecision {
    pub message: PushMessage,
    pub channels: Vec<(ChannelKind, bool)>,
}

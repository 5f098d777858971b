//! Push decision engine and channel fan-out.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::channels::{ChannelConfig, ChannelSender};
use super::message::{PushDecision, PushMessage, PushOutcome, TransitionKind};
use crate::domain::Recording;

/// Global notification switches plus the configured channel set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationSettings {
    /// Push when a stream goes live.
    #[serde(default = "default_true")]
    pub stream_start_notification_enabled: bool,
    /// Push when a stream ends.
    #[serde(default = "default_true")]
    pub stream_end_notification_enabled: bool,
    /// Push start notifications even for streams that are not being captured.
    #[serde(default)]
    pub only_notify_no_record: bool,
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
}

fn default_true() -> bool {
    true
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            stream_start_notification_enabled: true,
            stream_end_notification_enabled: true,
            only_notify_no_record: false,
            channels: Vec::new(),
        }
    }
}

impl NotificationSettings {
    pub fn any_channel_enabled(&self) -> bool {
        self.channels.iter().any(|c| c.is_enabled())
    }
}

/// Decides whether a push fires for a status transition and fans the rendered
/// message out to the registered channel senders.
///
/// The gate holds no cross-call state; callers serialize transitions for the
/// same recording.
pub struct NotificationGate {
    settings: NotificationSettings,
    senders: Vec<Arc<dyn ChannelSender>>,
}

impl NotificationGate {
    pub fn new(settings: NotificationSettings) -> Self {
        Self {
            settings,
            senders: Vec::new(),
        }
    }

    /// Register a delivery collaborator.
    pub fn register_sender(&mut self, sender: Arc<dyn ChannelSender>) {
        self.senders.push(sender);
    }

    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    /// Whether a push should fire for this transition.
    ///
    /// With `check_manually_stopped`, an end push is suppressed for
    /// recordings the user stopped on purpose.
    pub fn decide(
        &self,
        recording: &Recording,
        transition: TransitionKind,
        check_manually_stopped: bool,
    ) -> bool {
        if !recording.enabled_message_push {
            return false;
        }

        let s = &self.settings;

        // A start push for an uncaptured stream fires ahead of the channel
        // checks below.
        if transition == TransitionKind::Start
            && s.only_notify_no_record
            && s.stream_start_notification_enabled
        {
            return true;
        }
        if transition == TransitionKind::Start && !s.stream_start_notification_enabled {
            return false;
        }
        if transition == TransitionKind::End && !s.stream_end_notification_enabled {
            return false;
        }
        if !s.any_channel_enabled() {
            return false;
        }
        if transition == TransitionKind::End
            && check_manually_stopped
            && recording.manually_stopped
        {
            return false;
        }
        true
    }

    /// Full evaluation: the rendered content plus each configured channel's
    /// individual send decision.
    pub fn plan(
        &self,
        recording: &Recording,
        transition: TransitionKind,
        check_manually_stopped: bool,
    ) -> PushDecision {
        let should_send = self.decide(recording, transition, check_manually_stopped);
        PushDecision {
            message: PushMessage::render(transition, recording),
            channels: self
                .settings
                .channels
                .iter()
                .map(|c| (c.kind(), should_send && c.is_enabled()))
                .collect(),
        }
    }

    /// Fan a message out to every enabled sender.
    ///
    /// Each channel is attempted regardless of its siblings' results; the
    /// returned outcomes cover every enabled channel and the call itself
    /// never fails.
    pub async fn push(&self, message: &PushMessage) -> Vec<PushOutcome> {
        let mut outcomes = Vec::new();
        for sender in &self.senders {
            if !sender.is_enabled() {
                continue;
            }
            let kind = sender.kind();
            match sender.send(message).await {
                Ok(()) => {
                    info!(channel = kind.as_str(), "push message delivered");
                    outcomes.push(PushOutcome {
                        channel: kind,
                        success: true,
                        error: None,
                    });
                }
                Err(err) => {
                    error!(channel = kind.as_str(), error = %err, "push message failed");
                    outcomes.push(PushOutcome {
                        channel: kind,
                        success: false,
                        error: Some(err.to_string()),
                    });
                }
            }
        }
        outcomes
    }

    /// Decide and, when positive, fan out. Returns `None` when suppressed.
    pub async fn notify(
        &self,
        recording: &Recording,
        transition: TransitionKind,
        check_manually_stopped: bool,
    ) -> Option<Vec<PushOutcome>> {
        if !self.decide(recording, transition, check_manually_stopped) {
            return None;
        }
        let message = PushMessage::render(transition, recording);
        Some(self.push(&message).await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::Error;
    use crate::notification::channels::{ChannelKind, TelegramConfig, WechatConfig};

    struct StubSender {
        kind: ChannelKind,
        enabled: bool,
        fail: bool,
        calls: AtomicUsize,
    }

    impl StubSender {
        fn new(kind: ChannelKind, enabled: bool, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                kind,
                enabled,
                fail,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ChannelSender for StubSender {
        fn kind(&self) -> ChannelKind {
            self.kind
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        async fn send(&self, _message: &PushMessage) -> crate::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(Error::other("provider rejected the request"))
            } else {
                Ok(())
            }
        }
    }

    fn settings_with_enabled_channel() -> NotificationSettings {
        NotificationSettings {
            channels: vec![ChannelConfig::Telegram(TelegramConfig {
                enabled: true,
                api_token: "tok".to_string(),
                chat_id: "42".to_string(),
            })],
            ..Default::default()
        }
    }

    fn rec() -> Recording {
        Recording::new("late night", "douyin")
    }

    #[test]
    fn test_per_recording_switch_wins_over_everything() {
        let gate = NotificationGate::new(NotificationSettings {
            only_notify_no_record: true,
            ..settings_with_enabled_channel()
        });
        let recording = rec().with_message_push(false);

        for transition in [TransitionKind::Start, TransitionKind::End] {
            for check in [false, true] {
                assert!(!gate.decide(&recording, transition, check));
            }
        }
    }

    #[test]
    fn test_start_decision_follows_start_switch() {
        let gate = NotificationGate::new(settings_with_enabled_channel());
        assert!(gate.decide(&rec(), TransitionKind::Start, false));

        let gate = NotificationGate::new(NotificationSettings {
            stream_start_notification_enabled: false,
            ..settings_with_enabled_channel()
        });
        assert!(!gate.decide(&rec(), TransitionKind::Start, false));
    }

    #[test]
    fn test_only_notify_no_record_bypasses_channel_check() {
        // No channels configured at all, yet the special case still fires.
        let gate = NotificationGate::new(NotificationSettings {
            only_notify_no_record: true,
            ..Default::default()
        });
        assert!(gate.decide(&rec(), TransitionKind::Start, false));
        // The special case is start-only.
        assert!(!gate.decide(&rec(), TransitionKind::End, false));
    }

    #[test]
    fn test_end_decision_follows_end_switch() {
        let gate = NotificationGate::new(NotificationSettings {
            stream_end_notification_enabled: false,
            ..settings_with_enabled_channel()
        });
        assert!(!gate.decide(&rec(), TransitionKind::End, false));

        let gate = NotificationGate::new(settings_with_enabled_channel());
        assert!(gate.decide(&rec(), TransitionKind::End, false));
    }

    #[test]
    fn test_manual_stop_suppresses_end_push() {
        let gate = NotificationGate::new(settings_with_enabled_channel());
        let stopped = rec().with_manually_stopped(true);

        assert!(!gate.decide(&stopped, TransitionKind::End, true));
        // Without the check the push still fires.
        assert!(gate.decide(&stopped, TransitionKind::End, false));
        // And a start push is unaffected.
        assert!(gate.decide(&stopped, TransitionKind::Start, true));
    }

    #[test]
    fn test_no_enabled_channel_means_no_push() {
        let gate = NotificationGate::new(NotificationSettings {
            channels: vec![ChannelConfig::Wechat(WechatConfig {
                enabled: false,
                webhook_url: "https://wechat.example/hook".to_string(),
            })],
            ..Default::default()
        });
        assert!(!gate.decide(&rec(), TransitionKind::Start, false));
        assert!(!gate.decide(&rec(), TransitionKind::End, false));
    }

    #[test]
    fn test_plan_lists_every_configured_channel() {
        let mut settings = settings_with_enabled_channel();
        settings.channels.push(ChannelConfig::Wechat(WechatConfig {
            enabled: false,
            webhook_url: String::new(),
        }));
        let gate = NotificationGate::new(settings);

        let decision = gate.plan(&rec(), TransitionKind::Start, false);
        assert_eq!(decision.message.title, "Live stream started");
        assert_eq!(
            decision.channels,
            vec![(ChannelKind::Telegram, true), (ChannelKind::Wechat, false)]
        );
    }

    #[tokio::test]
    async fn test_fanout_isolates_channel_failures() {
        let failing = StubSender::new(ChannelKind::Dingtalk, true, true);
        let succeeding = StubSender::new(ChannelKind::Bark, true, false);

        let mut gate = NotificationGate::new(settings_with_enabled_channel());
        gate.register_sender(failing.clone());
        gate.register_sender(succeeding.clone());

        let message = PushMessage::render(TransitionKind::Start, &rec());
        let outcomes = gate.push(&message).await;

        assert_eq!(outcomes.len(), 2);
        let ding = outcomes.iter().find(|o| o.channel == ChannelKind::Dingtalk).unwrap();
        assert!(!ding.success);
        assert!(ding.error.as_deref().unwrap_or("").contains("rejected"));

        let bark = outcomes.iter().find(|o| o.channel == ChannelKind::Bark).unwrap();
        assert!(bark.success);
        assert!(bark.error.is_none());

        // The failing sender did not block its sibling.
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
        assert_eq!(succeeding.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_sender_is_skipped() {
        let disabled = StubSender::new(ChannelKind::Email, false, false);
        let enabled = StubSender::new(ChannelKind::Ntfy, true, false);

        let mut gate = NotificationGate::new(settings_with_enabled_channel());
        gate.register_sender(disabled.clone());
        gate.register_sender(enabled.clone());

        let message = PushMessage::render(TransitionKind::End, &rec());
        let outcomes = gate.push(&message).await;

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].channel, ChannelKind::Ntfy);
        assert_eq!(disabled.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_notify_suppressed_returns_none() {
        let gate = NotificationGate::new(settings_with_enabled_channel());
        let recording = rec().with_message_push(false);
        assert!(
            gate.notify(&recording, TransitionKind::Start, false)
                .await
                .is_none()
        );
    }
}

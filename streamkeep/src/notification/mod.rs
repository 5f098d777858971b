//! Push decisions and channel fan-out.
//!
//! The gate decides whether a status transition is worth a push and fans the
//! rendered message out; external [`ChannelSender`] collaborators deliver.

pub mod channels;
pub mod gate;
pub mod message;

pub use channels::{
    BarkConfig, ChannelConfig, ChannelKind, ChannelSender, DingtalkConfig, EmailConfig,
    NtfyConfig, ServerChanConfig, TelegramConfig, WechatConfig,
};
pub use gate::{NotificationGate, NotificationSettings};
pub use message::{PushDecision, PushMessage, PushOutcome, TransitionKind};

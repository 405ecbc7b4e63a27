//! Channel entity and per-channel notification overrides.

pub mod model;
pub mod notify;

pub use model::{Channel, ChannelType};
pub use notify::{ChannelNotifyProps, MarkUnreadLevel};

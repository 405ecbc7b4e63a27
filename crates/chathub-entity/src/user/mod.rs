//! User entity and notification preferences.

pub mod model;
pub mod notify;

pub use model::User;
pub use notify::{NotifyLevel, PresenceThreshold, UserNotifyProps};

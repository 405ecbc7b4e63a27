//! # chathub-push
//!
//! Push notification engine for ChatHub. Provides:
//!
//! - Pure eligibility gates turning preference and presence state into a
//!   typed allow/suppress verdict
//! - Notification body composition under content-visibility policies
//! - Mention display-name rewriting with inline-code exclusion
//! - App icon badge aggregation
//! - An HTTP client for the external push relay
//! - A worker-pool dispatch hub with per-device delivery ordering

pub mod badge;
pub mod compose;
pub mod eligibility;
pub mod hub;
pub mod proxy;
pub mod store;

pub use badge::BadgeAggregator;
pub use compose::catalog::{EnglishCatalog, MessageCatalog};
pub use hub::{PostNotification, PushNotificationHub};
pub use proxy::PushProxyClient;
pub use store::Stores;

//! User presence status.

pub mod model;

pub use model::{Status, UserStatus};

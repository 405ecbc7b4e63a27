//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chathub_core::config::push::NameFormat;
use chathub_core::types::id::UserId;

use super::notify::UserNotifyProps;

/// A registered user in the ChatHub system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Nickname.
    #[serde(default)]
    pub nickname: String,
    /// Notification preferences.
    #[serde(default)]
    pub notify_props: UserNotifyProps,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user with the given username and default preferences.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            email: None,
            first_name: String::new(),
            last_name: String::new(),
            nickname: String::new(),
            notify_props: UserNotifyProps::default(),
            created_at: Utc::now(),
        }
    }

    /// The user's full name, `"first last"` with either part elided if empty.
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }

    /// The name to display for this user under the given format.
    ///
    /// Falls back to the username whenever the preferred parts are empty.
    pub fn display_name(&self, format: NameFormat) -> String {
        let name = match format {
            NameFormat::Username => return self.username.clone(),
            NameFormat::FullName => self.full_name(),
            NameFormat::NicknameFullName => {
                if self.nickname.is_empty() {
                    self.full_name()
                } else {
                    self.nickname.clone()
                }
            }
        };
        if name.is_empty() {
            self.username.clone()
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: &str, last: &str, nick: &str) -> User {
        let mut u = User::new("testuser");
        u.first_name = first.to_string();
        u.last_name = last.to_string();
        u.nickname = nick.to_string();
        u
    }

    #[test]
    fn test_display_name_username() {
        let u = user("John", "Doe", "JD");
        assert_eq!(u.display_name(NameFormat::Username), "testuser");
    }

    #[test]
    fn test_display_name_full_name() {
        let u = user("John", "Doe", "JD");
        assert_eq!(u.display_name(NameFormat::FullName), "John Doe");
    }

    #[test]
    fn test_display_name_nickname_falls_back_to_full_name() {
        let u = user("Bob", "Johnson", "");
        assert_eq!(u.display_name(NameFormat::NicknameFullName), "Bob Johnson");
    }

    #[test]
    fn test_display_name_falls_back_to_username_when_empty() {
        let u = user("", "", "");
        assert_eq!(u.display_name(NameFormat::FullName), "testuser");
    }
}

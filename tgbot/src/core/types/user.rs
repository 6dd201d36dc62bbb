//! User identity type for core messages.

use serde::{Deserialize, Serialize};

/// User identity (id, username, names, client language).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// IETF language tag reported by the client (e.g. `en`, `ru-RU`).
    pub language_code: Option<String>,
}

impl User {
    /// First and last name joined by a space; first name alone when there is no last name.
    pub fn full_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let mut user = User {
            id: 1,
            first_name: Some("Ann".to_string()),
            last_name: Some("A".to_string()),
            ..Default::default()
        };
        assert_eq!(user.full_name(), "Ann A");

        user.last_name = None;
        assert_eq!(user.full_name(), "Ann");
    }
}

//! User roles and the predicate that gates command handlers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of the sender, resolved per message before gated handlers run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if `role` is one of `allowed`.
pub fn role_permits(role: UserRole, allowed: &[UserRole]) -> bool {
    allowed.contains(&role)
}

//! Role resolution and the filter that gates command handlers by role.

use std::sync::Arc;

use async_trait::async_trait;
use storage::UserRepository;
use tracing::{debug, instrument, warn};

use crate::core::{role_permits, Command, Handler, HandlerResponse, Message, Result, UserRole};

/// Resolves a user's role from the configured admin ids and the `admins` table.
pub struct RoleResolver {
    repo: Arc<dyn UserRepository>,
    admin_ids: Vec<i64>,
}

impl RoleResolver {
    pub fn new(repo: Arc<dyn UserRepository>, admin_ids: Vec<i64>) -> Self {
        Self { repo, admin_ids }
    }

    /// True for ids listed in `ADMINS`; these stay admins whatever the table says.
    pub fn is_configured_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    pub async fn resolve(&self, user_id: i64) -> Result<UserRole> {
        if self.is_configured_admin(user_id) || self.repo.is_admin(user_id).await? {
            Ok(UserRole::Admin)
        } else {
            Ok(UserRole::User)
        }
    }
}

/// Runs `inner.handle` only for commands whose sender holds one of `allowed`.
///
/// Anything else, including a failed role lookup, passes through as Continue and the inner
/// handler never sees the message. Only the inner handler's handle phase is wrapped.
pub struct RoleFilter {
    allowed: Vec<UserRole>,
    resolver: Arc<RoleResolver>,
    inner: Arc<dyn Handler>,
}

impl RoleFilter {
    pub fn new(allowed: Vec<UserRole>, resolver: Arc<RoleResolver>, inner: Arc<dyn Handler>) -> Self {
        Self {
            allowed,
            resolver,
            inner,
        }
    }

    /// Shorthand for a filter that admits admins only.
    pub fn admin(resolver: Arc<RoleResolver>, inner: Arc<dyn Handler>) -> Self {
        Self::new(vec![UserRole::Admin], resolver, inner)
    }
}

#[async_trait]
impl Handler for RoleFilter {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if Command::parse(&message.content).is_none() {
            return Ok(HandlerResponse::Continue);
        }

        let role = match self.resolver.resolve(message.user.id).await {
            Ok(role) => role,
            Err(e) => {
                warn!(error = %e, user_id = message.user.id, "Role resolution failed, skipping gated handler");
                return Ok(HandlerResponse::Continue);
            }
        };

        if !role_permits(role, &self.allowed) {
            debug!(user_id = message.user.id, role = %role, "Role not permitted");
            return Ok(HandlerResponse::Continue);
        }

        self.inner.handle(message).await
    }
}

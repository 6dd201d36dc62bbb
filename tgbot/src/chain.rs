//! Message dispatch for the bot.
//!
//! The runner registers, in order: logging, user registration, the role-gated admin handlers and
//! the user handlers. Registration order is dispatch order, so an admin's `/start` is answered by
//! the admin handler and never reaches the user greeting.

use crate::core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered list of handlers shared by every incoming message.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler after the ones already registered.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Dispatches one message.
    ///
    /// Every `before` hook runs first; a `false` ends dispatch with Stop. Then handlers are asked
    /// in order until one answers Stop or Reply, and finally every `after` hook sees that answer,
    /// last registered first. The first error from any phase is returned as is.
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !self.run_before(message).await? {
            return Ok(HandlerResponse::Stop);
        }

        let response = self.dispatch(message).await?;

        for h in self.handlers.iter().rev() {
            h.after(message, &response).await?;
        }

        debug!(message_id = %message.id, response = ?response, "Dispatch finished");
        Ok(response)
    }

    async fn run_before(&self, message: &Message) -> Result<bool> {
        for h in &self.handlers {
            if !h.before(message).await? {
                info!(
                    handler = std::any::type_name_of_val(h.as_ref()),
                    "before hook stopped dispatch"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn dispatch(&self, message: &Message) -> Result<HandlerResponse> {
        for h in &self.handlers {
            let response = h.handle(message).await?;
            if matches!(response, HandlerResponse::Continue) {
                continue;
            }
            info!(
                handler = std::any::type_name_of_val(h.as_ref()),
                "Message answered"
            );
            return Ok(response);
        }
        Ok(HandlerResponse::Continue)
    }
}

// Unit/integration tests live in tests/handler_chain_test.rs

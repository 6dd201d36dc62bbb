//! REPL runner: converts teloxide messages to core::Message and passes them to HandlerChain.

use crate::chain::HandlerChain;
use crate::core::ToCoreMessage;
use anyhow::Result;
use teloxide::respond;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Starts the REPL with the given teloxide Bot and HandlerChain.
/// Each text message is converted to core::Message and passed to chain.handle (spawned per message).
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    let chain = handler_chain;
    teloxide::repl(
        bot,
        move |_bot: teloxide::Bot, msg: teloxide::types::Message| {
            let chain = chain.clone();

            async move {
                let wrapper = TelegramMessageWrapper(&msg);
                let core_msg = wrapper.to_core();

                if msg.text().is_none() {
                    info!(
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        "Received non-text message, ignored"
                    );
                    return respond(());
                }

                // Run handler chain in a spawned task so REPL returns immediately
                tokio::spawn(async move {
                    if let Err(e) = chain.handle(&core_msg).await {
                        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                    }
                });

                respond(())
            }
        },
    )
    .await;

    Ok(())
}

use std::error::Error;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::dialogue::{replies, DialogueController};
use crate::handlers::utils::{to_reply_markup, TelegramTransport};
use crate::models::InboundEvent;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступні команди:")]
pub enum Command {
    #[command(description = "почати спочатку")]
    Start,
    #[command(description = "як користуватися ботом")]
    Help,
}

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    controller: DialogueController,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match cmd {
        Command::Start => handle_start(bot, msg, controller).await?,
        Command::Help => handle_help(bot, msg).await?,
    }
    Ok(())
}

/// /start проходит через автомат диалога, как и любой другой текст
async fn handle_start(
    bot: Bot,
    msg: Message,
    controller: DialogueController,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let transport = TelegramTransport::new(bot);
    let event = InboundEvent::Text {
        chat_id: msg.chat.id,
        text: msg.text().unwrap_or("/start").to_string(),
    };
    controller.handle(&transport, event).await?;
    log::info!("👋 Chat {} (re)started", msg.chat.id);
    Ok(())
}

async fn handle_help(bot: Bot, msg: Message) -> Result<(), Box<dyn Error + Send + Sync>> {
    bot.send_message(msg.chat.id, replies::HELP)
        .reply_markup(to_reply_markup(replies::main_menu()))
        .await?;
    Ok(())
}

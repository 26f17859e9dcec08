use std::error::Error;

use teloxide::prelude::*;

use crate::dialogue::DialogueController;
use crate::handlers::utils::TelegramTransport;
use crate::models::InboundEvent;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    controller: DialogueController,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let event = match msg.text() {
        // Неизвестные команды пропускаем, известные уже обработаны в command_handler
        Some(text) if text.starts_with('/') => {
            log::debug!("Skipping unknown command '{}' from chat {}", text, msg.chat.id);
            return Ok(());
        }
        Some(text) => InboundEvent::Text {
            chat_id: msg.chat.id,
            text: text.to_string(),
        },
        None => InboundEvent::NonText { chat_id: msg.chat.id },
    };

    let transport = TelegramTransport::new(bot);
    controller.handle(&transport, event).await?;
    Ok(())
}

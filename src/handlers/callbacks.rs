use std::error::Error;

use teloxide::prelude::*;

use crate::dialogue::{DialogueController, Transport};
use crate::handlers::utils::TelegramTransport;
use crate::models::InboundEvent;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    controller: DialogueController,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let transport = TelegramTransport::new(bot);

    match (q.data.as_deref(), &q.message) {
        (Some(data), Some(message)) => {
            let event = InboundEvent::Callback {
                chat_id: message.chat().id,
                callback_id: q.id.clone(),
                action_id: data.to_string(),
            };
            controller.handle(&transport, event).await?;
        }
        _ => {
            // Кнопка без данных или сообщение уже недоступно: просто гасим индикатор
            transport.answer_callback(&q.id).await?;
        }
    }

    Ok(())
}

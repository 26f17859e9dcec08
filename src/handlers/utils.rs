use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, ReplyMarkup};

use crate::dialogue::Transport;
use crate::error::TransportError;
use crate::models::Keyboard;

/// Лимит Telegram 4096 единиц UTF-16, оставляем запас
const MAX_MESSAGE_UTF16: usize = 3800;

/// Отправка ответов через Telegram Bot API
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_text(&self, chat_id: ChatId, text: &str, keyboard: Option<Keyboard>) -> Result<(), TransportError> {
        let mut request = self.bot.send_message(chat_id, truncate_message(text));
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(to_reply_markup(keyboard));
        }
        request.await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        self.bot.answer_callback_query(callback_id.to_string()).await?;
        Ok(())
    }
}

pub fn to_reply_markup(keyboard: Keyboard) -> ReplyMarkup {
    match keyboard {
        Keyboard::Reply(rows) => ReplyMarkup::Keyboard(
            KeyboardMarkup::new(
                rows.into_iter()
                    .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>()),
            )
            .resize_keyboard(),
        ),
        Keyboard::Inline(rows) => ReplyMarkup::InlineKeyboard(InlineKeyboardMarkup::new(
            rows.into_iter().map(|row| {
                row.into_iter()
                    .map(|(label, action_id)| InlineKeyboardButton::callback(label, action_id))
                    .collect::<Vec<_>>()
            }),
        )),
    }
}

/// Обрезает слишком длинные ответы (обычно от GPT)
pub fn truncate_message(text: &str) -> String {
    if text.encode_utf16().count() <= MAX_MESSAGE_UTF16 {
        return text.to_string();
    }

    let mut units = 0;
    let mut truncated: String = text
        .chars()
        .take_while(|c| {
            units += c.len_utf16();
            units <= MAX_MESSAGE_UTF16
        })
        .collect();
    truncated.push_str("\n\n[Повідомлення скорочено]");
    truncated
}

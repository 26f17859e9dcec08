use teloxide::types::ChatId;

/// Идентификатор inline-кнопки «получить совет»
pub const GET_ADVICE: &str = "GET_ADVICE";

/// Входящее событие от транспорта
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Text {
        chat_id: ChatId,
        text: String,
    },
    Callback {
        chat_id: ChatId,
        callback_id: String,
        action_id: String,
    },
    /// Сообщение без текста (стикер, фото и т.п.)
    NonText {
        chat_id: ChatId,
    },
}

impl InboundEvent {
    pub fn chat_id(&self) -> ChatId {
        match self {
            InboundEvent::Text { chat_id, .. }
            | InboundEvent::Callback { chat_id, .. }
            | InboundEvent::NonText { chat_id } => *chat_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Обычное меню из кнопок-подписей
    Reply(Vec<Vec<String>>),
    /// Inline-кнопки: (подпись, action id)
    Inline(Vec<Vec<(String, String)>>),
}

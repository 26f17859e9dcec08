use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use teloxide::types::ChatId;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::models::UserState;

/// Ячейка сессии: состояние под собственным мьютексом и время последнего обращения
struct Slot {
    state: Arc<Mutex<UserState>>,
    last_seen: Instant,
}

type SessionMap = Arc<RwLock<HashMap<ChatId, Slot>>>;

/// Хранилище сессий в памяти, по одной на чат.
///
/// Каждое событие обрабатывается под мьютексом своего чата
/// (`lock_user_state`), поэтому события одного чата применяются строго по
/// порядку поступления, а разные чаты обрабатываются параллельно.
#[derive(Clone, Default)]
pub struct BotState {
    sessions: SessionMap,
}

impl BotState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Захватывает сессию чата, создавая её при первом обращении.
    /// Мьютекс tokio справедливый: ожидающие получают доступ в порядке очереди.
    pub async fn lock_user_state(&self, chat_id: ChatId) -> OwnedMutexGuard<UserState> {
        let state = {
            let mut sessions = self.sessions.write().await;
            let slot = sessions.entry(chat_id).or_insert_with(|| {
                log::debug!("🆕 New session for chat {}", chat_id);
                Slot {
                    state: Arc::new(Mutex::new(UserState::default())),
                    last_seen: Instant::now(),
                }
            });
            slot.last_seen = Instant::now();
            slot.state.clone()
        };

        state.lock_owned().await
    }

    /// Копия состояния; в боевом коде сессию читают только под `lock_user_state`
    #[cfg(test)]
    pub async fn get_user_state(&self, chat_id: ChatId) -> UserState {
        self.lock_user_state(chat_id).await.clone()
    }

    /// Сброс в обход автомата. Внутри обработки события сессия уже захвачена,
    /// там сбрасывается сам guard через `UserState::reset`.
    #[cfg(test)]
    pub async fn reset_user_state(&self, chat_id: ChatId) {
        let mut guard = self.lock_user_state(chat_id).await;
        guard.reset();
        log::debug!("♻️ Session reset for chat {}", chat_id);
    }

    #[cfg(test)]
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Удаляет сессии, простаивающие дольше `ttl`.
    /// Сессию, которую кто-то держит или ждёт, не трогаем.
    pub async fn cleanup_cache(&self, ttl: Duration) {
        let mut sessions = self.sessions.write().await;
        let previous_count = sessions.len();

        sessions.retain(|_, slot| {
            Arc::strong_count(&slot.state) > 1 || slot.last_seen.elapsed() < ttl
        });

        log::debug!("🧹 Sessions cleaned: {} -> {} entries", previous_count, sessions.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForecastKind;

    #[tokio::test]
    async fn get_creates_default_session() {
        let state = BotState::new();
        assert_eq!(state.get_user_state(ChatId(1)).await, UserState::default());
        assert_eq!(state.session_count().await, 1);
    }

    #[tokio::test]
    async fn reset_restores_defaults() {
        let state = BotState::new();
        {
            let mut session = state.lock_user_state(ChatId(7)).await;
            session.forecast_stage = Some(ForecastKind::FiveDay);
            session.last_weather_summary = Some("сонячно".to_string());
        }
        assert_eq!(
            state.get_user_state(ChatId(7)).await.forecast_stage,
            Some(ForecastKind::FiveDay)
        );

        state.reset_user_state(ChatId(7)).await;
        assert_eq!(state.get_user_state(ChatId(7)).await, UserState::default());
    }

    #[tokio::test]
    async fn sessions_are_isolated_per_chat() {
        let state = BotState::new();
        state.lock_user_state(ChatId(1)).await.awaiting_question = true;
        assert!(!state.get_user_state(ChatId(2)).await.awaiting_question);
        assert!(state.get_user_state(ChatId(1)).await.awaiting_question);
    }

    #[tokio::test]
    async fn cleanup_drops_idle_sessions_only() {
        let state = BotState::new();
        state.get_user_state(ChatId(1)).await;
        let held = state.lock_user_state(ChatId(2)).await;

        state.cleanup_cache(Duration::ZERO).await;

        assert_eq!(state.session_count().await, 1);
        drop(held);
        state.cleanup_cache(Duration::ZERO).await;
        assert_eq!(state.session_count().await, 0);
    }

    #[tokio::test]
    async fn cleanup_keeps_recent_sessions() {
        let state = BotState::new();
        state.get_user_state(ChatId(1)).await;
        state.cleanup_cache(Duration::from_secs(300)).await;
        assert_eq!(state.session_count().await, 1);
    }
}

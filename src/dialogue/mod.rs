pub mod intent;
pub mod replies;


use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use teloxide::types::ChatId;
use tokio::time;

use crate::bot_state::BotState;
use crate::config::{Config, FallbackPolicy, RoutingMode};
use crate::dialogue::intent::{classify, classify_action, Intent};
use crate::error::{CompletionError, TransportError, WeatherError};
use crate::llm::CompletionClient;
use crate::models::{ForecastKind, InboundEvent, Keyboard, UserState};
use crate::weather::format::{format_five_day, format_hourly, format_today};
use crate::weather::WeatherClient;

/// Доставка исходящих сообщений
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str, keyboard: Option<Keyboard>) -> Result<(), TransportError>;
    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError>;
}

#[derive(Debug, Clone, Copy)]
pub struct DialogueSettings {
    pub routing_mode: RoutingMode,
    pub fallback: FallbackPolicy,
    pub request_timeout: Duration,
}

impl From<&Config> for DialogueSettings {
    fn from(config: &Config) -> Self {
        Self {
            routing_mode: config.routing_mode,
            fallback: config.fallback,
            request_timeout: config.request_timeout,
        }
    }
}

/// Конечный автомат диалога.
///
/// Каждое событие обрабатывается целиком под мьютексом сессии своего чата,
/// поэтому два сценария (ожидание города и ожидание вопроса) не могут
/// перемешаться. Сбой погодного запроса по сети один раз передаётся в GPT;
/// «город не найден» и неверный ключ сообщаются пользователю как есть.
#[derive(Clone)]
pub struct DialogueController {
    state: BotState,
    weather: Arc<dyn WeatherClient>,
    llm: Arc<dyn CompletionClient>,
    settings: DialogueSettings,
}

impl DialogueController {
    pub fn new(
        state: BotState,
        weather: Arc<dyn WeatherClient>,
        llm: Arc<dyn CompletionClient>,
        settings: DialogueSettings,
    ) -> Self {
        Self { state, weather, llm, settings }
    }

    pub async fn handle(&self, transport: &dyn Transport, event: InboundEvent) -> Result<(), TransportError> {
        let chat_id = event.chat_id();
        let mut session = self.state.lock_user_state(chat_id).await;

        match event {
            InboundEvent::Text { text, .. } => {
                let intent = classify(&session, &text, self.settings.routing_mode);
                log::debug!("🧭 Chat {}: {:?}", chat_id, intent);
                self.apply(transport, &mut session, chat_id, intent, &text).await?;
            }
            InboundEvent::Callback { callback_id, action_id, .. } => {
                transport.answer_callback(&callback_id).await?;
                match classify_action(&action_id) {
                    Some(intent) => self.apply(transport, &mut session, chat_id, intent, "").await?,
                    None => log::warn!("Unknown callback action '{}' from chat {}", action_id, chat_id),
                }
            }
            InboundEvent::NonText { .. } => {
                transport
                    .send_text(chat_id, replies::USE_MENU, Some(replies::main_menu()))
                    .await?;
            }
        }

        debug_assert!(session.has_single_armed_flow());
        Ok(())
    }

    async fn apply(
        &self,
        transport: &dyn Transport,
        state: &mut UserState,
        chat_id: ChatId,
        intent: Intent,
        text: &str,
    ) -> Result<(), TransportError> {
        match intent {
            Intent::Restart => {
                state.reset();
                transport
                    .send_text(chat_id, replies::WELCOME, Some(replies::main_menu()))
                    .await
            }
            Intent::SelectForecastKind(kind) => {
                state.forecast_stage = Some(kind);
                state.awaiting_question = false;
                transport.send_text(chat_id, replies::ENTER_CITY, None).await
            }
            Intent::RequestGptMode => {
                state.forecast_stage = None;
                state.awaiting_question = true;
                transport.send_text(chat_id, replies::ASK_QUESTION, None).await
            }
            Intent::OpenWeatherMenu => {
                state.forecast_stage = None;
                transport
                    .send_text(chat_id, replies::CHOOSE_FORECAST, Some(replies::weather_menu()))
                    .await
            }
            Intent::AskForCity => {
                state.forecast_stage = Some(ForecastKind::Today);
                transport.send_text(chat_id, replies::ENTER_CITY_HINT, None).await
            }
            Intent::FreeTextCity => self.lookup_weather(transport, state, chat_id, text).await,
            Intent::FreeTextQuestion => {
                state.awaiting_question = false;
                self.answer_question(transport, chat_id, text.trim()).await
            }
            Intent::RequestAdvice => match state.last_weather_summary.clone() {
                Some(summary) => {
                    self.answer_question(transport, chat_id, &replies::advice_prompt(&summary))
                        .await
                }
                None => transport.send_text(chat_id, replies::NO_FORECAST_YET, None).await,
            },
            Intent::Unroutable => {
                transport
                    .send_text(chat_id, replies::USE_MENU, Some(replies::main_menu()))
                    .await
            }
        }
    }

    async fn lookup_weather(
        &self,
        transport: &dyn Transport,
        state: &mut UserState,
        chat_id: ChatId,
        text: &str,
    ) -> Result<(), TransportError> {
        let Some(kind) = state.forecast_stage else {
            return transport
                .send_text(chat_id, replies::USE_MENU, Some(replies::main_menu()))
                .await;
        };
        let city = text.trim();

        match self.fetch_forecast(kind, city).await {
            Ok(summary) => {
                log::info!("🌤 {:?} forecast for '{}' sent to chat {}", kind, city, chat_id);
                state.forecast_stage = None;
                state.last_weather_summary = Some(summary.clone());

                transport
                    .send_text(chat_id, &summary, Some(replies::advice_button()))
                    .await?;
                transport
                    .send_text(chat_id, replies::WHAT_NEXT, Some(replies::main_menu()))
                    .await
            }
            Err(WeatherError::CityNotFound(message)) => {
                log::warn!("City '{}' not found for chat {}: {}", city, chat_id, message);
                transport
                    .send_text(chat_id, &replies::city_not_found(city, &message), None)
                    .await
            }
            Err(WeatherError::InvalidKey(message)) => {
                log::error!("❌ Weather provider rejected the API key: {}", message);
                state.forecast_stage = None;
                transport
                    .send_text(chat_id, &replies::invalid_key(&message), Some(replies::main_menu()))
                    .await
            }
            Err(WeatherError::Transport(reason)) => {
                log::error!("❌ Weather lookup for '{}' failed: {}", city, reason);
                state.forecast_stage = None;

                match self.settings.fallback {
                    FallbackPolicy::TransportOnly => {
                        log::info!("↪️ Falling back to GPT for chat {}", chat_id);
                        self.answer_question(transport, chat_id, city).await
                    }
                    FallbackPolicy::Disabled => {
                        transport
                            .send_text(chat_id, replies::WEATHER_UNAVAILABLE, Some(replies::main_menu()))
                            .await
                    }
                }
            }
        }
    }

    async fn fetch_forecast(&self, kind: ForecastKind, city: &str) -> Result<String, WeatherError> {
        let summary = match kind {
            ForecastKind::Today => format_today(&self.weather_call(self.weather.fetch_today(city)).await?),
            ForecastKind::FiveDay => {
                format_five_day(&self.weather_call(self.weather.fetch_five_day(city)).await?)
            }
            ForecastKind::Hourly3h => format_hourly(&self.weather_call(self.weather.fetch_hourly(city)).await?),
        };
        Ok(summary)
    }

    /// Ответ GPT без дальнейшего фолбэка: при ошибке только извинение
    async fn answer_question(&self, transport: &dyn Transport, chat_id: ChatId, prompt: &str) -> Result<(), TransportError> {
        let reply = match self.completion_call(self.llm.complete(prompt)).await {
            Ok(answer) => answer,
            Err(CompletionError::RateLimited) => {
                log::warn!("⏳ GPT rate limit hit for chat {}", chat_id);
                replies::GPT_RATE_LIMITED.to_string()
            }
            Err(e) => {
                log::error!("❌ GPT error for chat {}: {}", chat_id, e);
                replies::GPT_FAILED.to_string()
            }
        };

        transport.send_text(chat_id, &reply, Some(replies::main_menu())).await
    }

    async fn weather_call<T>(&self, call: impl Future<Output = Result<T, WeatherError>>) -> Result<T, WeatherError> {
        let limit = self.settings.request_timeout;
        time::timeout(limit, call)
            .await
            .unwrap_or_else(|_| Err(WeatherError::Transport(format!("no response within {:?}", limit))))
    }

    async fn completion_call(
        &self,
        call: impl Future<Output = Result<String, CompletionError>>,
    ) -> Result<String, CompletionError> {
        let limit = self.settings.request_timeout;
        time::timeout(limit, call)
            .await
            .unwrap_or_else(|_| Err(CompletionError::Transport(format!("no response within {:?}", limit))))
    }
}

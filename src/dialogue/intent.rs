use std::sync::LazyLock;

use regex::Regex;

use crate::config::RoutingMode;
use crate::dialogue::replies::{is_menu_label, GPT_MENU_LABEL, WEATHER_MENU_LABEL};
use crate::models::{ForecastKind, UserState, GET_ADVICE};

static WEATHER_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(погода|weather)\b").expect("weather keyword pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Restart,
    SelectForecastKind(ForecastKind),
    RequestGptMode,
    OpenWeatherMenu,
    FreeTextCity,
    FreeTextQuestion,
    AskForCity,
    RequestAdvice,
    Unroutable,
}

/// Определяет намерение по тексту и текущему состоянию сессии.
///
/// Порядок проверок важен, срабатывает первое совпадение:
/// `/start`, ожидаемый вопрос к GPT, кнопки прогноза, кнопки меню,
/// ожидаемый город, ключевое слово «погода», и наконец режим маршрутизации.
pub fn classify(state: &UserState, text: &str, mode: RoutingMode) -> Intent {
    let text = text.trim();

    if is_start_command(text) {
        return Intent::Restart;
    }
    if state.awaiting_question {
        return Intent::FreeTextQuestion;
    }
    if let Some(kind) = ForecastKind::from_label(text) {
        return Intent::SelectForecastKind(kind);
    }
    if text == GPT_MENU_LABEL {
        return Intent::RequestGptMode;
    }
    if text == WEATHER_MENU_LABEL {
        return Intent::OpenWeatherMenu;
    }
    if state.forecast_stage.is_some() && !is_menu_label(text) {
        return Intent::FreeTextCity;
    }
    if WEATHER_KEYWORD.is_match(text) {
        return Intent::AskForCity;
    }

    match mode {
        RoutingMode::Menu => Intent::Unroutable,
        RoutingMode::Direct => Intent::FreeTextQuestion,
    }
}

/// Намерение для нажатия inline-кнопки
pub fn classify_action(action_id: &str) -> Option<Intent> {
    match action_id {
        GET_ADVICE => Some(Intent::RequestAdvice),
        _ => None,
    }
}

fn is_start_command(text: &str) -> bool {
    let command = text.split_whitespace().next().unwrap_or_default();
    command == "/start" || command.starts_with("/start@")
}

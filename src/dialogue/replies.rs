//! Тексты ответов и клавиатуры меню.

use crate::models::{ForecastKind, Keyboard, GET_ADVICE};

pub const WEATHER_MENU_LABEL: &str = "🌦 Погода";
pub const GPT_MENU_LABEL: &str = "🧠 Запитання до GPT";
pub const ADVICE_BUTTON_LABEL: &str = "💡 Отримати пораду";

pub const WELCOME: &str = "👋 Привіт! Я підкажу погоду у будь-якому місті або відповім на твоє запитання.\n\nОбери дію в меню 👇";
pub const HELP: &str = "ℹ️ Як користуватися ботом:\n\n\
    🌦 Погода — оберіть тип прогнозу і введіть назву міста\n\
    🧠 Запитання до GPT — поставте будь-яке запитання\n\
    💡 Після прогнозу можна отримати пораду, як підготуватися до погоди\n\n\
    /start — почати спочатку";
pub const ENTER_CITY: &str = "🏙 Введіть назву міста:";
pub const ENTER_CITY_HINT: &str = "🌍 Напиши назву міста, щоб дізнатися погоду (наприклад: Львів).";
pub const ASK_QUESTION: &str = "🧠 Напишіть своє запитання:";
pub const CHOOSE_FORECAST: &str = "📋 Оберіть тип прогнозу:";
pub const WHAT_NEXT: &str = "Що бажаєте зробити далі?";
pub const USE_MENU: &str = "Будь ласка, скористайтеся меню 👇";
pub const NO_FORECAST_YET: &str = "Спочатку отримайте прогноз погоди, тоді я зможу дати пораду.";
pub const WEATHER_UNAVAILABLE: &str = "⚠️ Сервіс погоди зараз недоступний. Спробуйте пізніше.";
pub const GPT_FAILED: &str = "Вибач, сталася помилка. Спробуй пізніше.";
pub const GPT_RATE_LIMITED: &str = "⏳ Забагато запитів до GPT. Спробуйте трохи пізніше.";

pub fn city_not_found(city: &str, provider_message: &str) -> String {
    format!(
        "❌ Місто «{}» не знайдено ({}). Перевірте назву та спробуйте ще раз.",
        city, provider_message
    )
}

pub fn invalid_key(provider_message: &str) -> String {
    format!(
        "⚠️ Сервіс погоди відхилив ключ доступу ({}). Повідомте адміністратора бота.",
        provider_message
    )
}

pub fn advice_prompt(weather_summary: &str) -> String {
    format!(
        "Ось прогноз погоди:\n\n{}\n\n\
        Дай коротку практичну пораду українською: як одягнутися, що взяти з собою \
        і на що звернути увагу при такій погоді.",
        weather_summary
    )
}

/// Главное меню
pub fn main_menu() -> Keyboard {
    Keyboard::Reply(vec![vec![
        WEATHER_MENU_LABEL.to_string(),
        GPT_MENU_LABEL.to_string(),
    ]])
}

/// Подменю выбора типа прогноза
pub fn weather_menu() -> Keyboard {
    let mut rows: Vec<Vec<String>> = ForecastKind::ALL
        .iter()
        .map(|kind| vec![kind.label().to_string()])
        .collect();
    rows.push(vec![GPT_MENU_LABEL.to_string()]);
    Keyboard::Reply(rows)
}

pub fn advice_button() -> Keyboard {
    Keyboard::Inline(vec![vec![(ADVICE_BUTTON_LABEL.to_string(), GET_ADVICE.to_string())]])
}

/// Все подписи кнопок reply-меню
pub fn is_menu_label(text: &str) -> bool {
    text == WEATHER_MENU_LABEL || text == GPT_MENU_LABEL || ForecastKind::from_label(text).is_some()
}

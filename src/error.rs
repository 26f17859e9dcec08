use thiserror::Error;

/// Ошибки погодного провайдера
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("city not found: {0}")]
    CityNotFound(String),
    #[error("weather provider rejected the API key: {0}")]
    InvalidKey(String),
    #[error("weather request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Transport(err.to_string())
    }
}

/// Ошибки языковой модели
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("language model rate limit exceeded")]
    RateLimited,
    #[error("completion request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::Transport(err.to_string())
    }
}

/// Ошибка доставки сообщения в чат
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

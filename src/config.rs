use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

pub const TELEGRAM_BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENWEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 24 * 60 * 60;

/// Что делать с текстом, который не подходит ни под один сценарий
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingMode {
    /// Подсказываем воспользоваться меню
    Menu,
    /// Отправляем текст напрямую в GPT
    Direct,
}

impl FromStr for RoutingMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "menu" => Ok(RoutingMode::Menu),
            "direct" => Ok(RoutingMode::Direct),
            other => Err(anyhow!("unknown routing mode '{}', expected 'menu' or 'direct'", other)),
        }
    }
}

/// Когда сбой погодного запроса передаётся в GPT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Только при сетевых/HTTP сбоях, не при «город не найден» или неверном ключе
    TransportOnly,
    Disabled,
}

impl FromStr for FallbackPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "transport" => Ok(FallbackPolicy::TransportOnly),
            "off" => Ok(FallbackPolicy::Disabled),
            other => Err(anyhow!("unknown fallback policy '{}', expected 'transport' or 'off'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub openweather_api_key: String,
    pub openweather_base_url: String,
    pub request_timeout: Duration,
    pub routing_mode: RoutingMode,
    pub fallback: FallbackPolicy,
    pub session_idle_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .with_context(|| format!("{} must be set", key))
        };
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let seconds = |key: &str, default: u64| -> Result<Duration> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("{} must be a number of seconds, got '{}'", key, raw)),
                None => Ok(Duration::from_secs(default)),
            }
        };

        Ok(Config {
            telegram_token: required(TELEGRAM_BOT_TOKEN_ENV)?,
            openai_api_key: required(OPENAI_API_KEY_ENV)?,
            openweather_api_key: required(OPENWEATHER_API_KEY_ENV)?,
            openai_model: optional("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            openai_base_url: optional("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            openweather_base_url: optional("OPENWEATHER_BASE_URL", DEFAULT_OPENWEATHER_BASE_URL),
            request_timeout: seconds("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            routing_mode: optional("BOT_ROUTING_MODE", "menu").parse()?,
            fallback: optional("LLM_FALLBACK", "transport").parse()?,
            session_idle_ttl: seconds("SESSION_IDLE_TTL_SECS", DEFAULT_SESSION_IDLE_TTL_SECS)?,
        })
    }
}

pub mod config;
pub mod format;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::WeatherError;
use crate::models::{Bucket, Forecast, Snapshot};
use crate::weather::config::{CurrentWeatherResponse, ErrorResponse, ForecastResponse, WeatherInfo};

/// Погодный провайдер: запрос/ответ, без состояния
#[async_trait]
pub trait WeatherClient: Send + Sync {
    async fn fetch_today(&self, city: &str) -> Result<Snapshot, WeatherError>;
    async fn fetch_five_day(&self, city: &str) -> Result<Forecast, WeatherError>;
    async fn fetch_hourly(&self, city: &str) -> Result<Forecast, WeatherError>;
}

/// Клиент OpenWeatherMap (метрические единицы, украинский язык описаний)
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, city: &str) -> Result<T, WeatherError> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "ua"),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(error_from_status(status, &text));
        }

        serde_json::from_str::<T>(&text)
            .map_err(|e| WeatherError::Transport(format!("malformed weather response: {}", e)))
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        let data: ForecastResponse = self.get("forecast", city).await?;

        let buckets = data
            .list
            .into_iter()
            .map(|item| -> Result<Bucket, WeatherError> {
                Ok(Bucket {
                    timestamp: timestamp(item.dt)?,
                    temperature: item.main.temp,
                    description: first_description(&item.weather)?,
                    humidity: item.main.humidity,
                })
            })
            .collect::<Result<Vec<_>, WeatherError>>()?;

        log::debug!("📦 Forecast for {}: {} buckets", data.city.name, buckets.len());

        Ok(Forecast {
            city: data.city.name,
            utc_offset_secs: data.city.timezone,
            buckets,
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn fetch_today(&self, city: &str) -> Result<Snapshot, WeatherError> {
        let data: CurrentWeatherResponse = self.get("weather", city).await?;

        Ok(Snapshot {
            timestamp: timestamp(data.dt)?,
            description: first_description(&data.weather)?,
            city: data.name,
            country: data.sys.country,
            temperature: data.main.temp,
            feels_like: data.main.feels_like,
            humidity: data.main.humidity,
            wind_speed: data.wind.speed,
        })
    }

    async fn fetch_five_day(&self, city: &str) -> Result<Forecast, WeatherError> {
        self.fetch_forecast(city).await
    }

    async fn fetch_hourly(&self, city: &str) -> Result<Forecast, WeatherError> {
        self.fetch_forecast(city).await
    }
}

fn error_from_status(status: StatusCode, body: &str) -> WeatherError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| status.to_string());

    match status {
        StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => WeatherError::CityNotFound(message),
        StatusCode::UNAUTHORIZED => WeatherError::InvalidKey(message),
        _ => WeatherError::Transport(format!("HTTP {}: {}", status, message)),
    }
}

fn timestamp(dt: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(dt, 0)
        .ok_or_else(|| WeatherError::Transport(format!("invalid timestamp {}", dt)))
}

fn first_description(weather: &[WeatherInfo]) -> Result<String, WeatherError> {
    weather
        .first()
        .map(|w| w.description.clone())
        .ok_or_else(|| WeatherError::Transport("weather description missing".to_string()))
}

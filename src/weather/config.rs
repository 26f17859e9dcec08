use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub name: String,
    pub dt: i64,
    pub sys: SysInfo,
    pub main: MainInfo,
    pub weather: Vec<WeatherInfo>,
    pub wind: WindInfo,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SysInfo {
    #[serde(default)]
    pub country: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MainInfo {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    pub humidity: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WeatherInfo {
    pub description: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WindInfo {
    pub speed: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastItem>,
    pub city: CityInfo,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ForecastItem {
    pub dt: i64,
    pub main: MainInfo,
    pub weather: Vec<WeatherInfo>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CityInfo {
    pub name: String,
    #[serde(default)]
    pub timezone: i32,
}

/// Тело ответа OpenWeatherMap при ошибке; `cod` бывает и строкой, и числом
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

use chrono::{DateTime, FixedOffset, Offset, Utc};

pub const TODAY_LABEL: &str = "Погода сьогодні";
pub const FIVE_DAY_LABEL: &str = "Прогноз на 5 днів";
pub const HOURLY_LABEL: &str = "Поквартальний прогноз (3 години)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastKind {
    Today,
    FiveDay,
    Hourly3h,
}

impl ForecastKind {
    pub const ALL: [ForecastKind; 3] = [ForecastKind::Today, ForecastKind::FiveDay, ForecastKind::Hourly3h];

    pub fn label(self) -> &'static str {
        match self {
            ForecastKind::Today => TODAY_LABEL,
            ForecastKind::FiveDay => FIVE_DAY_LABEL,
            ForecastKind::Hourly3h => HOURLY_LABEL,
        }
    }

    pub fn from_label(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == text)
    }
}

/// Текущая погода
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub city: String,
    pub country: String,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
    pub humidity: f64,
    pub wind_speed: f64,
}

/// Одна точка прогноза с шагом 3 часа
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub description: String,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub city: String,
    /// Смещение часового пояса города в секундах
    pub utc_offset_secs: i32,
    pub buckets: Vec<Bucket>,
}

impl Forecast {
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_to_kinds() {
        for kind in ForecastKind::ALL {
            assert_eq!(ForecastKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(ForecastKind::from_label("погода сьогодні"), None);
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        let forecast = Forecast { city: "Київ".into(), utc_offset_secs: 200_000, buckets: vec![] };
        assert_eq!(forecast.offset().local_minus_utc(), 0);
    }
}

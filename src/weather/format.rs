use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::{Bucket, Forecast, Snapshot};

/// Полный день: 8 интервалов по 3 часа
pub const FULL_DAY_BUCKETS: usize = 8;
/// Первый (возможно неполный) день + ещё пять полных
pub const MAX_DAYS: usize = 6;
/// Ближайшие 24 часа
pub const HOURLY_BUCKETS: usize = 8;

pub fn format_today(snapshot: &Snapshot) -> String {
    format!(
        "🌤 Погода сьогодні у місті {}, {}:\n\n\
        Температура: {}°C\n\
        Відчувається як: {}°C\n\
        Погода: {}\n\
        Вологість: {}%\n\
        Вітер: {} м/с",
        snapshot.city,
        snapshot.country,
        snapshot.temperature,
        snapshot.feels_like,
        snapshot.description,
        snapshot.humidity,
        snapshot.wind_speed
    )
}

/// Прогноз по дням.
///
/// Интервалы группируются по локальной дате города. Первый день берётся
/// всегда, даже неполный; следующие дни попадают в ответ только если в них
/// ровно 8 интервалов, всего не больше шести дней.
pub fn format_five_day(forecast: &Forecast) -> String {
    let offset = forecast.offset();

    let mut days: BTreeMap<NaiveDate, Vec<&Bucket>> = BTreeMap::new();
    for bucket in &forecast.buckets {
        let date = bucket.timestamp.with_timezone(&offset).date_naive();
        days.entry(date).or_default().push(bucket);
    }

    let mut groups = days.into_iter();
    let mut selected = Vec::with_capacity(MAX_DAYS);
    if let Some(first) = groups.next() {
        selected.push(first);
    }
    selected.extend(
        groups
            .filter(|(_, items)| items.len() == FULL_DAY_BUCKETS)
            .take(MAX_DAYS - 1),
    );

    let mut reply = format!("📅 Прогноз погоди для {}:\n\n", forecast.city);

    for (date, items) in selected {
        let min_temp = items.iter().map(|b| b.temperature).fold(f64::INFINITY, f64::min);
        let max_temp = items.iter().map(|b| b.temperature).fold(f64::NEG_INFINITY, f64::max);
        let avg_humidity = (items.iter().map(|b| b.humidity).sum::<f64>() / items.len() as f64).round();

        let descriptions: Vec<&str> = items.iter().map(|b| b.description.as_str()).collect();
        let description = modal_description(&descriptions).unwrap_or_default();

        let incomplete_note = if items.len() < FULL_DAY_BUCKETS { " (неповний день)" } else { "" };

        reply.push_str(&format!(
            "{}: {}, температура від {}°C до {}°C, вологість: {}%{}\n",
            date.format("%d.%m.%Y"),
            description,
            to_fixed_1(min_temp),
            to_fixed_1(max_temp),
            avg_humidity,
            incomplete_note
        ));
    }

    reply
}

/// Одна цифра после запятой.
///
/// `{:.1}` округляет точную половину к чётному, здесь же половина всегда
/// уходит от нуля (12.25 -> 12.3, -1.25 -> -1.3). Точная половина на первом
/// знаке бывает только у значений вида n + 0.25 и n + 0.75.
pub fn to_fixed_1(value: f64) -> String {
    let exact_tie = (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0;
    if exact_tie {
        let rounded = (value.abs() * 10.0).ceil().copysign(value) / 10.0;
        return format!("{:.1}", rounded);
    }
    format!("{:.1}", value)
}

/// Самое частое описание.
///
/// Стабильная сортировка по возрастанию частоты и последний элемент: при
/// равной частоте побеждает описание, встретившееся последним.
pub fn modal_description<'a>(descriptions: &[&'a str]) -> Option<&'a str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for description in descriptions {
        *counts.entry(*description).or_default() += 1;
    }

    let mut sorted = descriptions.to_vec();
    sorted.sort_by_key(|description| counts[description]);
    sorted.last().copied()
}

pub fn format_hourly(forecast: &Forecast) -> String {
    let offset = forecast.offset();
    let mut reply = format!("🕒 Поквартальний прогноз (3 години) для {}:\n\n", forecast.city);

    for bucket in forecast.buckets.iter().take(HOURLY_BUCKETS) {
        reply.push_str(&format!(
            "{}: {}, темп: {}°C\n",
            bucket.timestamp.with_timezone(&offset).format("%H:%M"),
            bucket.description,
            bucket.temperature
        ));
    }

    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn bucket(timestamp: DateTime<Utc>, temperature: f64, description: &str, humidity: f64) -> Bucket {
        Bucket { timestamp, temperature, description: description.to_string(), humidity }
    }

    /// `count` интервалов по 3 часа начиная с `start`
    fn series(start: DateTime<Utc>, count: usize) -> Vec<Bucket> {
        (0..count)
            .map(|i| bucket(start + Duration::hours(3 * i as i64), 10.0 + i as f64, "хмарно", 60.0))
            .collect()
    }

    fn forecast(buckets: Vec<Bucket>) -> Forecast {
        Forecast { city: "Київ".to_string(), utc_offset_secs: 0, buckets }
    }

    fn day_lines(reply: &str) -> Vec<&str> {
        reply.lines().skip(2).filter(|line| !line.is_empty()).collect()
    }

    #[test]
    fn five_day_takes_partial_first_day_and_five_full_days() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap();
        let reply = format_five_day(&forecast(series(start, 43)));

        let lines = day_lines(&reply);
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("01.05.2024"));
        assert!(lines[0].ends_with("(неповний день)"));
        assert!(lines[1..].iter().all(|line| !line.contains("неповний")));
        assert!(lines[5].starts_with("06.05.2024"));
    }

    #[test]
    fn five_day_skips_trailing_partial_day() {
        // 3 + 8*4 + 5 интервалов
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap();
        let reply = format_five_day(&forecast(series(start, 40)));

        let lines = day_lines(&reply);
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|line| !line.starts_with("06.05.2024")));
    }

    #[test]
    fn five_day_groups_by_city_local_date() {
        // 22:00 UTC при смещении +3 часа уже следующий день
        let buckets = vec![bucket(Utc.with_ymd_and_hms(2024, 5, 1, 22, 0, 0).unwrap(), 5.0, "ясно", 50.0)];
        let mut fc = forecast(buckets);
        fc.utc_offset_secs = 3 * 3600;

        assert!(format_five_day(&fc).contains("02.05.2024"));
    }

    #[test]
    fn five_day_reports_min_max_and_rounded_humidity() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap();
        let buckets = vec![
            bucket(start, 3.04, "дощ", 70.0),
            bucket(start + Duration::hours(3), -1.26, "дощ", 71.0),
            bucket(start + Duration::hours(6), 7.0, "ясно", 71.0),
            bucket(start + Duration::hours(6), 7.0, "ясно", 71.0),
        ];
        let reply = format_five_day(&forecast(buckets));

        assert!(reply.starts_with("📅 Прогноз погоди для Київ:\n\n"));
        assert!(reply.contains("01.05.2024: ясно, температура від -1.3°C до 7.0°C, вологість: 71% (неповний день)"));
    }

    #[test]
    fn five_day_rounds_quarter_temperatures_up() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap();
        let buckets = vec![
            bucket(start, 12.25, "ясно", 50.0),
            bucket(start + Duration::hours(3), 20.45, "ясно", 50.0),
        ];
        let reply = format_five_day(&forecast(buckets));

        assert!(reply.contains("01.05.2024: ясно, температура від 12.3°C до 20.4°C, вологість: 50% (неповний день)"));
    }

    #[test]
    fn to_fixed_1_rounds_exact_halves_away_from_zero() {
        assert_eq!(to_fixed_1(12.25), "12.3");
        assert_eq!(to_fixed_1(-1.25), "-1.3");
        assert_eq!(to_fixed_1(3.75), "3.8");
        assert_eq!(to_fixed_1(0.25), "0.3");
    }

    #[test]
    fn to_fixed_1_keeps_inexact_values_as_stored() {
        // 20.45 хранится как 20.4499..., поэтому вниз
        assert_eq!(to_fixed_1(20.45), "20.4");
        assert_eq!(to_fixed_1(-1.26), "-1.3");
        assert_eq!(to_fixed_1(7.0), "7.0");
        assert_eq!(to_fixed_1(12.2), "12.2");
    }

    #[test]
    fn five_day_with_no_buckets_has_header_only() {
        let reply = format_five_day(&forecast(vec![]));
        assert_eq!(reply, "📅 Прогноз погоди для Київ:\n\n");
    }

    #[test]
    fn modal_description_picks_most_frequent() {
        assert_eq!(modal_description(&["clear", "clear", "rain"]), Some("clear"));
        assert_eq!(modal_description(&["rain", "clear", "clear"]), Some("clear"));
    }

    #[test]
    fn modal_description_tie_goes_to_last_in_input_order() {
        assert_eq!(modal_description(&["rain", "clear"]), Some("clear"));
        assert_eq!(modal_description(&["rain", "clear", "clear", "rain"]), Some("rain"));
        assert_eq!(modal_description(&["snow", "rain", "clear", "rain", "clear"]), Some("clear"));
    }

    #[test]
    fn modal_description_of_nothing_is_none() {
        assert_eq!(modal_description(&[]), None);
    }

    #[test]
    fn hourly_takes_first_eight_in_input_order() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let reply = format_hourly(&forecast(series(start, 16)));

        let lines = day_lines(&reply);
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "00:00: хмарно, темп: 10°C");
        assert_eq!(lines[7], "21:00: хмарно, темп: 17°C");
    }

    #[test]
    fn today_lists_all_fields() {
        let snapshot = Snapshot {
            city: "Львів".to_string(),
            country: "UA".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            temperature: 12.5,
            feels_like: 11.0,
            description: "легкий дощ".to_string(),
            humidity: 81.0,
            wind_speed: 3.6,
        };

        assert_eq!(
            format_today(&snapshot),
            "🌤 Погода сьогодні у місті Львів, UA:\n\n\
            Температура: 12.5°C\n\
            Відчувається як: 11°C\n\
            Погода: легкий дощ\n\
            Вологість: 81%\n\
            Вітер: 3.6 м/с"
        );
    }
}

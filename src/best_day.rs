use chrono::NaiveDate;

use crate::models::{UserPreference, WeatherSample};

const TEMP_WEIGHT: f64 = 0.1;
const CLOUD_WEIGHT: f64 = 0.2;
const WIND_WEIGHT: f64 = 0.3;
const RAIN_WEIGHT: f64 = 0.4;
const SNOW_WEIGHT: f64 = 0.5;

/// Picks the calendar date with the lowest weighted score among the forecast
/// days whose every sample satisfies the user's preference limits. Returns
/// `None` when no day qualifies.
///
/// Samples are grouped by UTC date in first-seen order; a day is scored from
/// the per-field means of its samples (absent readings count as 0 toward the
/// mean). Ties keep the earlier date.
pub fn compute_best_day(samples: &[WeatherSample], prefs: &UserPreference) -> Option<NaiveDate> {
    let mut grouped: Vec<(NaiveDate, Vec<&WeatherSample>)> = Vec::new();
    for sample in samples {
        let date = sample.timestamp.date_naive();
        match grouped.iter_mut().find(|(d, _)| *d == date) {
            Some((_, group)) => group.push(sample),
            None => grouped.push((date, vec![sample])),
        }
    }

    let mut best_day = None;
    let mut smallest_score = f64::INFINITY;

    for (date, group) in &grouped {
        if !group.iter().all(|sample| passes_preferences(sample, prefs)) {
            continue;
        }

        let count = group.len() as f64;
        let mut total_temp = 0.0;
        let mut total_cloudiness = 0.0;
        let mut total_wind_speed = 0.0;
        let mut total_rain_volume = 0.0;
        let mut total_snow_volume = 0.0;

        for sample in group {
            total_temp += sample.temperature.unwrap_or(0.0);
            total_cloudiness += sample.cloudiness.unwrap_or(0.0);
            total_wind_speed += sample.wind_speed.unwrap_or(0.0);
            total_rain_volume += sample.rain_volume_3h.unwrap_or(0.0);
            total_snow_volume += sample.snow_volume_3h.unwrap_or(0.0);
        }

        let score = total_temp / count * TEMP_WEIGHT
            + total_cloudiness / count * CLOUD_WEIGHT
            + total_wind_speed / count * WIND_WEIGHT
            + total_rain_volume / count * RAIN_WEIGHT
            + total_snow_volume / count * SNOW_WEIGHT;

        if score < smallest_score {
            smallest_score = score;
            best_day = Some(*date);
        }
    }

    best_day
}

fn passes_preferences(sample: &WeatherSample, prefs: &UserPreference) -> bool {
    let temp_ok = temperature_check(sample.temperature, prefs.temp_min, prefs.temp_max);
    let cloud_ok = limit_check(sample.cloudiness, prefs.max_cloudiness);
    let wind_ok = limit_check(sample.wind_speed, prefs.max_wind_speed);
    let rain_ok = limit_check(sample.rain_volume_3h, prefs.max_rain_volume);
    let snow_ok = limit_check(sample.snow_volume_3h, prefs.max_snow_volume);

    temp_ok && cloud_ok && wind_ok && rain_ok && snow_ok
}

fn temperature_check(temp: Option<f64>, temp_min: Option<f64>, temp_max: Option<f64>) -> bool {
    match temp {
        Some(t) => {
            temp_min.map_or(true, |min| t >= min) && temp_max.map_or(true, |max| t <= max)
        }
        None => true,
    }
}

/// Upper-bound check for cloudiness, wind and precipitation. A reading of
/// exactly 0, or a configured limit of exactly 0, counts as "not set" and the
/// check passes — compatibility behavior that stored preferences rely on.
fn limit_check(value: Option<f64>, limit: Option<f64>) -> bool {
    match (value, limit) {
        (Some(value), Some(limit)) if value != 0.0 && limit != 0.0 => value <= limit,
        _ => true,
    }
}

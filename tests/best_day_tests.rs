use chrono::{NaiveDate, TimeZone, Utc};
use fairday_backend::best_day::compute_best_day;
use fairday_backend::models::{UserPreference, WeatherSample};

fn sample(
    day: u32,
    hour: u32,
    temperature: Option<f64>,
    cloudiness: Option<f64>,
    wind_speed: Option<f64>,
    rain_volume_3h: Option<f64>,
    snow_volume_3h: Option<f64>,
) -> WeatherSample {
    WeatherSample {
        timestamp: Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap(),
        temperature,
        cloudiness,
        wind_speed,
        rain_volume_3h,
        snow_volume_3h,
    }
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

#[test]
fn empty_samples_give_no_best_day() {
    let result = compute_best_day(&[], &UserPreference::default());

    assert_eq!(result, None);
}

#[test]
fn lowest_weighted_score_wins() {
    // Day 1 means: temp 20, cloud 10, wind 5 -> 20*0.1 + 10*0.2 + 5*0.3 = 5.5
    // Day 2 means: temp 15, cloud 50, wind 2 -> 1.5 + 10 + 0.6 = 12.1
    let samples = vec![
        sample(1, 9, Some(20.0), Some(10.0), Some(5.0), None, None),
        sample(2, 9, Some(15.0), Some(50.0), Some(2.0), None, None),
    ];

    let result = compute_best_day(&samples, &UserPreference::default());

    assert_eq!(result, Some(date(1)));
}

#[test]
fn later_day_wins_when_it_scores_lower() {
    let samples = vec![
        sample(1, 9, Some(15.0), Some(50.0), Some(2.0), None, None),
        sample(2, 9, Some(20.0), Some(10.0), Some(5.0), None, None),
    ];

    let result = compute_best_day(&samples, &UserPreference::default());

    assert_eq!(result, Some(date(2)));
}

#[test]
fn result_is_deterministic() {
    let samples = vec![
        sample(1, 9, Some(18.0), Some(30.0), Some(4.0), Some(1.0), None),
        sample(1, 12, Some(21.0), Some(20.0), Some(3.0), None, None),
        sample(2, 9, Some(17.0), Some(40.0), Some(6.0), None, Some(2.0)),
    ];
    let prefs = UserPreference {
        max_wind_speed: Some(10.0),
        ..Default::default()
    };

    let first = compute_best_day(&samples, &prefs);
    let second = compute_best_day(&samples, &prefs);

    assert_eq!(first, second);
    assert_eq!(first, Some(date(1)));
}

#[test]
fn one_failing_sample_invalidates_the_whole_day() {
    // Day 1 scores far better, but its midday sample breaks the wind limit.
    let samples = vec![
        sample(1, 9, Some(10.0), Some(5.0), Some(1.0), None, None),
        sample(1, 12, Some(10.0), Some(5.0), Some(20.0), None, None),
        sample(1, 15, Some(10.0), Some(5.0), Some(1.0), None, None),
        sample(2, 9, Some(30.0), Some(80.0), Some(4.0), None, None),
    ];
    let prefs = UserPreference {
        max_wind_speed: Some(5.0),
        ..Default::default()
    };

    let result = compute_best_day(&samples, &prefs);

    assert_eq!(result, Some(date(2)));
}

#[test]
fn zero_cloudiness_always_passes_the_cloud_check() {
    let samples = vec![sample(1, 9, Some(20.0), Some(0.0), Some(2.0), None, None)];
    let prefs = UserPreference {
        max_cloudiness: Some(0.0),
        ..Default::default()
    };

    let result = compute_best_day(&samples, &prefs);

    assert_eq!(result, Some(date(1)));
}

#[test]
fn zero_rain_limit_is_inert() {
    // A configured max_rain_volume of 0 disables the rain check entirely, so
    // even a soaked day qualifies.
    let samples = vec![sample(1, 9, Some(20.0), Some(10.0), Some(2.0), Some(8.0), None)];
    let prefs = UserPreference {
        temp_max: Some(25.0),
        max_rain_volume: Some(0.0),
        ..Default::default()
    };

    let result = compute_best_day(&samples, &prefs);

    assert_eq!(result, Some(date(1)));
}

#[test]
fn tie_goes_to_the_earlier_day() {
    let samples = vec![
        sample(2, 9, Some(12.0), Some(20.0), Some(3.0), None, None),
        sample(3, 9, Some(12.0), Some(20.0), Some(3.0), None, None),
    ];

    let result = compute_best_day(&samples, &UserPreference::default());

    assert_eq!(result, Some(date(2)));
}

#[test]
fn no_valid_day_gives_none() {
    let samples = vec![
        sample(1, 9, Some(30.0), Some(10.0), Some(2.0), None, None),
        sample(2, 9, Some(35.0), Some(10.0), Some(2.0), None, None),
    ];
    let prefs = UserPreference {
        temp_max: Some(25.0),
        ..Default::default()
    };

    let result = compute_best_day(&samples, &prefs);

    assert_eq!(result, None);
}

#[test]
fn absent_readings_count_as_zero_in_the_mean() {
    // Day 1: temps 10 and unknown -> mean 5, score 0.5.
    // Day 2: temps 6 and 6 -> mean 6, score 0.6.
    let samples = vec![
        sample(1, 9, Some(10.0), None, None, None, None),
        sample(1, 12, None, None, None, None, None),
        sample(2, 9, Some(6.0), None, None, None, None),
        sample(2, 12, Some(6.0), None, None, None, None),
    ];

    let result = compute_best_day(&samples, &UserPreference::default());

    assert_eq!(result, Some(date(1)));
}

#[test]
fn temperature_bounds_filter_days() {
    let samples = vec![
        sample(1, 9, Some(5.0), None, None, None, None),
        sample(2, 9, Some(15.0), None, None, None, None),
        sample(3, 9, Some(28.0), None, None, None, None),
    ];
    let prefs = UserPreference {
        temp_min: Some(10.0),
        temp_max: Some(25.0),
        ..Default::default()
    };

    // Day 1 is too cold and day 3 too hot; only day 2 qualifies.
    let result = compute_best_day(&samples, &prefs);

    assert_eq!(result, Some(date(2)));
}

#[test]
fn unknown_temperature_passes_the_bounds_check() {
    let samples = vec![sample(1, 9, None, Some(10.0), Some(2.0), None, None)];
    let prefs = UserPreference {
        temp_min: Some(10.0),
        temp_max: Some(25.0),
        ..Default::default()
    };

    let result = compute_best_day(&samples, &prefs);

    assert_eq!(result, Some(date(1)));
}

#[test]
fn snow_limit_applies_to_snow_volume() {
    let samples = vec![
        sample(1, 9, Some(2.0), None, None, None, Some(6.0)),
        sample(2, 9, Some(2.0), None, None, None, Some(1.0)),
    ];
    let prefs = UserPreference {
        max_snow_volume: Some(3.0),
        ..Default::default()
    };

    let result = compute_best_day(&samples, &prefs);

    assert_eq!(result, Some(date(2)));
}

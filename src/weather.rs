use std::time::Duration;

use chrono::DateTime;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::WeatherSample;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Error)]
pub enum OwmError {
    /// Non-success response from the provider, carrying the upstream status
    /// code and error message.
    #[error("weather provider returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("weather provider request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for the OpenWeatherMap-style forecast API. Constructed once at
/// startup with the API key and handed to the request handlers.
#[derive(Clone)]
pub struct OwmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OwmClient {
    pub fn new(api_key: impl Into<String>) -> Result<OwmClient, OwmError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Same as [`OwmClient::new`] but against a caller-supplied endpoint,
    /// used by tests to point the client at a local mock server.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<OwmClient, OwmError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Current conditions for a place, passed through as the provider
    /// reported them.
    pub async fn current_weather(&self, place: &str) -> Result<CurrentWeather, OwmError> {
        let url = format!("{}/weather", self.base_url);
        let resp = self
            .client
            .get(url)
            .query(&[("q", place), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        Ok(resp.json().await?)
    }

    /// Five days of forecast readings at 3-hour granularity, in the order
    /// the provider returned them.
    pub async fn five_day_forecast(&self, place: &str) -> Result<Vec<WeatherSample>, OwmError> {
        let url = format!("{}/forecast", self.base_url);
        let resp = self
            .client
            .get(url)
            .query(&[("q", place), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        let forecast: ForecastResponse = resp.json().await?;

        let samples = forecast
            .list
            .into_iter()
            .filter_map(|entry| {
                let timestamp = DateTime::from_timestamp(entry.dt, 0)?;
                Some(WeatherSample {
                    timestamp,
                    temperature: entry.main.and_then(|m| m.temp),
                    cloudiness: entry.clouds.and_then(|c| c.all),
                    wind_speed: entry.wind.and_then(|w| w.speed),
                    rain_volume_3h: entry.rain.and_then(|r| r.three_hour),
                    snow_volume_3h: entry.snow.and_then(|s| s.three_hour),
                })
            })
            .collect();

        Ok(samples)
    }
}

async fn api_error(resp: reqwest::Response) -> OwmError {
    let status = resp.status().as_u16();
    let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("weather provider error {status}"));

    OwmError::Api { status, message }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

#[derive(Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: Option<MainReadings>,
    clouds: Option<Clouds>,
    wind: Option<Wind>,
    rain: Option<Volume3h>,
    snow: Option<Volume3h>,
}

#[derive(Deserialize)]
struct MainReadings {
    temp: Option<f64>,
}

/// Current-conditions payload, kept close to the provider's wire shape so
/// the weather endpoint can relay it to API clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub dt: i64,
    #[serde(default)]
    pub weather: Vec<ConditionSummary>,
    pub main: CurrentMain,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clouds: Option<Clouds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain: Option<Volume3h>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snow: Option<Volume3h>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentMain {
    pub temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Clouds {
    pub all: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Wind {
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deg: Option<f64>,
}

/// Rain or snow volume over the last/next 3 hours; the provider omits the
/// object entirely when there is none.
#[derive(Debug, Serialize, Deserialize)]
pub struct Volume3h {
    #[serde(rename = "3h", default, skip_serializing_if = "Option::is_none")]
    pub three_hour: Option<f64>,
}

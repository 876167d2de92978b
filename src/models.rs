use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateUserData {
    pub user_name: String,
    pub password: String,
    pub confirm_password: String,
}

/// Stored preference record. Also serves as the PUT payload and as the
/// thresholds consumed by the best-day engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreference {
    pub location: Option<String>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub max_cloudiness: Option<f64>,
    pub max_wind_speed: Option<f64>,
    pub max_rain_volume: Option<f64>,
    pub max_snow_volume: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub id: Uuid,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub user_name: String,
    pub preference: UserPreference,
}

/// One 3-hour forecast reading. Absent fields mean the provider did not
/// report a value for this sample.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: Option<f64>,
    pub cloudiness: Option<f64>,
    pub wind_speed: Option<f64>,
    pub rain_volume_3h: Option<f64>,
    pub snow_volume_3h: Option<f64>,
}

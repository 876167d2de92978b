use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;
use uuid::Uuid;

pub mod best_day;
pub mod database;
pub mod error;
pub mod models;
pub mod weather;

use best_day::compute_best_day;
use database::*;
use error::ApiError;
use models::*;
use weather::{CurrentWeather, OwmClient};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub weather: OwmClient,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{user_id}", get(get_user_detail))
        .route("/users/{user_id}/preference", put(put_user_preference))
        .route("/users/{user_id}/weather", get(get_user_weather))
        .route("/users/{user_id}/forecast-best-day", get(get_user_forecast_best_day))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn create_user(
    State(state): State<AppState>,
    Json(data): Json<CreateUserData>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user_name = data.user_name.trim().to_lowercase();
    let name_length = user_name.chars().count();
    if !(3..=15).contains(&name_length) {
        return Err(ApiError::unprocessable(
            "User name must be between 3 and 15 characters",
        ));
    }

    if user_name_exists(&state.db, &user_name).await? {
        return Err(ApiError::unprocessable("User name already exists"));
    }

    if data.password != data.confirm_password {
        return Err(ApiError::unprocessable("Confirm Password doesn't match"));
    }

    let hashed_password = bcrypt::hash(&data.password, bcrypt::DEFAULT_COST)?;
    let user_id = insert_user(&state.db, &user_name, &hashed_password).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created", "id": user_id })),
    ))
}

async fn get_user_detail(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<UserData>, ApiError> {
    let user = get_user(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User is not found"))?;

    Ok(Json(user))
}

async fn put_user_preference(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(mut data): Json<UserPreference>,
) -> Result<Json<Value>, ApiError> {
    if get_user(&state.db, user_id).await?.is_none() {
        return Err(ApiError::not_found("User is not found"));
    }

    data.location = data.location.map(|l| l.trim().to_string());
    if data.location.as_deref() == Some("") {
        return Err(ApiError::unprocessable("Invalid location value"));
    }

    if let (Some(min), Some(max)) = (data.temp_min, data.temp_max) {
        if min > max {
            return Err(ApiError::unprocessable("Invalid temperature min value"));
        }
    }

    if data.max_cloudiness.is_some_and(|v| v < 0.0) {
        return Err(ApiError::unprocessable("Invalid max cloudiness value"));
    }

    if data.max_wind_speed.is_some_and(|v| v < 0.0) {
        return Err(ApiError::unprocessable("Invalid max wind speed value"));
    }

    if data.max_rain_volume.is_some_and(|v| v < 0.0) {
        return Err(ApiError::unprocessable("Invalid max rain volume value"));
    }

    if data.max_snow_volume.is_some_and(|v| v < 0.0) {
        return Err(ApiError::unprocessable("Invalid max snow volume value"));
    }

    upsert_user_preference(&state.db, user_id, &data).await?;

    Ok(Json(json!({ "message": "User preference updated" })))
}

async fn get_user_weather(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<CurrentWeather>, ApiError> {
    let preference = load_preference(&state, user_id).await?;
    let location = require_location(&preference)?;

    let weather = state.weather.current_weather(location).await?;

    Ok(Json(weather))
}

async fn get_user_forecast_best_day(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let preference = load_preference(&state, user_id).await?;
    let location = require_location(&preference)?;

    let samples = state.weather.five_day_forecast(location).await?;

    match compute_best_day(&samples, &preference) {
        Some(best_day) => Ok(Json(json!({ "best_day": best_day.to_string() }))),
        None => Err(ApiError::not_found("No best day")),
    }
}

/// Common prelude of the weather endpoints: the user must exist and its
/// preference row must be present. A missing row is a consistency error,
/// since signup always creates one.
async fn load_preference(state: &AppState, user_id: Uuid) -> Result<UserPreference, ApiError> {
    if get_user(&state.db, user_id).await?.is_none() {
        return Err(ApiError::not_found("User is not found"));
    }

    match get_user_preference(&state.db, user_id).await? {
        Some(preference) => Ok(preference),
        None => {
            error!("user {user_id} has no preference row");
            Err(ApiError::internal())
        }
    }
}

fn require_location(preference: &UserPreference) -> Result<&str, ApiError> {
    match preference.location.as_deref() {
        Some(location) if !location.is_empty() => Ok(location),
        _ => Err(ApiError::unprocessable("Location is not set")),
    }
}

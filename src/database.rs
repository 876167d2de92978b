use anyhow::Result;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::{UserData, UserPreference};

pub async fn setup_database(pool: SqlitePool) -> Result<SqlitePool> {
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

pub async fn user_name_exists(pool: &SqlitePool, user_name: &str) -> Result<bool> {
    let row = sqlx::query("SELECT id FROM users WHERE user_name = ?1")
        .bind(user_name)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Inserts a user together with its (empty) preference row and returns the
/// new user id.
pub async fn insert_user(pool: &SqlitePool, user_name: &str, password_hash: &str) -> Result<Uuid> {
    let user_id = Uuid::new_v4();

    sqlx::query("INSERT INTO users (id, user_name, password) VALUES (?1, ?2, ?3)")
        .bind(user_id.to_string())
        .bind(user_name)
        .bind(password_hash)
        .execute(pool)
        .await?;

    sqlx::query("INSERT INTO user_preferences (id, user_id) VALUES (?1, ?2)")
        .bind(Uuid::new_v4().to_string())
        .bind(user_id.to_string())
        .execute(pool)
        .await?;

    Ok(user_id)
}

pub async fn get_user(pool: &SqlitePool, user_id: Uuid) -> Result<Option<UserData>> {
    let row = sqlx::query("SELECT id, user_name, created_at, updated_at FROM users WHERE id = ?1")
        .bind(user_id.to_string())
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let id: String = row.get("id");
    let preference = get_user_preference(pool, user_id).await?.unwrap_or_default();

    Ok(Some(UserData {
        id: id.parse()?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        user_name: row.get("user_name"),
        preference,
    }))
}

pub async fn get_user_preference(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Option<UserPreference>> {
    let row = sqlx::query(
        "SELECT location, temp_min, temp_max, max_cloudiness, max_wind_speed,
                max_rain_volume, max_snow_volume
         FROM user_preferences
         WHERE user_id = ?1",
    )
    .bind(user_id.to_string())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| UserPreference {
        location: row.get("location"),
        temp_min: row.get("temp_min"),
        temp_max: row.get("temp_max"),
        max_cloudiness: row.get("max_cloudiness"),
        max_wind_speed: row.get("max_wind_speed"),
        max_rain_volume: row.get("max_rain_volume"),
        max_snow_volume: row.get("max_snow_volume"),
    }))
}

/// Updates the user's preference row in place, or creates one for users
/// that predate the row being written at signup.
pub async fn upsert_user_preference(
    pool: &SqlitePool,
    user_id: Uuid,
    preference: &UserPreference,
) -> Result<()> {
    let existing = sqlx::query("SELECT id FROM user_preferences WHERE user_id = ?1")
        .bind(user_id.to_string())
        .fetch_optional(pool)
        .await?;

    if existing.is_some() {
        sqlx::query(
            "UPDATE user_preferences
             SET location = ?1, temp_min = ?2, temp_max = ?3, max_cloudiness = ?4,
                 max_wind_speed = ?5, max_rain_volume = ?6, max_snow_volume = ?7,
                 updated_at = CURRENT_TIMESTAMP
             WHERE user_id = ?8",
        )
        .bind(&preference.location)
        .bind(preference.temp_min)
        .bind(preference.temp_max)
        .bind(preference.max_cloudiness)
        .bind(preference.max_wind_speed)
        .bind(preference.max_rain_volume)
        .bind(preference.max_snow_volume)
        .bind(user_id.to_string())
        .execute(pool)
        .await?;
    } else {
        sqlx::query(
            "INSERT INTO user_preferences
                 (id, user_id, location, temp_min, temp_max, max_cloudiness,
                  max_wind_speed, max_rain_volume, max_snow_volume)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id.to_string())
        .bind(&preference.location)
        .bind(preference.temp_min)
        .bind(preference.temp_max)
        .bind(preference.max_cloudiness)
        .bind(preference.max_wind_speed)
        .bind(preference.max_rain_volume)
        .bind(preference.max_snow_volume)
        .execute(pool)
        .await?;
    }

    Ok(())
}

use anyhow::Context;
use fairday_backend::{create_app, database::setup_database, weather::OwmClient, AppState};
use sqlx::SqlitePool;
use std::env;

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    dotenvy::dotenv().ok();

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:fairday.db?mode=rwc".to_string());
    let pool = SqlitePool::connect(&database_url)
        .await
        .context("failed to open database")?;
    let db = setup_database(pool).await?;

    // The provider credential is read once here and moved into the client.
    let api_key = secrets
        .get("OWM_API_KEY")
        .or_else(|| env::var("OWM_API_KEY").ok())
        .context("OWM_API_KEY is not configured")?;
    let weather = OwmClient::new(api_key).context("failed to build weather client")?;

    let app_state = AppState { db, weather };
    let app = create_app(app_state);

    Ok(shuttle_axum::AxumService(app))
}

use std::env;

use cleanlink::app;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "cleanlink=info".into()))
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new("cleanlink".into(), std::io::stdout))
        .init();

    let database_url =
        env::var("DATABASE_URL").expect("Env variable `DATABASE_URL` should be set");

    let db_pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let port = env::var("APP_PORT").unwrap_or_else(|_| "8090".into());
    let listener = TcpListener::bind(format!("0.0.0.0:{port}")).await.unwrap();
    info!("Server starting at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app(db_pool).into_make_service())
        .await
        .unwrap();
}

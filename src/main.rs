use std::{env, net::SocketAddr, sync::Arc};

use image_gen_proxy::{app::env::Envy, AppState};

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt::init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    // properties
    let port = envy.port.to_owned().unwrap_or(3000);
    tracing::info!(
        "using {} (poll every {:?}, {} attempts)",
        envy.replicate_api_url(),
        envy.poll_interval(),
        envy.max_poll_attempts()
    );

    let state = AppState {
        envy: Arc::new(envy),
    };

    // app
    let app = image_gen_proxy::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("server failed");
}

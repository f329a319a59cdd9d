use std::net::SocketAddr;
use axum::body::Body;
use axum::Router;
use lambda_http::{run, Error};
use tracing::info;
use bookshelf::catalog::router::build_router;
use bookshelf::core::controller::AppState;
use bookshelf::core::domain::{Configuration, RuntimeMode};
use bookshelf::utils::logging::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    let config = Configuration::from_env()?;
    setup_tracing(config.tracing_level()?);

    let runtime = config.runtime;
    let bind_addr = config.bind_addr.clone();
    info!(branch_id = %config.branch_id, store = ?config.store, runtime = ?runtime, "starting catalog");
    let state = AppState::from_config(config).await?;

    match runtime {
        RuntimeMode::Server => {
            let addr: SocketAddr = bind_addr.parse()?;
            let app = Router::<(), Body>::new().nest("/api", build_router(state));
            info!(%addr, "listening");
            axum::Server::bind(&addr).serve(app.into_make_service()).await?;
            Ok(())
        }
        RuntimeMode::Lambda => {
            let app = Router::new().nest("/api", build_router(state));
            run(app).await
        }
    }
}

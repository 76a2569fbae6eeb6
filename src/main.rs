use axum_server::Server;
use irriplan::api;
use irriplan::config::{run_options::get_args, Config};
use irriplan::session::AppState;
use irriplan::time::SystemClock;
use irriplan::utils::start_log;
use std::{error::Error, sync::Arc};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    start_log();

    info!("Starting irriplan...");

    let config = Config::load(get_args());
    let state = AppState::new(&config, Arc::new(SystemClock));

    let app = api::router(state);

    info!("Starting HTTP server on http://{}", config.web_server.address);
    Server::bind(config.web_server.address.parse()?).serve(app.into_make_service()).await?;
    Ok(())
}

use dotenv::dotenv;
use movie_api::app::app::App;
use movie_api::util::logger::Logger;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let dotenv_result = dotenv();

    let _logger = match Logger::new() {
        Ok(logger) => Some(logger),
        Err(e) => {
            eprintln!("Failed to initialise file logging: {e}");
            tracing_subscriber::fmt().with_target(true).init();
            None
        }
    };

    info!("🚀 Starting Movie API");
    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = app.start().await {
        error!("Server stopped: {e}");
        std::process::exit(1);
    }
}

use bson::doc;
use mongodb::{options::{ClientOptions, Credential}, Client, Database};
use tracing::{error, info};

use crate::config::mongo_conf::MongoConfig;

/// Opens the pooled client shared by every repository.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse(&config.uri).await?;
    client_options.app_name = Some("MovieApi".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));
    if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }
    let client = Client::with_options(client_options)?;
    let db = client.database(&config.database);

    // The driver connects lazily; a failed ping is logged and the server
    // still starts, requests then fail individually.
    match db.run_command(doc! { "ping": 1 }, None).await {
        Ok(_) => info!(database = %config.database, "Connected to MongoDB"),
        Err(e) => error!("MongoDB connection error: {}", e),
    }
    Ok(db)
}

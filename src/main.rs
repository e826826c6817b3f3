use dotenvy::dotenv;
use pantry_buddy::{
    api::{AppState, app_router},
    config,
    core::auth::StaticTokenAuthenticator,
    errors::Result,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load users and build the authenticator
    let user_config = config::users::load_default_config()
        .inspect_err(|e| error!("Failed to load user configuration: {}", e))?;
    let authenticator = StaticTokenAuthenticator::from_users(&user_config.users);
    if authenticator.is_empty() {
        warn!("No users configured; every pantry request will be unauthorized.");
    } else {
        info!("Loaded {} user session(s).", authenticator.len());
    }

    // 4. Open the database and make sure the schema exists
    let database_url = config::database::get_database_url();
    config::database::ensure_sqlite_parent_dir(&database_url)?;
    let db = config::database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Serve until Ctrl+C
    let addr = config::server::get_bind_address()?;
    let db = Arc::new(db);
    let state = AppState::new(Arc::clone(&db), Arc::new(authenticator));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", addr, e))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 6. Tear down the connection pool explicitly once the router has let go of it
    match Arc::try_unwrap(db) {
        Ok(db) => db.close().await?,
        Err(_) => warn!("Database handle still shared at shutdown; leaving pool to drop."),
    }
    info!("Shut down cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received.");
}

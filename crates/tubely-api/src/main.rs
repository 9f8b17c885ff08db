use tubely_core::Config;

// Use mimalloc as the global allocator for lower fragmentation under
// large streamed uploads.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration (also reads .env, so it comes before telemetry)
    let config = Config::from_env()?;
    tubely_api::telemetry::init_telemetry();

    // Initialize the application (database, storage, routes)
    let (_state, router) = tubely_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    tubely_api::setup::server::start_server(&config, router).await?;

    Ok(())
}

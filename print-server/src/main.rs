use print_server::{Server, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env, configuration, logging
    let config = setup_environment();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Kitchen print server starting..."
    );

    // 2. Print service and shared state
    let server = Server::new(config)?;

    // 3. Serve until shutdown
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

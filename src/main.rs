use redlite::server::RedisServer;
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .try_init()
        .map_err(|e| debug!("Failed to initialize global tracing: {}", e));

    let server = RedisServer::new(std::env::args())?;

    if let Err(e) = server.run().await {
        tracing::error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}

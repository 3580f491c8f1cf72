use servedir::{config::Config, error::Result, server::Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // stdout is reserved for the startup line
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_process().unwrap_or_else(|err| err.exit());
    tracing::debug!(?config, "resolved configuration");

    if let Err(err) = run(config).await {
        tracing::error!(%err, "servedir failed");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<()> {
    let server = Server::bind(&config).await?;
    println!("Starting HTTP server on {}", server.url());
    server.run().await
}

use crate::{
    address::{bind_addrs, listen_addr_url},
    config::Config,
    error::{Result, ServerError},
    handler::router,
};
use axum::Router;
use std::{future::Future, io, net::SocketAddr};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// A bound listener paired with the file-serving router.
pub struct Server {
    listener: TcpListener,
    app: Router,
}

impl Server {
    pub async fn bind(config: &Config) -> Result<Self> {
        let listener = bind_first(bind_addrs(&config.address))
            .await
            .map_err(|source| ServerError::Bind {
                address: config.address.clone(),
                source,
            })?;

        info!(
            address = %config.address,
            local_addr = ?listener.local_addr().ok(),
            static_dir = %config.static_dir.display(),
            "listener bound"
        );

        Ok(Self {
            listener,
            app: router(&config.static_dir),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// URL to print for humans. Reflects the OS-assigned port when port 0 was requested.
    pub fn url(&self) -> String {
        listen_addr_url(self.local_addr())
    }

    /// Serves until Ctrl+C.
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    pub async fn run_until<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(signal)
            .await
            .map_err(ServerError::Serve)
    }
}

async fn bind_first(candidates: Vec<String>) -> io::Result<TcpListener> {
    let mut last_err = None;
    for candidate in candidates {
        match TcpListener::bind(&candidate).await {
            Ok(listener) => return Ok(listener),
            Err(err) => {
                debug!(%err, candidate = %candidate, "bind attempt failed");
                last_err = Some(err);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no address to bind")))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "unable to listen for Ctrl+C, serving until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

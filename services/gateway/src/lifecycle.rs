//! Server lifecycle: bind, serve, drain on signal, stop

use std::{future::Future, net::SocketAddr, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{debug, error, info, warn};

/// Phases the server moves through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    Listening,
    Draining,
    Stopped,
}

/// HTTP server with a bounded graceful shutdown
pub struct Server {
    listener: TcpListener,
    app: Router,
    grace: Duration,
}

impl Server {
    /// Bind the listener; nothing is accepted until [`Server::run`]
    pub async fn bind(addr: SocketAddr, app: Router, grace: Duration) -> Result<Self> {
        info!(phase = ?Phase::Starting, "Binding listener on {}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        Ok(Self {
            listener,
            app,
            grace,
        })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` resolves, then drain
    ///
    /// In-flight requests get up to the grace period to finish; after that
    /// the serve task is aborted. Drain problems are logged, not returned.
    /// An error is returned only if serving fails before shutdown.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        let Server {
            listener,
            app,
            grace,
        } = self;
        let (drain_tx, drain_rx) = oneshot::channel::<()>();

        let mut serve = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = drain_rx.await;
                })
                .await
        });

        info!(phase = ?Phase::Listening, "Gateway listening on {}", addr);

        tokio::select! {
            result = &mut serve => {
                result
                    .context("Server task failed")?
                    .context("Server stopped unexpectedly")?;
                warn!("Server stopped before a shutdown was requested");
                return Ok(());
            }
            _ = shutdown => {}
        }

        info!(phase = ?Phase::Draining, "Shutdown requested, draining for up to {:?}", grace);
        if drain_tx.send(()).is_err() {
            debug!("Server task already finished");
        }

        match tokio::time::timeout(grace, &mut serve).await {
            Ok(Ok(Ok(()))) => info!(phase = ?Phase::Stopped, "Gateway stopped"),
            Ok(Ok(Err(e))) => error!(phase = ?Phase::Stopped, "Error while draining: {}", e),
            Ok(Err(e)) => error!(phase = ?Phase::Stopped, "Server task failed while draining: {}", e),
            Err(_) => {
                serve.abort();
                error!(
                    phase = ?Phase::Stopped,
                    "Grace period of {:?} elapsed, closing remaining connections", grace
                );
            }
        }

        Ok(())
    }
}

/// Wait for SIGINT or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => debug!("Received SIGINT"),
        _ = terminate => debug!("Received SIGTERM"),
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use axum::routing::get;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    "late"
                }),
            )
    }

    async fn bind_local(grace: Duration) -> Server {
        Server::bind("127.0.0.1:0".parse().unwrap(), app(), grace)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let server = bind_local(Duration::from_secs(5)).await;
        let addr = server.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(server.run(async move {
            let _ = stop_rx.await;
        }));

        let body = reqwest::get(format!("http://{addr}/ping"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "pong");

        stop_tx.send(()).unwrap();
        handle.await.unwrap().unwrap();

        assert!(tokio::net::TcpStream::connect(addr).await.is_err());
    }

    #[tokio::test]
    async fn test_grace_period_bounds_drain() {
        let server = bind_local(Duration::from_millis(200)).await;
        let addr = server.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(server.run(async move {
            let _ = stop_rx.await;
        }));

        let slow = tokio::spawn(reqwest::get(format!("http://{addr}/slow")));
        tokio::time::sleep(Duration::from_millis(100)).await;

        let started = std::time::Instant::now();
        stop_tx.send(()).unwrap();
        handle.await.unwrap().unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        slow.abort();
    }

    #[tokio::test]
    async fn test_bind_conflict_is_an_error() {
        let server = bind_local(Duration::from_secs(1)).await;
        let addr = server.local_addr().unwrap();

        assert!(Server::bind(addr, app(), Duration::from_secs(1)).await.is_err());
    }
}

//! Serving with a bounded graceful shutdown

use std::{io, sync::Arc, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, sync::Notify};
use tracing::{info, warn};

/// How the server stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every connection closed within the grace period
    Graceful,
    /// Connections were still open when the grace period ran out
    TimedOut,
}

/// Serve `app` until `shutdown` resolves, then allow `grace` for open
/// connections to finish
///
/// Connections still open after `grace` are dropped with the server.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    grace: Duration,
) -> io::Result<ShutdownOutcome>
where
    F: Future<Output = ()> + Send + 'static,
{
    let signalled = Arc::new(Notify::new());
    let notify = Arc::clone(&signalled);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            notify.notify_one();
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result.map(|()| ShutdownOutcome::Graceful),
        () = signalled.notified() => {},
    }

    info!("Waiting up to {:?} for connections to close...", grace);
    if let Ok(result) = tokio::time::timeout(grace, &mut server).await {
        result?;
        Ok(ShutdownOutcome::Graceful)
    } else {
        warn!(?grace, "Connections still open after grace period, closing them");
        Ok(ShutdownOutcome::TimedOut)
    }
}

//! Running-service handle.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// How long `stop` waits for open connections to finish before aborting.
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Lifecycle token for one running listener.
///
/// Holds the stop signal and the serve task. Dropping the handle also stops
/// the service, since the stop sender closes with it.
#[derive(Debug)]
pub struct ServiceHandle {
    name: &'static str,
    local_addr: SocketAddr,
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<std::io::Result<()>>>,
}

impl ServiceHandle {
    /// Serve `router` on an already-bound listener in a background task.
    pub fn spawn(name: &'static str, listener: TcpListener, router: Router) -> std::io::Result<Self> {
        let local_addr = listener.local_addr()?;
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = stop_rx.await;
                })
                .await
        });

        tracing::debug!(service = name, address = %local_addr, "Service task spawned");

        Ok(Self {
            name,
            local_addr,
            stop_tx: Some(stop_tx),
            task: Some(task),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.stop_tx.is_some()
    }

    /// Stop the service and wait for its accept loop to exit.
    ///
    /// Calling this on a stopped handle is a no-op.
    pub async fn stop(&mut self) {
        self.stop_within(DRAIN_TIMEOUT).await;
    }

    /// Stop the service, giving open connections `drain` to finish.
    ///
    /// The listener is released as soon as the stop signal is observed; a
    /// serve task still draining after `drain` is aborted.
    pub async fn stop_within(&mut self, drain: Duration) {
        let Some(stop_tx) = self.stop_tx.take() else {
            return;
        };
        let _ = stop_tx.send(());

        if let Some(mut task) = self.task.take() {
            match tokio::time::timeout(drain, &mut task).await {
                Ok(Ok(Ok(()))) => {}
                Ok(Ok(Err(e))) => tracing::warn!(service = self.name, error = %e, "Service exited with error"),
                Ok(Err(e)) => tracing::warn!(service = self.name, error = %e, "Service task failed"),
                Err(_) => {
                    tracing::warn!(
                        service = self.name,
                        drain_ms = drain.as_millis() as u64,
                        "Connections still open after drain timeout, aborting"
                    );
                    task.abort();
                    let _ = task.await;
                }
            }
        }

        tracing::info!(service = self.name, address = %self.local_addr, "Service stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn test_stop_releases_port_and_is_idempotent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let router = Router::new().route("/", get(|| async { "ok" }));
        let mut handle = ServiceHandle::spawn("test", listener, router).unwrap();
        let addr = handle.local_addr();
        assert!(handle.is_running());

        handle.stop().await;
        assert!(!handle.is_running());
        handle.stop().await;

        // Port is free again once stop returns.
        let rebound = TcpListener::bind(addr).await;
        assert!(rebound.is_ok(), "port should be released after stop");
    }

    #[tokio::test]
    async fn test_stop_completes_with_stalled_client() {
        use tokio::io::AsyncWriteExt;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let router = Router::new().route("/", get(|| async { "ok" }));
        let mut handle = ServiceHandle::spawn("test", listener, router).unwrap();
        let addr = handle.local_addr();

        // Half-sent request head that never completes.
        let mut client = tokio::net::TcpStream::connect(addr).await.unwrap();
        client.write_all(b"GET / HTTP/1.1\r\nHost: x\r\n").await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        tokio::time::timeout(
            Duration::from_secs(5),
            handle.stop_within(Duration::from_millis(200)),
        )
        .await
        .expect("stop must not wait on a stalled connection");
        assert!(!handle.is_running());

        let rebound = TcpListener::bind(addr).await;
        assert!(rebound.is_ok(), "port should be released after stop");
        drop(client);
    }
}

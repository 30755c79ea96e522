//! Bare TCP server with a canned behaviour, for transport-level failures
//! the axum mock cannot produce.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub struct ScriptedServer {
    addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
    handle: tokio::task::JoinHandle<()>,
}

impl ScriptedServer {
    /// Accepts connections and never answers, so every request times out.
    pub async fn silent() -> Self {
        Self::start(None).await
    }

    /// Reads the request, writes `reply` verbatim, then closes.
    pub async fn replying(reply: &'static [u8]) -> Self {
        Self::start(Some(reply)).await
    }

    async fn start(reply: Option<&'static [u8]>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind scripted server");
        let addr = listener.local_addr().unwrap();
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = accepted.clone();

        let handle = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                match reply {
                    Some(bytes) => {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        let _ = socket.write_all(bytes).await;
                        let _ = socket.shutdown().await;
                    }
                    None => held.push(socket),
                }
            }
        });

        Self {
            addr,
            accepted,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Connections accepted so far; one per request attempt.
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }
}

impl Drop for ScriptedServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

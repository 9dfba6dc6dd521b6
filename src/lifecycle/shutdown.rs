//! Stop signal shared by the server and the OS signal task.

use tokio::sync::broadcast;

/// One-shot stop signal for [`HttpServer::run`](crate::http::HttpServer::run).
///
/// `main` hands one clone to the SIGINT/SIGTERM task and a receiver to the
/// server; tests keep a clone and call [`trigger`](Self::trigger) directly.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to pass to the server's graceful-shutdown future.
    ///
    /// Only receivers that exist when `trigger` runs are woken.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every server holding a receiver to stop accepting and drain.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Receivers still alive, i.e. servers that have not finished.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

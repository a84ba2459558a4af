//! Graceful shutdown signalling.
//!
//! A single broadcast channel fans the stop signal out to every
//! long-running task. The server's accept loop holds a receiver and
//! drains in-flight requests once the signal lands.

use tokio::sync::broadcast;

/// Hands out shutdown receivers and fires the stop signal.
pub struct Shutdown {
    notify: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(1);
        Self { notify }
    }

    /// A receiver that resolves once [`trigger`](Self::trigger) runs.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.notify.subscribe()
    }

    /// Signal every subscriber to stop. A no-op when nobody listens.
    pub fn trigger(&self) {
        let _ = self.notify.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_wakes_a_subscriber() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        shutdown.trigger();
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn late_subscribers_wait_for_the_next_signal() {
        let shutdown = Shutdown::new();
        // Fired into the void; nobody was subscribed yet.
        shutdown.trigger();

        let mut rx = shutdown.subscribe();
        shutdown.trigger();
        assert!(rx.recv().await.is_ok());
    }
}

// Signal handling module
//
// Supported signals:
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGTERM: Graceful shutdown
//
// Interrupt-triggered shutdown is the normal exit path, not a failure.

use crate::logger;
use std::sync::Arc;
use tokio::sync::Notify;

/// Cooperative shutdown handle shared between the signal task, the accept
/// loop, and tests.
#[derive(Clone, Default)]
pub struct Shutdown {
    notify: Arc<Notify>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. A permit is stored if the accept loop is not
    /// currently parked in `wait()`, so the request cannot be lost.
    pub fn trigger(&self) {
        self.notify.notify_one();
    }

    /// Wait until shutdown is requested
    pub async fn wait(&self) {
        self.notify.notified().await;
    }
}

/// Start the signal listener task (Unix)
///
/// SIGINT and SIGTERM both trigger the same graceful shutdown.
#[cfg(unix)]
pub fn spawn_signal_listener(shutdown: Shutdown) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");

        tokio::select! {
            _ = sigint.recv() => {
                logger::log_shutdown_signal("SIGINT (Ctrl+C)");
            }
            _ = sigterm.recv() => {
                logger::log_shutdown_signal("SIGTERM");
            }
        }

        shutdown.trigger();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn spawn_signal_listener(shutdown: Shutdown) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_shutdown_signal("Ctrl+C");
            shutdown.trigger();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_wakes_waiter() {
        let shutdown = Shutdown::new();
        let waiter = shutdown.clone();

        let handle = tokio::spawn(async move {
            waiter.wait().await;
        });

        // The permit is stored even if the waiter has not registered yet
        shutdown.trigger();

        tokio::time::timeout(std::time::Duration::from_secs(1), handle)
            .await
            .expect("waiter should wake")
            .expect("task should not panic");
    }
}

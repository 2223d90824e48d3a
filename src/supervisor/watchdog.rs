use crate::supervisor::StatusCollector;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Logs once whenever the pipeline has gone quiet for `idle_after`.
pub struct IdleWatchdog {
    collector: Arc<StatusCollector>,
    idle_after: Duration,
}

impl IdleWatchdog {
    pub fn new(collector: Arc<StatusCollector>, idle_after: Duration) -> Self {
        Self {
            collector,
            idle_after,
        }
    }

    /// Returns true if the collector has been idle for a full window that
    /// hasn't been reported yet, and marks it reported.
    pub fn check(&self, reported: &mut Option<Instant>) -> bool {
        let last = self.collector.last_activity();
        let idle = Instant::now().saturating_duration_since(last);
        if idle < self.idle_after || *reported == Some(last) {
            return false;
        }
        *reported = Some(last);
        true
    }

    pub async fn run(self, shutdown: CancellationToken) {
        let mut reported = None;
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.idle_after) => {}
            }
            if self.check(&mut reported) {
                info!(
                    idle_s = self.idle_after.as_secs(),
                    settled = self.collector.settled(),
                    "No status activity"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderStatus, StatusRecorded};

    #[tokio::test(start_paused = true)]
    async fn test_reports_once_per_idle_window() {
        let collector = Arc::new(StatusCollector::new());
        let watchdog = IdleWatchdog::new(collector.clone(), Duration::from_secs(10));
        let mut reported = None;

        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(!watchdog.check(&mut reported));

        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(watchdog.check(&mut reported));
        tokio::time::advance(Duration::from_secs(20)).await;
        assert!(!watchdog.check(&mut reported));

        collector.record(StatusRecorded::new("1", OrderStatus::Received));
        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(watchdog.check(&mut reported));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_on_shutdown() {
        let watchdog = IdleWatchdog::new(Arc::new(StatusCollector::new()), Duration::from_secs(10));
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(watchdog.run(shutdown.clone()));

        tokio::time::sleep(Duration::from_secs(25)).await;
        shutdown.cancel();
        handle.await.unwrap();
    }
}

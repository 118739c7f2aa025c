//! Background presence reporter.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::client::PresenceClient;
use crate::config::PresenceConfig;
use crate::payload::{unix_now, PresencePayload};

/// Why the reporter stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Reporting is turned off in the configuration.
    Disabled,
    /// The host cancelled the reporter.
    Cancelled,
    /// Connecting or updating failed. Reporting is not retried.
    Failed(String),
}

/// Reporter lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReporterStatus {
    Connecting,
    Running { updates: u64 },
    Stopped(StopReason),
}

/// Pushes the presence payload at a fixed interval.
pub struct PresenceReporter<C: PresenceClient> {
    client: C,
    config: PresenceConfig,
    status: Arc<RwLock<ReporterStatus>>,
    cancel: CancellationToken,
    connected: bool,
}

impl<C: PresenceClient> PresenceReporter<C> {
    pub fn new(client: C, config: PresenceConfig) -> Self {
        Self {
            client,
            config,
            status: Arc::new(RwLock::new(ReporterStatus::Connecting)),
            cancel: CancellationToken::new(),
            connected: false,
        }
    }

    /// Start reporting on the current tokio runtime.
    ///
    /// A disabled configuration returns an already stopped handle.
    pub fn spawn(self) -> PresenceHandle {
        let status = Arc::clone(&self.status);
        let cancel = self.cancel.clone();

        if !self.config.enabled {
            tracing::info!("Presence reporting disabled");
            *status.write() = ReporterStatus::Stopped(StopReason::Disabled);
            return PresenceHandle {
                status,
                cancel,
                task: None,
            };
        }

        let task = tokio::spawn(self.run());
        PresenceHandle {
            status,
            cancel,
            task: Some(task),
        }
    }

    /// Run until cancelled or failed.
    pub async fn run(mut self) -> StopReason {
        let reason = self.report().await;

        match &reason {
            StopReason::Cancelled => {
                if self.connected {
                    let limit = self.config.shutdown_timeout;
                    match tokio::time::timeout(limit, self.client.clear()).await {
                        Ok(Ok(())) => {}
                        Ok(Err(err)) => tracing::debug!("Presence clear failed: {}", err),
                        Err(_) => tracing::warn!("Presence clear timed out after {:?}", limit),
                    }
                }
                tracing::info!("Presence reporting stopped");
            }
            StopReason::Failed(err) => tracing::error!("Presence error: {}", err),
            StopReason::Disabled => {}
        }

        *self.status.write() = ReporterStatus::Stopped(reason.clone());
        reason
    }

    async fn report(&mut self) -> StopReason {
        *self.status.write() = ReporterStatus::Connecting;

        let connected = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return StopReason::Cancelled,
            result = self.client.connect() => result,
        };
        if let Err(err) = connected {
            return StopReason::Failed(err.to_string());
        }
        self.connected = true;
        tracing::info!("Presence connected");

        let payload = PresencePayload::from_config(&self.config, unix_now());
        let mut updates: u64 = 0;

        loop {
            let updated = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return StopReason::Cancelled,
                result = self.client.update(&payload) => result,
            };
            if let Err(err) = updated {
                return StopReason::Failed(err.to_string());
            }
            updates += 1;
            *self.status.write() = ReporterStatus::Running { updates };
            tracing::debug!("Presence update #{} sent", updates);

            tokio::select! {
                _ = self.cancel.cancelled() => return StopReason::Cancelled,
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }
    }
}

/// Host-side handle to a spawned reporter.
pub struct PresenceHandle {
    status: Arc<RwLock<ReporterStatus>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<StopReason>>,
}

impl PresenceHandle {
    /// Current status.
    pub fn status(&self) -> ReporterStatus {
        self.status.read().clone()
    }

    /// Whether the reporter is connecting or running.
    pub fn is_running(&self) -> bool {
        !matches!(*self.status.read(), ReporterStatus::Stopped(_))
    }

    /// Ask the reporter to stop. An update in flight is abandoned.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the reporter to stop on its own.
    pub async fn join(mut self) -> StopReason {
        let Some(task) = self.task.take() else {
            return self.last_reason();
        };

        let joined = task.await;
        self.finish(joined)
    }

    /// Cancel the reporter and wait until it has stopped.
    pub async fn shutdown(self) -> StopReason {
        self.cancel();
        self.join().await
    }

    /// Cancel the reporter and wait at most `limit` for it to stop.
    ///
    /// A reporter still running after `limit` is aborted.
    pub async fn shutdown_within(mut self, limit: Duration) -> StopReason {
        self.cancel();
        let Some(mut task) = self.task.take() else {
            return self.last_reason();
        };

        match tokio::time::timeout(limit, &mut task).await {
            Ok(joined) => self.finish(joined),
            Err(_) => {
                task.abort();
                let reason = StopReason::Failed(format!("reporter did not stop within {:?}", limit));
                *self.status.write() = ReporterStatus::Stopped(reason.clone());
                reason
            }
        }
    }

    fn last_reason(&self) -> StopReason {
        match self.status() {
            ReporterStatus::Stopped(reason) => reason,
            _ => StopReason::Disabled,
        }
    }

    fn finish(&self, joined: Result<StopReason, tokio::task::JoinError>) -> StopReason {
        match joined {
            Ok(reason) => reason,
            Err(err) => {
                let reason = StopReason::Failed(format!("reporter task aborted: {}", err));
                *self.status.write() = ReporterStatus::Stopped(reason.clone());
                reason
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use common::{ShellError, ShellResult};
    use parking_lot::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    #[derive(Default)]
    struct MockState {
        connects: usize,
        updates: Vec<(PresencePayload, Instant)>,
        cleared: bool,
        fail_connect: bool,
        fail_after: Option<usize>,
        hang_update: bool,
        hang_clear: bool,
    }

    #[derive(Clone, Default)]
    struct MockClient {
        state: Arc<Mutex<MockState>>,
    }

    impl MockClient {
        fn failing_connect() -> Self {
            let client = Self::default();
            client.state.lock().fail_connect = true;
            client
        }

        fn failing_after(updates: usize) -> Self {
            let client = Self::default();
            client.state.lock().fail_after = Some(updates);
            client
        }

        /// A service that accepts the connection and then stops answering.
        fn unresponsive() -> Self {
            let client = Self::default();
            {
                let mut state = client.state.lock();
                state.hang_update = true;
                state.hang_clear = true;
            }
            client
        }

        fn update_count(&self) -> usize {
            self.state.lock().updates.len()
        }
    }

    #[async_trait]
    impl PresenceClient for MockClient {
        async fn connect(&mut self) -> ShellResult<()> {
            let mut state = self.state.lock();
            state.connects += 1;
            if state.fail_connect {
                return Err(ShellError::presence("service not running"));
            }
            Ok(())
        }

        async fn update(&mut self, payload: &PresencePayload) -> ShellResult<()> {
            let hang = self.state.lock().hang_update;
            if hang {
                std::future::pending::<()>().await;
            }
            let mut state = self.state.lock();
            if state.fail_after.is_some_and(|limit| state.updates.len() >= limit) {
                return Err(ShellError::presence("pipe closed"));
            }
            state.updates.push((payload.clone(), Instant::now()));
            Ok(())
        }

        async fn clear(&mut self) -> ShellResult<()> {
            let hang = self.state.lock().hang_clear;
            if hang {
                std::future::pending::<()>().await;
            }
            self.state.lock().cleared = true;
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_updates_until_cancelled() {
        let client = MockClient::default();
        let handle = PresenceReporter::new(client.clone(), PresenceConfig::default()).spawn();

        while client.update_count() < 3 {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        assert!(handle.is_running());
        assert!(matches!(handle.status(), ReporterStatus::Running { updates } if updates >= 3));

        assert_eq!(handle.shutdown().await, StopReason::Cancelled);

        let state = client.state.lock();
        assert_eq!(state.connects, 1);
        assert!(state.cleared);

        let start = state.updates[0].0.start;
        assert!(state.updates.iter().all(|(payload, _)| payload.start == start));
        for pair in state.updates.windows(2) {
            assert!(pair[1].1 - pair[0].1 >= Duration::from_secs(15));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_failure_stops_without_retry() {
        let client = MockClient::failing_connect();
        let handle = PresenceReporter::new(client.clone(), PresenceConfig::default()).spawn();

        let reason = handle.join().await;
        assert!(matches!(reason, StopReason::Failed(msg) if msg.contains("service not running")));

        let state = client.state.lock();
        assert_eq!(state.connects, 1);
        assert!(state.updates.is_empty());
        assert!(!state.cleared);
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_failure_ends_reporting() {
        let client = MockClient::failing_after(2);
        let handle = PresenceReporter::new(client.clone(), PresenceConfig::default()).spawn();

        let status = Arc::clone(&handle.status);
        let reason = handle.join().await;

        assert!(matches!(reason, StopReason::Failed(_)));
        assert_eq!(*status.read(), ReporterStatus::Stopped(reason));
        assert_eq!(client.update_count(), 2);
    }

    #[tokio::test]
    async fn test_disabled_never_connects() {
        let client = MockClient::default();
        let config = PresenceConfig::default().with_enabled(false);
        let handle = PresenceReporter::new(client.clone(), config).spawn();

        assert!(!handle.is_running());
        assert_eq!(handle.status(), ReporterStatus::Stopped(StopReason::Disabled));
        assert_eq!(handle.shutdown().await, StopReason::Disabled);
        assert_eq!(client.state.lock().connects, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_first_poll() {
        let client = MockClient::default();
        let handle = PresenceReporter::new(client.clone(), PresenceConfig::default()).spawn();
        handle.cancel();

        assert_eq!(handle.join().await, StopReason::Cancelled);
        assert_eq!(client.update_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_with_unresponsive_service() {
        let client = MockClient::unresponsive();
        let config = PresenceConfig::default().with_shutdown_timeout(Duration::from_secs(2));
        let handle = PresenceReporter::new(client.clone(), config).spawn();

        // Let the reporter connect and block in its first update.
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(client.state.lock().connects, 1);
        assert!(handle.is_running());

        let started = Instant::now();
        let status = Arc::clone(&handle.status);
        let reason = tokio::time::timeout(Duration::from_secs(60), handle.shutdown())
            .await
            .expect("shutdown must not wait on the service");

        assert_eq!(reason, StopReason::Cancelled);
        assert_eq!(*status.read(), ReporterStatus::Stopped(StopReason::Cancelled));
        assert!(started.elapsed() <= Duration::from_secs(3));
        assert_eq!(client.update_count(), 0);
        assert!(!client.state.lock().cleared);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_within_aborts_stuck_reporter() {
        let client = MockClient::unresponsive();
        let config = PresenceConfig::default().with_shutdown_timeout(Duration::from_secs(3600));
        let handle = PresenceReporter::new(client.clone(), config).spawn();
        tokio::time::sleep(Duration::from_secs(1)).await;

        let status = Arc::clone(&handle.status);
        let reason = handle.shutdown_within(Duration::from_secs(1)).await;

        assert!(matches!(reason, StopReason::Failed(msg) if msg.contains("did not stop")));
        assert!(matches!(*status.read(), ReporterStatus::Stopped(StopReason::Failed(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_within_after_normal_stop() {
        let client = MockClient::default();
        let handle = PresenceReporter::new(client.clone(), PresenceConfig::default()).spawn();
        while client.update_count() < 1 {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        let reason = handle.shutdown_within(Duration::from_secs(5)).await;
        assert_eq!(reason, StopReason::Cancelled);
        assert!(client.state.lock().cleared);
    }
}

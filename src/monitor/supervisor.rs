//! Per-key task registry with idempotent start and cooperative shutdown.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors raised while starting or stopping supervised tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MonitorError {
    /// No Tokio runtime is available to spawn onto.
    #[error("no tokio runtime available to start monitor {0}")]
    NoRuntime(String),

    /// The task table lock was poisoned by a panicking holder.
    #[error("monitor table lock poisoned: {0}")]
    Poisoned(String),
}

#[derive(Debug)]
struct SupervisedTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns one background task per key.
#[derive(Debug, Clone)]
pub struct MonitorSupervisor {
    name: &'static str,
    tasks: Arc<Mutex<HashMap<String, SupervisedTask>>>,
}

impl MonitorSupervisor {
    /// Creates an empty supervisor; `name` labels its log events.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, SupervisedTask>>, MonitorError> {
        self.tasks
            .lock()
            .map_err(|err| MonitorError::Poisoned(err.to_string()))
    }

    /// Spawns the task built by `task` unless one is already running for `key`.
    ///
    /// Returns `true` when a new task was spawned.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::NoRuntime`] outside a Tokio runtime, or
    /// [`MonitorError::Poisoned`] when the task table is poisoned.
    pub fn start<F, Fut>(&self, key: &str, task: F) -> Result<bool, MonitorError>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| MonitorError::NoRuntime(key.to_owned()))?;
        let mut tasks = self.lock()?;
        if tasks
            .get(key)
            .is_some_and(|running| !running.handle.is_finished())
        {
            return Ok(false);
        }

        let token = CancellationToken::new();
        let handle = runtime.spawn(task(token.clone()));
        tasks.insert(key.to_owned(), SupervisedTask { token, handle });
        info!(supervisor = self.name, key, "monitor task spawned");
        Ok(true)
    }

    /// Cancels the task for `key`, returning whether one was registered.
    ///
    /// The task observes cancellation at its next await point; this call does
    /// not wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Poisoned`] when the task table is poisoned.
    pub fn stop(&self, key: &str) -> Result<bool, MonitorError> {
        let Some(task) = self.lock()?.remove(key) else {
            return Ok(false);
        };
        task.token.cancel();
        info!(supervisor = self.name, key, "monitor task cancelled");
        Ok(true)
    }

    /// Returns whether a live task is registered for `key`.
    #[must_use]
    pub fn is_running(&self, key: &str) -> bool {
        self.lock().is_ok_and(|tasks| {
            tasks
                .get(key)
                .is_some_and(|task| !task.handle.is_finished())
        })
    }

    /// Returns the number of live tasks.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.lock().map_or(0, |tasks| {
            tasks
                .values()
                .filter(|task| !task.handle.is_finished())
                .count()
        })
    }

    /// Cancels every task and waits for all of them to finish.
    pub async fn shutdown(&self) {
        let drained: Vec<(String, SupervisedTask)> = match self.lock() {
            Ok(mut tasks) => tasks.drain().collect(),
            Err(err) => {
                warn!(supervisor = self.name, error = %err, "monitor shutdown skipped");
                return;
            }
        };

        for (_, task) in &drained {
            task.token.cancel();
        }
        let count = drained.len();
        for (key, task) in drained {
            if let Err(err) = task.handle.await {
                warn!(
                    supervisor = self.name,
                    key = %key,
                    error = %err,
                    "monitor task ended abnormally"
                );
            }
        }
        info!(supervisor = self.name, count, "monitor tasks shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::MonitorSupervisor;
    use crate::monitor::run_periodic;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counting_task(
        counter: Arc<AtomicUsize>,
    ) -> impl FnOnce(tokio_util::sync::CancellationToken) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>>
    {
        move |token| {
            Box::pin(run_periodic(
                "test",
                "agent".to_owned(),
                Duration::from_millis(5),
                token,
                move || {
                    let calls = Arc::clone(&counter);
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok::<(), std::convert::Infallible>(())
                    }
                },
            ))
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn start_is_idempotent_per_key() {
        let supervisor = MonitorSupervisor::new("test");
        let counter = Arc::new(AtomicUsize::new(0));

        let first = supervisor
            .start("agent", counting_task(Arc::clone(&counter)))
            .expect("first start should succeed");
        let second = supervisor
            .start("agent", counting_task(Arc::clone(&counter)))
            .expect("second start should succeed");

        assert!(first);
        assert!(!second);
        assert_eq!(supervisor.running_count(), 1);
        supervisor.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn stop_cancels_only_the_named_task() {
        let supervisor = MonitorSupervisor::new("test");
        let counter = Arc::new(AtomicUsize::new(0));
        supervisor
            .start("a", counting_task(Arc::clone(&counter)))
            .expect("start a");
        supervisor
            .start("b", counting_task(Arc::clone(&counter)))
            .expect("start b");

        assert!(supervisor.stop("a").expect("stop should succeed"));
        assert!(!supervisor.stop("a").expect("second stop should succeed"));
        assert!(!supervisor.is_running("a"));
        assert!(supervisor.is_running("b"));
        supervisor.shutdown().await;
        assert_eq!(supervisor.running_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn periodic_loop_runs_first_cycle_immediately_and_stops_on_cancel() {
        let supervisor = MonitorSupervisor::new("test");
        let counter = Arc::new(AtomicUsize::new(0));
        supervisor
            .start("agent", counting_task(Arc::clone(&counter)))
            .expect("start should succeed");

        tokio::time::sleep(Duration::from_millis(40)).await;
        supervisor.shutdown().await;
        let after_shutdown = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(after_shutdown >= 1);
        assert_eq!(counter.load(Ordering::SeqCst), after_shutdown);
    }

    #[test]
    fn start_outside_runtime_is_an_error() {
        let supervisor = MonitorSupervisor::new("test");
        let result = supervisor.start("agent", |_token| async {});
        assert!(result.is_err());
    }
}

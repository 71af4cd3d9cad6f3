//! Poll scheduling and published state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use guntalink_core::{DeviceConfig, PollResult, Snapshot};
use guntalink_client::DeviceClient;
use tokio::sync::{watch, Notify};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Coordinator lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// No poll has completed yet; the device counts as unavailable.
    Uninitialized,
    /// A fetch+parse cycle is in flight.
    Polling,
    /// The last cycle succeeded; the published snapshot is current.
    Healthy,
    /// The last cycle failed; the published snapshot, if any, is stale.
    Degraded,
}

/// Bookkeeping for cycle coalescing.
///
/// `started` counts cycles that began, `completed` counts cycles that
/// finished. A refresh request that arrives while a cycle is in flight waits
/// for that cycle's completion instead of starting another one.
struct CycleState {
    started: u64,
    completed: u64,
    in_flight: bool,
    last_outcome: Option<PollResult<()>>,
}

struct Inner {
    config: DeviceConfig,
    client: DeviceClient,
    snapshot_tx: watch::Sender<Option<Snapshot>>,
    status: Mutex<DeviceStatus>,
    running: AtomicBool,
    shutdown: Notify,
    cycle: Mutex<CycleState>,
    cycle_done: Notify,
}

/// Owns the poll timer and the single published snapshot.
///
/// Cheap to clone; all clones share the same state. Failures never stop the
/// schedule: a failed cycle marks the coordinator degraded, keeps the last
/// good snapshot published, and the next tick fires as usual.
#[derive(Clone)]
pub struct PollCoordinator {
    inner: Arc<Inner>,
}

impl PollCoordinator {
    /// Create a coordinator with a default client. Nothing is scheduled
    /// until [`start`](Self::start) is called.
    pub fn new(config: DeviceConfig) -> Self {
        Self::with_client(config, DeviceClient::new())
    }

    /// Create a coordinator with an explicit client (custom timeout).
    pub fn with_client(config: DeviceConfig, client: DeviceClient) -> Self {
        let (snapshot_tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                config,
                client,
                snapshot_tx,
                status: Mutex::new(DeviceStatus::Uninitialized),
                running: AtomicBool::new(false),
                shutdown: Notify::new(),
                cycle: Mutex::new(CycleState {
                    started: 0,
                    completed: 0,
                    in_flight: false,
                    last_outcome: None,
                }),
                cycle_done: Notify::new(),
            }),
        }
    }

    /// Start the poll loop. Idempotent: calling `start` on a running
    /// coordinator does nothing, so a second schedule can never produce
    /// duplicate concurrent cycles.
    pub fn start(&self) {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            debug!("poll loop already running, start ignored");
            return;
        }

        let inner = Arc::clone(&self.inner);
        info!(
            host = %inner.config.host,
            interval_secs = inner.config.interval().as_secs(),
            "starting poll loop"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(inner.config.interval());
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    _ = inner.shutdown.notified() => break,
                }
                if !inner.running.load(Ordering::SeqCst) {
                    break;
                }
                let _ = run_or_join_cycle(&inner).await;
            }
            debug!("poll loop stopped");
        });
    }

    /// Stop the poll loop. An in-flight cycle is abandoned to finish on its
    /// own; the published snapshot is never touched by shutdown.
    pub fn stop(&self) {
        if self.inner.running.swap(false, Ordering::SeqCst) {
            self.inner.shutdown.notify_waiters();
            info!(host = %self.inner.config.host, "poll loop stopping");
        }
    }

    /// Force a cycle now. If one is already in flight the call coalesces
    /// with it and returns that same cycle's outcome.
    pub async fn refresh(&self) -> PollResult<()> {
        run_or_join_cycle(&self.inner).await
    }

    /// The most recent successful poll, if any.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Whether any poll has ever succeeded.
    pub fn is_available(&self) -> bool {
        self.inner.snapshot_tx.borrow().is_some()
    }

    /// Current lifecycle state.
    pub fn status(&self) -> DeviceStatus {
        *self.inner.status.lock().unwrap()
    }

    /// Subscribe to snapshot replacements. The receiver observes every
    /// successful poll; failed cycles publish nothing.
    pub fn subscribe(&self) -> watch::Receiver<Option<Snapshot>> {
        self.inner.snapshot_tx.subscribe()
    }

    /// The configuration this coordinator polls with.
    pub fn config(&self) -> &DeviceConfig {
        &self.inner.config
    }
}

/// Run one cycle, or wait for the one already in flight.
async fn run_or_join_cycle(inner: &Arc<Inner>) -> PollResult<()> {
    let wait_for = {
        let mut cycle = inner.cycle.lock().unwrap();
        if cycle.in_flight {
            // Coalesce: observe the running cycle instead of queueing.
            cycle.started
        } else {
            cycle.in_flight = true;
            cycle.started += 1;
            0
        }
    };

    if wait_for > 0 {
        debug!("refresh coalesced with in-flight cycle {}", wait_for);
        loop {
            let notified = inner.cycle_done.notified();
            {
                let cycle = inner.cycle.lock().unwrap();
                if cycle.completed >= wait_for {
                    return cycle
                        .last_outcome
                        .clone()
                        .expect("completed cycle must record an outcome");
                }
            }
            notified.await;
        }
    }

    let outcome = run_cycle(inner).await;

    let mut cycle = inner.cycle.lock().unwrap();
    cycle.in_flight = false;
    cycle.completed = cycle.started;
    cycle.last_outcome = Some(outcome.clone());
    drop(cycle);
    inner.cycle_done.notify_waiters();

    outcome
}

/// One fetch+parse cycle with state transitions.
async fn run_cycle(inner: &Arc<Inner>) -> PollResult<()> {
    *inner.status.lock().unwrap() = DeviceStatus::Polling;

    match inner.client.poll(&inner.config.host).await {
        Ok(measurements) => {
            let snapshot = Snapshot::new(measurements);
            debug!(
                host = %inner.config.host,
                fields = snapshot.len(),
                "poll cycle succeeded"
            );
            // Wholesale replace; readers never see a half-updated set.
            inner.snapshot_tx.send_replace(Some(snapshot));
            *inner.status.lock().unwrap() = DeviceStatus::Healthy;
            Ok(())
        }
        Err(err) => {
            if err.is_structural() {
                error!(host = %inner.config.host, %err, "poll cycle failed: protocol assumption violated");
            } else {
                warn!(host = %inner.config.host, %err, "poll cycle failed");
            }
            *inner.status.lock().unwrap() = DeviceStatus::Degraded;
            Err(err)
        }
    }
}

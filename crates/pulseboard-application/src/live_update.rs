//! Periodic live-update simulation.
//!
//! While the dashboard holds stats and a chart series, every `interval` the
//! scheduler jitters both from their current values and patches them back
//! into the [`DashboardStore`]. It never calls the data source.
//!
//! States: Idle (no timer) and Active (one timer task). Transitions follow the
//! store's [`DashboardSignal`](crate::dashboard_store::DashboardSignal) once
//! [`attach`](LiveUpdateScheduler::attach)ed, or can be driven by hand with
//! [`start`](LiveUpdateScheduler::start) and [`stop`](LiveUpdateScheduler::stop).

use pulseboard_core::config::LiveUpdateSettings;
use pulseboard_core::dashboard::{ChartPoint, StatsBlock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

use crate::dashboard_store::{DashboardStore, LivePatch};

/// Largest per-tick change of one chart point.
pub const CHART_MAX_DELTA: i64 = 5;

/// Bound of the redrawn `change` indicator, inclusive on both ends.
pub const CHANGE_BOUND: i32 = 5;

/// Returns `stats` with every value nudged by at most its metric's
/// [`max_delta`](pulseboard_core::dashboard::StatMetric::max_delta) and every
/// `change` redrawn.
///
/// Values clamp at zero.
pub fn jitter_stats<R: Rng>(stats: &StatsBlock, rng: &mut R) -> StatsBlock {
    let mut next = stats.clone();
    for (metric, current) in stats.iter() {
        let max = metric.max_delta();
        let entry = next.get_mut(metric);
        entry.value = current.value.saturating_add_signed(rng.gen_range(-max..=max));
        entry.change = rng.gen_range(-CHANGE_BOUND..=CHANGE_BOUND);
    }
    next
}

/// Returns `series` with every value nudged by at most [`CHART_MAX_DELTA`].
///
/// Length and dates are preserved.
pub fn jitter_series<R: Rng>(series: &[ChartPoint], rng: &mut R) -> Vec<ChartPoint> {
    series
        .iter()
        .map(|point| ChartPoint {
            date: point.date.clone(),
            value: point
                .value
                .saturating_add_signed(rng.gen_range(-CHART_MAX_DELTA..=CHART_MAX_DELTA)),
        })
        .collect()
}

struct ActiveTimer {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ActiveTimer {
    fn is_running(&self) -> bool {
        !self.token.is_cancelled() && !self.handle.is_finished()
    }
}

pub struct LiveUpdateScheduler {
    store: Arc<DashboardStore>,
    period: Duration,
    rng: Arc<Mutex<StdRng>>,
    timer: Mutex<Option<ActiveTimer>>,
    supervisor: Mutex<Option<JoinHandle<()>>>,
}

impl LiveUpdateScheduler {
    pub fn new(store: Arc<DashboardStore>, settings: &LiveUpdateSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(store, settings.interval(), rng)
    }

    pub fn with_rng(store: Arc<DashboardStore>, period: Duration, rng: StdRng) -> Self {
        Self {
            store,
            period,
            rng: Arc::new(Mutex::new(rng)),
            timer: Mutex::new(None),
            supervisor: Mutex::new(None),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(ActiveTimer::is_running)
    }

    /// Arms the timer. Does nothing if a timer is already running.
    ///
    /// The first tick fires one period after arming. Must be called within a
    /// Tokio runtime.
    pub fn start(&self) -> bool {
        let mut slot = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(ActiveTimer::is_running) {
            return false;
        }
        if let Some(stale) = slot.take() {
            stale.token.cancel();
        }

        let token = CancellationToken::new();
        let handle = tokio::spawn(run_timer(
            self.store.clone(),
            self.rng.clone(),
            token.clone(),
            self.period,
        ));
        *slot = Some(ActiveTimer { token, handle });

        tracing::info!(period = ?self.period, "[LiveUpdate] Started");
        true
    }

    /// Cancels the timer. Once this returns no further tick mutates the store.
    pub fn stop(&self) -> bool {
        let taken = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match taken {
            Some(timer) => {
                timer.token.cancel();
                timer.handle.abort();
                tracing::info!("[LiveUpdate] Stopped");
                true
            }
            None => false,
        }
    }

    /// Follows the store: Active while it holds live data, Idle otherwise.
    ///
    /// The supervisor holds only a weak reference, so dropping the last
    /// `Arc` to the scheduler ends it.
    pub fn attach(self: &Arc<Self>) {
        let mut signals = self.store.subscribe();
        let scheduler = Arc::downgrade(self);

        let supervisor = tokio::spawn(async move {
            loop {
                let live_ready = signals.borrow_and_update().live_ready;
                {
                    let Some(scheduler) = scheduler.upgrade() else {
                        break;
                    };
                    if live_ready {
                        scheduler.start();
                    } else {
                        scheduler.stop();
                    }
                }
                if signals.changed().await.is_err() {
                    break;
                }
            }
        });

        let previous = self
            .supervisor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(supervisor);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Detaches from the store and stops the timer.
    pub fn shutdown(&self) {
        let supervisor = self
            .supervisor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(supervisor) = supervisor {
            supervisor.abort();
        }
        self.stop();
    }
}

impl Drop for LiveUpdateScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_timer(
    store: Arc<DashboardStore>,
    rng: Arc<Mutex<StdRng>>,
    token: CancellationToken,
    period: Duration,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                let applied = store
                    .apply_live_patch(|state| {
                        // Checked under the store lock so a stop() that
                        // already returned can never be overtaken.
                        if token.is_cancelled() {
                            return None;
                        }
                        let stats = state.stats.as_ref()?;
                        let series = state.chart_series.as_ref()?;
                        let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                        Some(LivePatch {
                            stats: jitter_stats(stats, &mut *rng),
                            chart_series: jitter_series(series, &mut *rng),
                        })
                    })
                    .await;
                tracing::trace!(applied, "[LiveUpdate] Tick");
            }
        }
    }
}

//! Dashboard data and its change notifications.

use pulseboard_core::dashboard::{
    Activity, CategoricalCharts, ChartPoint, DashboardSnapshot, StatsBlock,
};
use tokio::sync::{RwLock, watch};

/// Dashboard data read by the view.
///
/// `stats` and `chart_series` are absent until the first successful fetch
/// and again after [`DashboardStore::reset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub stats: Option<StatsBlock>,
    pub chart_series: Option<Vec<ChartPoint>>,
    pub charts: CategoricalCharts,
    pub activities: Vec<Activity>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DashboardState {
    /// True when live updates have something to jitter.
    pub fn has_live_data(&self) -> bool {
        self.stats.is_some() && self.chart_series.is_some()
    }
}

/// Published after every mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSignal {
    pub revision: u64,
    pub live_ready: bool,
}

/// A live-update tick's replacement values.
#[derive(Debug, Clone, PartialEq)]
pub struct LivePatch {
    pub stats: StatsBlock,
    pub chart_series: Vec<ChartPoint>,
}

pub struct DashboardStore {
    state: RwLock<DashboardState>,
    signal: watch::Sender<DashboardSignal>,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardStore {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(DashboardSignal::default());
        Self {
            state: RwLock::new(DashboardState::default()),
            signal,
        }
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Subscribes to mutation signals. The current signal is marked seen.
    pub fn subscribe(&self) -> watch::Receiver<DashboardSignal> {
        self.signal.subscribe()
    }

    /// Number of mutations applied so far.
    pub fn revision(&self) -> u64 {
        self.signal.borrow().revision
    }

    /// Applies `mutation` under the write lock and publishes a new revision.
    async fn mutate<F>(&self, mutation: F)
    where
        F: FnOnce(&mut DashboardState),
    {
        let mut state = self.state.write().await;
        mutation(&mut state);
        self.publish(&state);
    }

    fn publish(&self, state: &DashboardState) {
        let live_ready = state.has_live_data();
        self.signal.send_modify(|signal| {
            signal.revision += 1;
            signal.live_ready = live_ready;
        });
    }

    pub async fn request_fetch(&self) {
        self.mutate(|state| {
            state.loading = true;
            state.error = None;
        })
        .await;
    }

    /// Replaces every data field with `snapshot`.
    pub async fn fetch_succeeded(&self, snapshot: DashboardSnapshot) {
        tracing::debug!(
            activities = snapshot.activities.len(),
            points = snapshot.chart_series.len(),
            "[DashboardStore] Snapshot applied"
        );
        self.mutate(move |state| {
            state.stats = Some(snapshot.stats);
            state.chart_series = Some(snapshot.chart_series);
            state.charts = snapshot.charts;
            state.activities = snapshot.activities;
            state.loading = false;
            state.error = None;
        })
        .await;
    }

    /// Records a failed fetch. Previously loaded data stays visible.
    pub async fn fetch_failed(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(error = %message, "[DashboardStore] Fetch failed");
        self.mutate(move |state| {
            state.loading = false;
            state.error = Some(message);
        })
        .await;
    }

    /// Records a failed stats refresh in the shared error slot.
    ///
    /// Unlike [`fetch_failed`](Self::fetch_failed) this leaves `loading`
    /// alone, since a refresh never raised it.
    pub async fn refresh_failed(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(error = %message, "[DashboardStore] Stats refresh failed");
        self.mutate(move |state| state.error = Some(message)).await;
    }

    pub async fn patch_stats(&self, stats: StatsBlock) {
        self.mutate(move |state| state.stats = Some(stats)).await;
    }

    /// Replaces the chart series.
    ///
    /// Callers must keep the length and ordering keys of the current series.
    pub async fn patch_chart_series(&self, series: Vec<ChartPoint>) {
        self.mutate(move |state| state.chart_series = Some(series)).await;
    }

    /// Removes the activity with `id`. Returns false if there was none.
    pub async fn delete_activity(&self, id: u64) -> bool {
        let mut state = self.state.write().await;
        let before = state.activities.len();
        state.activities.retain(|activity| activity.id != id);
        if state.activities.len() == before {
            tracing::debug!(id, "[DashboardStore] No activity to delete");
            return false;
        }
        self.publish(&state);
        true
    }

    /// Applies a live-update tick computed from the current state.
    ///
    /// `compute` runs under the write lock; returning `None` leaves the store
    /// untouched and publishes nothing.
    pub async fn apply_live_patch<F>(&self, compute: F) -> bool
    where
        F: FnOnce(&DashboardState) -> Option<LivePatch>,
    {
        let mut state = self.state.write().await;
        let Some(patch) = compute(&state) else {
            return false;
        };
        state.stats = Some(patch.stats);
        state.chart_series = Some(patch.chart_series);
        self.publish(&state);
        true
    }

    /// Returns to the empty initial state.
    pub async fn reset(&self) {
        self.mutate(|state| *state = DashboardState::default()).await;
        tracing::debug!("[DashboardStore] Reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulseboard_core::dashboard::StatEntry;

    fn stats(new_tickets: u64) -> StatsBlock {
        StatsBlock {
            new_tickets: StatEntry::new(new_tickets, 6, "New Tickets"),
            closed_today: StatEntry::new(17, -3, "Closed Today"),
            new_replies: StatEntry::new(7, 9, "New Replies"),
            followers: StatEntry::new(27300, 3, "Followers"),
            daily_earnings: StatEntry::new(95, -2, "Daily earnings").with_prefix("$"),
            products: StatEntry::new(621, -1, "Products"),
        }
    }

    fn activity(id: u64) -> Activity {
        Activity {
            id,
            user: format!("User {}", id),
            avatar_label: "U".to_string(),
            avatar_url: None,
            commit_message: "Initial commit".to_string(),
            date: "May 6, 2018".to_string(),
        }
    }

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            stats: stats(43),
            chart_series: vec![ChartPoint::new("Jan", 12), ChartPoint::new("Feb", 25)],
            charts: CategoricalCharts::default(),
            activities: vec![activity(1), activity(2), activity(3)],
        }
    }

    #[tokio::test]
    async fn test_fetch_lifecycle() {
        let store = DashboardStore::new();
        store.request_fetch().await;
        assert!(store.snapshot().await.loading);

        store.fetch_succeeded(snapshot()).await;
        let state = store.snapshot().await;
        assert!(!state.loading);
        assert!(state.has_live_data());
        assert_eq!(state.activities.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_failed_keeps_stale_data() {
        let store = DashboardStore::new();
        store.fetch_succeeded(snapshot()).await;
        store.request_fetch().await;
        store.fetch_failed("Failed to fetch dashboard data").await;

        let state = store.snapshot().await;
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch dashboard data"));
        assert_eq!(state.stats, Some(stats(43)));
        assert_eq!(state.activities.len(), 3);
    }

    #[tokio::test]
    async fn test_patch_stats_leaves_other_fields() {
        let store = DashboardStore::new();
        store.fetch_succeeded(snapshot()).await;
        store.request_fetch().await;

        store.patch_stats(stats(99)).await;
        let state = store.snapshot().await;
        assert_eq!(state.stats, Some(stats(99)));
        assert!(state.loading, "patch must not touch loading");
        assert_eq!(state.chart_series.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_patch_chart_series_keeps_keys() {
        let store = DashboardStore::new();
        store.fetch_succeeded(snapshot()).await;

        let patched = vec![ChartPoint::new("Jan", 0), ChartPoint::new("Feb", 30)];
        store.patch_chart_series(patched.clone()).await;

        let state = store.snapshot().await;
        assert_eq!(state.chart_series, Some(patched));
        assert_eq!(state.stats, Some(stats(43)));
    }

    #[tokio::test]
    async fn test_refresh_failed_keeps_loading() {
        let store = DashboardStore::new();
        store.request_fetch().await;
        store.refresh_failed("Failed to update stats").await;

        let state = store.snapshot().await;
        assert!(state.loading);
        assert_eq!(state.error.as_deref(), Some("Failed to update stats"));
    }

    #[tokio::test]
    async fn test_delete_activity() {
        let store = DashboardStore::new();
        store.fetch_succeeded(snapshot()).await;

        assert!(store.delete_activity(2).await);
        let ids: Vec<u64> = store.snapshot().await.activities.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_delete_missing_activity_is_noop() {
        let store = DashboardStore::new();
        store.fetch_succeeded(snapshot()).await;
        let before = store.snapshot().await;
        let revision = store.revision();

        assert!(!store.delete_activity(42).await);
        assert_eq!(store.snapshot().await, before);
        assert_eq!(store.revision(), revision);
    }

    #[tokio::test]
    async fn test_signal_tracks_live_readiness() {
        let store = DashboardStore::new();
        let mut signals = store.subscribe();
        assert!(!signals.borrow_and_update().live_ready);

        store.fetch_succeeded(snapshot()).await;
        assert!(signals.has_changed().unwrap());
        assert!(signals.borrow_and_update().live_ready);

        store.reset().await;
        assert!(!signals.borrow_and_update().live_ready);
        assert_eq!(store.snapshot().await, DashboardState::default());
    }

    #[tokio::test]
    async fn test_live_patch_skipped_when_compute_declines() {
        let store = DashboardStore::new();
        let revision = store.revision();

        let applied = store
            .apply_live_patch(|state| {
                let stats = state.stats.clone()?;
                Some(LivePatch {
                    stats,
                    chart_series: Vec::new(),
                })
            })
            .await;

        assert!(!applied);
        assert_eq!(store.revision(), revision);
    }
}

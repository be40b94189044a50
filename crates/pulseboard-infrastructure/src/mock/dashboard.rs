//! Mock dashboard service.

use async_trait::async_trait;
use pulseboard_core::Result;
use pulseboard_core::config::DashboardSettings;
use pulseboard_core::dashboard::{DashboardService, DashboardSnapshot, StatsBlock};
use rand::Rng;
use std::time::Duration;

use super::fixtures;

/// Serves the fixture snapshot; never fails.
pub struct MockDashboardService {
    fetch_delay: Duration,
    refresh_delay: Duration,
}

impl MockDashboardService {
    pub fn new(fetch_delay: Duration, refresh_delay: Duration) -> Self {
        Self {
            fetch_delay,
            refresh_delay,
        }
    }

    pub fn from_settings(settings: &DashboardSettings) -> Self {
        Self::new(settings.fetch_delay(), settings.refresh_delay())
    }
}

/// Fixture stats with the ticket counters redrawn.
fn refreshed_stats(rng: &mut impl Rng) -> StatsBlock {
    let mut stats = fixtures::stats();
    stats.new_tickets.value = rng.gen_range(0..100);
    stats.new_tickets.change = rng.gen_range(-10..10);
    stats.closed_today.value = rng.gen_range(0..50);
    stats.closed_today.change = rng.gen_range(-10..10);
    stats
}

#[async_trait]
impl DashboardService for MockDashboardService {
    async fn fetch_dashboard(&self) -> Result<DashboardSnapshot> {
        tokio::time::sleep(self.fetch_delay).await;
        Ok(fixtures::snapshot())
    }

    async fn refresh_stats(&self) -> Result<StatsBlock> {
        tokio::time::sleep(self.refresh_delay).await;
        Ok(refreshed_stats(&mut rand::thread_rng()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[tokio::test(start_paused = true)]
    async fn test_fetch_returns_fixture_snapshot() {
        let service = MockDashboardService::from_settings(&DashboardSettings::default());
        let snapshot = service.fetch_dashboard().await.unwrap();
        assert_eq!(snapshot, fixtures::snapshot());
    }

    #[test]
    fn test_refreshed_stats_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let base = fixtures::stats();
        for _ in 0..200 {
            let stats = refreshed_stats(&mut rng);
            assert!(stats.new_tickets.value < 100);
            assert!((-10..10).contains(&stats.new_tickets.change));
            assert!(stats.closed_today.value < 50);
            assert!((-10..10).contains(&stats.closed_today.change));
            assert_eq!(stats.followers, base.followers);
            assert_eq!(stats.new_tickets.label, base.new_tickets.label);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_waits_for_delay() {
        let service = MockDashboardService::new(Duration::ZERO, Duration::from_millis(300));
        let start = tokio::time::Instant::now();
        service.refresh_stats().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}

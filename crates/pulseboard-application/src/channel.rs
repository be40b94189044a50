//! Latest-wins supersession for one intent channel.
//!
//! Each call issues a [`Ticket`] carrying a monotonically increasing
//! generation. When the call resolves, its store mutation is applied only if
//! no newer ticket was issued (or the channel invalidated) in the meantime.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Proof that a call was issued on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A supersession scope such as `login` or `dashboard-fetch`.
///
/// Issuing and invalidating are synchronous, so the order of intents is fixed
/// at dispatch time rather than by task scheduling. Applying a result is
/// serialized by `gate`: the generation check and the mutation happen under
/// the same lock, so an invalidation cannot slip between them.
#[derive(Debug)]
pub struct RequestChannel {
    name: &'static str,
    latest: AtomicU64,
    gate: Mutex<()>,
}

impl RequestChannel {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            latest: AtomicU64::new(0),
            gate: Mutex::new(()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Starts a new call, superseding every outstanding one.
    pub fn issue(&self) -> Ticket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(channel = self.name, generation, "[RequestChannel] Issued");
        Ticket { generation }
    }

    /// Supersedes every outstanding call without starting a new one.
    pub fn invalidate(&self) {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(channel = self.name, generation, "[RequestChannel] Invalidated");
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.generation
    }

    /// Waits until no result is being applied on this channel.
    pub async fn drain(&self) {
        let _gate = self.gate.lock().await;
    }

    /// Runs `apply` if `ticket` is still the latest on this channel.
    ///
    /// Returns `false` when the result was discarded.
    pub async fn settle<F>(&self, ticket: Ticket, apply: F) -> bool
    where
        F: Future<Output = ()>,
    {
        let _gate = self.gate.lock().await;
        if !self.is_current(ticket) {
            tracing::warn!(
                channel = self.name,
                generation = ticket.generation,
                latest = self.latest.load(Ordering::SeqCst),
                "[RequestChannel] Discarding superseded result"
            );
            return false;
        }
        apply.await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn test_latest_ticket_is_applied() {
        let channel = RequestChannel::new("login");
        let applied = AtomicUsize::new(0);

        let first = channel.issue();
        let second = channel.issue();
        assert!(first.generation() < second.generation());

        let applied_second = channel
            .settle(second, async {
                applied.fetch_add(10, Ordering::SeqCst);
            })
            .await;
        let applied_first = channel
            .settle(first, async {
                applied.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert!(applied_second);
        assert!(!applied_first);
        assert_eq!(applied.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_invalidate_discards_outstanding_call() {
        let channel = RequestChannel::new("dashboard-fetch");
        let ticket = channel.issue();
        channel.invalidate();

        assert!(!channel.is_current(ticket));
        assert!(!channel.settle(ticket, async {}).await);
    }

    #[tokio::test]
    async fn test_channels_are_independent() {
        let fetch = RequestChannel::new("dashboard-fetch");
        let refresh = RequestChannel::new("stats-refresh");

        let fetch_ticket = fetch.issue();
        let _ = refresh.issue();
        let _ = refresh.issue();

        assert!(fetch.is_current(fetch_ticket));
        assert_eq!(fetch.name(), "dashboard-fetch");
    }
}

//! Repeating tick source.
//!
//! A `TickSource` is the engine's handle on the repeating one-second clock.
//! Owning it means ticks are due; dropping it cancels them. The engine keeps
//! it in an `Option`, so acquiring a new source always replaces the old one
//! and two sources can never fire side by side.

use tokio::time::{sleep_until, Duration, Instant};

/// A cancellable, fixed-cadence tick schedule.
#[derive(Debug)]
pub struct TickSource {
    period: Duration,
    next_deadline: Instant,
    generation: u64,
}

impl TickSource {
    /// Starts a schedule whose first tick is one period from now.
    pub fn start(period: Duration, generation: u64) -> Self {
        Self {
            period,
            next_deadline: Instant::now() + period,
            generation,
        }
    }

    /// When the next tick is due.
    pub fn deadline(&self) -> Instant {
        self.next_deadline
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Sequence number distinguishing this source from earlier ones.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Schedules the tick after the one that just fired.
    ///
    /// Ticks missed while the loop was busy are skipped, never replayed.
    pub fn advance(&mut self) {
        self.next_deadline += self.period;
        let now = Instant::now();
        if self.next_deadline <= now {
            self.next_deadline = now + self.period;
        }
    }
}

/// Sleeps until `deadline`, or forever when there is none.
pub async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_first_deadline_is_one_period_away() {
        let start = Instant::now();
        let ticker = TickSource::start(Duration::from_secs(1), 1);

        assert_eq!(ticker.deadline(), start + Duration::from_secs(1));
        assert_eq!(ticker.period(), Duration::from_secs(1));
        assert_eq!(ticker.generation(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_keeps_cadence() {
        let start = Instant::now();
        let mut ticker = TickSource::start(Duration::from_secs(1), 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        ticker.advance();
        assert_eq!(ticker.deadline(), start + Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_skips_missed_ticks() {
        let mut ticker = TickSource::start(Duration::from_secs(1), 1);

        tokio::time::advance(Duration::from_millis(3500)).await;
        ticker.advance();
        assert_eq!(ticker.deadline(), Instant::now() + Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_fires() {
        let deadline = Instant::now() + Duration::from_millis(500);
        wait_until(Some(deadline)).await;
        assert!(Instant::now() >= deadline);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_none_never_fires() {
        let result = timeout(Duration::from_secs(10), wait_until(None)).await;
        assert!(result.is_err());
    }
}

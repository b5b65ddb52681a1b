//! Fixed spacing between consecutive upstream calls

use std::time::Duration;

/// Minimum wait between two vision requests of the same run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    interval: Duration,
}

impl Pacing {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

    pub fn fixed(interval: Duration) -> Self {
        Self { interval }
    }

    /// No waiting at all
    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::fixed(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn wait(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::fixed(Self::DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one_second() {
        assert_eq!(Pacing::default().interval(), Duration::from_secs(1));
        assert_eq!(Pacing::from_millis(0), Pacing::none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_advances_clock() {
        let start = tokio::time::Instant::now();
        Pacing::from_millis(250).wait().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(250) && elapsed < Duration::from_millis(260));

        let start = tokio::time::Instant::now();
        Pacing::none().wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}

//! Request pacing for the TMDB API.

use std::time::{Duration, Instant};

/// Default minimum interval between requests (~40 req/s).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Spaces consecutive requests at least `min_interval` apart.
///
/// Sibling components fire their requests at the same moment on page
/// entry; pacing keeps the burst under TMDB's per-second allowance.
#[derive(Debug)]
pub struct RequestPacer {
    /// Minimum interval between request starts.
    min_interval: Duration,
    /// When the previous request was released.
    last_release: Option<Instant>,
}

impl RequestPacer {
    /// Creates a pacer with the given minimum interval.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_release: None,
        }
    }

    /// Creates a pacer with the default interval (25ms).
    pub(crate) const fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// How long a request arriving at `now` must wait.
    fn delay_at(&self, now: Instant) -> Duration {
        self.last_release.map_or(Duration::ZERO, |last| {
            self.min_interval
                .saturating_sub(now.saturating_duration_since(last))
        })
    }

    /// Waits for the next free slot and claims it.
    pub async fn wait(&mut self) {
        let delay = self.delay_at(Instant::now());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.last_release = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_first_request_has_no_delay() {
        // Arrange
        let pacer = RequestPacer::new(Duration::from_secs(1));

        // Act
        let delay = pacer.delay_at(Instant::now());

        // Assert
        assert_eq!(delay, Duration::ZERO);
    }

    #[test]
    fn test_delay_is_remaining_interval() {
        // Arrange
        let start = Instant::now();
        let pacer = RequestPacer {
            min_interval: Duration::from_millis(100),
            last_release: Some(start),
        };

        // Act
        let delay = pacer.delay_at(start + Duration::from_millis(30));

        // Assert
        assert_eq!(delay, Duration::from_millis(70));
    }

    #[test]
    fn test_no_delay_after_interval_elapsed() {
        // Arrange
        let start = Instant::now();
        let pacer = RequestPacer {
            min_interval: Duration::from_millis(100),
            last_release: Some(start),
        };

        // Act
        let delay = pacer.delay_at(start + Duration::from_millis(250));

        // Assert
        assert_eq!(delay, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_wait_spaces_requests() {
        // Arrange
        let mut pacer = RequestPacer::new(Duration::from_millis(50));

        // Act
        let start = Instant::now();
        pacer.wait().await;
        pacer.wait().await;
        let elapsed = start.elapsed();

        // Assert
        assert!(elapsed >= Duration::from_millis(50));
        assert!(pacer.last_release.is_some());
    }

    #[test]
    fn test_default_interval() {
        // Arrange & Act
        let pacer = RequestPacer::default_interval();

        // Assert
        assert_eq!(pacer.min_interval, Duration::from_millis(25));
    }
}

//! Slider timer state machine.
//!
//! The index cycles through a fixed ring of [`SLIDE_COUNT`] positions,
//! wrapping at both ends. The auto-advance deadline is armed by
//! [`Slider::restart`] and is not touched by manual navigation.

use std::time::{Duration, Instant};

/// Number of slider positions.
pub const SLIDE_COUNT: usize = 10;

/// Default auto-advance interval.
pub const DEFAULT_SLIDE_INTERVAL: Duration = Duration::from_secs(9);

/// Slider index plus its auto-advance deadline.
#[derive(Debug, Clone)]
pub struct Slider {
    /// Current index in `0..SLIDE_COUNT`.
    index: usize,
    /// Auto-advance interval.
    interval: Duration,
    /// Next auto-advance, `None` while stopped.
    deadline: Option<Instant>,
}

impl Slider {
    /// Creates a stopped slider at index 0.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            index: 0,
            interval,
            deadline: None,
        }
    }

    /// Current index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Auto-advance interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Moves to `(index + 1) mod 10`.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn advance(&mut self) {
        self.index = (self.index + 1) % SLIDE_COUNT;
    }

    /// Moves to `(index - 1 + 10) mod 10`.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn retreat(&mut self) {
        self.index = (self.index + SLIDE_COUNT - 1) % SLIDE_COUNT;
    }

    /// Arms the timer so the next advance happens one interval after `now`.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = now.checked_add(self.interval);
    }

    /// Disarms the timer.
    pub const fn stop(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` while the timer is armed.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Advances if the deadline has passed. Returns `true` on advance.
    ///
    /// A late tick advances once and re-arms from `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.advance();
                self.restart(now);
                true
            }
            _ => false,
        }
    }

    /// The slide at the current index, if loaded.
    #[must_use]
    pub fn current<'a, T>(&self, slides: &'a [T]) -> Option<&'a T> {
        slides.get(self.index)
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new(DEFAULT_SLIDE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::arithmetic_side_effects)]

    use super::*;

    fn slider_at(index: usize) -> Slider {
        let mut slider = Slider::default();
        for _ in 0..index {
            slider.advance();
        }
        slider
    }

    #[test]
    fn test_initial_index_is_zero() {
        // Arrange & Act
        let slider = Slider::default();

        // Assert
        assert_eq!(slider.index(), 0);
        assert!(!slider.is_running());
    }

    #[test]
    fn test_advance_wraps_for_every_index() {
        for start in 0..SLIDE_COUNT {
            // Arrange
            let mut slider = slider_at(start);

            // Act
            slider.advance();

            // Assert
            assert_eq!(slider.index(), (start + 1) % 10);
        }
    }

    #[test]
    fn test_retreat_wraps_for_every_index() {
        for start in 0..SLIDE_COUNT {
            // Arrange
            let mut slider = slider_at(start);

            // Act
            slider.retreat();

            // Assert
            assert_eq!(slider.index(), (start + 10 - 1) % 10);
        }
    }

    #[test]
    fn test_tick_before_deadline_does_nothing() {
        // Arrange
        let start = Instant::now();
        let mut slider = Slider::default();
        slider.restart(start);

        // Act
        let advanced = slider.tick(start + Duration::from_millis(8_999));

        // Assert
        assert!(!advanced);
        assert_eq!(slider.index(), 0);
    }

    #[test]
    fn test_tick_advances_every_interval() {
        // Arrange
        let start = Instant::now();
        let mut slider = Slider::default();
        slider.restart(start);

        // Act
        let first = slider.tick(start + Duration::from_secs(9));
        let second = slider.tick(start + Duration::from_secs(18));

        // Assert
        assert!(first);
        assert!(second);
        assert_eq!(slider.index(), 2);
    }

    #[test]
    fn test_stopped_slider_never_ticks() {
        // Arrange
        let start = Instant::now();
        let mut slider = Slider::default();
        slider.restart(start);
        slider.stop();

        // Act
        let advanced = slider.tick(start + Duration::from_secs(60));

        // Assert
        assert!(!advanced);
    }

    #[test]
    fn test_manual_navigation_keeps_deadline() {
        // Arrange
        let start = Instant::now();
        let mut slider = Slider::default();
        slider.restart(start);

        // Act
        slider.advance();
        let advanced = slider.tick(start + Duration::from_secs(9));

        // Assert
        assert!(advanced);
        assert_eq!(slider.index(), 2);
    }

    #[test]
    fn test_current_with_short_list() {
        // Arrange
        let slides = vec!["a", "b", "c"];
        let mut slider = Slider::default();

        // Act
        let first = slider.current(&slides).copied();
        slider.retreat();
        let last = slider.current(&slides).copied();

        // Assert
        assert_eq!(first, Some("a"));
        assert_eq!(last, None);
    }
}

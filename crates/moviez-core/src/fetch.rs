//! Tagged fetch state with request tickets.
//!
//! A slot hands out a new [`Ticket`] whenever a request begins. Only the
//! response carrying the latest ticket is applied, so an older request
//! that resolves late can never overwrite a newer one.

/// Generic message for failed detail pages.
pub const DETAIL_FAILED: &str = "Failed to load movie details.";
/// Generic message for failed genre lists.
pub const GENRES_FAILED: &str = "Failed to load genres";
/// Generic message for failed discovery and category pages.
pub const MOVIES_FAILED: &str = "Failed to fetch movies";
/// Generic message for failed listing sections and the slider.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Tagged result of a fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Fetch<T> {
    /// Nothing requested yet (or input was absent).
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// Latest request succeeded.
    Ready(T),
    /// Latest request failed with a generic message.
    Failed(String),
}

impl<T> Fetch<T> {
    /// Returns the loaded value, if any.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` while a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Generation number identifying one request on one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Holds a [`Fetch`] and the ticket of its latest request.
#[derive(Debug, Clone)]
pub struct FetchSlot<T> {
    /// Current state.
    state: Fetch<T>,
    /// Ticket of the latest request.
    latest: u64,
    /// Message shown when the latest request fails.
    failure_message: &'static str,
}

impl<T> FetchSlot<T> {
    /// Creates an idle slot that reports failures with `failure_message`.
    #[must_use]
    pub const fn new(failure_message: &'static str) -> Self {
        Self {
            state: Fetch::Idle,
            latest: 0,
            failure_message,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &Fetch<T> {
        &self.state
    }

    /// Loaded value, if the latest request succeeded.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        self.state.ready()
    }

    /// Marks the slot loading and returns the ticket for the new request.
    ///
    /// Any ticket issued before this one becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.latest = self.latest.wrapping_add(1);
        self.state = Fetch::Loading;
        Ticket(self.latest)
    }

    /// Applies a response. Returns `false` when the ticket is stale and
    /// the response was dropped.
    pub fn resolve(&mut self, ticket: Ticket, result: anyhow::Result<T>) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest,
                "dropping stale response"
            );
            return false;
        }
        self.state = match result {
            Ok(value) => Fetch::Ready(value),
            Err(e) => {
                tracing::warn!("{}: {e:#}", self.failure_message);
                Fetch::Failed(String::from(self.failure_message))
            }
        };
        true
    }

    /// Returns to idle and invalidates outstanding tickets.
    pub fn reset(&mut self) {
        self.latest = self.latest.wrapping_add(1);
        self.state = Fetch::Idle;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use anyhow::anyhow;
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    #[test]
    fn test_new_slot_is_idle() {
        // Arrange & Act
        let slot: FetchSlot<u32> = FetchSlot::new(UNKNOWN_ERROR);

        // Assert
        assert_eq!(slot.state(), &Fetch::Idle);
        assert!(slot.ready().is_none());
    }

    #[test]
    fn test_begin_marks_loading() {
        // Arrange
        let mut slot: FetchSlot<u32> = FetchSlot::new(UNKNOWN_ERROR);

        // Act
        let _ticket = slot.begin();

        // Assert
        assert!(slot.state().is_loading());
    }

    #[test]
    fn test_resolve_current_ticket_applies_value() {
        // Arrange
        let mut slot = FetchSlot::new(UNKNOWN_ERROR);
        let ticket = slot.begin();

        // Act
        let applied = slot.resolve(ticket, Ok(7_u32));

        // Assert
        assert!(applied);
        assert_eq!(slot.ready(), Some(&7));
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        // Arrange
        let mut slot = FetchSlot::new(UNKNOWN_ERROR);
        let first = slot.begin();
        let second = slot.begin();

        // Act: the later request lands first, then the earlier one
        let second_applied = slot.resolve(second, Ok("second"));
        let first_applied = slot.resolve(first, Ok("first"));

        // Assert
        assert!(second_applied);
        assert!(!first_applied);
        assert_eq!(slot.ready(), Some(&"second"));
    }

    #[test]
    fn test_reset_invalidates_outstanding_ticket() {
        // Arrange
        let mut slot = FetchSlot::new(UNKNOWN_ERROR);
        let ticket = slot.begin();

        // Act
        slot.reset();
        let applied = slot.resolve(ticket, Ok(1_u8));

        // Assert
        assert!(!applied);
        assert_eq!(slot.state(), &Fetch::Idle);
    }

    #[test]
    fn test_failure_uses_generic_message() {
        // Arrange
        let mut slot: FetchSlot<u32> = FetchSlot::new(DETAIL_FAILED);
        let ticket = slot.begin();

        // Act
        slot.resolve(ticket, Err(anyhow!("TMDB API error (HTTP 404 Not Found)")));

        // Assert
        assert_eq!(slot.state().error(), Some(DETAIL_FAILED));
    }

    #[test]
    fn test_failure_is_logged_as_warning() {
        // Arrange
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().at_level(tracing::Level::WARN))
            .only()
            .run_with_handle();
        let mut slot: FetchSlot<u32> = FetchSlot::new(GENRES_FAILED);
        let ticket = slot.begin();

        // Act
        with_default(subscriber, || {
            slot.resolve(ticket, Err(anyhow!("connection refused")));
        });

        // Assert
        handle.assert_finished();
    }
}

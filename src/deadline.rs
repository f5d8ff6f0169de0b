//! Explicit solve deadlines.
//!
//! A [`Deadline`] is passed into every solving call. It is observed only at
//! fixed points: before the exact solver is entered and between 2-opt passes.
//! A running Held-Karp sweep is never interrupted.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

/// An optional wall-clock limit plus an optional cancellation token.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tsp::deadline::Deadline;
///
/// assert!(!Deadline::none().is_expired());
/// assert!(Deadline::none().remaining().is_none());
///
/// let d = Deadline::after(Duration::from_secs(60));
/// assert!(d.remaining().expect("bounded") > Duration::from_secs(59));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    at: Option<Instant>,
    token: Option<CancellationToken>,
}

impl Deadline {
    /// A deadline that never expires.
    pub fn none() -> Self {
        Self::default()
    }

    /// Expires `limit` from now.
    pub fn after(limit: Duration) -> Self {
        Self::at(Instant::now() + limit)
    }

    /// Expires at the given instant.
    pub fn at(instant: Instant) -> Self {
        Self {
            at: Some(instant),
            token: None,
        }
    }

    /// Also expires when `token` is cancelled.
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Returns `true` if a time limit or a token is attached.
    pub fn is_bounded(&self) -> bool {
        self.at.is_some() || self.token.is_some()
    }

    /// Returns `true` if the token was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.as_ref().is_some_and(|t| t.is_cancelled())
    }

    /// Time left before expiry. `None` when there is no time limit.
    ///
    /// A cancelled deadline reports zero remaining time.
    pub fn remaining(&self) -> Option<Duration> {
        if self.is_cancelled() {
            return Some(Duration::ZERO);
        }
        self.at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Returns `true` once the limit has passed or the token was cancelled.
    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|r| r.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded() {
        let d = Deadline::none();
        assert!(!d.is_bounded());
        assert!(!d.is_expired());
        assert_eq!(d.remaining(), None);
    }

    #[test]
    fn test_past_instant_is_expired() {
        let d = Deadline::at(Instant::now() - Duration::from_millis(5));
        assert!(d.is_bounded());
        assert!(d.is_expired());
        assert_eq!(d.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_token_cancellation() {
        let token = CancellationToken::new();
        let d = Deadline::none().with_token(token.clone());
        assert!(d.is_bounded());
        assert!(!d.is_expired());
        token.cancel();
        assert!(d.is_cancelled());
        assert!(d.is_expired());
        assert_eq!(d.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_clone_shares_token() {
        let token = CancellationToken::new();
        let d = Deadline::after(Duration::from_secs(60)).with_token(token.clone());
        let copy = d.clone();
        token.cancel();
        assert!(copy.is_expired());
    }
}

//! Two-state mode tracking for producers that flip between modes on a wake
//! signal (work/break timers and the like).

use std::time::{Duration, Instant};

/// An explicit two-state machine: the active state plus the instant it was
/// entered. The single transition is [`Toggle::flip`], typically driven by
/// the producer's own signal handling. State is in-memory only; a restarted
/// producer starts over in its initial mode.
#[derive(Debug, Clone)]
pub struct Toggle<M> {
    states: [M; 2],
    active: usize,
    since: Instant,
}

impl<M> Toggle<M> {
    pub fn new(initial: M, alternate: M) -> Self {
        Toggle { states: [initial, alternate], active: 0, since: Instant::now() }
    }

    pub fn current(&self) -> &M {
        &self.states[self.active]
    }

    /// Switch to the other state, restarting the clock.
    pub fn flip(&mut self) {
        self.active ^= 1;
        self.since = Instant::now();
    }

    pub fn since(&self) -> Instant {
        self.since
    }

    /// Time spent in the current state.
    pub fn elapsed(&self) -> Duration {
        self.since.elapsed()
    }
}

/// Format a duration the way producers display elapsed time:
/// `5s`, `4:05`, `3:04:05`, `2 days, 3:04:05`.
pub fn format_period(period: Duration) -> String {
    let total = period.as_secs();

    let (minutes, seconds) = (total / 60, total % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    let (days, hours) = (hours / 24, hours % 24);

    if days > 0 {
        format!("{} day{}, {}:{:02}:{:02}", days, if days > 1 { "s" } else { "" }, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}:{:02}", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod test {
    use super::{format_period, Toggle};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn flip_alternates_between_the_two_states() {
        let mut mode = Toggle::new("study", "play");
        assert_eq!(*mode.current(), "study");
        mode.flip();
        assert_eq!(*mode.current(), "play");
        mode.flip();
        assert_eq!(*mode.current(), "study");
    }

    #[test]
    fn flip_restarts_the_clock() {
        let mut mode = Toggle::new("study", "play");
        let before = mode.since();
        mode.flip();
        assert!(mode.since() >= before);
        assert!(mode.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn periods_format_like_the_bar_shows_them() {
        assert_eq!(format_period(Duration::from_secs(5)), "5s");
        assert_eq!(format_period(Duration::from_secs(4 * 60 + 5)), "4:05");
        assert_eq!(format_period(Duration::from_secs(3 * 3600 + 4 * 60 + 5)), "3:04:05");
        assert_eq!(format_period(Duration::from_secs(86400 + 3 * 3600 + 4 * 60 + 5)), "1 day, 3:04:05");
        assert_eq!(format_period(Duration::from_secs(2 * 86400 + 3 * 3600 + 4 * 60 + 5)), "2 days, 3:04:05");
        assert_eq!(format_period(Duration::ZERO), "0s");
    }
}

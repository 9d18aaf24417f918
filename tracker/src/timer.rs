use std::time::Duration;

pub const DEFAULT_TURN_DURATION: Duration = Duration::from_secs(90);

/// Table clock: total time played plus a countdown for the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTimer {
    running: bool,
    elapsed: Duration,
    turn_remaining: Duration,
    turn_duration: Duration,
}

impl Default for GameTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TURN_DURATION)
    }
}

impl GameTimer {
    pub fn new(turn_duration: Duration) -> Self {
        Self {
            running: false,
            elapsed: Duration::ZERO,
            turn_remaining: turn_duration,
            turn_duration,
        }
    }

    /// Starts the clock with a fresh turn countdown.
    pub fn resume(&mut self) {
        self.running = true;
        self.turn_remaining = self.turn_duration;
    }

    /// Halts the clock and resets the turn countdown. Game time is kept.
    pub fn stop(&mut self) {
        self.running = false;
        self.turn_remaining = self.turn_duration;
    }

    pub fn tick(&mut self, dt: Duration) {
        if !self.running {
            return;
        }
        self.elapsed += dt;
        self.turn_remaining = self.turn_remaining.saturating_sub(dt);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_started(&self) -> bool {
        self.running || !self.elapsed.is_zero()
    }

    pub fn turn_over(&self) -> bool {
        self.turn_remaining.is_zero()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn turn_remaining(&self) -> Duration {
        self.turn_remaining
    }

    pub fn format_game_time(&self) -> String {
        format_game_time(self.elapsed)
    }

    pub fn format_turn_time(&self) -> String {
        format_turn_time(self.turn_remaining)
    }
}

/// `MM:SS`, or `HH:MM:SS` once the game passes an hour.
pub fn format_game_time(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// `M:SS`, rounding partial seconds up so zero only shows when time is out.
pub fn format_turn_time(remaining: Duration) -> String {
    let mut total = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        total += 1;
    }
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_timer_does_not_advance() {
        let mut timer = GameTimer::default();
        timer.tick(Duration::from_secs(5));
        assert!(!timer.has_started());
        assert_eq!(timer.format_game_time(), "00:00");
        assert_eq!(timer.format_turn_time(), "1:30");
    }

    #[test]
    fn test_turn_counts_down_and_clamps() {
        let mut timer = GameTimer::default();
        timer.resume();
        timer.tick(Duration::from_millis(500));
        assert_eq!(timer.format_turn_time(), "1:30");
        timer.tick(Duration::from_secs(60));
        assert_eq!(timer.format_turn_time(), "0:30");
        timer.tick(Duration::from_secs(45));
        assert!(timer.turn_over());
        assert_eq!(timer.format_turn_time(), "0:00");
        assert_eq!(timer.format_game_time(), "01:45");
    }

    #[test]
    fn test_stop_resets_turn_and_keeps_game_time() {
        let mut timer = GameTimer::new(Duration::from_secs(30));
        timer.resume();
        timer.tick(Duration::from_secs(20));
        timer.stop();
        assert!(!timer.is_running());
        assert!(timer.has_started());
        assert_eq!(timer.turn_remaining(), Duration::from_secs(30));
        assert_eq!(timer.elapsed(), Duration::from_secs(20));
    }

    #[test]
    fn test_game_time_shows_hours() {
        assert_eq!(format_game_time(Duration::from_secs(3600 + 62)), "01:01:02");
        assert_eq!(format_game_time(Duration::from_secs(599)), "09:59");
    }
}

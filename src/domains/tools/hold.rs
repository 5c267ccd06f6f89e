//! Hold-and-replay timing.
//!
//! Pure timer comparisons against caller-supplied instants; nothing here
//! sleeps or schedules.

use std::time::{Duration, Instant};

/// Decides when a held trigger fires again.
#[derive(Debug, Clone)]
pub struct HoldTimer {
    hold: bool,
    replay: Option<Duration>,
    held: bool,
    last_fire: Option<Instant>,
}

impl HoldTimer {
    /// Create a timer for a tool with the given hold policy.
    pub fn new(hold: bool, replay: Option<Duration>) -> Self {
        Self {
            hold,
            // Replay is inert for tools that cannot be held.
            replay: if hold { replay } else { None },
            held: false,
            last_fire: None,
        }
    }

    /// Trigger pressed. Returns whether to fire now.
    pub fn on_trigger_down(&mut self, now: Instant) -> bool {
        if !self.hold {
            self.last_fire = Some(now);
            return true;
        }
        if self.held {
            // Already fired for this press.
            return false;
        }
        self.held = true;
        self.last_fire = Some(now);
        true
    }

    /// Periodic tick. Returns whether a held trigger should re-fire.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        if !self.held {
            return false;
        }
        let Some(replay) = self.replay else {
            return false;
        };
        let Some(last) = self.last_fire else {
            self.last_fire = Some(now);
            return true;
        };
        let elapsed = now.saturating_duration_since(last);
        if elapsed < replay {
            return false;
        }
        // Stay on the replay grid so tick lateness does not accumulate.
        self.last_fire = Some(if replay.is_zero() {
            now
        } else {
            let periods = u32::try_from(elapsed.as_nanos() / replay.as_nanos()).unwrap_or(u32::MAX);
            last + replay.saturating_mul(periods)
        });
        true
    }

    /// Trigger released. Cancels any pending replay.
    pub fn on_trigger_up(&mut self) {
        self.held = false;
    }

    /// Whether the trigger is currently held down on a hold tool.
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// When the last fire was due, if ever.
    ///
    /// Replays are scheduled on multiples of the replay interval from the
    /// press, so this can be slightly earlier than the tick that ran it.
    pub fn last_fire(&self) -> Option<Instant> {
        self.last_fire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_non_hold_fires_once_per_press() {
        let start = Instant::now();
        let mut timer = HoldTimer::new(false, Some(ms(10)));
        assert!(timer.on_trigger_down(start));
        assert!(!timer.is_held());
        for i in 1..20 {
            assert!(!timer.on_tick(start + ms(i * 10)));
        }
        timer.on_trigger_up();
    }

    #[test]
    fn test_hold_without_replay_fires_once() {
        let start = Instant::now();
        let mut timer = HoldTimer::new(true, None);
        assert!(timer.on_trigger_down(start));
        assert!(!timer.on_trigger_down(start + ms(5)));
        for i in 1..100 {
            assert!(!timer.on_tick(start + ms(i * 10)));
        }
    }

    #[test]
    fn test_hold_replays_at_interval() {
        let start = Instant::now();
        let mut timer = HoldTimer::new(true, Some(ms(100)));
        assert!(timer.on_trigger_down(start));
        assert!(!timer.on_tick(start + ms(50)));
        assert!(timer.on_tick(start + ms(100)));
        assert_eq!(timer.last_fire(), Some(start + ms(100)));
        assert!(!timer.on_tick(start + ms(150)));
        assert!(timer.on_tick(start + ms(210)));
        assert_eq!(timer.last_fire(), Some(start + ms(200)));
    }

    #[test]
    fn test_late_ticks_do_not_drift() {
        let start = Instant::now();
        // 30 Hz ticks against a 100ms replay.
        let tick = Duration::from_nanos(33_333_333);
        let mut timer = HoldTimer::new(true, Some(ms(100)));

        let mut fires = usize::from(timer.on_trigger_down(start));
        let mut now = start;
        for _ in 0..30 {
            now += tick;
            if timer.on_tick(now) {
                fires += 1;
            }
        }
        // Held for just under 1000ms.
        assert_eq!(fires, 10);
        assert_eq!(timer.last_fire(), Some(start + ms(900)));
    }

    #[test]
    fn test_long_stall_fires_once() {
        let start = Instant::now();
        let mut timer = HoldTimer::new(true, Some(ms(100)));
        timer.on_trigger_down(start);

        assert!(timer.on_tick(start + ms(350)));
        assert_eq!(timer.last_fire(), Some(start + ms(300)));
        assert!(!timer.on_tick(start + ms(360)));
        assert!(timer.on_tick(start + ms(400)));
    }

    #[test]
    fn test_zero_replay_fires_every_tick() {
        let start = Instant::now();
        let mut timer = HoldTimer::new(true, Some(Duration::ZERO));
        assert!(timer.on_trigger_down(start));
        for i in 1..10 {
            assert!(timer.on_tick(start + ms(i)));
        }
    }

    #[test]
    fn test_release_cancels_replay() {
        let start = Instant::now();
        let mut timer = HoldTimer::new(true, Some(ms(100)));
        timer.on_trigger_down(start);
        timer.on_trigger_up();
        assert!(!timer.is_held());
        assert!(!timer.on_tick(start + ms(500)));
    }

    #[test]
    fn test_fire_count_matches_hold_duration() {
        let start = Instant::now();
        let replay = ms(100);
        let mut timer = HoldTimer::new(true, Some(replay));

        let mut fires = usize::from(timer.on_trigger_down(start));
        for i in 1..=100 {
            if timer.on_tick(start + ms(i * 10)) {
                fires += 1;
            }
        }
        // Held for 1000ms with a 100ms replay.
        assert_eq!(fires, 1000 / 100 + 1);
    }
}

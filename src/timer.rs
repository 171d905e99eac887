use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source measured from an arbitrary start.
pub trait Clock {
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Default, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Drives DT and ST down at a fixed rate, however many instructions run in
/// between.
pub struct Timers {
    period: Duration,
    last_tick: Duration,
}

impl Timers {
    pub fn new(period: Duration, now: Duration) -> Self {
        Timers {
            period,
            last_tick: now,
        }
    }

    pub fn restart(&mut self, now: Duration) {
        self.last_tick = now;
    }

    /// Decrement both timers once if a full period has passed since the last
    /// decrement. Idle timers don't restart the period, so the first tick
    /// after loading one can come straight away.
    ///
    /// The time left over past the period carries into the next one. A clock
    /// that has fallen more than a period behind starts a fresh period.
    ///
    /// Returns true when the sound timer runs out on this tick.
    pub fn tick(&mut self, now: Duration, delay_timer: &mut u8, sound_timer: &mut u8) -> bool {
        if *delay_timer == 0 && *sound_timer == 0 {
            return false;
        }
        let elapsed = now.saturating_sub(self.last_tick);
        if elapsed < self.period {
            return false;
        }
        let beep = *sound_timer == 1;
        *delay_timer = delay_timer.saturating_sub(1);
        *sound_timer = sound_timer.saturating_sub(1);
        self.last_tick = if elapsed < self.period * 2 {
            self.last_tick + self.period
        } else {
            now
        };
        beep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(16);
    const STEP: Duration = Duration::from_millis(17);

    #[test]
    fn no_tick_inside_a_period() {
        let mut t = Timers::new(PERIOD, Duration::ZERO);
        let (mut dt, mut st) = (5, 0);
        t.tick(Duration::from_millis(10), &mut dt, &mut st);
        t.tick(Duration::from_millis(15), &mut dt, &mut st);
        assert_eq!(dt, 5);
        t.tick(PERIOD, &mut dt, &mut st);
        assert_eq!(dt, 4);
    }

    #[test]
    fn one_tick_per_exact_period() {
        let mut t = Timers::new(PERIOD, Duration::ZERO);
        let (mut dt, mut st) = (10, 0);
        let mut now = Duration::ZERO;
        for expected in (0..10).rev() {
            now += PERIOD;
            t.tick(now, &mut dt, &mut st);
            assert_eq!(dt, expected);
        }
    }

    #[test]
    fn leftover_time_carries_into_the_next_period() {
        let mut t = Timers::new(PERIOD, Duration::ZERO);
        let (mut dt, mut st) = (10, 0);
        // 24 ms then 8 ms: the second tick lands at 32 ms, two periods in
        t.tick(Duration::from_millis(24), &mut dt, &mut st);
        t.tick(Duration::from_millis(32), &mut dt, &mut st);
        assert_eq!(dt, 8);
    }

    #[test]
    fn long_stall_does_not_build_a_backlog() {
        let mut t = Timers::new(PERIOD, Duration::ZERO);
        let (mut dt, mut st) = (10, 0);
        let stall = Duration::from_secs(1);
        t.tick(stall, &mut dt, &mut st);
        t.tick(stall + Duration::from_millis(1), &mut dt, &mut st);
        assert_eq!(dt, 9);
        t.tick(stall + PERIOD, &mut dt, &mut st);
        assert_eq!(dt, 8);
    }

    #[test]
    fn counts_down_to_zero_and_stops() {
        let mut t = Timers::new(PERIOD, Duration::ZERO);
        let (mut dt, mut st) = (10, 3);
        let mut now = Duration::ZERO;
        for _ in 0..10 {
            now += STEP;
            t.tick(now, &mut dt, &mut st);
        }
        assert_eq!((dt, st), (0, 0));
        now += STEP;
        t.tick(now, &mut dt, &mut st);
        assert_eq!((dt, st), (0, 0));
    }

    #[test]
    fn beeps_once_as_sound_runs_out() {
        let mut t = Timers::new(PERIOD, Duration::ZERO);
        let (mut dt, mut st) = (0, 2);
        assert!(!t.tick(STEP, &mut dt, &mut st));
        assert!(t.tick(STEP * 2, &mut dt, &mut st));
        assert!(!t.tick(STEP * 3, &mut dt, &mut st));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::default();
        let handle = clock.clone();
        handle.advance(STEP);
        assert_eq!(clock.now(), STEP);
    }
}

use std::time::Duration;

/// Timers and sound run at a fixed 60Hz.
pub const TIMER_FREQUENCY: u16 = 60;
/// Pause between loop iterations.
pub const LOOP_QUANTUM: Duration = Duration::from_micros(100);

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// What should run in the current loop iteration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ticks {
    pub timers: bool,
    pub cpu: bool,
}

/// Elapsed time counted in nanoseconds times the frequency, so that one
/// period is always exactly a second's worth of nanoseconds and periods
/// like 1/60 s do not lose a fraction of a nanosecond per tick.
#[derive(Debug, Clone)]
struct Accumulator {
    frequency: u128,
    scaled: u128,
}

impl Accumulator {
    fn new(frequency: u16) -> Accumulator {
        Accumulator {
            frequency: frequency as u128,
            scaled: 0,
        }
    }

    fn add(&mut self, elapsed: Duration) {
        self.scaled += elapsed.as_nanos() * self.frequency;
    }

    /// Take one period out if a whole one has accumulated.
    fn fire(&mut self) -> bool {
        if self.scaled < NANOS_PER_SEC {
            return false;
        }
        self.scaled -= NANOS_PER_SEC;
        true
    }
}

/// Turns elapsed wall time into CPU and timer ticks.
///
/// Each accumulator fires at most once per call, and only gives back one period
/// when it does, so any surplus carries over to later calls instead of bursting.
#[derive(Debug, Clone)]
pub struct Scheduler {
    rate: u16,
    cpu: Accumulator,
    timers: Accumulator,
}

impl Scheduler {
    /// A scheduler running the CPU at `rate` instructions per second.
    pub fn new(rate: u16) -> Scheduler {
        let rate = std::cmp::max(rate, 1);
        Scheduler {
            rate,
            cpu: Accumulator::new(rate),
            timers: Accumulator::new(TIMER_FREQUENCY),
        }
    }

    /// Time between CPU ticks, rounded down to whole nanoseconds.
    pub fn cpu_period(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.rate as u64)
    }

    /// Account for `elapsed` time and report which ticks are due.
    pub fn advance(&mut self, elapsed: Duration) -> Ticks {
        self.cpu.add(elapsed);
        self.timers.add(elapsed);

        Ticks {
            timers: self.timers.fire(),
            cpu: self.cpu.fire(),
        }
    }
}

use std::thread;
use std::time::Duration;

/// Moments in an opponent turn where a shell may pause for effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beat {
    Thinking,
    Reveal,
}

/// Cosmetic delay hook. Called by the shell between engine calls; the
/// engine never waits on it.
pub trait Pacing {
    fn pause(&mut self, beat: Beat);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacing for NoPacing {
    fn pause(&mut self, _: Beat) {}
}

#[derive(Debug, Clone, Copy)]
pub struct SleepPacing {
    think: Duration,
}

impl SleepPacing {
    pub fn new(think: Duration) -> Self {
        Self { think }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn delay_for(&self, beat: Beat) -> Duration {
        match beat {
            Beat::Thinking => self.think,
            Beat::Reveal => self.think * 2 / 3,
        }
    }
}

impl Pacing for SleepPacing {
    fn pause(&mut self, beat: Beat) {
        let delay = self.delay_for(beat);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

/// A monotonic time source for device session accounting.
///
/// `now` is measured from the clock's own origin, so only differences between
/// readings carry meaning.
pub trait Clock {
    /// Returns the time elapsed since the clock's origin.
    fn now(&self) -> Duration;

    /// Lets `duration` pass on this clock.
    fn wait(&self, duration: Duration);
}

/// Wall-clock time source backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose origin is the moment of construction.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Blocks the current thread for `duration`.
    fn wait(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// A simulation clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle while the
/// [`HomeContext`](super::context::HomeContext) owns another.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use smart_home_sim::sim::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(Duration::from_secs(90));
/// assert_eq!(clock.now(), Duration::from_secs(90));
/// ```
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }

    /// Sets the reading to `at`.
    ///
    /// Moving backwards is ignored; the clock is monotonic.
    pub fn set(&self, at: Duration) {
        if at > self.now.get() {
            self.now.set(at);
        }
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualClock")
            .field("now", &self.now.get())
            .finish()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn wait(&self, duration: Duration) {
        self.advance(duration);
    }
}

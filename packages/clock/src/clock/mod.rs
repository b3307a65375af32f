use std::time::Duration;

use lanswarm_primitives::DurationSinceUnixEpoch;

use self::stopped::StoppedClock;
use self::working::WorkingClock;

pub mod stopped;
pub mod working;

/// A clock. `T` selects where the time comes from.
#[derive(Debug)]
pub struct Clock<T> {
    clock: std::marker::PhantomData<T>,
}

/// Reads the system time.
pub type Working = Clock<WorkingClock>;
/// Returns a fixed time that tests can move.
pub type Stopped = Clock<StoppedClock>;

/// Trait for types that can be used as a timestamp clock.
pub trait Time: Sized {
    fn now() -> DurationSinceUnixEpoch;

    fn dbg_clock_type() -> String;

    #[must_use]
    fn now_add(add_time: &Duration) -> Option<DurationSinceUnixEpoch> {
        Self::now().checked_add(*add_time)
    }

    #[must_use]
    fn now_sub(sub_time: &Duration) -> Option<DurationSinceUnixEpoch> {
        Self::now().checked_sub(*sub_time)
    }

    /// The oldest timestamp still considered fresh for a maximum age of
    /// `max_age`. Saturates at the Unix Epoch.
    #[must_use]
    fn cutoff(max_age: &Duration) -> DurationSinceUnixEpoch {
        Self::now_sub(max_age).unwrap_or_default()
    }
}

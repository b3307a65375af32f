/// Marker for the clock stopped at a thread local time.
#[allow(clippy::module_name_repetitions)]
pub struct StoppedClock {}

/// Controls for the stopped clock. Every thread owns its own time, so
/// parallel tests do not interfere with each other.
#[allow(clippy::module_name_repetitions)]
pub trait Stopped: clock::Time {
    /// Sets the clock to `unix_time`.
    fn local_set(unix_time: &DurationSinceUnixEpoch);

    fn local_set_to_unix_epoch() {
        Self::local_set(&DurationSinceUnixEpoch::ZERO);
    }

    fn local_set_to_app_start_time();

    /// Moves the clock forward.
    ///
    /// # Errors
    ///
    /// Will return `IntErrorKind::PosOverflow` if the clock would overflow.
    fn local_add(duration: &Duration) -> Result<(), IntErrorKind>;

    /// Moves the clock backwards.
    ///
    /// # Errors
    ///
    /// Will return `IntErrorKind::NegOverflow` if the clock would go before the epoch.
    fn local_sub(duration: &Duration) -> Result<(), IntErrorKind>;

    /// Back to the default: the epoch when testing, the start time otherwise.
    fn local_reset();
}

use std::num::IntErrorKind;
use std::time::Duration;

use super::{DurationSinceUnixEpoch, Time};
use crate::clock;

impl Time for clock::Stopped {
    fn now() -> DurationSinceUnixEpoch {
        detail::FIXED_TIME.with(|time| *time.borrow())
    }

    fn dbg_clock_type() -> String {
        "Stopped".to_owned()
    }
}

impl Stopped for clock::Stopped {
    fn local_set(unix_time: &DurationSinceUnixEpoch) {
        detail::FIXED_TIME.with(|time| {
            *time.borrow_mut() = *unix_time;
        });
    }

    fn local_set_to_app_start_time() {
        Self::local_set(&detail::get_app_start_time());
    }

    fn local_add(duration: &Duration) -> Result<(), IntErrorKind> {
        detail::FIXED_TIME.with(|time| {
            let moved = time.borrow().checked_add(*duration).ok_or(IntErrorKind::PosOverflow)?;
            *time.borrow_mut() = moved;
            Ok(())
        })
    }

    fn local_sub(duration: &Duration) -> Result<(), IntErrorKind> {
        detail::FIXED_TIME.with(|time| {
            let moved = time.borrow().checked_sub(*duration).ok_or(IntErrorKind::NegOverflow)?;
            *time.borrow_mut() = moved;
            Ok(())
        })
    }

    fn local_reset() {
        Self::local_set(&detail::get_default_fixed_time());
    }
}


mod detail {
    use std::cell::RefCell;
    use std::time::SystemTime;

    use lanswarm_primitives::DurationSinceUnixEpoch;

    use crate::static_time;

    thread_local!(pub static FIXED_TIME: RefCell<DurationSinceUnixEpoch> = RefCell::new(get_default_fixed_time()));

    pub fn get_app_start_time() -> DurationSinceUnixEpoch {
        (*static_time::TIME_AT_APP_START)
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
    }

    #[cfg(not(test))]
    pub fn get_default_fixed_time() -> DurationSinceUnixEpoch {
        get_app_start_time()
    }

    #[cfg(test)]
    pub fn get_default_fixed_time() -> DurationSinceUnixEpoch {
        DurationSinceUnixEpoch::ZERO
    }

}

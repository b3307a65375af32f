//! The time the process started.
//!
//! The stopped clock starts from this instant outside of tests.
use std::time::SystemTime;

lazy_static! {
    /// Captured the first time it is dereferenced. `app::start` touches it
    /// during start-up.
    pub static ref TIME_AT_APP_START: SystemTime = SystemTime::now();
}

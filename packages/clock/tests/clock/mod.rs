use std::time::Duration;

use lanswarm_clock::clock::stopped::Stopped as _;
use lanswarm_clock::clock::Time;

use crate::CurrentClock;

#[test]
fn it_should_use_stopped_time_for_testing() {
    assert_eq!(CurrentClock::dbg_clock_type(), "Stopped".to_owned());

    let time = CurrentClock::now();
    std::thread::sleep(Duration::from_millis(50));
    let time_2 = CurrentClock::now();

    assert_eq!(time, time_2);
}

#[test]
fn a_peer_seen_before_the_cutoff_should_be_considered_stale() {
    CurrentClock::local_set(&Duration::from_secs(10_000));
    let last_seen = CurrentClock::now();

    CurrentClock::local_add(&Duration::from_secs(301)).unwrap();

    assert!(last_seen < CurrentClock::cutoff(&Duration::from_secs(300)));

    CurrentClock::local_reset();
}

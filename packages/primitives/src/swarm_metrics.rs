use std::ops::AddAssign;

/// Aggregate values for all swarms held by the `Tracker`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct SwarmsMetrics {
    /// Total number of swarms (content hashes with at least one peer).
    pub swarms: u64,
    /// Total number of peer records across all swarms.
    pub peers: u64,
}

impl AddAssign for SwarmsMetrics {
    fn add_assign(&mut self, rhs: Self) {
        self.swarms += rhs.swarms;
        self.peers += rhs.peers;
    }
}

//! Runtime statistics.

/// Counters recorded while framing.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct FramerStats {
    /// Number of frame sync sequences detected.
    pub syncs: usize,
    /// Number of messages dispatched to the listener.
    pub messages: usize,
    /// Number of sync detections dropped because no assembler was free.
    pub pool_exhausted: usize,
}

impl FramerStats {
    /// Merge in the stats from the given object and clear the other stats.
    pub fn merge(&mut self, other: &mut FramerStats) {
        self.syncs += other.syncs;
        self.messages += other.messages;
        self.pool_exhausted += other.pool_exhausted;

        other.clear();
    }

    /// Clear all counters.
    pub fn clear(&mut self) {
        *self = FramerStats::default();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_merge() {
        let mut a = FramerStats {
            syncs: 2,
            messages: 1,
            pool_exhausted: 0,
        };

        let mut b = FramerStats {
            syncs: 3,
            messages: 2,
            pool_exhausted: 1,
        };

        a.merge(&mut b);

        assert_eq!(a.syncs, 5);
        assert_eq!(a.messages, 3);
        assert_eq!(a.pool_exhausted, 1);
        assert_eq!(b, FramerStats::default());
    }
}

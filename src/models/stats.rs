//! Session and lifetime pull counters

/// Aggregate counters kept in memory only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Lifetime confirmed pulls
    pub total_pulls: u32,
    /// Pulls since the last session boundary
    pub session_pulls: u32,
    /// Session boundaries crossed with at least one pull
    pub session_count: u32,
}

impl SessionStats {
    /// Start from a lifetime total restored from history
    pub fn with_total(total_pulls: u32) -> Self {
        Self {
            total_pulls,
            ..Self::default()
        }
    }

    /// Count one confirmed pull, returning the new lifetime total
    pub fn record_pull(&mut self) -> u32 {
        self.total_pulls += 1;
        self.session_pulls += 1;
        self.total_pulls
    }

    /// Close the current session. Empty sessions are not counted.
    pub fn end_session(&mut self) -> bool {
        let counted = self.session_pulls > 0;
        if counted {
            self.session_count += 1;
        }
        self.session_pulls = 0;
        counted
    }

    pub fn average_pulls(&self) -> f64 {
        if self.session_count == 0 {
            0.0
        } else {
            self.total_pulls as f64 / self.session_count as f64
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

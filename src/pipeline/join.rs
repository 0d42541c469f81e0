/// Progress of the load fan-in join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinStatus {
    /// Loads are still outstanding and none has failed.
    Waiting {
        /// Successful loads so far.
        completed: usize,
        /// Loads expected in total.
        total: usize,
    },
    /// Every load completed successfully.
    Ready,
    /// At least one load failed; the join will never become ready.
    Stalled {
        /// Successful loads so far.
        completed: usize,
        /// Failed loads so far.
        failed: usize,
        /// Loads expected in total.
        total: usize,
    },
}

/// Counts load completions against a known total.
///
/// Failures are counted separately and never contribute to completion, so
/// one failed load keeps the join from ever becoming ready. The outcome is
/// reported as [`JoinStatus::Stalled`] instead of an indistinguishable wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadJoin {
    total: usize,
    completed: usize,
    failed: usize,
}

impl LoadJoin {
    /// Join waiting for `total` loads.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            failed: 0,
        }
    }

    /// Count one successful load.
    pub fn record_success(&mut self) {
        self.completed += 1;
    }

    /// Count one failed load.
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> JoinStatus {
        if self.failed > 0 {
            JoinStatus::Stalled {
                completed: self.completed,
                failed: self.failed,
                total: self.total,
            }
        } else if self.completed >= self.total {
            JoinStatus::Ready
        } else {
            JoinStatus::Waiting {
                completed: self.completed,
                total: self.total,
            }
        }
    }

    /// Whether every load completed successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status() == JoinStatus::Ready
    }

    /// Loads that have not reported in either way.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.total.saturating_sub(self.completed + self.failed)
    }
}

use tracing::{info, warn};

/// Number of checkpoints in an onboarding run.
pub const TOTAL_STEPS: u16 = 4;

/// Counts completed onboarding phases. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    completed: u16,
    total: u16,
}

impl Default for Progress {
    fn default() -> Self {
        Self { completed: 0, total: TOTAL_STEPS }
    }
}

impl Progress {
    pub fn completed(&self) -> u16 {
        self.completed
    }

    pub fn total(&self) -> u16 {
        self.total
    }

    pub fn is_done(&self) -> bool {
        self.completed == self.total
    }

    /// Mark one more phase as completed and log it. Saturates at the total.
    pub fn advance(&mut self) -> (u16, u16) {
        if self.is_done() {
            warn!(total = self.total, "Progress already complete, not advancing");
        } else {
            self.completed += 1;
            info!("Progress: step {}/{} completed", self.completed, self.total);
        }

        (self.completed, self.total)
    }
}

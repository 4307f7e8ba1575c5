//! Outcome types for completed operations.

use serde::{Deserialize, Serialize};
use strum::Display;

/// The type of operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum OperationType {
    Copy,
    Move,
    Delete,
}

/// Result of a batch that ran to the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationComplete {
    /// The type of operation.
    pub operation_type: OperationType,
    /// Number of sources processed.
    pub succeeded: usize,
    /// Number of sources that no longer existed and were skipped.
    pub skipped: usize,
}

impl OperationComplete {
    /// Create an empty outcome for an operation.
    pub fn new(operation_type: OperationType) -> Self {
        Self {
            operation_type,
            succeeded: 0,
            skipped: 0,
        }
    }

    /// Total number of sources looked at.
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped
    }

    /// Get a human-readable summary of the operation.
    pub fn summary(&self) -> String {
        let action = match self.operation_type {
            OperationType::Copy => "Copied",
            OperationType::Move => "Moved",
            OperationType::Delete => "Deleted",
        };

        if self.skipped == 0 {
            format!("{} {} items", action, self.succeeded)
        } else {
            format!("{} {} items, {} skipped", action, self.succeeded, self.skipped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let mut outcome = OperationComplete::new(OperationType::Copy);
        outcome.succeeded = 2;
        assert_eq!(outcome.summary(), "Copied 2 items");

        outcome.skipped = 1;
        assert_eq!(outcome.summary(), "Copied 2 items, 1 skipped");
        assert_eq!(outcome.total(), 3);
    }
}

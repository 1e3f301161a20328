use thiserror::Error;

use crate::safety::InvariantReport;

#[derive(Debug, Error)]
pub enum PhylogenyError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("id out of range: {0}")]
    OutOfRange(String),
    #[error("inactive character: {0}")]
    InactiveCharacter(String),
    #[error("invariant violation during {operation}: {report}")]
    InvariantViolation {
        operation: String,
        report: InvariantReport,
    },
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl PhylogenyError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        PhylogenyError::InvalidInput(msg.into())
    }

    pub fn out_of_range<T: Into<String>>(msg: T) -> Self {
        PhylogenyError::OutOfRange(msg.into())
    }

    pub fn inactive_character<T: Into<String>>(msg: T) -> Self {
        PhylogenyError::InactiveCharacter(msg.into())
    }

    pub fn invariant<T: Into<String>>(operation: T, report: InvariantReport) -> Self {
        PhylogenyError::InvariantViolation {
            operation: operation.into(),
            report,
        }
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        PhylogenyError::Io(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PhylogenyError::Serialization(msg.into())
    }

    /// True for the programming-error class that must abort a run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PhylogenyError::OutOfRange(_)
                | PhylogenyError::InactiveCharacter(_)
                | PhylogenyError::InvariantViolation { .. }
        )
    }
}

//! Outcome of one sandboxed run.

use crate::error::GradeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    Success { stdout: String },
    Failure { diagnostic: String },
}

impl ExecutionResult {
    pub fn success(stdout: impl Into<String>) -> Self {
        ExecutionResult::Success { stdout: stdout.into() }
    }

    pub fn failure(diagnostic: impl Into<String>) -> Self {
        ExecutionResult::Failure { diagnostic: diagnostic.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }
}

impl From<GradeError> for ExecutionResult {
    fn from(err: GradeError) -> Self {
        ExecutionResult::failure(err.to_string())
    }
}

//! Grading failure taxonomy.
//!
//! Every variant ends up as a zero score with its `Display` text as feedback.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GradeError {
    #[error("Error reading notebook file: {0}")]
    DocumentRead(#[from] DocumentReadError),

    #[error(
        "The GA parameters were not set. Please complete the configuration in the `run_moead_heatsink` function."
    )]
    ConfigurationIncomplete,

    #[error("Code execution timed out after {} seconds.", .0.as_secs())]
    ExecutionTimeout(Duration),

    #[error("Code execution failed with an error:\n{stderr}")]
    ExecutionFailed { stderr: String },

    #[error("An unexpected error occurred during execution: {0}")]
    Launch(#[source] std::io::Error),

    #[error(transparent)]
    OutputParse(#[from] OutputParseError),
}

#[derive(Debug, Error)]
pub enum DocumentReadError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("not a valid notebook: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputParseError {
    #[error(
        "Could not find the 'Ideal point: z' in the output. Make sure the algorithm runs to completion."
    )]
    MarkerNotFound,

    #[error("Could not parse the ideal point values from the output.")]
    ValueUnparsable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_mentions_seconds() {
        let msg = GradeError::ExecutionTimeout(Duration::from_secs(240)).to_string();
        assert_eq!(msg, "Code execution timed out after 240 seconds.");
    }

    #[test]
    fn failed_message_keeps_stderr_verbatim() {
        let stderr = "Traceback (most recent call last):\n  File \"<string>\", line 1\nNameError: x\n";
        let msg = GradeError::ExecutionFailed { stderr: stderr.into() }.to_string();
        assert!(msg.ends_with(stderr));
    }
}

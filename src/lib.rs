pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod grader;
pub mod logging;
pub mod notebook;
pub mod pipeline;
pub mod process;
pub mod report;

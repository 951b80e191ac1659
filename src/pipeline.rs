//! Extract → run → grade, with every failure folded into a zero score.

use std::path::Path;

use tracing::{info, warn};

use crate::{
    error::GradeError,
    execution::ExecutionResult,
    grader::{self, GradeReport},
    notebook::{self, ExtractedProgram, NotebookDocument},
    process::Runner,
};

/// Read the notebook, extract its program and apply the configuration gate.
pub fn prepare(path: &Path) -> Result<ExtractedProgram, GradeError> {
    let doc = NotebookDocument::read(path)?;
    let program = notebook::extract_program(&doc);
    notebook::check_configured(&program)?;
    Ok(program)
}

/// One full grading run. Always returns a report.
pub async fn grade_notebook(path: &Path, runner: &Runner) -> GradeReport {
    let program = match prepare(path) {
        Ok(p) => p,
        Err(err) => {
            warn!(error = %err, "grading stopped before execution");
            return GradeReport::zero(err.to_string());
        }
    };
    info!(bytes = program.len(), md5 = %program.fingerprint(), "running student program");

    let result: ExecutionResult = runner.run(&program).await;
    let report = grader::grade(&result);
    info!(executed = result.is_success(), score = report.score, "grading complete");
    report
}

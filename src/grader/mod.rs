//! Result grading: locate the final ideal point in captured stdout and map
//! its relative error to a 0..=10 score.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use crate::{
    error::{GradeError, OutputParseError},
    execution::ExecutionResult,
};

/// Expected first objective (thermal resistance) of the ideal point.
pub const TARGET_F1: f64 = 0.005;
/// Relative error still awarded full marks.
pub const TOLERANCE: f64 = 0.10;
pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    pub score: f64,
    pub feedback: String,
}

impl GradeReport {
    pub fn zero(feedback: impl Into<String>) -> Self {
        Self { score: 0.0, feedback: feedback.into() }
    }
}

fn ideal_point_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Coordinates are captured loosely; a malformed last line must fail
        // to parse rather than let an earlier line win.
        Regex::new(r"(?i)Ideal point: z = \[\s*([^,\]\s]+)\s*,\s*([^,\]\s]+)\s*\]")
            .expect("ideal point pattern is valid")
    })
}

/// First coordinate of the last `Ideal point: z = [a, b]` line in `output`.
pub fn find_ideal_point(output: &str) -> Result<f64, OutputParseError> {
    let re = ideal_point_pattern();
    let mut matches = 0usize;
    let mut last = None;
    for caps in re.captures_iter(output) {
        matches += 1;
        last = Some(caps);
    }
    debug!(matches, "ideal point lines found");

    let caps = last.ok_or(OutputParseError::MarkerNotFound)?;
    let raw = caps.get(1).map(|m| m.as_str()).ok_or(OutputParseError::ValueUnparsable)?;
    let value = raw
        .parse::<f64>()
        .map_err(|_| OutputParseError::ValueUnparsable)?;
    if !value.is_finite() {
        return Err(OutputParseError::ValueUnparsable);
    }
    Ok(value)
}

/// `|value - target| / target`, infinite when the target is zero.
pub fn relative_error(value: f64, target: f64) -> f64 {
    if target == 0.0 {
        return f64::INFINITY;
    }
    (value - target).abs() / target
}

/// Full marks inside the tolerance band, linear decay to zero at 100 % error.
pub fn score_for_error(error: f64) -> f64 {
    let score = if error <= TOLERANCE {
        MAX_SCORE
    } else if error < 1.0 {
        MAX_SCORE * (1.0 - (error - TOLERANCE) / (1.0 - TOLERANCE))
    } else {
        0.0
    };
    round2(score)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn feedback(student_f1: f64, error: f64, score: f64) -> String {
    format!(
        "Grading based on the final Thermal Resistance (f1) in the ideal point.\n\
         Target f1: ~{TARGET_F1:.3}\n\
         Your Final f1: {student_f1:.3}\n\
         Error: {:.2}%\n\
         Score: {score:?}/10",
        error * 100.0
    )
}

/// Grade captured stdout directly.
pub fn grade_output(stdout: &str) -> GradeReport {
    let student_f1 = match find_ideal_point(stdout) {
        Ok(v) => v,
        Err(err) => return GradeReport::zero(GradeError::from(err).to_string()),
    };
    let error = relative_error(student_f1, TARGET_F1);
    let score = score_for_error(error);
    info!(student_f1, error, score, "graded");
    GradeReport { score, feedback: feedback(student_f1, error, score) }
}

pub fn grade(result: &ExecutionResult) -> GradeReport {
    match result {
        ExecutionResult::Failure { diagnostic } => GradeReport::zero(diagnostic.clone()),
        ExecutionResult::Success { stdout } => grade_output(stdout),
    }
}

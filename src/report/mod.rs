//! JSON report consumed by the grading platform.
//!
//! Shape: `{"tests": [{"name", "score", "max_score", "output"}]}`. Key names
//! and the single-element array are part of the contract.

use std::io::{self, Write};

use serde::Serialize;

use crate::grader::GradeReport;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestReport {
    pub tests: Vec<TestResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub score: f64,
    pub max_score: u32,
    pub output: String,
}

impl TestReport {
    pub fn single(name: impl Into<String>, grade: GradeReport) -> Self {
        Self {
            tests: vec![TestResult {
                name: name.into(),
                score: grade.score,
                max_score: 10,
                output: grade.feedback,
            }],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// One line of JSON on `out`.
    pub fn print_to(&self, mut out: impl Write) -> io::Result<()> {
        serde_json::to_writer(&mut out, self)?;
        writeln!(out)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_shape() {
        let report = TestReport::single(
            "Heat Sink Multi-Objective Optimization",
            GradeReport { score: 5.56, feedback: "line one\nline two".into() },
        );
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "tests": [{
                    "name": "Heat Sink Multi-Objective Optimization",
                    "score": 5.56,
                    "max_score": 10,
                    "output": "line one\nline two"
                }]
            })
        );
    }

    #[test]
    fn test_print_writes_single_line() {
        let report = TestReport::single("t", GradeReport::zero("timed out"));
        let mut buf = Vec::new();
        report.print_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with(r#"{"tests":[{"name":"t","score":0.0,"max_score":10,"#));
    }
}

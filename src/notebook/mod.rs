//! Notebook reading and program extraction.
//!
//! A notebook is consumed as an ordered list of cells; only `code` cells
//! contribute to the extracted program. Instructor placeholders are swapped
//! for a no-op so unfinished templates still parse.

use std::{fs, path::Path, sync::OnceLock};

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{DocumentReadError, GradeError};

/// Sentinel comment left in the homework template where students write code.
pub const PLACEHOLDER_MARKER: &str = "# YOUR CODE HERE";

/// Source literal that shows the GA parameters were left at the template default.
pub const UNCONFIGURED_LITERAL: &str = "n_subproblems = 1";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotebookDocument {
    #[serde(default)]
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Cell {
    pub cell_type: String,
    #[serde(default)]
    pub source: CellSource,
}

/// nbformat v4 allows `source` as one string or as a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl Default for CellSource {
    fn default() -> Self {
        CellSource::Text(String::new())
    }
}

impl CellSource {
    pub fn text(&self) -> String {
        match self {
            CellSource::Text(s) => s.clone(),
            CellSource::Lines(lines) => lines.concat(),
        }
    }
}

impl Cell {
    pub fn is_code(&self) -> bool {
        self.cell_type == "code"
    }
}

impl NotebookDocument {
    pub fn read(path: &Path) -> Result<Self, DocumentReadError> {
        let text = fs::read_to_string(path).map_err(|source| DocumentReadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let doc = Self::parse(&text)?;
        info!(path = %path.display(), cells = doc.cells.len(), "notebook loaded");
        Ok(doc)
    }

    pub fn parse(text: &str) -> Result<Self, DocumentReadError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn code_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_code())
    }
}

/// Concatenated source of every code cell, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedProgram {
    source: String,
}

impl ExtractedProgram {
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Hex md5 of the source, logged so repeated extractions can be compared.
    pub fn fingerprint(&self) -> String {
        format!("{:x}", md5::compute(self.source.as_bytes()))
    }
}

impl From<String> for ExtractedProgram {
    fn from(source: String) -> Self {
        Self { source }
    }
}

fn placeholder_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"(?m)^([ \t]*).*{}.*$",
            regex::escape(PLACEHOLDER_MARKER)
        );
        Regex::new(&pattern).expect("placeholder pattern is valid")
    })
}

/// Replace each line containing the placeholder marker with `1`, keeping
/// the line's indentation.
///
/// This deliberately does not write `1` at column 0: that turns an indented
/// placeholder into an `IndentationError`, while keeping the indentation lets
/// the template still parse.
pub fn sanitize_placeholders(source: &str) -> String {
    placeholder_pattern()
        .replace_all(source, "${1}1")
        .into_owned()
}

pub fn extract_program(doc: &NotebookDocument) -> ExtractedProgram {
    let mut full = String::new();
    let mut cells = 0usize;
    let mut substituted = 0usize;
    for cell in doc.code_cells() {
        let text = cell.source.text();
        substituted += placeholder_pattern().find_iter(&text).count();
        full.push_str(&sanitize_placeholders(&text));
        full.push('\n');
        cells += 1;
    }
    let program = ExtractedProgram::from(full);
    debug!(
        code_cells = cells,
        placeholders = substituted,
        bytes = program.len(),
        md5 = %program.fingerprint(),
        "program extracted"
    );
    program
}

/// Static gate run before paying for a subprocess.
pub fn check_configured(program: &ExtractedProgram) -> Result<(), GradeError> {
    if program.as_str().contains(UNCONFIGURED_LITERAL) {
        return Err(GradeError::ConfigurationIncomplete);
    }
    Ok(())
}

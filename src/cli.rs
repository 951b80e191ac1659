use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "nbgrade", about = "Grade the heat sink optimization notebook", version)]
#[command(group(ArgGroup::new("mode").args(["extract_only", "from_output"]).multiple(false)))]
pub struct Cli {
    /// Notebook to grade (defaults to NOTEBOOK_PATH or L9_Pareto_CaseStudy_Homework.ipynb).
    #[arg(value_name = "NOTEBOOK")]
    pub notebook: Option<PathBuf>,

    /// Python interpreter used to run the extracted program.
    #[arg(long = "python", value_name = "EXE")]
    pub python: Option<String>,

    /// Wall-clock limit for the student program, in seconds.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Test name reported to the grading platform.
    #[arg(long = "name")]
    pub name: Option<String>,

    /// Print the extracted program instead of grading it.
    #[arg(long = "extract-only")]
    pub extract_only: bool,

    /// Grade previously captured program output instead of running the notebook.
    #[arg(long = "from-output", value_name = "FILE")]
    pub from_output: Option<PathBuf>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

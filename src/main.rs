use std::{
    fs,
    io::{self, Write},
};

use anyhow::{Context, Result};
use nbgrade::{
    cli,
    config::Config,
    error::GradeError,
    grader::{self, GradeReport},
    logging,
    notebook::{self, NotebookDocument},
    pipeline,
    process::Runner,
    report::TestReport,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // CLI flags override the rc file and environment
    let mut cfg = Config::load();
    if let Some(path) = &args.notebook {
        cfg.set("NOTEBOOK_PATH", path.to_string_lossy());
    }
    if let Some(python) = &args.python {
        cfg.set("PYTHON_INTERPRETER", python.as_str());
    }
    if let Some(secs) = args.timeout {
        cfg.set("EXECUTION_TIMEOUT", secs.to_string());
    }
    if let Some(name) = &args.name {
        cfg.set("TEST_NAME", name.as_str());
    }

    logging::init(&cfg.log_filter());
    tracing::debug!(config = %cfg.config_path.display(), "configuration loaded");

    let notebook_path = cfg.notebook_path();

    let grade = if let Some(path) = &args.from_output {
        match fs::read_to_string(path) {
            Ok(text) => grader::grade_output(&text),
            Err(e) => GradeReport::zero(format!(
                "Could not read captured output '{}': {}",
                path.display(),
                e
            )),
        }
    } else if args.extract_only {
        match NotebookDocument::read(&notebook_path) {
            Ok(doc) => {
                let program = notebook::extract_program(&doc);
                let mut out = io::stdout().lock();
                out.write_all(program.as_str().as_bytes())
                    .context("writing extracted program")?;
                out.flush()?;
                return Ok(());
            }
            Err(e) => GradeReport::zero(GradeError::from(e).to_string()),
        }
    } else {
        let runner = Runner::from_config(&cfg);
        pipeline::grade_notebook(&notebook_path, &runner).await
    };

    TestReport::single(cfg.test_name(), grade)
        .print_to(io::stdout().lock())
        .context("writing report")?;
    Ok(())
}

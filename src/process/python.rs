//! Python interpreter invocation.

use std::process::Stdio;

use tokio::process::Command;

use crate::notebook::ExtractedProgram;

/// `<interpreter> -c <program>`: the program travels as an argument, never
/// through a temporary file. Environment is inherited, stdin closed, both
/// output streams piped separately.
pub fn command(interpreter: &str, program: &ExtractedProgram) -> Command {
    let mut cmd = Command::new(interpreter);
    cmd.arg("-c")
        .arg(program.as_str())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

//! Orchestration of external tools
//!
//! Everything camp does to a workspace goes through a process invocation:
//! - `virtualenv` creates isolated environments
//! - `pip` builds wheels and installs them
//!
//! Each invocation carries its own working directory, so nothing here
//! touches the process-wide current directory.

mod invocation;
mod python;
mod runtime;
mod system;
#[cfg(test)]
pub(crate) mod testing;

pub use invocation::{CommandOutput, Invocation};
pub use python::PythonTools;
pub use runtime::CommandRunner;
pub use system::SystemRunner;

/// Max number of output lines to include in failure reports.
const ERROR_TAIL_LINES: usize = 50;

/// Extract the useful tail of command output for error diagnostics.
///
/// Combines stdout and stderr, then returns the last `ERROR_TAIL_LINES`
/// lines so failure reports are actionable without being overwhelming.
pub(crate) fn error_output(stdout: &str, stderr: &str) -> String {
    let lines: Vec<&str> = stdout.lines().chain(stderr.lines()).collect();
    let total = lines.len();
    let tail: Vec<&str> = if total > ERROR_TAIL_LINES {
        lines[total - ERROR_TAIL_LINES..].to_vec()
    } else {
        lines
    };
    tail.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_output_combines_streams() {
        let out = error_output("Collecting six\n", "ERROR: no match\n");
        assert_eq!(out, "Collecting six\nERROR: no match");
    }

    #[test]
    fn error_output_keeps_tail() {
        let stdout: String = (0..80).map(|i| format!("line {}\n", i)).collect();
        let out = error_output(&stdout, "");
        assert_eq!(out.lines().count(), ERROR_TAIL_LINES);
        assert!(out.starts_with("line 30"));
        assert!(out.ends_with("line 79"));
    }
}

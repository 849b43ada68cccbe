//! Run a command under a timer.

use anyhow::{Context, Result};
use std::process::{Command, ExitStatus};

pub fn execute(program: &str, args: &[String]) -> Result<i32> {
    let label = std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    plog::debugf!("running {}", label);

    let timer = plog::time_scope(&[label.as_str()]);
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to run {}", program))?;
    drop(timer);

    let code = exit_code(status);
    if code != 0 {
        plog::warnf!("{} exited with status {}", label, code);
    }
    Ok(code)
}

/// Map a child's status to our own exit code, shell style.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_propagates_exit_status() {
        assert_eq!(execute("sh", &args(&["-c", "exit 0"])).unwrap(), 0);
        assert_eq!(execute("sh", &args(&["-c", "exit 3"])).unwrap(), 3);
    }

    #[test]
    fn test_signal_maps_to_shell_code() {
        assert_eq!(execute("sh", &args(&["-c", "kill -TERM $$"])).unwrap(), 128 + 15);
    }

    #[test]
    fn test_missing_program() {
        let err = execute("plog-no-such-program", &[]).unwrap_err();
        assert!(err.to_string().contains("Failed to run plog-no-such-program"));
    }
}

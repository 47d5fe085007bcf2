//! HTTP through a `curl` subprocess

use std::process::Command;

use log::debug;

use crate::error::{AppletError, AppletResult};

/// Runs curl and captures its stdout
#[derive(Debug, Clone)]
pub struct Curl {
    program: String,
}

impl Curl {
    pub fn new() -> Self {
        Self::with_program("curl")
    }

    /// Use a different executable with a curl-compatible interface
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run with `args`; stdout is returned only when the process succeeds
    pub fn run(&self, args: &[String]) -> AppletResult<String> {
        debug!("running {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| AppletError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AppletError::Command {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for Curl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_is_captured() {
        let out = Curl::with_program("echo").run(&["hello".to_string()]).unwrap();
        assert_eq!(out, "hello\n");
    }

    #[test]
    fn test_failure_status_is_an_error() {
        let err = Curl::with_program("false").run(&[]).unwrap_err();
        assert!(matches!(err, AppletError::Command { .. }));
    }

    #[test]
    fn test_missing_program_is_a_spawn_error() {
        let err = Curl::with_program("/nonexistent/curl").run(&[]).unwrap_err();
        assert!(matches!(err, AppletError::Spawn { .. }));
    }
}

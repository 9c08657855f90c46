//! External command execution utilities.
//!
//! A small builder for running a program to completion and capturing its
//! output. Used for the `git` history queries.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! let output = Cmd::new("git")
//!     .args(["log", "--follow", "--", "post.md"])
//!     .cwd(root)
//!     .env("TZ", "UTC0")
//!     .run()?;
//! ```

use crate::debug;
use std::{
    ffi::{OsStr, OsString},
    io,
    path::{Path, PathBuf},
    process::{Command, Output},
};
use thiserror::Error;

/// Failure to run an external command.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to execute `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` is not installed or not in PATH")]
    NotFound { program: String },

    #[error("command `{program}` failed with {status}{}", format_stderr(.stderr))]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Debug, Default, Clone)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    envs: Vec<(OsString, OsString)>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Add a single argument.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        let arg = arg.as_ref();
        if !arg.is_empty() {
            self.args.push(arg.to_owned());
        }
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    /// Set working directory.
    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Set an environment variable for the subprocess.
    pub fn env<K: AsRef<OsStr>, V: AsRef<OsStr>>(mut self, key: K, value: V) -> Self {
        self.envs
            .push((key.as_ref().to_owned(), value.as_ref().to_owned()));
        self
    }

    /// Get the program name for error messages.
    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Resolve the program on PATH, so a missing binary is reported as such
    /// rather than as a generic spawn failure.
    fn resolve(&self) -> Result<PathBuf, ExecError> {
        which::which(&self.program).map_err(|_| ExecError::NotFound {
            program: self.program_name(),
        })
    }

    /// Execute the command to completion and return its output.
    ///
    /// A non-zero exit status is an error carrying the trimmed stderr.
    pub fn run(self) -> Result<Output, ExecError> {
        let name = self.program_name();
        let program = self.resolve()?;

        let mut cmd = Command::new(program);
        cmd.args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)));

        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        debug!("exec"; "{} {}", name, self.args.iter().map(|a| a.to_string_lossy()).collect::<Vec<_>>().join(" "));

        let output = cmd.output().map_err(|source| ExecError::Spawn {
            program: name.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(ExecError::Failed {
                program: name,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            debug!(&name; "{}", stderr);
        }

        Ok(output)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_builder() {
        let cmd = Cmd::new("echo")
            .arg("hello")
            .args(["world", "!"])
            .cwd("/tmp")
            .env("TZ", "UTC0");

        assert_eq!(cmd.program, OsString::from("echo"));
        assert_eq!(cmd.args.len(), 3);
        assert_eq!(cmd.cwd, Some(PathBuf::from("/tmp")));
        assert_eq!(cmd.envs.len(), 1);
    }

    #[test]
    fn test_cmd_skips_empty_args() {
        let cmd = Cmd::new("git").arg("").args(["log", ""]);
        assert_eq!(cmd.args, vec![OsString::from("log")]);
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let err = Cmd::new("definitely-not-a-real-program-4f2a")
            .run()
            .unwrap_err();
        assert!(matches!(err, ExecError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_error() {
        let err = Cmd::new("sh")
            .args(["-c", "echo boom >&2; exit 3"])
            .run()
            .unwrap_err();
        match err {
            ExecError::Failed { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_env_and_stdout_captured() {
        let output = Cmd::new("sh")
            .args(["-c", "printf %s \"$FEED_TEST_VAR\""])
            .env("FEED_TEST_VAR", "value")
            .run()
            .unwrap();
        assert_eq!(output.stdout, b"value");
    }
}

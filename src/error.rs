// Error type shared by the dispatcher, the readiness waiter and the host.
// Every variant is recoverable at the menu loop: it is printed and the
// user is returned to the prompt.

use std::fmt;
use std::io;
use thiserror::Error;

/// Exit state of a finished subprocess. `code` is `None` when the child
/// was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn ok() -> Self {
        RunStatus { code: Some(0) }
    }

    pub fn exited(code: i32) -> Self {
        RunStatus { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for RunStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        RunStatus {
            code: status.code(),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {}", code),
            None => write!(f, "termination by signal"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed with {status}")]
    Failed { command: String, status: RunStatus },

    #[error("could not inspect container `{container}`: {reason}")]
    Inspect { container: String, reason: String },

    #[error("could not open {url} in the browser: {reason}")]
    Browser { url: String, reason: String },

    #[error("request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    #[error("input error: {0}")]
    Prompt(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, MenuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_status_reports_success_only_for_zero() {
        assert!(RunStatus::ok().success());
        assert!(!RunStatus::exited(1).success());
        assert!(!RunStatus { code: None }.success());
    }

    #[test]
    fn failed_error_names_command_and_status() {
        let err = MenuError::Failed {
            command: "docker compose down".into(),
            status: RunStatus::exited(3),
        };
        assert_eq!(
            err.to_string(),
            "`docker compose down` failed with exit status 3"
        );
    }

    #[test]
    fn signal_termination_is_described() {
        assert_eq!(
            RunStatus { code: None }.to_string(),
            "termination by signal"
        );
    }
}

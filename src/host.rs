// Every side effect the menu has on the machine goes through `Host`:
// running docker, inspecting a container, opening the browser, the API
// request and sleeping. `SystemHost` is the real implementation; tests
// use the recording fake at the bottom of this file.

use reqwest::Url;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use tracing::debug;

use crate::action::CommandSpec;
use crate::api::{ApiClient, ApiReply};
use crate::error::{MenuError, Result, RunStatus};
use crate::interrupt::Interrupt;

/// Granularity of interruptible sleeps.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

pub trait Host {
    /// Run a command with the terminal attached and wait for it to exit.
    fn run(&mut self, command: &CommandSpec) -> Result<RunStatus>;

    /// Whether the named container reports `State.Running == true`.
    fn is_running(&mut self, container: &str) -> Result<bool>;

    fn open_url(&mut self, url: &Url) -> Result<()>;

    fn http_get(&mut self, url: &Url) -> Result<ApiReply>;

    /// Sleep for `duration`; may return early once Ctrl+C was pressed.
    fn sleep(&mut self, duration: Duration);
}

/// Talks to the real docker CLI, browser and network.
pub struct SystemHost {
    project_dir: PathBuf,
    api: ApiClient,
    interrupt: Interrupt,
}

impl SystemHost {
    pub fn new(project_dir: PathBuf, api: ApiClient, interrupt: Interrupt) -> Self {
        SystemHost {
            project_dir,
            api,
            interrupt,
        }
    }
}

impl Host for SystemHost {
    fn run(&mut self, command: &CommandSpec) -> Result<RunStatus> {
        debug!(command = %command, dir = %self.project_dir.display(), "spawning");
        // stdio is inherited so log streams and `docker exec -it` stay live
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&self.project_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| MenuError::Spawn {
                command: command.to_string(),
                source,
            })?;
        debug!(command = %command, code = ?status.code(), "finished");
        Ok(RunStatus::from(status))
    }

    fn is_running(&mut self, container: &str) -> Result<bool> {
        let output = Command::new("docker")
            .args(["inspect", "-f", "{{.State.Running}}", container])
            .current_dir(&self.project_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| MenuError::Inspect {
                container: container.to_string(),
                reason: e.to_string(),
            })?;
        // a missing container is "not running", not an error
        if !output.status.success() {
            return Ok(false);
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim() == "true")
    }

    fn open_url(&mut self, url: &Url) -> Result<()> {
        open::that(url.as_str()).map_err(|e| MenuError::Browser {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    fn http_get(&mut self, url: &Url) -> Result<ApiReply> {
        self.api.get(url).map_err(|e| MenuError::Http {
            url: url.to_string(),
            reason: format!("{:#}", e),
        })
    }

    fn sleep(&mut self, duration: Duration) {
        let mut left = duration;
        while !left.is_zero() && !self.interrupt.is_raised() {
            let step = left.min(SLEEP_SLICE);
            thread::sleep(step);
            left -= step;
        }
    }
}

// Dispatcher: turns one line of menu input into exactly one action. It
// keeps no state between calls; the table and policy are borrowed from
// `main` and every side effect goes through the `Host`.

use reqwest::Url;
use tracing::debug;

use crate::action::{parse_selection, ActionKind, ActionTable, CommandSpec};
use crate::error::{MenuError, Result};
use crate::host::Host;
use crate::interrupt::Interrupt;
use crate::readiness::{spinner, wait_for_stack, ReadinessPolicy};
use crate::ui::Prompt;

/// What the menu loop should do after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The input did not name any action; nothing was run.
    Invalid,
    /// Exit selected, input closed, or Ctrl+C pressed during the action.
    Exit,
}

pub struct Dispatcher<'a, H> {
    table: &'a ActionTable,
    policy: &'a ReadinessPolicy,
    host: H,
    interrupt: Interrupt,
    show_progress: bool,
}

impl<'a, H: Host> Dispatcher<'a, H> {
    pub fn new(table: &'a ActionTable, policy: &'a ReadinessPolicy, host: H) -> Self {
        Dispatcher {
            table,
            policy,
            host,
            interrupt: Interrupt::default(),
            show_progress: false,
        }
    }

    /// Share the Ctrl+C flag installed by `main`.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Show a spinner during the readiness wait (only useful on a tty).
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    #[cfg(test)]
    pub(crate) fn host(&self) -> &H {
        &self.host
    }

    /// Run the action named by `input`. Once Ctrl+C has been pressed the
    /// result is always `Exit`, whatever the interrupted action returned.
    pub fn dispatch(&mut self, input: &str, prompt: &mut dyn Prompt) -> Result<Outcome> {
        let result = self.perform(input, prompt);
        if self.interrupt.is_raised() {
            debug!("interrupted");
            return Ok(Outcome::Exit);
        }
        result
    }

    fn perform(&mut self, input: &str, prompt: &mut dyn Prompt) -> Result<Outcome> {
        let table = self.table;
        let Some(action) = parse_selection(input).and_then(|id| table.get(id)) else {
            debug!(input = input.trim(), "invalid selection");
            return Ok(Outcome::Invalid);
        };
        debug!(action = ?action.id, "dispatch");

        match &action.kind {
            ActionKind::Exit => Ok(Outcome::Exit),
            ActionKind::StartStack { command, url } => {
                self.run(command)?;
                println!("\n✅ Services started successfully!");
                println!("⏳ Waiting for services to be ready (this may take a minute)...");
                let progress = spinner(self.show_progress);
                wait_for_stack(
                    &mut self.host,
                    self.policy,
                    url,
                    &progress,
                    &self.interrupt,
                );
                Ok(Outcome::Continue)
            }
            ActionKind::Run(commands) => {
                let mut first_err = None;
                for (i, command) in commands.iter().enumerate() {
                    if self.interrupt.is_raised() {
                        break;
                    }
                    if i > 0 {
                        println!();
                    }
                    if let Err(e) = self.run(command) {
                        if first_err.is_none() {
                            first_err = Some(e);
                        }
                    }
                }
                match first_err {
                    Some(e) => Err(e),
                    None => Ok(Outcome::Continue),
                }
            }
            ActionKind::Interactive { notice, command } => {
                println!("\n{}\n", notice);
                if prompt.read_line("Press Enter to continue...")?.is_none() {
                    return Ok(Outcome::Exit);
                }
                self.run(command)?;
                Ok(Outcome::Continue)
            }
            ActionKind::Follow(command) => {
                println!("\n📋 Press Ctrl+C to stop viewing logs\n");
                self.run(command)?;
                Ok(Outcome::Continue)
            }
            ActionKind::ApiTest { url } => {
                self.test_api(url)?;
                Ok(Outcome::Continue)
            }
            ActionKind::OpenFrontend { url } => {
                println!("\n🌐 Opening: {}\n", url);
                self.host.open_url(url)?;
                Ok(Outcome::Continue)
            }
            ActionKind::Destructive {
                warning,
                token,
                command,
            } => {
                println!("\n{}", warning);
                let answer = prompt.read_line(&format!("Type '{}' to confirm", token))?;
                let confirmed = answer
                    .as_deref()
                    .is_some_and(|a| a.trim().eq_ignore_ascii_case(token));
                if !confirmed {
                    println!("\n❌ Operation cancelled");
                    return Ok(Outcome::Continue);
                }
                self.run(command)?;
                println!("\n✅ All resources removed");
                Ok(Outcome::Continue)
            }
        }
    }

    /// Run one command, turning a non-zero exit into an error.
    fn run(&mut self, command: &CommandSpec) -> Result<()> {
        println!("\n🔄 Running: {}\n", command);
        let status = self.host.run(command)?;
        if !status.success() {
            return Err(MenuError::Failed {
                command: command.to_string(),
                status,
            });
        }
        Ok(())
    }

    fn test_api(&mut self, url: &Url) -> Result<()> {
        println!("\n🧪 Testing API endpoint...\n");
        println!("🔄 GET {}\n", url);
        let reply = self.host.http_get(url)?;
        println!("HTTP {}", reply.status);
        println!("{}", reply.pretty_body());
        if !reply.is_success() {
            return Err(MenuError::Http {
                url: url.to_string(),
                reason: format!("server answered {}", reply.status),
            });
        }
        Ok(())
    }
}

// The fixed menu: every selectable number and the structured command it
// maps to. Built once from `Config` and never mutated.

use reqwest::Url;
use std::fmt;

use crate::config::Config;

/// Menu identifiers. The numeric value is what the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionId {
    Exit = 0,
    Start = 1,
    Stop = 2,
    Restart = 3,
    Rebuild = 4,
    RunModel = 5,
    ListModels = 6,
    Logs = 7,
    AppLogs = 8,
    OllamaLogs = 9,
    FrontendLogs = 10,
    Status = 11,
    TestApi = 12,
    OpenFrontend = 13,
    Prune = 14,
    DiskUsage = 15,
    RemoveAll = 16,
}

impl ActionId {
    pub const ALL: [ActionId; 17] = [
        ActionId::Exit,
        ActionId::Start,
        ActionId::Stop,
        ActionId::Restart,
        ActionId::Rebuild,
        ActionId::RunModel,
        ActionId::ListModels,
        ActionId::Logs,
        ActionId::AppLogs,
        ActionId::OllamaLogs,
        ActionId::FrontendLogs,
        ActionId::Status,
        ActionId::TestApi,
        ActionId::OpenFrontend,
        ActionId::Prune,
        ActionId::DiskUsage,
        ActionId::RemoveAll,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        ActionId::ALL.get(n as usize).copied()
    }
}

/// Parse free-form menu input into an identifier. Surrounding whitespace
/// is ignored; only the plain digits of a listed number are accepted, so
/// `"00"`, `"+1"` and `"016"` are invalid.
pub fn parse_selection(input: &str) -> Option<ActionId> {
    let text = input.trim();
    let n = text.parse::<u8>().ok()?;
    if n.to_string() != text {
        return None;
    }
    ActionId::from_number(n)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Containers,
    Models,
    Monitoring,
    Testing,
    Maintenance,
    Session,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Containers => "📦 Container Management:",
            Section::Models => "🤖 AI Model Management:",
            Section::Monitoring => "📊 Monitoring:",
            Section::Testing => "🧪 Testing:",
            Section::Maintenance => "🛠️  Maintenance:",
            Section::Session => "",
        }
    }
}

/// A program plus its argument vector. Never passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn docker<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new("docker", args)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Exit,
    /// Start the stack, then wait for readiness and open the frontend.
    StartStack { command: CommandSpec, url: Url },
    /// Run each command in order.
    Run(Vec<CommandSpec>),
    /// Takes over the terminal; the user confirms with Enter first.
    Interactive {
        notice: &'static str,
        command: CommandSpec,
    },
    /// Streams until interrupted.
    Follow(CommandSpec),
    ApiTest { url: Url },
    OpenFrontend { url: Url },
    /// Runs only after the user types `token`.
    Destructive {
        warning: &'static str,
        token: &'static str,
        command: CommandSpec,
    },
}

#[derive(Debug, Clone)]
pub struct Action {
    pub id: ActionId,
    pub section: Section,
    pub label: String,
    pub kind: ActionKind,
}

/// Immutable lookup table for every menu entry.
#[derive(Debug, Clone)]
pub struct ActionTable {
    actions: Vec<Action>,
}

impl ActionTable {
    pub fn from_config(config: &Config) -> Self {
        use ActionId::*;
        use Section::*;

        let logs = |service: Option<&str>| {
            let mut args = vec!["compose", "logs", "-f"];
            args.extend(service);
            ActionKind::Follow(CommandSpec::docker(args))
        };

        let actions = vec![
            Action {
                id: Start,
                section: Containers,
                label: "Start all services (docker compose up -d)".into(),
                kind: ActionKind::StartStack {
                    command: CommandSpec::docker(["compose", "up", "-d"]),
                    url: config.frontend_url.clone(),
                },
            },
            Action {
                id: Stop,
                section: Containers,
                label: "Stop all services (docker compose down)".into(),
                kind: ActionKind::Run(vec![CommandSpec::docker(["compose", "down"])]),
            },
            Action {
                id: Restart,
                section: Containers,
                label: "Restart all services".into(),
                kind: ActionKind::Run(vec![CommandSpec::docker(["compose", "restart"])]),
            },
            Action {
                id: Rebuild,
                section: Containers,
                label: "Rebuild and restart services".into(),
                kind: ActionKind::Run(vec![CommandSpec::docker([
                    "compose", "up", "-d", "--build",
                ])]),
            },
            Action {
                id: RunModel,
                section: Models,
                label: format!("Download/Run AI model ({})", config.model),
                kind: ActionKind::Interactive {
                    notice: "⚠️  This will enter interactive mode. Type '/bye' to exit.",
                    command: CommandSpec::docker([
                        "exec",
                        "-it",
                        config.ollama_container.as_str(),
                        "ollama",
                        "run",
                        config.model.as_str(),
                    ]),
                },
            },
            Action {
                id: ListModels,
                section: Models,
                label: "List available Ollama models".into(),
                kind: ActionKind::Run(vec![CommandSpec::docker([
                    "exec",
                    config.ollama_container.as_str(),
                    "ollama",
                    "list",
                ])]),
            },
            Action {
                id: Logs,
                section: Monitoring,
                label: "View logs (all services)".into(),
                kind: logs(None),
            },
            Action {
                id: AppLogs,
                section: Monitoring,
                label: "View Spring Boot app logs only".into(),
                kind: logs(Some(&config.app_service)),
            },
            Action {
                id: OllamaLogs,
                section: Monitoring,
                label: "View Ollama logs only".into(),
                kind: logs(Some(&config.ollama_service)),
            },
            Action {
                id: FrontendLogs,
                section: Monitoring,
                label: "View Frontend logs only".into(),
                kind: logs(Some(&config.frontend_service)),
            },
            Action {
                id: Status,
                section: Monitoring,
                label: "Check container status".into(),
                kind: ActionKind::Run(vec![
                    CommandSpec::docker(["compose", "ps"]),
                    CommandSpec::docker(["stats", "--no-stream"]),
                ]),
            },
            Action {
                id: TestApi,
                section: Testing,
                label: "Test API endpoint".into(),
                kind: ActionKind::ApiTest {
                    url: config.api_test_url(),
                },
            },
            Action {
                id: OpenFrontend,
                section: Testing,
                label: "Open Frontend in browser".into(),
                kind: ActionKind::OpenFrontend {
                    url: config.frontend_url.clone(),
                },
            },
            Action {
                id: Prune,
                section: Maintenance,
                label: "Clean up stopped containers".into(),
                kind: ActionKind::Run(vec![CommandSpec::docker(["container", "prune", "-f"])]),
            },
            Action {
                id: DiskUsage,
                section: Maintenance,
                label: "View disk usage".into(),
                kind: ActionKind::Run(vec![CommandSpec::docker(["system", "df"])]),
            },
            Action {
                id: RemoveAll,
                section: Maintenance,
                label: "Remove all (containers, volumes, images)".into(),
                kind: ActionKind::Destructive {
                    warning: "⚠️  WARNING: This will remove ALL containers, volumes, and images!",
                    token: "yes",
                    command: CommandSpec::docker(["compose", "down", "-v", "--rmi", "all"]),
                },
            },
            Action {
                id: Exit,
                section: Session,
                label: "Exit".into(),
                kind: ActionKind::Exit,
            },
        ];

        ActionTable { actions }
    }

    pub fn get(&self, id: ActionId) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Entries in menu display order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Highest selectable number, used in prompts ("0-16").
    pub fn max_number(&self) -> u8 {
        self.actions
            .iter()
            .map(|a| a.id.number())
            .max()
            .unwrap_or(0)
    }
}

// Entrypoint for the CLI application.
// - Keeps `main` small: parse config, build the table and host once, and
//   hand them to the UI loop.
// - Returns `anyhow::Result`; everything recoverable is handled in the loop.

use clap::Parser;
use std::io::IsTerminal;
use std::time::Duration;
use tracing::warn;

use stack_menu_cli::action::ActionTable;
use stack_menu_cli::api::ApiClient;
use stack_menu_cli::config::Config;
use stack_menu_cli::dispatch::Dispatcher;
use stack_menu_cli::host::SystemHost;
use stack_menu_cli::interrupt::Interrupt;
use stack_menu_cli::ui::{main_menu, LinePrompt, Prompt, TermPrompt};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // RUST_LOG wins; --verbose only picks the fallback level
    let fallback = if config.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if which::which("docker").is_err() {
        warn!("docker not found on PATH");
        println!("⚠️  `docker` was not found on PATH; container actions will fail.");
    }

    let interrupt = Interrupt::install()?;
    let table = ActionTable::from_config(&config);
    let policy = config.readiness_policy();
    let api = ApiClient::new(Duration::from_secs(config.api_timeout_secs))?;
    let host = SystemHost::new(config.project_dir.clone(), api, interrupt.clone());
    let mut dispatcher = Dispatcher::new(&table, &policy, host)
        .with_interrupt(interrupt)
        .with_progress(std::io::stdout().is_terminal());

    // dialoguer needs a terminal; piped input is read line by line
    let mut prompt: Box<dyn Prompt> = if std::io::stdin().is_terminal() {
        Box::new(TermPrompt)
    } else {
        Box::new(LinePrompt::new(std::io::stdin().lock()))
    };

    // Blocks until the user exits or stdin closes.
    main_menu(&table, &config.env_file_path(), &mut dispatcher, prompt.as_mut())?;
    Ok(())
}

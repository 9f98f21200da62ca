// UI layer: renders the numbered menu, reads selections and hands them to
// the dispatcher. Input goes through the `Prompt` trait so the same loop
// works with `dialoguer` on a terminal and with plain piped stdin.

use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::Input;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::action::{ActionTable, Section};
use crate::dispatch::{Dispatcher, Outcome};
use crate::host::Host;

/// Source of user input. `Ok(None)` means the session is over: stdin was
/// closed or the user pressed Ctrl+C at the prompt.
pub trait Prompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Terminal prompt backed by `dialoguer`.
pub struct TermPrompt;

impl Prompt for TermPrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => Ok(Some(line)),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Line-oriented prompt for non-interactive stdin (pipes, scripts, tests).
pub struct LinePrompt<R> {
    reader: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(reader: R) -> Self {
        LinePrompt { reader }
    }
}

impl<R: BufRead> Prompt for LinePrompt<R> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{}: ", prompt);
        io::stdout().flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Whether the secrets file the containers expect is present. Its
/// contents are never read here.
pub fn env_file_present(path: &Path) -> bool {
    path.is_file()
}

fn print_env_advisory(path: &Path) {
    println!(
        "\n{}",
        format!("⚠️  {} file not found.", path.display()).yellow()
    );
    println!("   - Copy .env.example to .env and set values if needed.");
    println!("   - Never commit .env to git.\n");
}

/// Menu text, grouped by section in table order.
pub fn render_menu(table: &ActionTable) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", rule));
    out.push_str("🐳 SPRING AI OLLAMA - DOCKER MANAGEMENT MENU\n");
    out.push_str(&format!("{}\n", rule));

    let mut current: Option<Section> = None;
    for action in table.iter() {
        if current != Some(action.section) {
            current = Some(action.section);
            let title = action.section.title();
            out.push('\n');
            if !title.is_empty() {
                out.push_str(title);
                out.push('\n');
            }
        }
        out.push_str(&format!("{:>3}. {}\n", action.id.number(), action.label));
    }
    out.push_str(&rule);
    out
}

fn goodbye() {
    println!("\n👋 Goodbye!\n");
}

/// Main interactive loop. Renders the menu, dispatches one selection,
/// reports any failure and waits for Enter, until the user exits or input
/// closes. Action failures never end the loop.
pub fn main_menu<H: Host>(
    table: &ActionTable,
    env_file: &Path,
    dispatcher: &mut Dispatcher<'_, H>,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    let choice_prompt = format!("👉 Enter your choice (0-{})", table.max_number());
    loop {
        if !env_file_present(env_file) {
            print_env_advisory(env_file);
        }
        println!("{}", render_menu(table).bold());

        let Some(choice) = prompt.read_line(&choice_prompt)? else {
            goodbye();
            return Ok(());
        };

        match dispatcher.dispatch(&choice, prompt) {
            Ok(Outcome::Exit) => {
                goodbye();
                return Ok(());
            }
            Ok(Outcome::Invalid) => println!(
                "\n{}",
                format!(
                    "❌ Invalid choice! Please enter a number between 0-{}.",
                    table.max_number()
                )
                .red()
            ),
            Ok(Outcome::Continue) => {}
            Err(e) => println!("\n{}", format!("❌ Error: {}", e).red()),
        }

        if prompt.read_line("\n⏎ Press Enter to continue...")?.is_none() {
            goodbye();
            return Ok(());
        }
    }
}

//! Built-in commands typed at the chat prompt.

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;

/// Shown by `--help` when the config directory has no `readme.txt`.
const BUILTIN_README: &str = include_str!("readme.txt");

/// A line the chat loop handles itself instead of sending it to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Clear,
    History,
    Help,
    Version,
    /// Looked like a flag (`--something`) but is not one we know.
    Unknown,
}

impl Command {
    /// Classify an input line. Returns `None` for ordinary chat messages.
    pub fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "exit" => Some(Command::Exit),
            "clear" | "cls" => Some(Command::Clear),
            "history" => Some(Command::History),
            "--help" => Some(Command::Help),
            "--version" => Some(Command::Version),
            _ if input.starts_with("--") => Some(Command::Unknown),
            _ => None,
        }
    }
}

/// Load the help text, preferring a `readme.txt` at `path` over the built-in one.
pub fn load_readme(path: Option<&Path>) -> Result<Cow<'static, str>> {
    match path {
        Some(path) if path.exists() => std::fs::read_to_string(path)
            .map(Cow::Owned)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => Ok(Cow::Borrowed(BUILTIN_README)),
    }
}

/// Print the readme, then the list of commands.
///
/// An unreadable readme is reported in place of its text; the command list
/// is printed either way.
pub fn show_help<W: Write>(out: &mut W, readme: Option<&Path>) -> io::Result<()> {
    match load_readme(readme) {
        Ok(text) => writeln!(out, "{}", text.trim_end())?,
        Err(e) => writeln!(out, "Error reading readme: {:#}", e)?,
    }
    writeln!(out)?;
    writeln!(out, "Available commands:")?;
    writeln!(out, "  exit       - exit the program")?;
    writeln!(out, "  clear/cls  - clear the console")?;
    writeln!(out, "  history    - display message history")?;
    writeln!(out, "  --help     - display this help and the readme")?;
    writeln!(out, "  --version  - display the program version")
}

pub fn show_version<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Program version: {}", env!("CARGO_PKG_VERSION"))
}

/// Print the messages sent so far, numbered from 1.
pub fn show_history<W: Write>(out: &mut W, history: &[String]) -> io::Result<()> {
    writeln!(out, "Command history:")?;
    for (i, entry) in history.iter().enumerate() {
        writeln!(out, "{}: {}", i + 1, entry)?;
    }
    Ok(())
}

pub fn show_unknown<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Unknown command. Enter '--help' for a list of commands."
    )
}

/// Wipe the screen and home the cursor.
pub fn clear_console<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

//! Interactive commands
//!
//! Line commands accepted by `pulseboard watch` on stdin.

use crate::filter::{AppSelection, FilterError, TimeRange};

/// A parsed line from the interactive prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Refresh,
    Range(TimeRange),
    App(AppSelection),
    Quit,
    /// Blank line
    Nothing,
}

/// Parse errors shown back to the user
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    #[error("{0}")]
    Filter(#[from] FilterError),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown command {0:?} (try: r, range N, app KEY|all, q)")]
    Unknown(String),
}

pub fn parse_command(line: &str) -> Result<ShellCommand, ShellError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Nothing);
    }
    // The argument is the rest of the line; app keys may contain spaces
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, Some(rest.trim()).filter(|r| !r.is_empty())),
        None => (line, None),
    };

    match (command.to_ascii_lowercase().as_str(), argument) {
        ("r" | "refresh", _) => Ok(ShellCommand::Refresh),
        ("q" | "quit" | "exit", _) => Ok(ShellCommand::Quit),
        ("range", Some(days)) => Ok(ShellCommand::Range(days.parse()?)),
        ("range", None) => Err(ShellError::Usage("range 1|7|30|90")),
        ("app", Some(key)) => Ok(ShellCommand::App(AppSelection::from_key(key))),
        ("app", None) => Err(ShellError::Usage("app KEY|all")),
        _ => Err(ShellError::Unknown(command.to_string())),
    }
}

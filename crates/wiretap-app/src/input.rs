//! Line-oriented player input.
//!
//! Console numbers are 1-based on the command line and 0-based inside.

use wiretap_core::commands::PlayerCommand;
use wiretap_core::types::ConsoleId;

/// What one line of input asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Command(PlayerCommand),
    /// Print the latest snapshot.
    Status,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs a console number")]
    MissingConsole(&'static str),
    #[error("`{0}` is not a console number (1-based)")]
    BadConsole(String),
    #[error("`{0}` is not a number of seconds")]
    BadSeconds(String),
}

fn console_arg(verb: &'static str, arg: Option<&str>) -> Result<ConsoleId, InputError> {
    let arg = arg.ok_or(InputError::MissingConsole(verb))?;
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(ConsoleId(n - 1)),
        _ => Err(InputError::BadConsole(arg.to_string())),
    }
}

/// Parse one line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<InputAction>, InputError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match verb.to_ascii_lowercase().as_str() {
        "listen" | "l" => PlayerCommand::ToggleListening {
            console: console_arg("listen", arg)?,
        },
        "raid" | "r" => PlayerCommand::DispatchEnforcement {
            console: console_arg("raid", arg)?,
        },
        "pause" | "p" => PlayerCommand::TogglePaused,
        "quit" | "q" => PlayerCommand::Quit,
        "restart" => PlayerCommand::Restart,
        "innocent" => PlayerCommand::AddInnocent,
        "suspect" => PlayerCommand::AddSuspect,
        "time" => {
            let raw = arg.unwrap_or("5");
            let secs = raw
                .parse::<f64>()
                .map_err(|_| InputError::BadSeconds(raw.to_string()))?;
            PlayerCommand::SetTimeRemaining { secs }
        }
        "status" | "s" => return Ok(Some(InputAction::Status)),
        _ => return Err(InputError::Unknown(verb.to_string())),
    };
    Ok(Some(InputAction::Command(command)))
}

/// Commands understood by the shell while in command mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Start,
    Stats,
    Clear,
    Reset,
    Exit,
}

/// Listing order used by `help` output.
pub const ALL_COMMANDS: [Command; 6] = [
    Command::Start,
    Command::Stats,
    Command::Clear,
    Command::Reset,
    Command::Exit,
    Command::Help,
];

impl Command {
    /// Parse a submitted line into a command. Matching is case-insensitive
    /// and ignores surrounding whitespace; anything else is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "help" => Some(Command::Help),
            "start" => Some(Command::Start),
            "stats" => Some(Command::Stats),
            "clear" => Some(Command::Clear),
            "reset" => Some(Command::Reset),
            "exit" => Some(Command::Exit),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Start => "start",
            Command::Stats => "stats",
            Command::Clear => "clear",
            Command::Reset => "reset",
            Command::Exit => "exit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::Help => "Show this help message",
            Command::Start => "Start a new typing test",
            Command::Stats => "Show your typing statistics",
            Command::Clear => "Clear the terminal",
            Command::Reset => "Reset all statistics",
            Command::Exit => "Exit the typing test",
        }
    }
}

/// The static text emitted by the `help` command.
pub fn help_text() -> String {
    let mut out = String::from("Available commands:");
    for cmd in ALL_COMMANDS {
        out.push_str(&format!("\n  {:<6} - {}", cmd.name(), cmd.description()));
    }
    out
}

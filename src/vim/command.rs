use thiserror::Error;

use crate::loaders::DataLoaderType;

/// `:` commands understood by the wizard
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open,
    Next,
    Back,
    Step(usize),
    LoaderType(DataLoaderType),
    Notify(String),
    Finish,
    Dismiss,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument for :{0}")]
    MissingArgument(&'static str),

    #[error("Invalid argument for :{0}: {1}")]
    InvalidArgument(&'static str, String),
}

pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let input = input.trim();
    let (cmd, arg) = match input.split_once(' ') {
        Some((cmd, arg)) => (cmd, Some(arg.trim())),
        None => (input, None),
    };

    match cmd {
        "open" | "o" => Ok(Command::Open),
        "next" | "n" => Ok(Command::Next),
        "back" | "b" | "prev" => Ok(Command::Back),
        "step" => {
            let arg = arg.ok_or(CommandError::MissingArgument("step"))?;
            arg.parse()
                .map(Command::Step)
                .map_err(|_| CommandError::InvalidArgument("step", arg.to_string()))
        }
        "type" | "t" => {
            let arg = arg.unwrap_or("");
            arg.parse()
                .map(Command::LoaderType)
                .map_err(|_| CommandError::InvalidArgument("type", arg.to_string()))
        }
        "notify" => match arg {
            Some(msg) if !msg.is_empty() => Ok(Command::Notify(msg.to_string())),
            _ => Err(CommandError::MissingArgument("notify")),
        },
        "finish" | "done" => Ok(Command::Finish),
        "dismiss" | "close" | "x" => Ok(Command::Dismiss),
        "help" | "h" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "" => Err(CommandError::Unknown("empty command".to_string())),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_step_numbers() {
        assert_eq!(parse_command("step 2"), Ok(Command::Step(2)));
        assert_eq!(parse_command("step"), Err(CommandError::MissingArgument("step")));
        assert!(matches!(parse_command("step two"), Err(CommandError::InvalidArgument("step", _))));
    }

    #[test]
    fn bare_type_means_empty_loader() {
        assert_eq!(parse_command("type"), Ok(Command::LoaderType(DataLoaderType::Empty)));
        assert_eq!(parse_command("t scraping"), Ok(Command::LoaderType(DataLoaderType::Scraping)));
    }

    #[test]
    fn notify_keeps_whole_message() {
        assert_eq!(
            parse_command("notify  telegraf is running "),
            Ok(Command::Notify("telegraf is running".to_string()))
        );
        assert_eq!(parse_command("notify"), Err(CommandError::MissingArgument("notify")));
    }

    #[test]
    fn unknown_commands() {
        assert_eq!(parse_command("reboot"), Err(CommandError::Unknown("reboot".to_string())));
        assert!(parse_command("  ").is_err());
    }
}

//! services/client/src/ui/protocol.rs
//!
//! Defines the line-based command protocol between the user and the client.

use std::path::PathBuf;
use std::str::FromStr;

/// Everything a user can type at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Appends a line to the notes draft.
    AddNotes(String),
    ClearNotes,
    /// Attaches an image or PDF, replacing any previous attachment.
    Attach(PathBuf),
    Detach,
    SetCount(u32),
    Generate,

    /// Picks an option on the current question (zero-based).
    Select(usize),
    Next,
    Previous,
    Submit,

    Restart,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("Unknown command '{0}'. Type 'help' for the list of commands.")]
    Unknown(String),
    #[error("'{0}' needs an argument.")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a number.")]
    NotANumber(String),
}

impl FromStr for UserCommand {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let argument = |name: &'static str| {
            if rest.is_empty() {
                Err(ProtocolError::MissingArgument(name))
            } else {
                Ok(rest)
            }
        };

        match verb.to_lowercase().as_str() {
            "notes" | "note" => Ok(UserCommand::AddNotes(argument("notes")?.to_string())),
            "clear" => Ok(UserCommand::ClearNotes),
            "attach" => Ok(UserCommand::Attach(PathBuf::from(argument("attach")?))),
            "detach" => Ok(UserCommand::Detach),
            "count" => {
                let raw = argument("count")?;
                raw.parse::<u32>()
                    .map(UserCommand::SetCount)
                    .map_err(|_| ProtocolError::NotANumber(raw.to_string()))
            }
            "generate" | "go" => Ok(UserCommand::Generate),
            "a" | "1" => Ok(UserCommand::Select(0)),
            "b" | "2" => Ok(UserCommand::Select(1)),
            "c" | "3" => Ok(UserCommand::Select(2)),
            "d" | "4" => Ok(UserCommand::Select(3)),
            "next" | "n" => Ok(UserCommand::Next),
            "prev" | "previous" | "p" => Ok(UserCommand::Previous),
            "submit" => Ok(UserCommand::Submit),
            "restart" | "reset" => Ok(UserCommand::Restart),
            "help" | "?" => Ok(UserCommand::Help),
            "quit" | "exit" => Ok(UserCommand::Quit),
            _ => Err(ProtocolError::Unknown(line.to_string())),
        }
    }
}

pub const HELP_TEXT: &str = "\
Commands
  notes <text>     add a line to your notes
  clear            clear your notes
  attach <path>    attach an image or PDF
  detach           remove the attachment
  count <n>        number of questions (5, 10, 20 or 30)
  generate         create the quiz
  a-d or 1-4       choose an answer
  next / prev      move between questions
  submit           finish the quiz (on the last question)
  restart          start over
  quit             leave";

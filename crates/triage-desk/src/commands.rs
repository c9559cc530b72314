//! # Operator Commands
//!
//! Parses one console line into a [`Command`].
//!
//! | Command | Arguments |
//! |---------|-----------|
//! | `admit` | `<id> <priority> <name...>` |
//! | `next` | |
//! | `complete` | `<id>` |
//! | `cancel` | `<id>` |
//! | `list`, `status`, `export`, `help`, `quit` | |

use crate::errors::DeskError;

/// Help text printed by the `help` command.
pub const HELP: &str = "\
Commands:
  admit <id> <priority> <name...>  request a turn (priority: critical|urgent|regular)
  next                             attend the next patient
  complete <id>                    finish attending a patient
  cancel <id>                      cancel a pending turn
  list                             show the waiting list
  status                           show waiting counts
  export                           print the waiting list as JSON
  help                             show this text
  quit                             close the desk";

/// One operator action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Admit {
        patient_id: String,
        priority: String,
        name: String,
    },
    Next,
    Complete {
        patient_id: String,
    },
    Cancel {
        patient_id: String,
    },
    List,
    Status,
    Export,
    Help,
    Quit,
}

impl Command {
    /// Parses a console line.
    ///
    /// Blank lines and lines starting with `#` yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, DeskError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let keyword = words.next().unwrap_or_default().to_lowercase();

        let command = match keyword.as_str() {
            "admit" => {
                let patient_id = required(words.next(), "admit", "patient id")?;
                let priority = required(words.next(), "admit", "priority")?;
                let name = words.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    return Err(DeskError::MissingArgument {
                        command: "admit",
                        argument: "name",
                    });
                }
                Command::Admit {
                    patient_id,
                    priority,
                    name,
                }
            }
            "next" => Command::Next,
            "complete" => Command::Complete {
                patient_id: required(words.next(), "complete", "patient id")?,
            },
            "cancel" => Command::Cancel {
                patient_id: required(words.next(), "cancel", "patient id")?,
            },
            "list" => Command::List,
            "status" => Command::Status,
            "export" => Command::Export,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(DeskError::UnknownCommand(keyword)),
        };

        Ok(Some(command))
    }
}

fn required(
    word: Option<&str>,
    command: &'static str,
    argument: &'static str,
) -> Result<String, DeskError> {
    word.map(str::to_string)
        .ok_or(DeskError::MissingArgument { command, argument })
}

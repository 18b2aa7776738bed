use thiserror::Error;

use crate::controller::Field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Open(usize),
    Set(Field, String),
    Show,
    Process,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("`open` needs an entry number, e.g. `open 2`")]
    MissingIndex,
    #[error("`{0}` is not a valid entry number")]
    BadIndex(String),
}

/// Parses one input line. Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "open" => {
            let arg = rest.trim();
            if arg.is_empty() {
                return Err(CommandError::MissingIndex);
            }
            let index = arg
                .parse::<usize>()
                .map_err(|_| CommandError::BadIndex(arg.to_string()))?;
            Command::Open(index)
        }
        // field text is kept verbatim; trimming happens at submit time
        "sender" => Command::Set(Field::Sender, rest.to_string()),
        "subject" => Command::Set(Field::Subject, rest.to_string()),
        "content" => Command::Set(Field::Content, unescape_newlines(rest)),
        "show" => Command::Show,
        "process" | "send" => Command::Process,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_commands() {
        assert_eq!(parse_line("list\n"), Ok(Some(Command::List)));
        assert_eq!(parse_line("  open 3 "), Ok(Some(Command::Open(3))));
        assert_eq!(parse_line("PROCESS"), Ok(Some(Command::Process)));
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn field_text_is_taken_verbatim() {
        assert_eq!(
            parse_line("subject  Refund request "),
            Ok(Some(Command::Set(Field::Subject, " Refund request ".into())))
        );
        assert_eq!(
            parse_line("sender"),
            Ok(Some(Command::Set(Field::Sender, String::new())))
        );
        assert_eq!(
            parse_line("content line one\\nline two"),
            Ok(Some(Command::Set(Field::Content, "line one\nline two".into())))
        );
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(parse_line("open"), Err(CommandError::MissingIndex));
        assert_eq!(parse_line("open two"), Err(CommandError::BadIndex("two".into())));
        assert_eq!(parse_line("frobnicate"), Err(CommandError::Unknown("frobnicate".into())));
    }
}

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(PathBuf),
    Upload,
    Ask(String),
    Clear,
    Show,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub const HELP: &str = "\
Commands:
  select <path>     choose the PDF to upload
  upload            upload the selected PDF
  ask <question>    ask about the uploaded PDF (bare text works too)
  clear             clear the answer and history
  show              print the current state
  help              show this message
  quit              exit";

/// Parses one input line. Anything that is not a known command is a question.
pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "select" | "open" if rest.is_empty() => Command::Invalid("select needs a file path".to_string()),
        "select" | "open" => Command::Select(PathBuf::from(rest)),
        "upload" => Command::Upload,
        "ask" => Command::Ask(rest.to_string()),
        "clear" => Command::Clear,
        "show" | "status" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Ask(line.to_string()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replace the draft with this text.
    Draft(String),
    /// Submit the draft, optionally replacing it first.
    Add(Option<String>),
    /// Flip the todo at this 1-based position.
    Toggle(usize),
    /// Delete the todo at this 1-based position.
    Delete(usize),
    Refresh,
    Help,
    Quit,
    Invalid(String),
}

pub const HELP: &str = "\
commands:
  <text>          set the draft
  add [text]      add the draft (an empty line does the same)
  toggle <n>      mark todo n done or not done
  delete <n>      delete todo n
  refresh         reload todos from the server
  help            show this help
  quit            leave";

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "" => Self::Add(None),
            "add" if rest.is_empty() => Self::Add(None),
            "add" => Self::Add(Some(rest.to_owned())),
            "toggle" | "done" => position(rest).map_or_else(Self::Invalid, Self::Toggle),
            "delete" | "rm" => position(rest).map_or_else(Self::Invalid, Self::Delete),
            "refresh" | "list" if rest.is_empty() => Self::Refresh,
            "help" | "?" if rest.is_empty() => Self::Help,
            "quit" | "exit" if rest.is_empty() => Self::Quit,
            _ => Self::Draft(line.to_owned()),
        }
    }
}

fn position(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("expected a todo number, got `{}`", raw)),
        Ok(n) => Ok(n),
    }
}

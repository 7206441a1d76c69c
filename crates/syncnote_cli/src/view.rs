//! Pure rendering and command parsing for the CLI view.
//!
//! # Responsibility
//! - Render the collection and edit buffer as text.
//! - Parse user input lines into intents.
//!
//! # Invariants
//! - Rendering performs no business logic and mutates nothing.
//! - Item numbers shown to the user are 1-based arrival-order positions.

use syncnote_core::{Note, NoteDraft};

/// One parsed user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Title(String),
    Desc(String),
    Edit(usize),
    Save,
    Delete(usize),
    Refresh,
    Help,
    Quit,
}

/// Parses one input line into a command.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (trimmed, ""),
    };

    match verb {
        "list" | "ls" => Ok(Command::List),
        "title" => Ok(Command::Title(rest.to_string())),
        "desc" => Ok(Command::Desc(rest.to_string())),
        "edit" => parse_position(rest).map(Command::Edit),
        "save" => Ok(Command::Save),
        "del" | "delete" => parse_position(rest).map(Command::Delete),
        "refresh" => Ok(Command::Refresh),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err("empty command; try `help`".to_string()),
        other => Err(format!("unknown command `{other}`; try `help`")),
    }
}

fn parse_position(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position),
        _ => Err(format!("expected an item number >= 1, got `{value}`")),
    }
}

/// Renders the arrival-ordered note list with 1-based item numbers.
pub fn render_notes<'a>(notes: impl Iterator<Item = &'a Note>) -> String {
    let mut lines = Vec::new();
    for (index, note) in notes.enumerate() {
        lines.push(format!(
            "{}. {} - {} [{}]",
            index + 1,
            note.title,
            note.description,
            note.owner
        ));
    }
    if lines.is_empty() {
        return "(no notes yet)".to_string();
    }
    lines.join("\n")
}

/// Renders the edit buffer state above the prompt.
pub fn render_draft(draft: &NoteDraft) -> String {
    let mode = match draft.target_id() {
        Some(id) => format!("editing {id}"),
        None => "new note".to_string(),
    };
    format!(
        "[{mode}] title: {:?} desc: {:?}",
        draft.title, draft.description
    )
}

/// Help text listing every command.
pub fn help_text() -> &'static str {
    "commands:\n  \
     list            show all notes\n  \
     title <text>    set the draft title\n  \
     desc <text>     set the draft description\n  \
     edit <n>        load note n into the draft\n  \
     save            submit the draft (create or update)\n  \
     del <n>         delete note n\n  \
     refresh         re-sync the collection from the gateway\n  \
     help            show this text\n  \
     quit            leave"
}

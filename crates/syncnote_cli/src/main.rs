//! Interactive CLI client for syncnote.
//!
//! # Responsibility
//! - Authenticate, open a reconciler session, and run the command loop.
//! - Render state and surface session errors as dismissible one-line
//!   messages; never panic on user input.

mod view;

use log::warn;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use syncnote_core::{
    default_log_level, init_logging, AuthRequest, Authenticator, MemoryGateway, NoteSession,
    SessionError, StaticAuthenticator, SubmitOutcome,
};
use view::{help_text, parse_command, render_draft, render_notes, Command};

fn main() {
    if let Some(log_dir) = std::env::var_os("SYNCNOTE_LOG_DIR").map(PathBuf::from) {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let username = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_else(|| "demo".to_string());

    let session_grant = match StaticAuthenticator.authenticate(&AuthRequest { username }) {
        Ok(grant) => grant,
        Err(err) => {
            eprintln!("authentication failed: {err}");
            std::process::exit(1);
        }
    };

    let gateway = MemoryGateway::connect(&session_grant);
    let mut session = match NoteSession::start(gateway) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("could not load notes: {err}");
            std::process::exit(1);
        }
    };

    println!("syncnote {} - signed in as {}", syncnote_core::core_version(), session_grant.username());
    println!("{}", help_text());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let synced = session.poll_remote();
        if synced > 0 {
            println!("synced {synced} remote change(s)");
        }
        println!("{}", render_draft(session.draft()));
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                warn!("event=stdin_read module=cli status=error detail={err}");
                break;
            }
            None => break,
        };

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => dispatch(&mut session, command),
            Err(message) => println!("error: {message}"),
        }
    }
}

fn dispatch(session: &mut NoteSession<MemoryGateway>, command: Command) {
    match command {
        Command::List => {
            session.poll_remote();
            println!("{}", render_notes(session.notes()));
        }
        Command::Title(text) => session.edit_title(text),
        Command::Desc(text) => session.edit_description(text),
        Command::Edit(position) => match note_id_at(session, position) {
            Some(id) => report(session.select_for_edit(id).map(|()| "editing".to_string())),
            None => println!("error: no note at position {position}"),
        },
        Command::Save => report(session.submit().map(|outcome| match outcome {
            SubmitOutcome::Created(note) => format!("created `{}`", note.title),
            SubmitOutcome::Updated(note) => format!("updated `{}`", note.title),
        })),
        Command::Delete(position) => match note_id_at(session, position) {
            Some(id) => report(session.delete(id).map(|id| format!("deleted {id}"))),
            None => println!("error: no note at position {position}"),
        },
        Command::Refresh => report(session.refresh().map(|()| "collection re-synced".to_string())),
        Command::Help => println!("{}", help_text()),
        Command::Quit => {}
    }
}

fn note_id_at(
    session: &NoteSession<MemoryGateway>,
    position: usize,
) -> Option<syncnote_core::NoteId> {
    session.notes().nth(position - 1).map(|note| note.id)
}

fn report(result: Result<String, SessionError>) {
    match result {
        Ok(message) => println!("{message}"),
        Err(err @ SessionError::StaleNote(_)) => {
            println!("error: {err}");
            println!("hint: run `refresh` to re-sync, then retry");
        }
        Err(err) => println!("error: {err}"),
    }
}

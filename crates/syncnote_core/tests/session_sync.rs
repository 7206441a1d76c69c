use syncnote_core::{
    AuthSession, MemoryGateway, NoteGateway, NoteSession, SessionError, SubmitOutcome,
};

fn backend_with_editor() -> (MemoryGateway, MemoryGateway) {
    let editor = MemoryGateway::connect(&AuthSession::new("ada"));
    let other_client = editor.attach(&AuthSession::new("grace"));
    (editor, other_client)
}

#[test]
fn start_loads_the_existing_collection_in_arrival_order() {
    let (editor, other_client) = backend_with_editor();
    other_client.create_note("first", "1").unwrap();
    other_client.create_note("second", "2").unwrap();

    let session = NoteSession::start(editor).expect("start should load the collection");
    let titles: Vec<&str> = session.notes().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second"]);
}

#[test]
fn submit_without_id_routes_to_create_and_resets_the_draft() {
    let (editor, _other_client) = backend_with_editor();
    let mut session = NoteSession::start(editor).expect("start should succeed");

    session.edit_title("todo");
    session.edit_description("buy milk");
    let outcome = session.submit().expect("create submit should succeed");
    let created = match outcome {
        SubmitOutcome::Created(note) => note,
        other => panic!("expected create routing, got {other:?}"),
    };
    assert_eq!(created.owner, "ada");

    // Draft resets to {id: None, title: "", description: ""}.
    assert!(session.draft().is_empty());

    // No optimistic update: the note is visible only after the echoed
    // event is applied.
    assert_eq!(session.note_count(), 0);
    assert_eq!(session.poll_remote(), 1);
    assert_eq!(session.note_count(), 1);
    let listed = session.notes().next().expect("note should be listed");
    assert_eq!(listed.title, "todo");
    assert_eq!(listed.description, "buy milk");
}

#[test]
fn submit_with_locally_known_id_routes_to_update_and_preserves_position() {
    let (editor, other_client) = backend_with_editor();
    other_client.create_note("a", "").unwrap();
    let middle = other_client.create_note("b", "").unwrap();
    other_client.create_note("c", "").unwrap();

    let mut session = NoteSession::start(editor).expect("start should succeed");
    session.select_for_edit(middle.id).expect("note should be selectable");
    session.edit_title("b-changed");
    let outcome = session.submit().expect("update submit should succeed");
    assert!(matches!(outcome, SubmitOutcome::Updated(_)));
    assert!(session.draft().is_empty());

    session.poll_remote();
    let titles: Vec<&str> = session.notes().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b-changed", "c"]);
}

#[test]
fn select_for_edit_then_immediate_submit_updates_with_unchanged_fields() {
    let (editor, other_client) = backend_with_editor();
    let note = other_client.create_note("stable title", "stable body").unwrap();

    let mut session = NoteSession::start(editor).expect("start should succeed");
    session.select_for_edit(note.id).expect("note should be selectable");
    let outcome = session.submit().expect("submit should succeed");

    match outcome {
        SubmitOutcome::Updated(updated) => {
            assert_eq!(updated.id, note.id);
            assert_eq!(updated.title, "stable title");
            assert_eq!(updated.description, "stable body");
        }
        other => panic!("expected update routing, got {other:?}"),
    }
}

#[test]
fn submit_against_remotely_deleted_note_surfaces_stale_and_keeps_the_draft() {
    let (editor, other_client) = backend_with_editor();
    let note = other_client.create_note("doomed", "text").unwrap();

    let mut session = NoteSession::start(editor).expect("start should succeed");
    session.select_for_edit(note.id).expect("note should be selectable");
    session.edit_title("edited while doomed");

    // Concurrent delete elsewhere; this session has not polled, so the
    // id is still locally known and submit routes to update.
    other_client.delete_note(note.id).unwrap();
    let err = session.submit().expect_err("stale update must be surfaced");
    assert!(matches!(err, SessionError::StaleNote(id) if id == note.id));

    // Typed text survives the failure.
    assert_eq!(session.draft().title, "edited while doomed");
    assert_eq!(session.draft().target_id(), Some(note.id));

    // Documented recovery: refresh, after which the stale id is gone and
    // the same draft routes to create.
    session.refresh().expect("refresh should succeed");
    assert_eq!(session.note_count(), 0);
    let outcome = session.submit().expect("post-refresh submit should succeed");
    assert!(matches!(outcome, SubmitOutcome::Created(_)));
}

#[test]
fn delete_of_remotely_removed_note_surfaces_stale() {
    let (editor, other_client) = backend_with_editor();
    let note = other_client.create_note("gone", "").unwrap();

    let mut session = NoteSession::start(editor).expect("start should succeed");
    other_client.delete_note(note.id).unwrap();

    let err = session.delete(note.id).expect_err("stale delete must be surfaced");
    assert!(matches!(err, SessionError::StaleNote(id) if id == note.id));
}

#[test]
fn delete_intent_relies_on_the_subscription_event_for_local_removal() {
    let (editor, other_client) = backend_with_editor();
    let note = other_client.create_note("to remove", "").unwrap();

    let mut session = NoteSession::start(editor).expect("start should succeed");
    assert_eq!(session.note_count(), 1);

    session.delete(note.id).expect("delete should succeed");
    // Not removed optimistically.
    assert_eq!(session.note_count(), 1);
    assert_eq!(session.poll_remote(), 1);
    assert_eq!(session.note_count(), 0);
}

#[test]
fn remote_changes_from_other_clients_arrive_through_polling() {
    let (editor, other_client) = backend_with_editor();
    let mut session = NoteSession::start(editor).expect("start should succeed");

    let note = other_client.create_note("from grace", "hello").unwrap();
    other_client.update_note(note.id, "from grace", "hello again").unwrap();

    assert_eq!(session.poll_remote(), 2);
    let listed = session.notes().next().expect("note should be listed");
    assert_eq!(listed.owner, "grace");
    assert_eq!(listed.description, "hello again");
}

#[test]
fn dropping_the_session_releases_all_three_subscriptions() {
    let (editor, other_client) = backend_with_editor();
    let probe = other_client.attach(&AuthSession::new("probe"));

    {
        let _session = NoteSession::start(editor).expect("start should succeed");
        let status = probe.status().expect("status should succeed");
        assert_eq!(status.created_listeners, 1);
        assert_eq!(status.updated_listeners, 1);
        assert_eq!(status.deleted_listeners, 1);
    }

    let status = probe.status().expect("status should succeed");
    assert_eq!(status.created_listeners, 0);
    assert_eq!(status.updated_listeners, 0);
    assert_eq!(status.deleted_listeners, 0);
}

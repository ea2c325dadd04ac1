use super::*;
use crate::action::Action;
use crate::model::chat::{FetchPhase, Role};
use crate::model::upload::UploadPhase;
use crate::tui_event::{BackendEvent, FetchOutcome};

use paperdesk_api::chat::FALLBACK_ANSWER;

/// Create a minimal App wired to an inspectable command channel.
fn test_app() -> (App, mpsc::UnboundedReceiver<BackendCommand>) {
    let mut app = App::new("user_test_abc".to_string(), Theme::hacker());
    let (tx, rx) = mpsc::unbounded_channel();
    app.backend_cmd_tx = Some(tx);
    (app, rx)
}

fn paper(id: &str, title: &str, authors: &[&str], tags: &[&str]) -> Paper {
    Paper {
        id: id.to_string(),
        paper_id: id.to_string(),
        title: title.to_string(),
        authors: authors.iter().map(|s| s.to_string()).collect(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        ..Paper::default()
    }
}

/// Load a collection as if a refresh just completed.
fn load_papers(app: &mut App, papers: Vec<Paper>) {
    app.request_refresh();
    app.handle_backend_event(BackendEvent::PapersLoaded {
        seq: app.list_seq,
        papers,
    });
}

fn drain_commands(rx: &mut mpsc::UnboundedReceiver<BackendCommand>) -> Vec<BackendCommand> {
    let mut cmds = Vec::new();
    while let Ok(cmd) = rx.try_recv() {
        cmds.push(cmd);
    }
    cmds
}

// ── Search filtering ────────────────────────────────────────────

#[test]
fn search_matches_author_case_insensitively() {
    let (mut app, _rx) = test_app();
    load_papers(
        &mut app,
        vec![
            paper("p1", "Attention Is All You Need", &["Dr. Smith"], &[]),
            paper("p2", "Unrelated Work", &["Someone Else"], &["vision"]),
        ],
    );

    app.update(Action::StartSearch);
    for c in "smith".chars() {
        app.update(Action::TextInput(c));
    }

    assert_eq!(app.filtered.len(), 1);
    assert_eq!(app.selected_paper().unwrap().id, "p1");
}

#[test]
fn search_recomputes_synchronously_without_network() {
    let (mut app, mut rx) = test_app();
    load_papers(&mut app, vec![paper("p1", "One", &[], &["nlp"])]);
    drain_commands(&mut rx);

    app.update(Action::StartSearch);
    for c in "nlp".chars() {
        app.update(Action::TextInput(c));
    }

    assert_eq!(app.filtered.len(), 1);
    assert!(drain_commands(&mut rx).is_empty());
}

#[test]
fn esc_clears_search_and_restores_collection() {
    let (mut app, _rx) = test_app();
    load_papers(
        &mut app,
        vec![
            paper("p1", "Alpha", &[], &[]),
            paper("p2", "Beta", &[], &[]),
        ],
    );

    app.update(Action::StartSearch);
    app.update(Action::TextInput('z'));
    assert!(app.filtered.is_empty());

    app.update(Action::TextCancel);
    assert_eq!(app.filtered.len(), 2);
    assert!(app.search_query.is_empty());
}

// ── Upload gating ───────────────────────────────────────────────

#[test]
fn selecting_non_pdf_is_rejected_before_file_selected_state() {
    let (mut app, mut rx) = test_app();
    drain_commands(&mut rx);
    app.screen = Screen::Upload;
    app.file_picker.entries = vec![FileEntry {
        name: "notes.txt".to_string(),
        path: PathBuf::from("/tmp/notes.txt"),
        is_dir: false,
        is_pdf: false,
    }];
    app.file_picker.cursor = 0;

    app.update(Action::DrillIn);

    assert!(matches!(app.upload.phase, UploadPhase::NoFile));
    assert_eq!(app.status.as_deref(), Some("Please select a PDF file"));
    // No network command was issued and the collection is untouched.
    assert!(drain_commands(&mut rx).is_empty());
    assert!(app.papers.is_empty());
}

#[test]
fn selecting_pdf_then_upload_sends_one_command() {
    let (mut app, mut rx) = test_app();
    drain_commands(&mut rx);
    app.screen = Screen::Upload;
    app.file_picker.entries = vec![FileEntry {
        name: "paper.pdf".to_string(),
        path: PathBuf::from("/tmp/paper.pdf"),
        is_dir: false,
        is_pdf: true,
    }];
    app.file_picker.cursor = 0;

    app.update(Action::DrillIn);
    assert!(matches!(app.upload.phase, UploadPhase::Selected(_)));

    app.update(Action::StartUpload);
    assert!(app.upload.in_progress());

    let cmds = drain_commands(&mut rx);
    assert_eq!(cmds.len(), 1);
    assert!(matches!(cmds[0], BackendCommand::UploadPaper { .. }));

    // A second start while in flight is a no-op.
    app.update(Action::StartUpload);
    assert!(drain_commands(&mut rx).is_empty());
}

#[test]
fn upload_success_refreshes_exactly_once_and_keeps_key_findings() {
    let (mut app, mut rx) = test_app();
    drain_commands(&mut rx);
    app.upload.phase = UploadPhase::Uploading("paper.pdf".to_string());

    let mut uploaded = paper("p9", "Fresh Result", &["A. Author"], &["ml"]);
    uploaded.key_findings = vec!["finding one".to_string(), "finding two".to_string()];
    app.handle_backend_event(BackendEvent::UploadFinished {
        result: Ok(uploaded),
    });

    // The success panel keeps the returned record, key_findings included,
    // even though later list responses omit them.
    match &app.upload.phase {
        UploadPhase::Succeeded(p) => assert_eq!(p.key_findings.len(), 2),
        other => panic!("expected Succeeded, got {other:?}"),
    }

    let refreshes = drain_commands(&mut rx)
        .iter()
        .filter(|c| matches!(c, BackendCommand::ListPapers { .. }))
        .count();
    assert_eq!(refreshes, 1);
}

#[test]
fn upload_failure_shows_error_and_does_not_refresh() {
    let (mut app, mut rx) = test_app();
    drain_commands(&mut rx);
    app.upload.phase = UploadPhase::Uploading("paper.pdf".to_string());

    app.handle_backend_event(BackendEvent::UploadFinished {
        result: Err("Only PDF files are supported".to_string()),
    });

    match &app.upload.phase {
        UploadPhase::Failed(msg) => assert_eq!(msg, "Only PDF files are supported"),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(drain_commands(&mut rx).is_empty());
}

#[test]
fn selecting_new_file_clears_previous_result() {
    let (mut app, _rx) = test_app();
    app.upload.phase = UploadPhase::Failed("boom".to_string());

    app.upload.select(PathBuf::from("/tmp/next.pdf"));

    assert!(matches!(app.upload.phase, UploadPhase::Selected(_)));
}

// ── Delete flow ─────────────────────────────────────────────────

#[test]
fn delete_requires_confirmation_before_any_command() {
    let (mut app, mut rx) = test_app();
    load_papers(&mut app, vec![paper("p1", "Doomed", &[], &[])]);
    drain_commands(&mut rx);

    app.update(Action::Delete);
    assert_eq!(app.confirm_delete.as_deref(), Some("p1"));
    assert!(drain_commands(&mut rx).is_empty());

    // Esc cancels without a command.
    app.update(Action::NavigateBack);
    assert!(app.confirm_delete.is_none());
    assert!(drain_commands(&mut rx).is_empty());
}

#[test]
fn confirmed_delete_is_keyed_by_id_with_title_as_wire_key() {
    let (mut app, mut rx) = test_app();
    load_papers(&mut app, vec![paper("p1", "Doomed Title", &[], &[])]);
    drain_commands(&mut rx);

    app.update(Action::Delete);
    app.update(Action::DrillIn);

    let cmds = drain_commands(&mut rx);
    assert_eq!(cmds.len(), 1);
    match &cmds[0] {
        BackendCommand::DeletePaper { id, title } => {
            assert_eq!(id, "p1");
            assert_eq!(title, "Doomed Title");
        }
        other => panic!("expected DeletePaper, got {other:?}"),
    }
}

#[test]
fn failed_delete_leaves_collection_unchanged() {
    let (mut app, _rx) = test_app();
    load_papers(
        &mut app,
        vec![
            paper("p1", "Keep Me", &[], &[]),
            paper("p2", "Me Too", &[], &[]),
        ],
    );

    app.handle_backend_event(BackendEvent::DeleteFinished {
        id: "p1".to_string(),
        result: Err("backend unavailable".to_string()),
    });

    assert_eq!(app.papers.len(), 2);
    assert_eq!(app.filtered.len(), 2);
    assert!(app.status.as_deref().unwrap().contains("backend unavailable"));
}

#[test]
fn successful_delete_refreshes_the_collection() {
    let (mut app, mut rx) = test_app();
    load_papers(&mut app, vec![paper("p1", "Doomed", &[], &[])]);
    drain_commands(&mut rx);

    app.handle_backend_event(BackendEvent::DeleteFinished {
        id: "p1".to_string(),
        result: Ok(()),
    });

    let cmds = drain_commands(&mut rx);
    assert!(matches!(cmds[..], [BackendCommand::ListPapers { .. }]));
}

// ── Stale refresh guard ─────────────────────────────────────────

#[test]
fn stale_list_response_is_discarded() {
    let (mut app, _rx) = test_app();
    app.request_refresh();
    let first_seq = app.list_seq;
    app.request_refresh();
    let second_seq = app.list_seq;

    app.handle_backend_event(BackendEvent::PapersLoaded {
        seq: second_seq,
        papers: vec![paper("p1", "Newest", &[], &[])],
    });
    // The first refresh resolves late; its payload must not win.
    app.handle_backend_event(BackendEvent::PapersLoaded {
        seq: first_seq,
        papers: vec![],
    });

    assert_eq!(app.papers.len(), 1);
    assert_eq!(app.papers[0].title, "Newest");
}

#[test]
fn stale_list_failure_is_discarded() {
    let (mut app, _rx) = test_app();
    app.request_refresh();
    let first_seq = app.list_seq;
    app.request_refresh();

    app.handle_backend_event(BackendEvent::PapersFailed {
        seq: first_seq,
        error: "timeout".to_string(),
    });

    assert!(app.status.is_none());
    assert!(app.list_pending);
}

#[test]
fn failed_refresh_keeps_stale_collection() {
    let (mut app, _rx) = test_app();
    load_papers(&mut app, vec![paper("p1", "Stale But Present", &[], &[])]);

    app.request_refresh();
    app.handle_backend_event(BackendEvent::PapersFailed {
        seq: app.list_seq,
        error: "connection refused".to_string(),
    });

    assert_eq!(app.papers.len(), 1);
    assert!(!app.list_pending);
}

// ── Chat flow ───────────────────────────────────────────────────

#[test]
fn opening_chat_fetches_the_full_record() {
    let (mut app, mut rx) = test_app();
    load_papers(&mut app, vec![paper("p1", "Chatty", &[], &[])]);
    drain_commands(&mut rx);

    app.update(Action::DrillIn);

    assert_eq!(app.screen, Screen::Chat);
    assert_eq!(app.input_mode, InputMode::Compose);
    let cmds = drain_commands(&mut rx);
    assert!(
        matches!(&cmds[..], [BackendCommand::FetchPaper { paper_id }] if paper_id == "p1")
    );
}

#[test]
fn question_appends_user_bubble_and_sets_pending() {
    let (mut app, mut rx) = test_app();
    load_papers(&mut app, vec![paper("p1", "Chatty", &[], &[])]);
    app.update(Action::DrillIn);
    drain_commands(&mut rx);

    for c in "why?".chars() {
        app.update(Action::TextInput(c));
    }
    app.update(Action::TextConfirm);

    let chat = app.chat.as_ref().unwrap();
    assert_eq!(chat.messages.len(), 1);
    assert_eq!(chat.messages[0].role, Role::User);
    assert!(chat.pending);

    let cmds = drain_commands(&mut rx);
    assert!(
        matches!(&cmds[..], [BackendCommand::Ask { question, .. }] if question == "why?")
    );

    // A second Enter while pending sends nothing.
    app.update(Action::TextConfirm);
    assert!(drain_commands(&mut rx).is_empty());
}

#[test]
fn transport_failure_still_appends_exactly_one_fallback_reply() {
    let (mut app, mut rx) = test_app();
    load_papers(&mut app, vec![paper("p1", "Chatty", &[], &[])]);
    app.update(Action::DrillIn);
    drain_commands(&mut rx);

    for c in "hi".chars() {
        app.update(Action::TextInput(c));
    }
    app.update(Action::TextConfirm);

    // The chat client resolves failures to the fixed fallback reply.
    app.handle_backend_event(BackendEvent::AnswerReady {
        paper_id: "p1".to_string(),
        answer: FALLBACK_ANSWER.to_string(),
    });

    let chat = app.chat.as_ref().unwrap();
    let assistant: Vec<_> = chat
        .messages
        .iter()
        .filter(|m| m.role == Role::Assistant)
        .collect();
    assert_eq!(assistant.len(), 1);
    assert_eq!(assistant[0].text, FALLBACK_ANSWER);
    assert!(!chat.pending);
}

#[test]
fn reopened_chat_starts_with_empty_transcript() {
    let (mut app, _rx) = test_app();
    load_papers(&mut app, vec![paper("p1", "Chatty", &[], &[])]);

    app.update(Action::DrillIn);
    for c in "hello".chars() {
        app.update(Action::TextInput(c));
    }
    app.update(Action::TextConfirm);
    assert_eq!(app.chat.as_ref().unwrap().messages.len(), 1);

    app.update(Action::TextCancel);
    assert!(app.chat.is_none());
    assert_eq!(app.screen, Screen::Library);

    app.update(Action::DrillIn);
    assert!(app.chat.as_ref().unwrap().messages.is_empty());
}

#[test]
fn fetch_outcomes_map_to_distinct_phases() {
    let (mut app, _rx) = test_app();
    load_papers(&mut app, vec![paper("p1", "Chatty", &[], &[])]);
    app.update(Action::DrillIn);

    app.handle_backend_event(BackendEvent::PaperFetched {
        paper_id: "p1".to_string(),
        outcome: FetchOutcome::Missing,
    });
    assert!(matches!(
        app.chat.as_ref().unwrap().fetch,
        FetchPhase::Missing
    ));

    app.handle_backend_event(BackendEvent::PaperFetched {
        paper_id: "p1".to_string(),
        outcome: FetchOutcome::Failed("boom".to_string()),
    });
    assert!(matches!(
        app.chat.as_ref().unwrap().fetch,
        FetchPhase::Failed(_)
    ));
}

// ── Cursor stabilisation ────────────────────────────────────────

#[test]
fn cursor_follows_selected_paper_across_refresh() {
    let (mut app, _rx) = test_app();
    load_papers(
        &mut app,
        vec![
            paper("p1", "Alpha", &[], &[]),
            paper("p2", "Beta", &[], &[]),
        ],
    );
    app.update(Action::MoveDown);
    assert_eq!(app.selected_paper().unwrap().id, "p2");

    // A refresh reorders the collection; the cursor follows p2.
    load_papers(
        &mut app,
        vec![
            paper("p2", "Beta", &[], &[]),
            paper("p1", "Alpha", &[], &[]),
        ],
    );
    assert_eq!(app.selected_paper().unwrap().id, "p2");
}

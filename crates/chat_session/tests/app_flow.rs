mod support;

use agent_runner_api::{RunReply, FALLBACK_REPLY_TEXT};
use chat_session::app::{CRITICAL_INIT_ERROR, HELP_TEXT, TRANSCRIPT_CLEARED, WAITING_FOR_AGENT};
use chat_session::{
    BackendError, ChatApp, Message, Role, SessionContext, SessionState, SubmitOutcome,
};
use pretty_assertions::assert_eq;
use support::{BackendCall, ScriptedBackend, SurfaceEvent, SurfaceSpy};

fn ready_app(backend: ScriptedBackend) -> (ChatApp<ScriptedBackend>, SurfaceSpy) {
    let mut app = ChatApp::new(backend, SessionContext::with_ids("chat_user", "s-1"));
    let mut surface = SurfaceSpy::default();
    assert!(app.start(&mut surface));
    surface.events.clear();
    (app, surface)
}

#[test]
fn start_initializes_once_and_enters_ready() {
    let mut app = ChatApp::new(
        ScriptedBackend::ready(),
        SessionContext::with_ids("chat_user", "s-1"),
    );
    let mut surface = SurfaceSpy::default();

    assert_eq!(app.session().state(), &SessionState::Uninitialized);
    assert!(app.start(&mut surface));
    assert_eq!(app.session().state(), &SessionState::Ready);
    assert!(app.start(&mut surface));

    assert_eq!(
        app.backend().calls(),
        vec![BackendCall::Initialize {
            user_id: "chat_user".to_string(),
            session_id: "s-1".to_string(),
        }]
    );
    assert!(surface.errors().is_empty());
}

#[test]
fn failed_initialization_is_terminal_and_blocks_runs() {
    let backend =
        ScriptedBackend::with_init(Err(BackendError::new("HTTP 503: Service Unavailable")));
    let mut app = ChatApp::new(backend, SessionContext::with_ids("chat_user", "s-1"));
    let mut surface = SurfaceSpy::default();

    assert!(!app.start(&mut surface));
    assert_eq!(
        app.session().state(),
        &SessionState::Failed {
            reason: "HTTP 503: Service Unavailable".to_string(),
        }
    );
    assert_eq!(
        surface.errors(),
        vec![
            "Failed to initialize agent session: HTTP 503: Service Unavailable",
            CRITICAL_INIT_ERROR,
        ]
    );

    assert!(!app.start(&mut surface));
    assert_eq!(
        app.on_submit("can we book a venue?", &mut surface),
        SubmitOutcome::Rejected
    );
    assert_eq!(app.backend().run_calls(), 0);
    assert!(app.session().transcript().is_empty());
}

#[test]
fn submit_before_start_is_rejected_without_backend_calls() {
    let mut app = ChatApp::new(
        ScriptedBackend::ready(),
        SessionContext::with_ids("chat_user", "s-1"),
    );
    let mut surface = SurfaceSpy::default();

    assert_eq!(app.on_submit("hello", &mut surface), SubmitOutcome::Rejected);
    assert!(app.backend().calls().is_empty());
}

#[test]
fn round_trip_appends_user_and_assistant_messages() {
    let backend = ScriptedBackend::ready().push_run(Ok(RunReply::Text(
        "Hello! How can I help you plan your wedding?".to_string(),
    )));
    let (mut app, mut surface) = ready_app(backend);

    assert_eq!(
        app.on_submit("hi", &mut surface),
        SubmitOutcome::Replied { extracted: true }
    );

    assert_eq!(
        app.session().transcript(),
        &[
            Message::user("hi"),
            Message::assistant("Hello! How can I help you plan your wedding?"),
        ]
    );
    assert_eq!(
        surface.events,
        vec![
            SurfaceEvent::Message(Message::user("hi")),
            SurfaceEvent::WaitStarted(WAITING_FOR_AGENT.to_string()),
            SurfaceEvent::WaitEnded,
            SurfaceEvent::Message(Message::assistant(
                "Hello! How can I help you plan your wedding?"
            )),
        ]
    );
    assert_eq!(
        app.backend().calls().last(),
        Some(&BackendCall::Run {
            user_id: "chat_user".to_string(),
            session_id: "s-1".to_string(),
            prompt: "hi".to_string(),
        })
    );
}

#[test]
fn unparsable_reply_appends_fallback_text() {
    let backend = ScriptedBackend::ready().push_run(Ok(RunReply::Unparsable));
    let (mut app, mut surface) = ready_app(backend);

    assert_eq!(
        app.on_submit("hi", &mut surface),
        SubmitOutcome::Replied { extracted: false }
    );

    let assistant: Vec<&Message> = app
        .session()
        .transcript()
        .iter()
        .filter(|message| message.role == Role::Assistant)
        .collect();
    assert_eq!(assistant, vec![&Message::assistant(FALLBACK_REPLY_TEXT)]);
    assert!(surface.errors().is_empty());
}

#[test]
fn run_transport_error_is_shown_and_session_stays_ready() {
    let backend = ScriptedBackend::ready()
        .push_run(Err(BackendError::new("request timed out after 60s")))
        .push_run(Ok(RunReply::Text("Back online.".to_string())));
    let (mut app, mut surface) = ready_app(backend);

    assert_eq!(app.on_submit("first", &mut surface), SubmitOutcome::Abandoned);
    assert_eq!(
        surface.errors(),
        vec!["Error contacting agent: request timed out after 60s"]
    );
    assert_eq!(app.session().state(), &SessionState::Ready);
    assert_eq!(app.session().transcript(), &[Message::user("first")]);

    assert_eq!(
        app.on_submit("second", &mut surface),
        SubmitOutcome::Replied { extracted: true }
    );
    assert_eq!(
        app.session().transcript().last(),
        Some(&Message::assistant("Back online."))
    );
}

#[test]
fn blank_input_is_ignored() {
    let (mut app, mut surface) = ready_app(ScriptedBackend::ready());

    assert_eq!(app.on_submit("   ", &mut surface), SubmitOutcome::Ignored);
    assert!(surface.events.is_empty());
    assert_eq!(app.backend().run_calls(), 0);
}

#[test]
fn slash_commands_are_handled_locally() {
    let backend = ScriptedBackend::ready().push_run(Ok(RunReply::Text("ok".to_string())));
    let (mut app, mut surface) = ready_app(backend);

    assert_eq!(app.on_submit("/help", &mut surface), SubmitOutcome::Command);
    assert_eq!(
        app.session().transcript().last(),
        Some(&Message::system(HELP_TEXT))
    );

    app.on_submit("hello", &mut surface);
    assert_eq!(app.on_submit("/clear", &mut surface), SubmitOutcome::Command);
    assert_eq!(
        app.session().transcript(),
        &[Message::system(TRANSCRIPT_CLEARED)]
    );
    assert!(surface.events.contains(&SurfaceEvent::Cleared));

    assert_eq!(app.on_submit("/budget", &mut surface), SubmitOutcome::Command);
    assert!(app
        .session()
        .transcript()
        .last()
        .is_some_and(|message| message.content.starts_with("Unknown command: /budget")));

    assert_eq!(app.on_submit("/quit", &mut surface), SubmitOutcome::Quit);
    assert_eq!(app.backend().run_calls(), 1);
}

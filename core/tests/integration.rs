//! Full lifecycle against the live mock server.
//!
//! Starts the mock server on a random port, then drives every call site
//! over real HTTP: registration, login, document and notification CRUD,
//! statistics, the calendar, the ICS file, token refresh and logout —
//! including how failures surface through the normalizer.

use std::cell::Cell;

use vault_core::types::{Credentials, DocumentInput, RegisterInput};
use vault_core::{
    ApiError, AuthApi, CalendarApi, DashboardApi, Dispatcher, DocumentsApi, ErrorNormalizer,
    ErrorReporter, Navigator, NotificationsApi, Session,
};

#[derive(Default)]
struct RecordingNavigator {
    calls: Cell<u32>,
}

impl Navigator for &RecordingNavigator {
    fn to_not_found(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

#[derive(Default)]
struct RecordingReporter {
    calls: Cell<u32>,
}

impl ErrorReporter for &RecordingReporter {
    fn report(&self, _error: &ApiError) {
        self.calls.set(self.calls.get() + 1);
    }
}

fn spawn_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn vault_lifecycle() {
    let addr = spawn_server();
    let session = Session::new();
    let dispatcher = Dispatcher::new(&format!("http://{addr}"), session.clone());
    let navigator = RecordingNavigator::default();
    let reporter = RecordingReporter::default();
    let normalizer = ErrorNormalizer::new(&navigator, &reporter);

    let auth = AuthApi::new(&dispatcher);
    let documents = DocumentsApi::new(&dispatcher);
    let notifications = NotificationsApi::new(&dispatcher);
    let dashboard = DashboardApi::new(&dispatcher);
    let calendar = CalendarApi::new(&dispatcher);

    // Step 1: guarded routes before login answer 401 — a parseable business
    // error, not a transport failure.
    let err = documents.get_all().unwrap_err();
    assert!(matches!(&err, ApiError::Business(m) if m == "authentication failed"));
    assert_eq!(normalizer.normalize(&err), "authentication failed");
    assert_eq!(navigator.calls.get(), 0);
    assert_eq!(reporter.calls.get(), 0);

    // Step 2: register, then log in with the wrong password.
    auth.register(&RegisterInput {
        email: "user@example.com".to_string(),
        password: "correct-horse".to_string(),
        timezone: "Europe/Madrid".to_string(),
    })
    .unwrap();

    let err = auth
        .login(&Credentials {
            email: "user@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .unwrap_err();
    assert_eq!(normalizer.normalize(&err), "invalid credentials");
    assert!(!session.is_authenticated());

    // Step 3: real login stores the credential.
    let login = auth
        .login(&Credentials {
            email: "user@example.com".to_string(),
            password: "correct-horse".to_string(),
        })
        .unwrap();
    assert_eq!(login.timezone, "Europe/Madrid");
    assert!(session.is_authenticated());

    // Step 4: create and fetch a document.
    let expires_at = "2027-03-14T00:00:00Z".parse().unwrap();
    let id = documents
        .create(&DocumentInput {
            title: "Passport".to_string(),
            description: "red one".to_string(),
            document_type: 1,
            expires_at,
        })
        .unwrap();

    let all = documents.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);

    let mut fetched = documents.get_one(id).unwrap();
    assert_eq!(fetched.title, "Passport");
    assert_eq!(fetched.expires_at, expires_at);

    // Step 5: edit it.
    fetched.title = "Renewed passport".to_string();
    documents.edit(&fetched).unwrap();
    assert_eq!(documents.get_one(id).unwrap().title, "Renewed passport");

    // Step 6: a missing document is a 404 transport error; the normalizer
    // navigates once and returns the server's message.
    let missing = uuid::Uuid::new_v4();
    let err = documents.get_one(missing).unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(normalizer.normalize(&err), "document not found");
    assert_eq!(navigator.calls.get(), 1);
    assert_eq!(reporter.calls.get(), 0);

    // Step 7: schedule a notification and read it back.
    let date = "2026-09-01T10:00:00Z".parse().unwrap();
    notifications.create(id, date).unwrap();
    let scheduled = notifications.get_all(id).unwrap();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].date, date);

    // Step 8: the calendar joins the notification with its document.
    let events = calendar.get_calendar().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].document_id, id);
    assert_eq!(events[0].document_title, "Renewed passport");
    assert_eq!(events[0].notification_date, date);

    // Step 9: statistics reflect the store.
    let stats = dashboard.get_stats().unwrap();
    assert_eq!(stats.total_documents, 1);
    assert_eq!(stats.total_notifications, 1);
    assert_eq!(stats.used_types.len(), 1);
    assert_eq!(stats.used_types[0].document_type, 1);
    assert_eq!(stats.latest_documents.len(), 1);

    // Step 10: the ICS file is plain text, no envelope.
    let ics = dashboard.get_ics_file(&login.calendar_id).unwrap();
    assert!(ics.starts_with("BEGIN:VCALENDAR"));
    assert!(ics.contains("SUMMARY:Renewed passport"));

    // Step 11: refresh rotates the credential.
    let before = session.token().unwrap();
    auth.refresh_token().unwrap();
    let after = session.token().unwrap();
    assert_ne!(before, after);
    assert_eq!(documents.get_all().unwrap().len(), 1);

    // Step 12: delete the notification, then the document.
    notifications.delete(id, scheduled[0].id).unwrap();
    assert!(notifications.get_all(id).unwrap().is_empty());
    documents.delete(id).unwrap();
    assert!(documents.get_all().unwrap().is_empty());

    // Step 13: logout clears the credential and the guard kicks back in.
    auth.logout();
    assert!(!session.is_authenticated());
    let err = documents.get_all().unwrap_err();
    assert!(matches!(err, ApiError::Business(_)));
}

#[test]
fn duplicate_registration_surfaces_as_status_error() {
    let addr = spawn_server();
    let dispatcher = Dispatcher::new(&format!("http://{addr}"), Session::new());
    let auth = AuthApi::new(&dispatcher);

    let input = RegisterInput {
        email: "twice@example.com".to_string(),
        password: "correct-horse".to_string(),
        timezone: "UTC".to_string(),
    };
    auth.register(&input).unwrap();

    // A 409 is outside the accepted set, so it surfaces as a transport
    // error carrying the status and the server's message.
    let err = auth.register(&input).unwrap_err();
    assert_eq!(err.status_code(), Some(409));

    let navigator = RecordingNavigator::default();
    let reporter = RecordingReporter::default();
    let normalizer = ErrorNormalizer::new(&navigator, &reporter);
    assert_eq!(normalizer.normalize(&err), "email already registered");
    assert_eq!(navigator.calls.get(), 0);
    assert_eq!(reporter.calls.get(), 0);
}

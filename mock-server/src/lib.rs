//! In-memory implementation of the document vault API.
//!
//! Mirrors the remote service's contract for tests: every JSON route
//! answers with the nested `{error, message, data}` envelope, guarded
//! routes answer 401 with a flagged envelope when the `token` cookie is
//! missing or unknown, and unknown documents answer 404. State lives in a
//! shared `RwLock`; nothing is persisted.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub document_type: u8,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub document_id: Uuid,
    pub date: DateTime<Utc>,
}

#[derive(Clone, Debug)]
struct User {
    email: String,
    password: String,
    timezone: String,
    calendar_id: String,
}

#[derive(Default)]
struct VaultState {
    users: Vec<User>,
    /// token -> user email
    sessions: std::collections::HashMap<String, String>,
    documents: Vec<Document>,
    notifications: Vec<Notification>,
}

type Db = Arc<RwLock<VaultState>>;

#[derive(Deserialize)]
struct RegisterPayload {
    email: String,
    password: String,
    #[serde(default)]
    timezone: String,
}

#[derive(Deserialize)]
struct LoginPayload {
    email: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentCreatePayload {
    title: String,
    #[serde(default)]
    description: String,
    document_type: u8,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct NotificationCreatePayload {
    date: DateTime<Utc>,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(VaultState::default()));
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/user/token/refresh", get(refresh_token))
        .route("/documents", get(document_get_all))
        .route("/documents/statistics", get(statistics))
        .route("/documents/create", post(document_create))
        .route("/documents/edit", patch(document_edit))
        .route("/documents/{documentId}", get(document_get_one))
        .route("/documents/{documentId}/delete", delete(document_delete))
        .route(
            "/documents/{documentId}/notifications",
            get(notification_get_all),
        )
        .route(
            "/documents/{documentId}/notifications/create",
            post(notification_create),
        )
        .route(
            "/documents/{documentId}/notifications/delete/{id}",
            delete(notification_delete),
        )
        .route("/calendar", get(calendar))
        .route("/ics/{id}", get(ics))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type Reply = (StatusCode, Json<Value>);

fn ok(status: StatusCode, message: &str, data: Value) -> Reply {
    (
        status,
        Json(json!({ "error": false, "message": message, "data": data })),
    )
}

fn fail(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "error": true, "message": message })))
}

fn unauthorized() -> Reply {
    fail(StatusCode::UNAUTHORIZED, "authentication failed")
}

/// Value of the `token` cookie, if the request carries one.
fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == "token").then(|| value.to_string())
    })
}

/// Resolve the session behind the request's token cookie.
fn authenticate(state: &VaultState, headers: &HeaderMap) -> Result<String, Reply> {
    let token = cookie_token(headers).ok_or_else(unauthorized)?;
    state
        .sessions
        .get(&token)
        .cloned()
        .ok_or_else(unauthorized)
}

async fn register(State(db): State<Db>, Json(payload): Json<RegisterPayload>) -> Reply {
    let mut state = db.write().await;
    if state.users.iter().any(|u| u.email == payload.email) {
        return fail(StatusCode::CONFLICT, "email already registered");
    }
    state.users.push(User {
        email: payload.email,
        password: payload.password,
        timezone: payload.timezone,
        calendar_id: Uuid::new_v4().simple().to_string(),
    });
    ok(StatusCode::CREATED, "user registered", Value::Null)
}

async fn login(State(db): State<Db>, Json(payload): Json<LoginPayload>) -> Reply {
    let mut state = db.write().await;
    let user = match state
        .users
        .iter()
        .find(|u| u.email == payload.email && u.password == payload.password)
    {
        Some(user) => user.clone(),
        None => return fail(StatusCode::UNAUTHORIZED, "invalid credentials"),
    };

    let token = Uuid::new_v4().simple().to_string();
    state.sessions.insert(token.clone(), user.email.clone());

    ok(
        StatusCode::ACCEPTED,
        "logged in",
        json!({
            "token": token,
            "calendarId": user.calendar_id,
            "timezone": user.timezone,
        }),
    )
}

async fn refresh_token(State(db): State<Db>, headers: HeaderMap) -> Reply {
    let mut state = db.write().await;
    let old_token = match cookie_token(&headers) {
        Some(token) => token,
        None => return unauthorized(),
    };
    let email = match state.sessions.remove(&old_token) {
        Some(email) => email,
        None => return unauthorized(),
    };

    let token = Uuid::new_v4().simple().to_string();
    state.sessions.insert(token.clone(), email);
    ok(
        StatusCode::ACCEPTED,
        "token refreshed",
        json!({ "token": token }),
    )
}

async fn document_get_all(State(db): State<Db>, headers: HeaderMap) -> Reply {
    let state = db.read().await;
    if let Err(reply) = authenticate(&state, &headers) {
        return reply;
    }
    ok(
        StatusCode::OK,
        "",
        json!({ "documents": state.documents }),
    )
}

async fn document_get_one(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(document_id): Path<Uuid>,
) -> Reply {
    let state = db.read().await;
    if let Err(reply) = authenticate(&state, &headers) {
        return reply;
    }
    match state.documents.iter().find(|d| d.id == document_id) {
        Some(document) => ok(StatusCode::OK, "", json!({ "document": document })),
        None => fail(StatusCode::NOT_FOUND, "document not found"),
    }
}

async fn document_create(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(payload): Json<DocumentCreatePayload>,
) -> Reply {
    let mut state = db.write().await;
    if let Err(reply) = authenticate(&state, &headers) {
        return reply;
    }
    let document = Document {
        id: Uuid::new_v4(),
        title: payload.title,
        description: payload.description,
        document_type: payload.document_type,
        expires_at: payload.expires_at,
    };
    let id = document.id;
    state.documents.push(document);
    ok(
        StatusCode::CREATED,
        "document created",
        json!({ "documentId": id }),
    )
}

async fn document_edit(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(payload): Json<Document>,
) -> Reply {
    let mut state = db.write().await;
    if let Err(reply) = authenticate(&state, &headers) {
        return reply;
    }
    match state.documents.iter_mut().find(|d| d.id == payload.id) {
        Some(document) => {
            *document = payload;
            ok(StatusCode::CREATED, "document updated", Value::Null)
        }
        None => fail(StatusCode::NOT_FOUND, "document not found"),
    }
}

async fn document_delete(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(document_id): Path<Uuid>,
) -> Reply {
    let mut state = db.write().await;
    if let Err(reply) = authenticate(&state, &headers) {
        return reply;
    }
    let before = state.documents.len();
    state.documents.retain(|d| d.id != document_id);
    if state.documents.len() == before {
        return fail(StatusCode::NOT_FOUND, "document not found");
    }
    // Deleting a document takes its notifications with it.
    state.notifications.retain(|n| n.document_id != document_id);
    ok(StatusCode::OK, "document deleted", Value::Null)
}

async fn notification_get_all(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(document_id): Path<Uuid>,
) -> Reply {
    let state = db.read().await;
    if let Err(reply) = authenticate(&state, &headers) {
        return reply;
    }
    let notifications: Vec<&Notification> = state
        .notifications
        .iter()
        .filter(|n| n.document_id == document_id)
        .collect();
    ok(
        StatusCode::OK,
        "",
        json!({ "notifications": notifications }),
    )
}

async fn notification_create(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(document_id): Path<Uuid>,
    Json(payload): Json<NotificationCreatePayload>,
) -> Reply {
    let mut state = db.write().await;
    if let Err(reply) = authenticate(&state, &headers) {
        return reply;
    }
    if !state.documents.iter().any(|d| d.id == document_id) {
        return fail(StatusCode::NOT_FOUND, "document not found");
    }
    state.notifications.push(Notification {
        id: Uuid::new_v4(),
        document_id,
        date: payload.date,
    });
    ok(StatusCode::CREATED, "notification created", Value::Null)
}

async fn notification_delete(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((document_id, id)): Path<(Uuid, Uuid)>,
) -> Reply {
    let mut state = db.write().await;
    if let Err(reply) = authenticate(&state, &headers) {
        return reply;
    }
    let before = state.notifications.len();
    state
        .notifications
        .retain(|n| !(n.id == id && n.document_id == document_id));
    if state.notifications.len() == before {
        return fail(StatusCode::NOT_FOUND, "notification not found");
    }
    ok(StatusCode::OK, "notification deleted", Value::Null)
}

async fn statistics(State(db): State<Db>, headers: HeaderMap) -> Reply {
    let state = db.read().await;
    if let Err(reply) = authenticate(&state, &headers) {
        return reply;
    }

    let mut counts: std::collections::HashMap<u8, i64> = std::collections::HashMap::new();
    for document in &state.documents {
        *counts.entry(document.document_type).or_default() += 1;
    }
    let mut used_types: Vec<Value> = counts
        .into_iter()
        .map(|(document_type, count)| json!({ "documentType": document_type, "count": count }))
        .collect();
    used_types.sort_by_key(|v| v["documentType"].as_u64());

    let latest: Vec<&Document> = state.documents.iter().rev().take(4).collect();

    ok(
        StatusCode::OK,
        "",
        json!({
            "totalDocuments": state.documents.len(),
            "totalNotifications": state.notifications.len(),
            "usedTypes": used_types,
            "latestDocuments": latest,
        }),
    )
}

async fn calendar(State(db): State<Db>, headers: HeaderMap) -> Reply {
    let state = db.read().await;
    if let Err(reply) = authenticate(&state, &headers) {
        return reply;
    }

    let events: Vec<Value> = state
        .notifications
        .iter()
        .filter_map(|n| {
            let document = state.documents.iter().find(|d| d.id == n.document_id)?;
            Some(json!({
                "documentId": document.id,
                "notificationId": n.id,
                "documentTitle": document.title,
                "notificationDate": n.date,
                "expiresAt": document.expires_at,
            }))
        })
        .collect();

    ok(StatusCode::OK, "", json!({ "calendar": events }))
}

async fn ics(State(db): State<Db>, Path(calendar_id): Path<String>) -> impl IntoResponse {
    let state = db.read().await;
    if !state.users.iter().any(|u| u.calendar_id == calendar_id) {
        return fail(StatusCode::NOT_FOUND, "calendar not found").into_response();
    }

    let mut body = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//vault//EN\r\n");
    for notification in &state.notifications {
        let title = state
            .documents
            .iter()
            .find(|d| d.id == notification.document_id)
            .map(|d| d.title.as_str())
            .unwrap_or("Document");
        body.push_str("BEGIN:VEVENT\r\n");
        body.push_str(&format!("UID:{}\r\n", notification.id));
        body.push_str(&format!(
            "DTSTART:{}\r\n",
            notification.date.format("%Y%m%dT%H%M%SZ")
        ));
        body.push_str(&format!("SUMMARY:{title}\r\n"));
        body.push_str("END:VEVENT\r\n");
    }
    body.push_str("END:VCALENDAR\r\n");

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/calendar")],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_token_finds_the_token_pair() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "theme=dark; token=abc123".parse().unwrap());
        assert_eq!(cookie_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn cookie_token_none_without_cookie_header() {
        assert_eq!(cookie_token(&HeaderMap::new()), None);
    }

    #[test]
    fn document_serializes_with_camel_case() {
        let document = Document {
            id: Uuid::nil(),
            title: "Passport".to_string(),
            description: String::new(),
            document_type: 1,
            expires_at: "2027-03-14T00:00:00Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["documentType"], 1);
        assert_eq!(json["expiresAt"], "2027-03-14T00:00:00Z");
    }
}

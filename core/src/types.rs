//! Resource DTOs shared by the call sites and the mock server tests.
//!
//! # Design
//! Field names are camelCase on the wire, dates are RFC 3339 strings
//! (chrono handles both directions), ids are UUIDs. The types mirror the
//! remote API's schema but are defined independently; the integration tests
//! against the mock server catch drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored document with an expiry date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub document_type: u8,
    pub expires_at: DateTime<Utc>,
}

/// Payload for creating a document; the server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub document_type: u8,
    pub expires_at: DateTime<Utc>,
}

/// An expiry reminder attached to a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub document_id: Uuid,
    pub date: DateTime<Utc>,
}

/// One calendar entry: a notification joined with its document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub document_id: Uuid,
    pub notification_id: Uuid,
    pub document_title: String,
    pub notification_date: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// How many documents of one type the user stores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsedType {
    pub document_type: u8,
    pub count: i64,
}

/// Dashboard statistics for the current user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_documents: i64,
    pub total_notifications: i64,
    pub used_types: Vec<UsedType>,
    pub latest_documents: Vec<Document>,
}

/// Login payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration payload. The timezone feeds the user's ICS calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub timezone: String,
}

/// Successful login payload: the session credential plus calendar options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    pub calendar_id: String,
    pub timezone: String,
}

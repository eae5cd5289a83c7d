//! Notification call sites, scoped under their document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dispatch::Dispatcher;
use crate::envelope::{Envelope, RawEnvelope};
use crate::error::ApiError;
use crate::types::Notification;

#[derive(Debug, Deserialize)]
struct NotificationsData {
    notifications: Vec<Notification>,
}

#[derive(Debug, Serialize)]
struct NotificationPayload {
    date: DateTime<Utc>,
}

pub struct NotificationsApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> NotificationsApi<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// All notifications attached to one document.
    pub fn get_all(&self, document_id: Uuid) -> Result<Vec<Notification>, ApiError> {
        let envelope: Envelope<NotificationsData> = self
            .dispatcher
            .get(&format!("/documents/{document_id}/notifications"))?;
        Ok(envelope.require_data()?.notifications)
    }

    /// Schedule a reminder for `date`.
    pub fn create(&self, document_id: Uuid, date: DateTime<Utc>) -> Result<(), ApiError> {
        let envelope: RawEnvelope = self.dispatcher.post(
            &format!("/documents/{document_id}/notifications/create"),
            &NotificationPayload { date },
        )?;
        envelope.ack()
    }

    pub fn delete(&self, document_id: Uuid, notification_id: Uuid) -> Result<(), ApiError> {
        let envelope: RawEnvelope = self.dispatcher.delete(&format!(
            "/documents/{document_id}/notifications/delete/{notification_id}"
        ))?;
        envelope.ack()
    }
}

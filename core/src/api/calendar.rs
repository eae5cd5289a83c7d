//! Calendar listing call site.

use serde::Deserialize;

use crate::dispatch::Dispatcher;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::types::CalendarEvent;

#[derive(Debug, Deserialize)]
struct CalendarData {
    calendar: Vec<CalendarEvent>,
}

pub struct CalendarApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> CalendarApi<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Upcoming notifications for the current user, joined with their
    /// documents.
    pub fn get_calendar(&self) -> Result<Vec<CalendarEvent>, ApiError> {
        let envelope: Envelope<CalendarData> = self.dispatcher.get("/calendar")?;
        Ok(envelope.require_data()?.calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_data_unwraps_the_event_list() {
        let data: CalendarData = serde_json::from_str(
            r#"{"calendar":[{"documentId":"00000000-0000-0000-0000-000000000001","notificationId":"00000000-0000-0000-0000-000000000002","documentTitle":"Passport","notificationDate":"2026-09-01T10:00:00Z","expiresAt":"2026-10-01T00:00:00Z"}]}"#,
        )
        .unwrap();
        assert_eq!(data.calendar.len(), 1);
        assert_eq!(data.calendar[0].document_title, "Passport");
    }
}

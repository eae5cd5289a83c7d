//! Dashboard statistics and the exported ICS calendar file.

use crate::dispatch::Dispatcher;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::types::DashboardStats;

pub struct DashboardApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> DashboardApi<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Statistics for the current user, with used types sorted by
    /// descending count for display.
    pub fn get_stats(&self) -> Result<DashboardStats, ApiError> {
        let envelope: Envelope<DashboardStats> = self.dispatcher.get("/documents/statistics")?;
        let mut stats = envelope.require_data()?;
        stats.used_types.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(stats)
    }

    /// The user's calendar in ICS form. Served as `text/calendar`, not as a
    /// JSON envelope; the calendar id is shareable and needs no session.
    pub fn get_ics_file(&self, calendar_id: &str) -> Result<String, ApiError> {
        self.dispatcher.get_text(&format!("/ics/{calendar_id}"))
    }
}

//! Typed call sites, one module per API resource.
//!
//! Each client borrows the [`Dispatcher`](crate::dispatch::Dispatcher),
//! supplies its routes and payloads, and checks the envelope flag before
//! handing the payload to the caller. Failures propagate unchanged; picking
//! a display message is the normalizer's job, not theirs.

pub mod auth;
pub mod calendar;
pub mod dashboard;
pub mod documents;
pub mod notifications;

pub use auth::AuthApi;
pub use calendar::CalendarApi;
pub use dashboard::DashboardApi;
pub use documents::DocumentsApi;
pub use notifications::NotificationsApi;

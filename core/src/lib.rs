//! Synchronous API client for the document vault service.
//!
//! # Overview
//! The vault API manages personal documents with expiry dates, reminder
//! notifications, dashboard statistics and a notification calendar. This
//! crate is the client side of that contract: it builds requests as plain
//! data, executes exactly one round trip per call, and funnels every
//! failure through a single normalizer that picks the one string a user
//! should see.
//!
//! # Design
//! - [`Dispatcher`] splits each call into `build` (URL joining, JSON
//!   negotiation, credential attachment — all testable offline) and `send`
//!   (the ureq round trip). Statuses in {2xx, 401} are answers; everything
//!   else is a transport error.
//! - Every JSON route shares the nested [`Envelope`] shape
//!   `{error, message, data}`; a flagged envelope becomes
//!   [`ApiError::Business`] carrying the server's message verbatim.
//! - [`ErrorNormalizer`] classifies failures in a fixed precedence order
//!   and escalates through injected navigation/reporting collaborators.
//! - The session credential is an explicit [`Session`] value written by the
//!   auth flows and read by every dispatch — no ambient cookie jar.
//! - The resource call sites under [`api`] supply routes and payload types
//!   and nothing else.

pub mod api;
pub mod dispatch;
pub mod document_type;
pub mod envelope;
pub mod error;
pub mod http;
pub mod normalize;
pub mod session;
pub mod types;

pub use api::{AuthApi, CalendarApi, DashboardApi, DocumentsApi, NotificationsApi};
pub use dispatch::Dispatcher;
pub use envelope::{Envelope, RawEnvelope};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use normalize::{ErrorNormalizer, ErrorReporter, Navigator, FALLBACK_MESSAGE};
pub use session::Session;
pub use types::{
    CalendarEvent, Credentials, DashboardStats, Document, DocumentInput, LoginData, Notification,
    RegisterInput, UsedType,
};

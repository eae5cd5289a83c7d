//! Error normalizer: one failure in, one display string out.
//!
//! # Design
//! Classification runs in a fixed precedence order:
//! 1. A business error returns the server's message verbatim, no side
//!    effects.
//! 2. A transport error with a status escalates by code — 404 navigates to
//!    the not-found view, 500 and above report to observability — and
//!    returns the server message when one was salvaged, else the
//!    transport's own text.
//! 3. Everything else (no status, parse failures) reports to observability
//!    and returns a fixed fallback string.
//!
//! The navigation and reporting collaborators are injected; this module
//! implements neither. Each call is independent, so normalizing the same
//! error twice produces the same string and one side effect per call.

use crate::error::ApiError;

/// Message shown for failures nobody can say anything better about.
pub const FALLBACK_MESSAGE: &str = "An error occurred, please try again";

/// Navigation collaborator, used to leave the current view on 404.
pub trait Navigator {
    fn to_not_found(&self);
}

/// Observability sink for server-side and unclassified failures.
pub trait ErrorReporter {
    fn report(&self, error: &ApiError);
}

/// Turns any [`ApiError`] into exactly one display-safe string.
pub struct ErrorNormalizer<N, R> {
    navigator: N,
    reporter: R,
}

impl<N: Navigator, R: ErrorReporter> ErrorNormalizer<N, R> {
    pub fn new(navigator: N, reporter: R) -> Self {
        Self { navigator, reporter }
    }

    /// Classify `error` and return the message to display. Internal detail
    /// (status codes, parse errors) goes to the reporter, never to the
    /// returned string.
    pub fn normalize(&self, error: &ApiError) -> String {
        match error {
            ApiError::Business(message) => message.clone(),
            ApiError::Transport {
                status: Some(status),
                server_message,
                ..
            } => {
                if *status == 404 {
                    self.navigator.to_not_found();
                } else if *status >= 500 {
                    tracing::error!(status, %error, "server error");
                    self.reporter.report(error);
                }
                server_message.clone().unwrap_or_else(|| error.to_string())
            }
            other => {
                tracing::error!(error = %other, "unclassified error");
                self.reporter.report(other);
                FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

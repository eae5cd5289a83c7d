//! Request dispatcher: one round trip per invocation.
//!
//! # Design
//! Each call is split into `build` (produces an [`HttpRequest`] value with
//! the resolved URL, negotiation headers and session credential) and `send`
//! (executes it through a ureq agent). The split keeps request construction
//! deterministic and testable without a network, while `send` owns the one
//! piece of I/O in the crate.
//!
//! The agent is configured with `http_status_as_error(false)` so 4xx/5xx
//! responses come back as data. `send` then accepts statuses in
//! {200..=299, 401} — callers need to tell "not logged in" apart from
//! "network broken", so a 401 body is returned for envelope inspection like
//! any success. Every other status becomes a transport error carrying the
//! status and, when the error body parses as an envelope, the
//! server-supplied message. Nothing is retried and no state is shared
//! between calls beyond the session credential.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::envelope::{Envelope, RawEnvelope};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::Session;

/// Executes single HTTP round trips against one base URL.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    base_url: String,
    session: Session,
    agent: ureq::Agent,
}

impl Dispatcher {
    /// Client for the API at `base_url`, reading its credential from
    /// `session` on every call.
    pub fn new(base_url: &str, session: Session) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            agent,
        }
    }

    /// Session handle this dispatcher attaches credentials from.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build the request intent for `route` without touching the network.
    ///
    /// The URL is the base URL and the route joined with exactly one `/`.
    /// JSON negotiation headers are always set, the `content-type` only when
    /// a body is present, and the session token rides along as a
    /// `cookie: token=…` header when one is stored.
    pub fn build(&self, method: HttpMethod, route: &str, body: Option<String>) -> HttpRequest {
        let url = if route.starts_with('/') {
            format!("{}{route}", self.base_url)
        } else {
            format!("{}/{route}", self.base_url)
        };

        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = self.session.token() {
            headers.push(("cookie".to_string(), format!("token={token}")));
        }

        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }

    /// Execute one round trip.
    ///
    /// Returns the response for accepted statuses ({2xx, 401}); fails with a
    /// transport error for any other status or when the call never
    /// completes (DNS, connection refused, timeout).
    pub fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(url = %request.url, method = ?request.method, "dispatching request");

        let result = match (request.method, request.body) {
            (HttpMethod::Get, _) => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            (HttpMethod::Delete, _) => {
                let mut builder = self.agent.delete(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            (HttpMethod::Post, body) => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.send(body.unwrap_or_default().as_bytes())
            }
            (HttpMethod::Patch, body) => {
                let mut builder = self.agent.patch(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.send(body.unwrap_or_default().as_bytes())
            }
        };

        let mut response = result.map_err(|e| ApiError::network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::network(e.to_string()))?;

        if (200..300).contains(&status) || status == 401 {
            return Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body,
            });
        }

        // Rejected status: salvage the server's message when the error body
        // is still a parseable envelope.
        let server_message = serde_json::from_str::<RawEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.message)
            .filter(|m| !m.is_empty());
        Err(ApiError::status(status, server_message))
    }

    /// GET `route` and decode the envelope.
    pub fn get<T: DeserializeOwned>(&self, route: &str) -> Result<Envelope<T>, ApiError> {
        let response = self.send(self.build(HttpMethod::Get, route, None))?;
        decode(&response)
    }

    /// POST `payload` to `route` and decode the envelope.
    pub fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        route: &str,
        payload: &B,
    ) -> Result<Envelope<T>, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let response = self.send(self.build(HttpMethod::Post, route, Some(body)))?;
        decode(&response)
    }

    /// PATCH `payload` to `route` and decode the envelope.
    pub fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        route: &str,
        payload: &B,
    ) -> Result<Envelope<T>, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let response = self.send(self.build(HttpMethod::Patch, route, Some(body)))?;
        decode(&response)
    }

    /// DELETE `route` and decode the envelope.
    pub fn delete<T: DeserializeOwned>(&self, route: &str) -> Result<Envelope<T>, ApiError> {
        let response = self.send(self.build(HttpMethod::Delete, route, None))?;
        decode(&response)
    }

    /// GET `route` and return the raw body, for non-JSON resources like the
    /// ICS calendar file.
    pub fn get_text(&self, route: &str) -> Result<String, ApiError> {
        let response = self.send(self.build(HttpMethod::Get, route, None))?;
        Ok(response.body)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<Envelope<T>, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

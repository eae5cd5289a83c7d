//! HTTP transport types described as plain data.
//!
//! # Design
//! A request is built as a value first and executed second, so request
//! construction (URL joining, credential attachment, content negotiation)
//! stays fully testable without a network. All fields use owned types
//! (`String`, `Vec`) so values can be moved freely between the builder and
//! the executor.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

/// One request intent: immutable once built, used for exactly one dispatch.
///
/// Built by [`Dispatcher::build`](crate::dispatch::Dispatcher::build) and
/// consumed by [`Dispatcher::send`](crate::dispatch::Dispatcher::send).
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Value of the first header matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The answered side of a round trip: status code plus raw body.
///
/// Only statuses the dispatcher accepts ({2xx, 401}) ever reach callers as
/// an `HttpResponse`; everything else is mapped to a transport error.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost:8080/documents".to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: None,
        };
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("cookie"), None);
    }
}

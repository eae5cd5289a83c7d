//! Authentication flows: the only writers of the session credential.

use serde::Deserialize;

use crate::dispatch::Dispatcher;
use crate::envelope::{Envelope, RawEnvelope};
use crate::error::ApiError;
use crate::types::{Credentials, LoginData, RegisterInput};

#[derive(Debug, Deserialize)]
struct TokenData {
    token: String,
}

pub struct AuthApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> AuthApi<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Log in and store the returned credential in the session.
    pub fn login(&self, credentials: &Credentials) -> Result<LoginData, ApiError> {
        let envelope: Envelope<LoginData> = self.dispatcher.post("/auth/login", credentials)?;
        let data = envelope.require_data()?;
        self.dispatcher.session().set(data.token.clone());
        Ok(data)
    }

    /// Register a new user. Does not log in.
    pub fn register(&self, input: &RegisterInput) -> Result<(), ApiError> {
        let envelope: RawEnvelope = self.dispatcher.post("/auth/register", input)?;
        envelope.ack()
    }

    /// Exchange the current credential for a fresh one. A no-op without a
    /// stored credential; a business rejection clears it before
    /// propagating, since the old token is dead either way.
    pub fn refresh_token(&self) -> Result<(), ApiError> {
        let session = self.dispatcher.session();
        if !session.is_authenticated() {
            return Ok(());
        }

        let envelope: Envelope<TokenData> = self.dispatcher.get("/user/token/refresh")?;
        match envelope.require_data() {
            Ok(data) => {
                session.set(data.token);
                Ok(())
            }
            Err(err) => {
                if matches!(err, ApiError::Business(_)) {
                    session.clear();
                }
                Err(err)
            }
        }
    }

    /// Drop the local credential. The token is opaque and short-lived, so
    /// there is nothing to revoke server-side.
    pub fn logout(&self) {
        self.dispatcher.session().clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::session::Session;

    use super::*;

    #[test]
    fn logout_clears_the_session() {
        let session = Session::new();
        session.set("tok");
        let dispatcher = Dispatcher::new("http://localhost:8080", session.clone());
        AuthApi::new(&dispatcher).logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn refresh_without_credential_is_a_no_op() {
        // Unroutable base URL: the call must return before any dispatch.
        let dispatcher = Dispatcher::new("http://127.0.0.1:1", Session::new());
        assert!(AuthApi::new(&dispatcher).refresh_token().is_ok());
    }

    #[test]
    fn token_data_deserializes() {
        let data: TokenData = serde_json::from_str(r#"{"token":"fresh"}"#).unwrap();
        assert_eq!(data.token, "fresh");
    }
}

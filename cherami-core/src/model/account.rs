//! Login and acknowledgement bodies.

use serde::{Deserialize, Serialize};

/// Credentials posted to `sessions`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    /// User handle.
    pub handle: String,
    /// Plain-text password; the channel is assumed to be authenticated.
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("handle", &self.handle)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login body.
///
/// Older backends answer `{"Response": ..., "SessionId": ...}`; both
/// spellings are accepted.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    /// Human-readable confirmation.
    #[serde(default, alias = "Response")]
    pub response: String,
    /// The issued session token.
    #[serde(alias = "SessionId", alias = "sessionid")]
    pub session: String,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("response", &self.response)
            .field("session", &"<redacted>")
            .finish()
    }
}

/// `{"response": "..."}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseText {
    /// Text shown to the user.
    #[serde(alias = "Response")]
    pub response: String,
}

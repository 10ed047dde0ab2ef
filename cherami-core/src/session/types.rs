//! Session data.

/// Authentication state of the current user.
///
/// Both fields are absent before the first login and after logout.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Opaque token sent as the `Authorization` header.
    pub token: Option<String>,
    /// Handle of the logged-in user.
    pub username: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .finish()
    }
}

impl Session {
    /// Creates a session for a freshly logged-in user.
    #[must_use]
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
        }
    }

    /// Returns the token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the username, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns whether a token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

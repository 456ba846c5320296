//! Credential verification for the control endpoint
//!
//! A single shared credential pair guards the lock. Verification is a
//! stateless comparison; there is no user model behind it.

/// Verifies presented HTTP Basic credentials against the configured pair.
#[derive(Clone)]
pub struct AuthGate {
    username: String,
    password: String,
}

impl AuthGate {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Whether the presented pair exactly matches the expected one.
    ///
    /// A missing credential is handled by the caller passing empty
    /// strings, which fail the comparison like any other mismatch.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

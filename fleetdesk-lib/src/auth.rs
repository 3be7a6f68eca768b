//! Credential verification for password-gated operations.

use std::fmt::{self, Debug, Formatter};

/// Decides whether a secret supplied by an administrator is acceptable.
///
/// The roster consults its verifier when a pending removal is confirmed, so
/// the check can be swapped for anything from a fixed string to a real
/// credential service without touching the removal protocol.
pub trait CredentialVerifier: Debug + Send + Sync {
    fn verify(&self, secret: &str) -> bool;
}

/// Accepts exactly one configured secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(String);

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl CredentialVerifier for SharedSecret {
    fn verify(&self, secret: &str) -> bool {
        self.0 == secret
    }
}

// Never print the secret itself
impl Debug for SharedSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

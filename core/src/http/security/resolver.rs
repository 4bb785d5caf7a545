//! Directory-delegated authentication.

use std::sync::Arc;

use async_trait::async_trait;
use derive_more::Display;
use tracing::{debug, warn};

use crate::http::security::crypto::PasswordEncoder;
use crate::http::security::directory::CredentialDirectory;
use crate::http::security::principal::{Principal, Role};

/// Why an attempt failed. Kept private to [`AuthenticationError`]: the
/// reasons exist for logs only and never reach a caller-visible surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FailureReason {
    UnknownIdentity,
    BadCredential,
}

/// A failed authentication attempt.
///
/// Deliberately a single class: an unknown identifier and a wrong secret
/// produce identical errors and identical responses, so callers cannot
/// enumerate which identities exist. The reason surfaces in `Debug` output
/// for logs, never in `Display` or any response body.
#[derive(Display)]
#[display("invalid credentials")]
pub struct AuthenticationError {
    reason: FailureReason,
}

impl std::fmt::Debug for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthenticationError({:?})", self.reason)
    }
}

impl AuthenticationError {
    fn unknown_identity() -> Self {
        AuthenticationError {
            reason: FailureReason::UnknownIdentity,
        }
    }

    fn bad_credential() -> Self {
        AuthenticationError {
            reason: FailureReason::BadCredential,
        }
    }
}

impl std::error::Error for AuthenticationError {}

/// Resolves presented credentials into a [`Principal`].
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticates one identifier/secret pair.
    async fn authenticate(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<Principal, AuthenticationError>;
}

/// [`Authenticator`] backed by a [`CredentialDirectory`].
///
/// Each attempt performs one uncached directory lookup, maps the record into
/// a candidate principal, and verifies the presented secret against the
/// stored credential. Lookup failures, unparseable records and credential
/// mismatches all deny; only the logs distinguish them.
pub struct DirectoryAuthenticator {
    directory: Arc<dyn CredentialDirectory>,
    encoder: Arc<dyn PasswordEncoder>,
    // Verified against when the lookup fails, so an unknown identifier costs
    // the same as a wrong secret.
    placeholder: String,
}

impl DirectoryAuthenticator {
    pub fn new(directory: Arc<dyn CredentialDirectory>, encoder: Arc<dyn PasswordEncoder>) -> Self {
        let placeholder = encoder.encode("placeholder-credential");
        DirectoryAuthenticator {
            directory,
            encoder,
            placeholder,
        }
    }

    fn deny_unknown(&self, secret: &str) -> AuthenticationError {
        let _ = self.encoder.matches(secret, &self.placeholder);
        AuthenticationError::unknown_identity()
    }
}

#[async_trait]
impl Authenticator for DirectoryAuthenticator {
    async fn authenticate(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<Principal, AuthenticationError> {
        let record = match self.directory.lookup(identifier).await {
            Ok(record) => record,
            Err(err) => {
                warn!(identifier, error = %err, "authentication denied: lookup failed");
                return Err(self.deny_unknown(secret));
            }
        };

        let role: Role = match record.role.parse() {
            Ok(role) => role,
            Err(_) => {
                warn!(
                    identifier,
                    label = %record.role,
                    "authentication denied: directory returned an unknown role label"
                );
                return Err(self.deny_unknown(secret));
            }
        };

        // The stored credential is compared as-is; nothing is re-encoded per
        // attempt.
        let candidate = Principal::new(record.email, role, record.password);
        if !self.encoder.matches(secret, candidate.credential_hash()) {
            debug!(identifier, "authentication denied: credential mismatch");
            return Err(AuthenticationError::bad_credential());
        }

        debug!(identifier, role = %role, "authentication succeeded");
        Ok(candidate)
    }
}

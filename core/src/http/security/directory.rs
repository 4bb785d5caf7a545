//! Remote user directory lookup.
//!
//! Every authentication attempt performs one uncached lookup against the
//! directory; there is deliberately no local user store and no resilience to
//! directory downtime beyond denying.

use std::collections::HashMap;

use async_trait::async_trait;
use derive_more::{Display, Error};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::http::security::settings::{ConfigurationError, DirectorySettings};

const HAL_JSON: &str = "application/hal+json";

/// A user record exactly as the directory returned it.
///
/// The `password` field is opaque: a `{tag}`-prefixed hash for migrated
/// users, plaintext for legacy ones. The record is mapped into a
/// [`Principal`](crate::http::security::Principal) once and then dropped.
#[derive(Clone, Debug, Deserialize)]
pub struct DirectoryRecord {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Lookup failure, as seen by the authentication resolver.
///
/// Both variants deny the attempt; the split exists so logs can tell an
/// unknown user from a broken or unreachable directory.
#[derive(Debug, Display, Error)]
pub enum DirectoryError {
    /// The directory does not know the identifier.
    #[display("user record not found")]
    NotFound,
    /// The directory could not be queried or answered unusably.
    #[display("directory transport failure: {message}")]
    Transport { message: String },
}

impl DirectoryError {
    fn transport(message: impl Into<String>) -> Self {
        DirectoryError::Transport {
            message: message.into(),
        }
    }
}

/// A source of user records, keyed by identifier.
#[async_trait]
pub trait CredentialDirectory: Send + Sync {
    /// Looks up a single record. One call per authentication attempt.
    async fn lookup(&self, identifier: &str) -> Result<DirectoryRecord, DirectoryError>;
}

/// Directory client that queries a remote HTTP endpoint.
///
/// Sends `GET <base-uri>?email=<identifier>` with the configured service
/// credentials and `Accept: application/hal+json`, bounded by the settings'
/// timeout. Extra HAL fields (`_links` and friends) in the response body are
/// ignored.
pub struct HttpCredentialDirectory {
    http: reqwest::Client,
    settings: DirectorySettings,
}

impl HttpCredentialDirectory {
    /// Builds the client; the lookup timeout comes from the settings.
    pub fn new(settings: DirectorySettings) -> Result<Self, ConfigurationError> {
        let http = reqwest::Client::builder()
            .timeout(settings.lookup_timeout())
            .build()
            .map_err(|e| ConfigurationError::HttpClient {
                reason: e.to_string(),
            })?;
        Ok(HttpCredentialDirectory { http, settings })
    }
}

#[async_trait]
impl CredentialDirectory for HttpCredentialDirectory {
    async fn lookup(&self, identifier: &str) -> Result<DirectoryRecord, DirectoryError> {
        let mut uri = self.settings.lookup_uri().clone();
        uri.query_pairs_mut().append_pair("email", identifier);

        debug!(identifier, uri = %uri, "querying user directory");

        let credentials = self.settings.credentials();
        let response = self
            .http
            .get(uri.clone())
            .basic_auth(credentials.username(), Some(credentials.password()))
            .header(ACCEPT, HAL_JSON)
            .send()
            .await
            .map_err(|e| {
                warn!(identifier, uri = %uri, error = %e, "directory request failed");
                DirectoryError::transport(e.to_string())
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(identifier, "directory has no record for identifier");
                Err(DirectoryError::NotFound)
            }
            status if !status.is_success() => {
                warn!(identifier, uri = %uri, %status, "directory answered with an error status");
                Err(DirectoryError::transport(format!(
                    "unexpected status {status}"
                )))
            }
            _ => response.json::<DirectoryRecord>().await.map_err(|e| {
                warn!(identifier, uri = %uri, error = %e, "directory response body was unusable");
                DirectoryError::transport("malformed response body")
            }),
        }
    }
}

/// In-memory directory for tests and local development.
///
/// # Example
/// ```
/// use snippet_security_core::http::security::directory::StaticDirectory;
///
/// let directory = StaticDirectory::new()
///     .with_record("alice@example.com", "{noop}password", "ADMIN");
/// ```
#[derive(Clone, Default)]
pub struct StaticDirectory {
    records: HashMap<String, DirectoryRecord>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        StaticDirectory {
            records: HashMap::new(),
        }
    }

    /// Adds a record. The stored password is kept verbatim, so it may be
    /// plaintext or any `{tag}`-prefixed hash.
    pub fn with_record(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        let email = email.into();
        self.records.insert(
            email.clone(),
            DirectoryRecord {
                email,
                password: password.into(),
                role: role.into(),
            },
        );
        self
    }
}

#[async_trait]
impl CredentialDirectory for StaticDirectory {
    async fn lookup(&self, identifier: &str) -> Result<DirectoryRecord, DirectoryError> {
        self.records
            .get(identifier)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }
}

/// Directory that always fails with a transport error; test aid for
/// directory-outage behavior.
#[derive(Clone, Copy, Default)]
pub struct UnavailableDirectory;

#[async_trait]
impl CredentialDirectory for UnavailableDirectory {
    async fn lookup(&self, _identifier: &str) -> Result<DirectoryRecord, DirectoryError> {
        Err(DirectoryError::transport("directory unavailable"))
    }
}

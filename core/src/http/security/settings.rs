//! Directory connection settings.
//!
//! Loaded once at process start and immutable afterwards. A missing or
//! invalid value is a [`ConfigurationError`], which callers treat as fatal.

use std::env;
use std::fmt;
use std::time::Duration;

use derive_more::{Display, Error};
use url::Url;

const URI_VAR: &str = "SNIPPET_AUTHENTICATION_URI";
const USERNAME_VAR: &str = "SNIPPET_AUTHENTICATION_USERNAME";
const PASSWORD_VAR: &str = "SNIPPET_AUTHENTICATION_PASSWORD";
const TIMEOUT_VAR: &str = "SNIPPET_AUTHENTICATION_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Startup-time configuration failure.
#[derive(Debug, Display, Error)]
pub enum ConfigurationError {
    /// A required environment variable is not set.
    #[display("missing required configuration variable {name}")]
    Missing { name: &'static str },
    /// A variable is set but its value cannot be used.
    #[display("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
    /// The outbound HTTP client could not be constructed.
    #[display("failed to build directory HTTP client: {reason}")]
    HttpClient { reason: String },
}

/// Static credentials the service presents to the user directory.
///
/// These are the service account's own credentials, not end-user ones.
#[derive(Clone)]
pub struct ServiceCredentials {
    username: String,
    password: String,
}

impl ServiceCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        ServiceCredentials {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// The service password never appears in logs.
impl fmt::Debug for ServiceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where and how to reach the user directory.
#[derive(Clone, Debug)]
pub struct DirectorySettings {
    lookup_uri: Url,
    credentials: ServiceCredentials,
    timeout: Duration,
}

impl DirectorySettings {
    /// Builds settings programmatically.
    pub fn new(lookup_uri: Url, credentials: ServiceCredentials) -> Self {
        DirectorySettings {
            lookup_uri,
            credentials,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads the settings from the environment:
    /// `SNIPPET_AUTHENTICATION_URI`, `SNIPPET_AUTHENTICATION_USERNAME`,
    /// `SNIPPET_AUTHENTICATION_PASSWORD` and the optional
    /// `SNIPPET_AUTHENTICATION_TIMEOUT_SECS` (default 5).
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let uri = required(URI_VAR)?;
        let lookup_uri = Url::parse(&uri).map_err(|e| ConfigurationError::Invalid {
            name: URI_VAR,
            reason: e.to_string(),
        })?;
        let credentials = ServiceCredentials::new(required(USERNAME_VAR)?, required(PASSWORD_VAR)?);

        let mut settings = DirectorySettings::new(lookup_uri, credentials);
        if let Ok(raw) = env::var(TIMEOUT_VAR) {
            let secs: u64 = raw.parse().map_err(|_| ConfigurationError::Invalid {
                name: TIMEOUT_VAR,
                reason: format!("expected a number of seconds, got {raw:?}"),
            })?;
            settings.timeout = Duration::from_secs(secs);
        }
        Ok(settings)
    }

    /// Overrides the outbound lookup timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn lookup_uri(&self) -> &Url {
        &self.lookup_uri
    }

    pub fn credentials(&self) -> &ServiceCredentials {
        &self.credentials
    }

    pub fn lookup_timeout(&self) -> Duration {
        self.timeout
    }
}

fn required(name: &'static str) -> Result<String, ConfigurationError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigurationError::Missing { name }),
    }
}

//! Basic-authentication credential extraction.

use std::fmt;

use actix_web::dev::ServiceRequest;
use actix_web::http::header;
use base64::prelude::*;

/// Credentials presented on a request, before any verification.
#[derive(Clone)]
pub struct BasicCredentials {
    identifier: String,
    secret: String,
}

impl BasicCredentials {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Parses the `Authorization: Basic <base64(identifier:secret)>` header.
///
/// Returns `None` for a missing or unparseable header; the caller decides
/// whether that means a challenge or a pass-through.
pub fn extract_basic_credentials(req: &ServiceRequest) -> Option<BasicCredentials> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = BASE64_STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (identifier, secret) = decoded.split_once(':')?;
    Some(BasicCredentials {
        identifier: identifier.to_string(),
        secret: secret.to_string(),
    })
}

/// Challenge configuration for denied or missing credentials.
#[derive(Clone, Debug)]
pub struct BasicChallenge {
    realm: String,
}

impl BasicChallenge {
    /// Default realm "Snippets".
    pub fn new() -> Self {
        BasicChallenge {
            realm: "Snippets".to_string(),
        }
    }

    /// Sets the realm announced in the challenge.
    pub fn realm(mut self, realm: &str) -> Self {
        self.realm = realm.to_string();
        self
    }

    /// Value for the `WWW-Authenticate` response header.
    pub fn www_authenticate(&self) -> String {
        format!("Basic realm=\"{}\"", self.realm)
    }
}

impl Default for BasicChallenge {
    fn default() -> Self {
        Self::new()
    }
}

//! Principal model for authentication and authorization.

use std::fmt;
use std::str::FromStr;

use derive_more::{Display, Error};

/// Role granted to a principal by the user directory.
///
/// The directory returns a single role label per user; the label is parsed
/// case-insensitively into this closed set. An unrecognized label is treated
/// as a malformed record and the authentication attempt is denied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Regular application user.
    User,
    /// Application administrator (API access).
    Admin,
    /// Operator allowed on management endpoints.
    Actuator,
}

impl Role {
    /// Returns the canonical label used by the directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::Actuator => "ACTUATOR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a directory role label is not recognized.
#[derive(Debug, Display, Error)]
#[display("unknown role label")]
pub struct UnknownRole;

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        if label.eq_ignore_ascii_case("USER") {
            Ok(Role::User)
        } else if label.eq_ignore_ascii_case("ADMIN") {
            Ok(Role::Admin)
        } else if label.eq_ignore_ascii_case("ACTUATOR") {
            Ok(Role::Actuator)
        } else {
            Err(UnknownRole)
        }
    }
}

/// An authenticated identity projected from a directory record.
///
/// A `Principal` is created per authentication attempt, stored in the request
/// extensions for the lifetime of that request, and dropped afterwards. It is
/// a read-through projection of the remote directory: nothing about it is
/// persisted or mutated locally.
///
/// # Example
/// ```
/// use snippet_security_core::http::security::{Principal, Role};
///
/// let principal = Principal::new("alice@example.com", Role::Admin, "{noop}secret");
/// assert_eq!(principal.identity(), "alice@example.com");
/// assert_eq!(principal.role(), Role::Admin);
/// ```
#[derive(Clone)]
pub struct Principal {
    identity: String,
    role: Role,
    credential: String,
}

impl Principal {
    /// Creates a principal from an identity, its role and the stored
    /// credential hash as returned by the directory.
    pub fn new(
        identity: impl Into<String>,
        role: Role,
        credential: impl Into<String>,
    ) -> Self {
        Principal {
            identity: identity.into(),
            role,
            credential: credential.into(),
        }
    }

    /// Returns the unique identity (the directory email).
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Returns the granted role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the stored credential hash, for verification only.
    pub fn credential_hash(&self) -> &str {
        &self.credential
    }

    /// Checks whether the principal holds exactly the given role.
    ///
    /// Roles are not hierarchical: `Admin` does not imply `User`.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

// The credential never appears in logs or error output.
impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("identity", &self.identity)
            .field("role", &self.role)
            .field("credential", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.identity, self.role)
    }
}

//! Password verification schemes.
//!
//! Hash algorithms themselves come from the `argon2` and `bcrypt` crates;
//! this module only adapts them behind a common [`PasswordEncoder`] trait and
//! routes stored values to the right scheme by their `{tag}` prefix.

use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Encodes fresh secrets and verifies presented secrets against stored ones.
///
/// # Example
/// ```
/// use snippet_security_core::http::security::crypto::{Argon2PasswordEncoder, PasswordEncoder};
///
/// let encoder = Argon2PasswordEncoder::new();
/// let hash = encoder.encode("my_password");
/// assert!(encoder.matches("my_password", &hash));
/// ```
pub trait PasswordEncoder: Send + Sync {
    /// Encodes the raw secret into a storable form.
    fn encode(&self, raw: &str) -> String;

    /// Verifies a raw secret against a stored value.
    fn matches(&self, raw: &str, stored: &str) -> bool;
}

/// Argon2id encoder, the default scheme for freshly encoded values.
#[derive(Clone, Default)]
pub struct Argon2PasswordEncoder {
    argon2: Argon2<'static>,
}

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Argon2PasswordEncoder {
            argon2: Argon2::default(),
        }
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw.as_bytes(), &salt)
            .expect("argon2 hashing cannot fail with a generated salt")
            .to_string()
    }

    fn matches(&self, raw: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => self
                .argon2
                .verify_password(raw.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

/// BCrypt encoder, kept for records migrated from other systems.
#[derive(Clone)]
pub struct BCryptPasswordEncoder {
    cost: u32,
}

impl BCryptPasswordEncoder {
    /// Default cost of 12.
    pub fn new() -> Self {
        BCryptPasswordEncoder { cost: 12 }
    }

    /// Custom cost, clamped to the range bcrypt accepts.
    pub fn with_cost(cost: u32) -> Self {
        BCryptPasswordEncoder {
            cost: cost.clamp(4, 31),
        }
    }
}

impl Default for BCryptPasswordEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncoder for BCryptPasswordEncoder {
    fn encode(&self, raw: &str) -> String {
        bcrypt::hash(raw, self.cost).expect("bcrypt hashing cannot fail with a clamped cost")
    }

    fn matches(&self, raw: &str, stored: &str) -> bool {
        bcrypt::verify(raw, stored).unwrap_or(false)
    }
}

/// Plaintext comparison, the legacy scheme of the workshop directory.
///
/// Not suitable for anything but development fixtures; it exists so records
/// the directory still stores in the clear keep verifying during migration.
#[derive(Clone, Copy, Default)]
pub struct PlainTextPasswordEncoder;

impl PasswordEncoder for PlainTextPasswordEncoder {
    fn encode(&self, raw: &str) -> String {
        raw.to_string()
    }

    fn matches(&self, raw: &str, stored: &str) -> bool {
        raw == stored
    }
}

/// Scheme used by [`DelegatingPasswordEncoder`] for fresh encodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefaultScheme {
    #[default]
    Argon2,
    BCrypt,
}

/// Routes stored values to a concrete scheme by their `{tag}` prefix.
///
/// Supported stored forms:
/// - `{argon2}<phc-string>`
/// - `{bcrypt}<bcrypt-hash>`
/// - `{noop}<plaintext>`
/// - untagged values, compared as legacy plaintext (what the workshop
///   directory returns for unmigrated users)
///
/// Fresh encodes are tagged with the configured default scheme.
///
/// # Example
/// ```
/// use snippet_security_core::http::security::crypto::{DelegatingPasswordEncoder, PasswordEncoder};
///
/// let encoder = DelegatingPasswordEncoder::new();
/// let hash = encoder.encode("password");
/// assert!(hash.starts_with("{argon2}"));
/// assert!(encoder.matches("password", &hash));
/// assert!(encoder.matches("plain", "{noop}plain"));
/// ```
#[derive(Clone, Default)]
pub struct DelegatingPasswordEncoder {
    argon2: Argon2PasswordEncoder,
    bcrypt: BCryptPasswordEncoder,
    default_scheme: DefaultScheme,
}

impl DelegatingPasswordEncoder {
    pub fn new() -> Self {
        DelegatingPasswordEncoder {
            argon2: Argon2PasswordEncoder::new(),
            bcrypt: BCryptPasswordEncoder::new(),
            default_scheme: DefaultScheme::Argon2,
        }
    }

    /// Selects the scheme used for fresh encodes.
    pub fn default_scheme(mut self, scheme: DefaultScheme) -> Self {
        self.default_scheme = scheme;
        self
    }

    /// Stored value an unrecognized tag is verified against, so rejecting an
    /// unsupported scheme costs a full verification instead of returning
    /// immediately.
    fn burn_hash(&self) -> &'static str {
        static BURN: OnceLock<String> = OnceLock::new();
        BURN.get_or_init(|| Argon2PasswordEncoder::new().encode("unsupported-scheme"))
    }
}

/// Splits a `{tag}rest` stored value into its tag and remainder.
fn split_tag(stored: &str) -> Option<(&str, &str)> {
    let rest = stored.strip_prefix('{')?;
    let end = rest.find('}')?;
    Some((&rest[..end], &rest[end + 1..]))
}

impl PasswordEncoder for DelegatingPasswordEncoder {
    fn encode(&self, raw: &str) -> String {
        match self.default_scheme {
            DefaultScheme::Argon2 => format!("{{argon2}}{}", self.argon2.encode(raw)),
            DefaultScheme::BCrypt => format!("{{bcrypt}}{}", self.bcrypt.encode(raw)),
        }
    }

    fn matches(&self, raw: &str, stored: &str) -> bool {
        match split_tag(stored) {
            Some(("argon2", hash)) => self.argon2.matches(raw, hash),
            Some(("bcrypt", hash)) => self.bcrypt.matches(raw, hash),
            Some(("noop", plain)) => raw == plain,
            Some((_, _)) => {
                let _ = self.argon2.matches(raw, self.burn_hash());
                false
            }
            // No tag: legacy plaintext record.
            None => raw == stored,
        }
    }
}

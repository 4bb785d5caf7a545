//! Security module providing directory-delegated authentication and
//! path-pattern authorization.
//!
//! # Module Structure
//!
//! - `basic` - Basic-auth credential extraction and challenge configuration
//! - `crypto` - Password verification schemes (argon2, bcrypt, delegating)
//! - `directory` - Remote user directory client and in-memory stand-ins
//! - `extractor` - Handler extractors (`AuthenticatedPrincipal`, `OptionalPrincipal`)
//! - `gate` - The request gate middleware (`SecurityGate`)
//! - `path_matcher` - Glob-style path patterns
//! - `principal` - `Principal` and `Role`
//! - `resolver` - `Authenticator` trait and the directory-backed resolver
//! - `rules` - Ordered first-match authorization rule table
//! - `settings` - Directory connection settings and startup configuration

pub use basic::{extract_basic_credentials, BasicChallenge, BasicCredentials};
pub use crypto::{
    Argon2PasswordEncoder, BCryptPasswordEncoder, DefaultScheme, DelegatingPasswordEncoder,
    PasswordEncoder, PlainTextPasswordEncoder,
};
pub use directory::{
    CredentialDirectory, DirectoryError, DirectoryRecord, HttpCredentialDirectory,
    StaticDirectory, UnavailableDirectory,
};
pub use extractor::{AuthenticatedPrincipal, OptionalPrincipal, SecurityExt};
pub use gate::SecurityGate;
pub use path_matcher::PathPattern;
pub use principal::{Principal, Role};
pub use resolver::{AuthenticationError, Authenticator, DirectoryAuthenticator};
pub use rules::{Access, Decision, DenyCause, RuleTable};
pub use settings::{ConfigurationError, DirectorySettings, ServiceCredentials};

pub mod basic;
pub mod crypto;
pub mod directory;
pub mod extractor;
pub mod gate;
pub mod path_matcher;
pub mod principal;
pub mod resolver;
pub mod rules;
pub mod settings;

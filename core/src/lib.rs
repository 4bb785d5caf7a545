//! # Snippet Security Core
//!
//! Authentication and authorization for the snippet manager, built for
//! Actix Web. Authentication is delegated to a remote HTTP user directory;
//! authorization is an ordered path-pattern rule table; the
//! [`SecurityGate`](http::security::SecurityGate) middleware wires both into
//! the request path.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use actix_web::{App, HttpServer};
//! use snippet_security_core::http::security::{
//!     DelegatingPasswordEncoder, DirectoryAuthenticator, DirectorySettings,
//!     HttpCredentialDirectory, Role, RuleTable, SecurityGate,
//! };
//!
//! let settings = DirectorySettings::from_env()?;
//! let directory = HttpCredentialDirectory::new(settings)?;
//! let authenticator = Arc::new(DirectoryAuthenticator::new(
//!     Arc::new(directory),
//!     Arc::new(DelegatingPasswordEncoder::new()),
//! ));
//!
//! let rules = RuleTable::builder()
//!     .permit_all("/manage/status")
//!     .permit_all("/manage/info")
//!     .require_role("/manage/**", Role::Actuator)
//!     .permit_all("/assets/**")
//!     .require_role("/api/**", Role::Admin)
//!     .require_role("/**", Role::User)
//!     .build();
//!
//! HttpServer::new(move || {
//!     App::new().wrap(SecurityGate::new(authenticator.clone(), rules.clone()))
//! });
//! ```
//!
//! Rules are evaluated in declaration order, first match wins, and a path no
//! rule matches is denied. Authentication failures of every kind produce the
//! same `401` challenge; only the logs say why.

pub mod http;

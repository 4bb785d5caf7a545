//! Extractors for reading the authenticated principal in handlers.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::AuthError;
use crate::http::security::principal::{Principal, Role};

/// Extractor for the authenticated principal.
///
/// # Usage
/// ```ignore
/// async fn handler(principal: AuthenticatedPrincipal) -> impl Responder {
///     format!("Hello, {}!", principal.identity())
/// }
/// ```
///
/// # Errors
/// Responds `401 Unauthorized` when no principal was stored on the request,
/// which only happens on paths the gate left open.
#[derive(Clone, Debug)]
pub struct AuthenticatedPrincipal(Principal);

impl AuthenticatedPrincipal {
    pub fn into_inner(self) -> Principal {
        self.0
    }
}

impl Deref for AuthenticatedPrincipal {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedPrincipal {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Principal>().cloned() {
            Some(principal) => ready(Ok(AuthenticatedPrincipal(principal))),
            None => ready(Err(AuthError::Unauthorized)),
        }
    }
}

/// Like [`AuthenticatedPrincipal`] but yields `None` instead of failing on
/// open paths.
#[derive(Clone, Debug)]
pub struct OptionalPrincipal(Option<Principal>);

impl OptionalPrincipal {
    pub fn into_inner(self) -> Option<Principal> {
        self.0
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl Deref for OptionalPrincipal {
    type Target = Option<Principal>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for OptionalPrincipal {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalPrincipal(
            req.extensions().get::<Principal>().cloned(),
        )))
    }
}

/// Convenience checks on `HttpRequest`.
pub trait SecurityExt {
    /// A clone of the authenticated principal, if any.
    fn principal(&self) -> Option<Principal>;

    fn is_authenticated(&self) -> bool;

    fn has_role(&self, role: Role) -> bool;
}

impl SecurityExt for HttpRequest {
    fn principal(&self) -> Option<Principal> {
        self.extensions().get::<Principal>().cloned()
    }

    fn is_authenticated(&self) -> bool {
        self.extensions().get::<Principal>().is_some()
    }

    fn has_role(&self, role: Role) -> bool {
        self.extensions()
            .get::<Principal>()
            .is_some_and(|p| p.has_role(role))
    }
}

//! Request gate middleware.
//!
//! Intercepts every request and walks it through
//! credential extraction → authentication → authorization, producing a
//! `401` challenge, a `403`, or forwarding to the inner service.

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use tracing::{debug, info};

use crate::http::security::basic::{extract_basic_credentials, BasicChallenge};
use crate::http::security::resolver::Authenticator;
use crate::http::security::rules::{Access, Decision, RuleTable};

/// Middleware factory wiring an [`Authenticator`] and a [`RuleTable`] into
/// the request path.
///
/// The gate holds no mutable state: everything it needs is built once at
/// startup and shared read-only across workers.
///
/// # Example
/// ```ignore
/// App::new()
///     .wrap(SecurityGate::new(authenticator, rules).realm("Snippet Manager"))
///     .service(handlers)
/// ```
pub struct SecurityGate {
    authenticator: Arc<dyn Authenticator>,
    rules: Arc<RuleTable>,
    challenge: BasicChallenge,
}

impl SecurityGate {
    pub fn new(authenticator: Arc<dyn Authenticator>, rules: RuleTable) -> Self {
        SecurityGate {
            authenticator,
            rules: Arc::new(rules),
            challenge: BasicChallenge::new(),
        }
    }

    /// Sets the realm announced on authentication challenges.
    pub fn realm(mut self, realm: &str) -> Self {
        self.challenge = self.challenge.realm(realm);
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = GateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(GateService {
            service: Rc::new(service),
            authenticator: Arc::clone(&self.authenticator),
            rules: Arc::clone(&self.rules),
            challenge: self.challenge.clone(),
        })
    }
}

/// Per-worker service produced by [`SecurityGate`].
pub struct GateService<S> {
    service: Rc<S>,
    authenticator: Arc<dyn Authenticator>,
    rules: Arc<RuleTable>,
    challenge: BasicChallenge,
}

impl<S, B> Service<ServiceRequest> for GateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = Arc::clone(&self.authenticator);
        let rules = Arc::clone(&self.rules);
        let challenge = self.challenge.clone();

        Box::pin(async move {
            let path = req.path().to_string();

            // Open paths are served without touching credentials or the
            // directory.
            if let Some(Access::Public) = rules.required_access(&path) {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            // Everything else, including paths no rule matches, needs a
            // principal before any further decision.
            let Some(credentials) = extract_basic_credentials(&req) else {
                debug!(path, "no credentials presented on a gated path");
                return Ok(challenge_response(req, &challenge));
            };

            let principal = match authenticator
                .authenticate(credentials.identifier(), credentials.secret())
                .await
            {
                Ok(principal) => principal,
                Err(err) => {
                    debug!(path, error = %err, "authentication failed");
                    return Ok(challenge_response(req, &challenge));
                }
            };

            match rules.decide(&path, Some(&principal)) {
                Decision::Allow => {
                    req.extensions_mut().insert(principal);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Decision::Deny(cause) => {
                    info!(
                        path,
                        identity = %principal.identity(),
                        ?cause,
                        "request forbidden"
                    );
                    Ok(req.into_response(
                        HttpResponse::Forbidden().finish().map_into_right_body(),
                    ))
                }
            }
        })
    }
}

/// `401` with the configured `WWW-Authenticate` challenge. Identical for
/// missing credentials, unknown identities and wrong secrets.
fn challenge_response<B>(
    req: ServiceRequest,
    challenge: &BasicChallenge,
) -> ServiceResponse<EitherBody<B>> {
    req.into_response(
        HttpResponse::Unauthorized()
            .insert_header((header::WWW_AUTHENTICATE, challenge.www_authenticate()))
            .finish()
            .map_into_right_body(),
    )
}

//! Home routes (USER role via the gate).

use actix_web::{get, HttpResponse, Responder};

use snippet_security_core::http::security::AuthenticatedPrincipal;

/// Home page: the snippet overview for the signed-in user.
#[get("/")]
pub async fn index(principal: AuthenticatedPrincipal) -> impl Responder {
    HttpResponse::Ok().body(format!(
        "Welcome, {}!\nYour snippets are ready.",
        principal.identity()
    ))
}

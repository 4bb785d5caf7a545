//! Static asset routes (open via the gate).

use actix_web::{get, HttpResponse, Responder};

#[get("/assets/app.css")]
pub async fn stylesheet() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body("body { font-family: monospace; }\n")
}

#[get("/assets/app.js")]
pub async fn script() -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body("console.log('snippet manager');\n")
}

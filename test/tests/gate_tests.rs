//! End-to-end tests for the request gate: challenge, forbidden and
//! pass-through behavior over the canonical rule table.


use actix_web::http::{header, StatusCode};
use actix_web::test;

use snippet_security_core::http::security::{Role, RuleTable, UnavailableDirectory};

use common::{basic_auth, create_app_with, create_test_app, seeded_directory};

// =============================================================================
// Public paths
// =============================================================================

#[actix_web::test]
async fn public_management_endpoints_need_no_credentials() {
    let app = create_test_app().await;

    for path in ["/manage/status", "/manage/info"] {
        let req = test::TestRequest::get().uri(path).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
    }
}

#[actix_web::test]
async fn static_assets_need_no_credentials() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/assets/app.css").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn public_paths_ignore_presented_credentials() {
    let app = create_test_app().await;

    // Even nonsense credentials do not block an open path.
    let req = test::TestRequest::get()
        .uri("/manage/status")
        .insert_header((header::AUTHORIZATION, basic_auth("nobody", "nothing")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// =============================================================================
// Authentication
// =============================================================================

#[actix_web::test]
async fn missing_credentials_on_gated_path_challenge() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let challenge = resp
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .expect("challenge header")
        .to_str()
        .unwrap();
    assert_eq!(challenge, "Basic realm=\"Snippet Manager\"");
}

#[actix_web::test]
async fn correct_credentials_reach_the_handler() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((header::AUTHORIZATION, basic_auth("bob@example.com", "builder")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("bob@example.com"));
}

#[actix_web::test]
async fn tagged_hash_credentials_verify() {
    let app = create_test_app().await;

    // alice's stored credential is an argon2-tagged hash.
    let req = test::TestRequest::get()
        .uri("/api/snippets")
        .insert_header((
            header::AUTHORIZATION,
            basic_auth("alice@example.com", "wonderland"),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn unknown_user_and_wrong_secret_get_the_same_response() {
    let app = create_test_app().await;

    let unknown = test::TestRequest::get()
        .uri("/")
        .insert_header((
            header::AUTHORIZATION,
            basic_auth("nobody@example.com", "whatever"),
        ))
        .to_request();
    let unknown_resp = test::call_service(&app, unknown).await;

    let wrong = test::TestRequest::get()
        .uri("/")
        .insert_header((
            header::AUTHORIZATION,
            basic_auth("bob@example.com", "not-builder"),
        ))
        .to_request();
    let wrong_resp = test::call_service(&app, wrong).await;

    assert_eq!(unknown_resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        unknown_resp.headers().get(header::WWW_AUTHENTICATE),
        wrong_resp.headers().get(header::WWW_AUTHENTICATE)
    );

    let unknown_body = test::read_body(unknown_resp).await;
    let wrong_body = test::read_body(wrong_resp).await;
    assert_eq!(unknown_body, wrong_body);
}

#[actix_web::test]
async fn malformed_authorization_header_challenges() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((header::AUTHORIZATION, "Basic %%%not-base64%%%"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Authorization
// =============================================================================

#[actix_web::test]
async fn user_role_is_denied_on_admin_paths() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/api/snippets")
        .insert_header((header::AUTHORIZATION, basic_auth("bob@example.com", "builder")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn admin_role_is_denied_on_operator_paths() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/manage/metrics")
        .insert_header((
            header::AUTHORIZATION,
            basic_auth("alice@example.com", "wonderland"),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn operator_role_reaches_gated_management_endpoints() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/manage/metrics")
        .insert_header((header::AUTHORIZATION, basic_auth("ops@example.com", "operator")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn roles_do_not_cascade_to_the_user_catch_all() {
    let app = create_test_app().await;

    // "/" requires USER; alice only holds ADMIN.
    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((
            header::AUTHORIZATION,
            basic_auth("alice@example.com", "wonderland"),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// Fail-closed behavior
// =============================================================================

#[actix_web::test]
async fn unmatched_paths_deny_instead_of_allowing() {
    // No catch-all: "/" and anything outside /api/** matches no rule.
    let narrow = RuleTable::builder()
        .require_role("/api/**", Role::Admin)
        .build();

    let app = create_app_with(seeded_directory(), narrow).await;

    // Unauthenticated: challenge.
    let req = test::TestRequest::get().uri("/elsewhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Authenticated: forbidden, never an implicit allow.
    let req = test::TestRequest::get()
        .uri("/elsewhere")
        .insert_header((
            header::AUTHORIZATION,
            basic_auth("alice@example.com", "wonderland"),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn directory_outage_challenges_instead_of_erroring() {
    let app = create_app_with(UnavailableDirectory, common::rule_table()).await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((header::AUTHORIZATION, basic_auth("bob@example.com", "builder")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[actix_web::test]
async fn public_paths_survive_a_directory_outage() {
    let app = create_app_with(UnavailableDirectory, common::rule_table()).await;

    let req = test::TestRequest::get().uri("/manage/status").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

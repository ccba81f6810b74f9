//! Tests for the account and session handlers.

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::SIGNUP_NOTICE;
use crate::inbound::http::test_utils::{fixture_state, session_cookie, test_session_middleware};

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(fixture_state()))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(current_session)
                .service(switch_mode)
                .service(signup)
                .service(login)
                .service(logout),
        )
}

fn post(uri: &str, body: Value, cookie: Option<Cookie<'static>>) -> test::TestRequest {
    let request = test::TestRequest::post().uri(uri).set_json(body);
    match cookie {
        Some(cookie) => request.cookie(cookie),
        None => request,
    }
}

#[actix_web::test]
async fn fresh_visitor_is_anonymous() {
    let app = test::init_service(test_app()).await;
    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/session").to_request(),
    )
    .await;
    assert_eq!(body, json!({"state": {"status": "anonymous"}}));
}

#[actix_web::test]
async fn login_then_logout_round_trip() {
    let app = test::init_service(test_app()).await;

    let res = test::call_service(
        &app,
        post(
            "/api/v1/login",
            json!({"username": "admin", "password": "password"}),
            None,
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body["state"],
        json!({"status": "authenticated", "username": "admin"})
    );

    let request = post("/api/v1/logout", json!({}), Some(cookie)).to_request();
    let res = test::call_service(&app, request).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["state"], json!({"status": "anonymous"}));
}

#[actix_web::test]
async fn wrong_password_is_unauthorised_and_lands_on_login_form() {
    let app = test::init_service(test_app()).await;

    let res = test::call_service(
        &app,
        post(
            "/api/v1/login",
            json!({"username": "admin", "password": "wrong"}),
            None,
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let cookie = session_cookie(&res);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/session")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body["state"],
        json!({"status": "authenticating", "mode": "login"})
    );
}

#[actix_web::test]
async fn signup_requires_the_signup_form() {
    let app = test::init_service(test_app()).await;
    let res = test::call_service(
        &app,
        post(
            "/api/v1/signup",
            json!({"username": "carer", "password": "secret1", "confirmPassword": "secret1"}),
            None,
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_transition");
}

#[actix_web::test]
async fn signup_from_signup_form_returns_notice() {
    let app = test::init_service(test_app()).await;

    let res = test::call_service(
        &app,
        post("/api/v1/session/mode", json!({"mode": "signup"}), None).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res);

    let res = test::call_service(
        &app,
        post(
            "/api/v1/signup",
            json!({"username": "carer", "password": "secret1", "confirmPassword": "secret1"}),
            Some(cookie),
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["state"], json!({"status": "anonymous"}));
    assert_eq!(body["notice"], SIGNUP_NOTICE);
}

#[rstest]
#[case(json!({"username": "admin", "password": "secret1", "confirmPassword": "secret1"}), StatusCode::CONFLICT)]
#[case(json!({"username": "carer", "password": "secret1", "confirmPassword": "secret2"}), StatusCode::BAD_REQUEST)]
#[case(json!({"username": "carer", "password": "abc", "confirmPassword": "abc"}), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn rejected_signup_stays_on_signup_form(#[case] body: Value, #[case] status: StatusCode) {
    let app = test::init_service(test_app()).await;
    let res = test::call_service(
        &app,
        post("/api/v1/session/mode", json!({"mode": "signup"}), None).to_request(),
    )
    .await;
    let cookie = session_cookie(&res);

    let request = post("/api/v1/signup", body, Some(cookie)).to_request();
    let res = test::call_service(&app, request).await;
    assert_eq!(res.status(), status);
    let cookie = session_cookie(&res);

    let state: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/session")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(
        state["state"],
        json!({"status": "authenticating", "mode": "signup"})
    );
}

#[actix_web::test]
async fn logout_without_login_is_rejected() {
    let app = test::init_service(test_app()).await;
    let request = post("/api/v1/logout", json!({}), None).to_request();
    let res = test::call_service(&app, request).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

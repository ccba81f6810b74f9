//! Account and session handlers.
//!
//! ```text
//! GET /api/v1/session
//! POST /api/v1/session/mode {"mode":"signup"}
//! POST /api/v1/signup {"username":"carer","password":"secret1","confirmPassword":"secret1"}
//! POST /api/v1/login {"username":"carer","password":"secret1"}
//! POST /api/v1/logout
//! ```
//!
//! Every handler persists the state the gate hands back, including on
//! rejection, so the cookie always matches the last reported state.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AuthMode, Error, GateOutcome, GateRejection, SessionState};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Session state as reported to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Where the visitor now stands.
    pub state: SessionState,
    /// Message to display, such as the post-signup prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl From<GateOutcome> for SessionResponse {
    fn from(outcome: GateOutcome) -> Self {
        Self {
            state: outcome.state,
            notice: outcome.notice,
        }
    }
}

/// Request body for `POST /api/v1/session/mode`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwitchModeRequest {
    pub mode: AuthMode,
}

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"username":"carer","password":"secret1"}`
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Signup request body for `POST /api/v1/signup`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

fn settle(
    session: &SessionContext,
    result: Result<GateOutcome, GateRejection>,
) -> Result<SessionResponse, Error> {
    match result {
        Ok(outcome) => {
            session.persist_state(&outcome.state)?;
            Ok(outcome.into())
        }
        Err(rejection) => {
            session.persist_state(&rejection.state)?;
            Err(rejection.error)
        }
    }
}

/// Report the visitor's session state.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Current session state", body = SessionResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "getSession",
    security([])
)]
#[get("/session")]
pub async fn current_session(session: SessionContext) -> ApiResult<web::Json<SessionResponse>> {
    Ok(web::Json(SessionResponse {
        state: session.state()?,
        notice: None,
    }))
}

/// Switch between the login and signup forms.
#[utoipa::path(
    post,
    path = "/api/v1/session/mode",
    request_body = SwitchModeRequest,
    responses(
        (status = 200, description = "Form switched", body = SessionResponse),
        (status = 400, description = "Already logged in", body = Error)
    ),
    tags = ["session"],
    operation_id = "switchMode",
    security([])
)]
#[post("/session/mode")]
pub async fn switch_mode(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SwitchModeRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let current = session.state()?;
    let result = state.gate.switch_mode(current, payload.mode);
    settle(&session, result).map(web::Json)
}

/// Register a new account.
///
/// On success the visitor returns to the anonymous entry point and must log
/// in with the new credentials.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "Invalid request or not on the signup form", body = Error),
        (status = 409, description = "Username already exists", body = Error),
        (status = 503, description = "Credential store unavailable", body = Error)
    ),
    tags = ["session"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let current = session.state()?;
    let request = payload.into_inner();
    let result = state
        .gate
        .signup(
            current,
            &request.username,
            &request.password,
            &request.confirm_password,
        )
        .await;
    let response = settle(&session, result)?;
    Ok(HttpResponse::Created().json(response))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Credential store unavailable", body = Error)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let current = session.state()?;
    let request = payload.into_inner();
    let result = state
        .gate
        .login(current, &request.username, &request.password)
        .await;
    settle(&session, result).map(web::Json)
}

/// End the authenticated session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 200, description = "Logged out", body = SessionResponse),
        (status = 400, description = "Not logged in", body = Error)
    ),
    tags = ["session"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SessionResponse>> {
    let current = session.state()?;
    let result = state.gate.logout(current);
    settle(&session, result).map(web::Json)
}

#[cfg(test)]
#[path = "account_tests.rs"]
mod tests;

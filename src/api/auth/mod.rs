//! Account and session endpoints
//!
//! Lifecycle results are returned as `{"success": ...}` bodies with a status
//! derived from the failure kind.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;

use crate::api::middleware::{JarCookies, RequireSession};
use crate::api::state::AppState;
use crate::api::types::{ApiError, FormFields, Json, LoginResponse, MeResponse};
use crate::domain::account::{AccountErrorKind, OperationResult};
use crate::domain::validation::{
    DeleteProfileRequest, SessionRequest, SignInRequest, SignupRequest,
};

const HIGHLIGHTED_FIELDS: &str = "Please correct the highlighted fields.";
const CORRECT_AND_RETRY: &str = "Please correct the errors and try again.";

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/session", post(create_session))
        .route("/signout", post(sign_out))
        .route("/delete-profile", post(delete_profile))
        .route("/me", get(me))
}

async fn signup(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Response, ApiError> {
    let request: SignupRequest = fields.validate(HIGHLIGHTED_FIELDS)?;
    let result = state.accounts.signup(&request).await;

    Ok(operation_response(result, StatusCode::CREATED))
}

async fn login(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Response, ApiError> {
    let request: SignInRequest = fields.validate(CORRECT_AND_RETRY)?;

    let response = match state.accounts.sign_in(&request).await {
        Ok(id_token) => Json(LoginResponse {
            id_token,
            expires_in: state.id_token_ttl_secs,
        })
        .into_response(),
        Err(failure) => operation_response(failure.into(), StatusCode::OK),
    };

    Ok(response)
}

async fn create_session(
    State(state): State<AppState>,
    jar: CookieJar,
    fields: FormFields,
) -> Result<Response, ApiError> {
    let request: SessionRequest = fields.validate(CORRECT_AND_RETRY)?;

    let mut cookies = JarCookies::new(jar);
    let result = state.accounts.create_session(&request.id_token, &mut cookies).await;

    Ok((cookies.into_jar(), operation_response(result, StatusCode::OK)).into_response())
}

async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> Response {
    let mut cookies = JarCookies::new(jar);
    let result = state.accounts.sign_out(&mut cookies);

    (cookies.into_jar(), operation_response(result, StatusCode::OK)).into_response()
}

async fn delete_profile(
    State(state): State<AppState>,
    jar: CookieJar,
    fields: FormFields,
) -> Result<Response, ApiError> {
    let request: DeleteProfileRequest = fields.validate(CORRECT_AND_RETRY)?;

    let mut cookies = JarCookies::new(jar);
    let result = state.accounts.delete_profile(&request, &mut cookies).await;

    Ok((cookies.into_jar(), operation_response(result, StatusCode::OK)).into_response())
}

async fn me(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
) -> Response {
    match state.accounts.profile(&user.id).await {
        Ok(profile) => Json(MeResponse {
            id: user.id.to_string(),
            email: user.email,
            profile,
        })
        .into_response(),
        Err(failure) => operation_response(failure.into(), StatusCode::OK),
    }
}

fn operation_response(result: OperationResult, success: StatusCode) -> Response {
    let status = result.failure_kind().map_or(success, failure_status);
    (status, Json(result)).into_response()
}

fn failure_status(kind: AccountErrorKind) -> StatusCode {
    match kind {
        AccountErrorKind::Identity => StatusCode::BAD_REQUEST,
        AccountErrorKind::AccountNotFound => StatusCode::NOT_FOUND,
        AccountErrorKind::Session => StatusCode::UNAUTHORIZED,
        AccountErrorKind::ProfileCreation | AccountErrorKind::Store => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_status() {
        assert_eq!(failure_status(AccountErrorKind::Identity), StatusCode::BAD_REQUEST);
        assert_eq!(failure_status(AccountErrorKind::AccountNotFound), StatusCode::NOT_FOUND);
        assert_eq!(failure_status(AccountErrorKind::Session), StatusCode::UNAUTHORIZED);
        assert_eq!(
            failure_status(AccountErrorKind::ProfileCreation),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_success_uses_given_status() {
        let response = operation_response(OperationResult::Success, StatusCode::CREATED);
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = operation_response(
            OperationResult::failure(AccountErrorKind::Store, "x"),
            StatusCode::CREATED,
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

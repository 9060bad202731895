pub mod calendar;
pub mod months;

use axum::{
    Json, Router,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::get,
};
use monthplan_core::{PlanError, PlanResult, Planner, Role, Viewer};
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health - Liveness probe
async fn health() -> &'static str {
    "ok"
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

/// Convert planning errors to HTTP responses
#[derive(Debug)]
pub struct AppError(PlanError);

impl AppError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            PlanError::InvalidFormat { .. } | PlanError::InvalidScore(_) => StatusCode::BAD_REQUEST,
            PlanError::Forbidden(_) => StatusCode::FORBIDDEN,
            PlanError::NotFound(_) => StatusCode::NOT_FOUND,
            PlanError::NotFuture(_) | PlanError::MonthClosed(_) | PlanError::NotConfirmed(_) => {
                StatusCode::CONFLICT
            }
            PlanError::NoGoals(_) | PlanError::IncompleteConfirmation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            PlanError::Config(_)
            | PlanError::Storage(_)
            | PlanError::Io(_)
            | PlanError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.0.is_internal() {
            error!(error = %self.0, "Request failed");
            "internal error".to_string()
        } else {
            self.0.to_string()
        };

        let body = Json(ErrorResponse {
            error: message,
            code: self.0.code(),
        });
        (self.status(), body).into_response()
    }
}

/// Run a planner call on the blocking pool; ledger writes wait on file locks.
pub async fn with_planner<T, F>(state: &AppState, f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&Planner) -> PlanResult<T> + Send + 'static,
{
    let planner = state.planner.clone();
    tokio::task::spawn_blocking(move || f(&planner))
        .await
        .map_err(|e| PlanError::Storage(format!("planner task failed: {e}")))?
        .map_err(AppError::from)
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        Self(err)
    }
}

const USER_HEADER: &str = "x-user-id";
const ROLE_HEADER: &str = "x-user-role";
const SCOPE_HEADER: &str = "x-org-scope";

/// The caller, as asserted by the identity headers in front of this server.
pub struct Identity(pub Viewer);

impl Identity {
    /// Reject callers acting on someone else's plan.
    pub fn require_owner(&self, owner_id: &str) -> Result<(), AppError> {
        if self.0.is_owner_of(owner_id) {
            Ok(())
        } else {
            Err(PlanError::Forbidden(format!(
                "'{}' cannot change plans of '{owner_id}'",
                self.0.user_id
            ))
            .into())
        }
    }

    pub fn require_elevated(&self) -> Result<(), AppError> {
        if self.0.role.is_elevated() {
            Ok(())
        } else {
            Err(PlanError::Forbidden(format!("role '{}' is not allowed here", self.0.role)).into())
        }
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Result<Option<&'a str>, PlanError> {
    parts
        .headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| PlanError::Forbidden(format!("header '{name}' is not valid text")))
        })
        .transpose()
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, USER_HEADER)?
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PlanError::Forbidden(format!("missing '{USER_HEADER}' header")))?;

        let role = match header(parts, ROLE_HEADER)? {
            Some(role) => role.parse()?,
            None => Role::Member,
        };
        let scope = header(parts, SCOPE_HEADER)?.unwrap_or_default();

        Ok(Identity(Viewer::new(user_id, role, scope)))
    }
}

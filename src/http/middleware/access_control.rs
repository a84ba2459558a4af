//! Access control middleware.
//! Resolves the caller and runs the authorization pipeline.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::gate::auth::{UserDirectory, X_USER_ID};
use crate::gate::checks::GatePipeline;
use crate::gate::context::{AuthContext, ResourceRef, Subject};
use crate::http::response::ApiError;
use crate::observability::metrics;

/// State required for access control.
#[derive(Clone)]
pub struct AccessControlState {
    pub directory: Arc<UserDirectory>,
    pub pipeline: Arc<GatePipeline>,
    pub resource: ResourceRef,
}

/// The resolved caller, attached to request extensions. `None` when the
/// request carried no usable identity.
#[derive(Clone, Debug)]
pub struct AuthedSubject(pub Option<Subject>);

/// Resolve `X-User-Id` against the directory and attach the outcome.
/// Runs before rate limiting so the authenticated policy can key by
/// subject id.
pub async fn authenticate_middleware(
    State(state): State<AccessControlState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let subject = request
        .headers()
        .get(X_USER_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| raw.parse::<u64>().ok())
        .and_then(|id| state.directory.resolve(id));

    request.extensions_mut().insert(AuthedSubject(subject));
    next.run(request).await
}

/// Run the ordered authorization pipeline; first failure is terminal.
pub async fn gate_middleware(
    State(state): State<AccessControlState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let subject = request
        .extensions()
        .get::<AuthedSubject>()
        .and_then(|s| s.0.clone());

    let ctx = AuthContext::for_now(subject, state.resource.clone());

    match state.pipeline.evaluate(&ctx) {
        Ok(()) => {
            if let Some(subject) = ctx.subject {
                request.extensions_mut().insert(subject);
            }
            next.run(request).await
        }
        Err(rejection) => {
            tracing::warn!(
                kind = rejection.kind(),
                resource = ctx.resource.id,
                "Request rejected by gate"
            );
            metrics::record_gate_rejection(rejection.kind());
            ApiError::Gate(rejection).into_response()
        }
    }
}

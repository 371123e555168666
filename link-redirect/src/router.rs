use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::routing::any;
use axum::routing::get;
use link_alloc::AllocError;
use link_alloc::SharedAllocator;
use opentelemetry::KeyValue;
use opentelemetry::global;
use opentelemetry::metrics::Counter;
use tower::BoxError;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::BasicAuthLayer;
use crate::Credentials;
use crate::ServerError;
use crate::pages;

/// State shared by every handler on both listeners.
#[derive(Clone, Debug)]
pub struct AppState {
    pub allocator: Arc<SharedAllocator>,
    pub host: Arc<str>,
    redirects: Counter<u64>,
}

impl AppState {
    pub fn new(allocator: Arc<SharedAllocator>, host: &str) -> Self {
        let meter = global::meter("link_redirect");
        Self {
            allocator,
            host: Arc::from(host),
            redirects: meter.u64_counter("redirects").build(),
        }
    }
}

/// Routes for visitor traffic.
///
/// `GET /redirectLink` hands out the next link; everything sent to `/` is
/// pointed at the HTTPS control panel.
pub fn public_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/redirectLink", get(redirect_link))
        .route("/", any(to_admin))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(handle_timeout))
                .timeout(request_timeout),
        )
}

/// Routes for the control panel. Everything except `/ping` needs `credentials`.
pub fn admin_router(
    state: AppState,
    credentials: Credentials,
    request_timeout: Duration,
) -> Router {
    Router::new()
        .route("/", get(pages::index).post(pages::set))
        .route_layer(BasicAuthLayer::new(credentials))
        .route("/ping", get(ping))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(handle_timeout))
                .timeout(request_timeout),
        )
}

async fn redirect_link(State(state): State<AppState>) -> Result<Redirect, ServerError> {
    match state.allocator.next() {
        Ok(allocation) => {
            state
                .redirects
                .add(1, &[KeyValue::new("outcome", "served")]);
            Ok(Redirect::to(&allocation.url))
        }
        Err(err) => {
            let outcome = match err {
                AllocError::Exhausted { .. } => "exhausted",
                AllocError::Uninitialized => "uninitialized",
            };
            debug!(error = %err, "no link to redirect to");
            state.redirects.add(1, &[KeyValue::new("outcome", outcome)]);
            Err(err.into())
        }
    }
}

async fn to_admin(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(LOCATION, format!("https://{}/", state.host))],
    )
}

async fn ping() -> &'static str {
    "pong"
}

pub(crate) async fn handle_timeout(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {err}"),
        )
    }
}

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::Context;
use std::task::Poll;

use http::HeaderValue;
use http::Request;
use http::Response;
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::header::WWW_AUTHENTICATE;
use opentelemetry::KeyValue;
use opentelemetry::global;
use opentelemetry::metrics::Counter;
use pin_project_lite::pin_project;
use tower::Service;
use tracing::warn;

use crate::Credentials;

#[derive(Clone, Debug)]
struct BasicAuthServiceMetrics {
    failures: Counter<u64>,
}

/// Rejects requests that do not carry the admin credentials.
///
/// Rejected requests never reach the inner service; they are answered with
/// `401 Unauthorized` and a basic auth challenge.
#[derive(Clone, Debug)]
pub struct BasicAuthService<S> {
    inner: S,
    credentials: Arc<Credentials>,
    challenge: HeaderValue,
    instruments: BasicAuthServiceMetrics,
}

pin_project! {
    /// Either the inner service's future or a ready-made rejection.
    pub struct ResponseFuture<F, B> {
        #[pin]
        kind: Kind<F, B>,
    }
}

pin_project! {
    #[project = KindProj]
    enum Kind<F, B> {
        Authorized { #[pin] future: F },
        Unauthorized { response: Option<Response<B>> },
    }
}

impl<F, B, E> Future for ResponseFuture<F, B>
where
    F: Future<Output = Result<Response<B>, E>>,
{
    type Output = Result<Response<B>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project().kind.project() {
            KindProj::Authorized { future } => future.poll(cx),
            KindProj::Unauthorized { response } => Poll::Ready(Ok(response
                .take()
                .expect("ResponseFuture polled after completion"))),
        }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for BasicAuthService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: Default,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future, ResBody>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let authorized = req
            .headers()
            .get(AUTHORIZATION)
            .is_some_and(|header| self.credentials.verify(header));

        let kind = if authorized {
            Kind::Authorized {
                future: self.inner.call(req),
            }
        } else {
            let reason = if req.headers().contains_key(AUTHORIZATION) {
                "bad_credentials"
            } else {
                "missing_credentials"
            };
            warn!(uri = %req.uri(), reason, "rejected admin request");
            self.instruments
                .failures
                .add(1, &[KeyValue::new("reason", reason)]);

            let mut response = Response::new(ResBody::default());
            *response.status_mut() = StatusCode::UNAUTHORIZED;
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, self.challenge.clone());
            Kind::Unauthorized {
                response: Some(response),
            }
        };

        ResponseFuture { kind }
    }
}

impl<S> BasicAuthService<S> {
    pub fn new(inner: S, credentials: Arc<Credentials>) -> Self {
        let meter = global::meter("link_redirect");
        let instruments = BasicAuthServiceMetrics {
            failures: meter.u64_counter("auth_failures").build(),
        };

        Self {
            inner,
            credentials,
            challenge: challenge("Authorization Required"),
            instruments,
        }
    }

    pub fn with_realm(mut self, realm: &str) -> Self {
        self.challenge = challenge(realm);
        self
    }
}

fn challenge(realm: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Basic realm=\"{realm}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("Basic"))
}

//! Tower middleware enforcing WebAC decisions.
//!
//! `WebAcLayer` and `WebAcService` wrap any inner service. Each request is
//! mapped to a target resource and the modes its method needs, then checked
//! against an [`Authorizer`]. Refused requests never reach the inner service.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::Request;
use tower::{Layer, Service};
use webac_acl::Authorizer;
use webac_core::ResourceAccessor;

use crate::agent::agent_from_extensions;
use crate::error::EnforcementError;
use crate::methods::{allow_header, required_modes, target_from_uri};
use crate::EnforcementConfig;

/// Tower `Layer` that wraps services with WebAC enforcement.
pub struct WebAcLayer<A> {
    authorizer: Arc<Authorizer<A>>,
    config: EnforcementConfig,
}

impl<A> WebAcLayer<A> {
    /// Create a new enforcement layer over a shared authorizer.
    pub fn new(authorizer: Arc<Authorizer<A>>, config: EnforcementConfig) -> Self {
        Self { authorizer, config }
    }
}

impl<A> Clone for WebAcLayer<A> {
    fn clone(&self) -> Self {
        Self {
            authorizer: Arc::clone(&self.authorizer),
            config: self.config.clone(),
        }
    }
}

impl<A> fmt::Debug for WebAcLayer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebAcLayer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<A, S> Layer<S> for WebAcLayer<A> {
    type Service = WebAcService<A, S>;

    fn layer(&self, inner: S) -> Self::Service {
        WebAcService {
            inner,
            authorizer: Arc::clone(&self.authorizer),
            config: self.config.clone(),
        }
    }
}

/// Tower `Service` that checks access before forwarding requests.
///
/// Permitted responses carry an `Allow` header listing the methods the
/// agent's effective modes open up.
pub struct WebAcService<A, S> {
    inner: S,
    authorizer: Arc<Authorizer<A>>,
    config: EnforcementConfig,
}

impl<A, S: Clone> Clone for WebAcService<A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            authorizer: Arc::clone(&self.authorizer),
            config: self.config.clone(),
        }
    }
}

impl<A, S> Service<Request<Body>> for WebAcService<A, S>
where
    A: ResourceAccessor + 'static,
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let authorizer = Arc::clone(&self.authorizer);
        let config = self.config.clone();

        Box::pin(async move {
            if !config.enabled {
                let resp = inner
                    .call(req)
                    .await
                    .unwrap_or_else(|infallible| match infallible {});
                return Ok(resp.into_response());
            }

            let Some(requested) = required_modes(req.method()) else {
                let err = EnforcementError::MethodNotAllowed(req.method().clone());
                return Ok(refusal_response(&err, &config));
            };
            let target = target_from_uri(&config.base_url, req.uri());
            let agent = agent_from_extensions(req.extensions());

            let (decision, modes) = authorizer
                .authorize_with_modes(&agent, &target, requested)
                .await;
            if !decision.is_granted() {
                let err = if agent.is_anonymous() {
                    EnforcementError::Unauthenticated { target }
                } else {
                    EnforcementError::Forbidden { agent, target }
                };
                log::info!("Refused {} request: {err}", req.method());
                return Ok(refusal_response(&err, &config));
            }

            let mut resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {})
                .into_response();
            if let Some(allow) = allow_header(modes, target.is_acl()) {
                resp.headers_mut().insert(http::header::ALLOW, allow);
            }
            Ok(resp)
        })
    }
}

/// Build a refusal response with a JSON body.
///
/// 401 responses carry a `WWW-Authenticate` challenge for the configured realm.
fn refusal_response(
    err: &EnforcementError,
    config: &EnforcementConfig,
) -> axum::response::Response {
    let body = serde_json::json!({
        "error": {
            "category": err.category(),
            "message": err.to_string(),
        }
    });

    let mut response = (
        err.status(),
        [(http::header::CONTENT_TYPE, "application/json")],
        serde_json::to_string(&body).unwrap_or_default(),
    )
        .into_response();

    if matches!(err, EnforcementError::Unauthenticated { .. }) {
        let challenge = format!(r#"Bearer realm="{}""#, config.realm);
        if let Ok(value) = http::HeaderValue::from_str(&challenge) {
            response
                .headers_mut()
                .insert(http::header::WWW_AUTHENTICATE, value);
        }
    }

    response
}

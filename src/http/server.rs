//! HTTP server setup and request forwarding.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all proxy handler
//! - Wire up middleware (timeout, request ID, tracing)
//! - Classify each request and forward `/api/*` to the backend
//! - Answer preflight and out-of-namespace requests locally
//! - Convert backend network failures into 502 responses
//! - Apply hot-reloaded upstream settings
//!
//! # Design Decisions
//! - The handler is a pure function of (request, current upstream settings);
//!   nothing is shared between invocations except the immutable client
//! - One outbound request per matching inbound request; no fan-out
//! - Backend 4xx/5xx pass through verbatim, only transport failures map
//!   to an error response

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, Response, StatusCode},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::request::{RequestIdExt, RequestIdLayer, X_REQUEST_ID};
use crate::http::response;
use crate::observability::metrics;
use crate::routing::{classify, RouteDecision, Upstream};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<ArcSwap<Upstream>>,
    pub client: Client<HttpConnector, Body>,
    pub max_body_bytes: usize,
}

/// HTTP server for the edge gateway.
pub struct HttpServer {
    router: Router,
    upstream: Arc<ArcSwap<Upstream>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let upstream = Arc::new(ArcSwap::from_pointee(Upstream::from_config(
            &config.upstream,
        )));

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            upstream: upstream.clone(),
            client,
            max_body_bytes: config.listener.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Self { router, upstream }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on the given listener until shutdown is signalled.
    ///
    /// Configuration updates arriving on `config_updates` swap the upstream
    /// settings atomically; in-flight requests keep the snapshot they loaded.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let upstream = self.upstream.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                let next = Upstream::from_config(&config.upstream);
                tracing::info!(origin = %next.origin(), "Upstream configuration applied");
                upstream.store(Arc::new(next));
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main gateway handler.
///
/// Classifies the request and answers it on one of four branches:
/// preflight, forward, backend-unreachable, fallback. Every branch carries
/// `Access-Control-Allow-Origin: *`.
async fn proxy_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response<Body> {
    let start_time = Instant::now();
    let request_id = request
        .request_id()
        .map(|id| id.to_string())
        .unwrap_or_default();

    let method = request.method().clone();
    let method_str = method.to_string();
    let path = request.uri().path().to_string();

    let upstream = state.upstream.load_full();
    let decision = classify(&method, request.uri(), &upstream);

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        decision = ?decision,
        "Handling request"
    );

    let target = match decision {
        RouteDecision::Preflight => {
            metrics::record_request(&method_str, 200, "preflight", start_time);
            return response::preflight();
        }
        RouteDecision::Fallback => {
            metrics::record_request(&method_str, 200, "fallback", start_time);
            return response::fallback();
        }
        RouteDecision::Forward(target) => target,
    };

    // Buffer the inbound body; GET forwards none, everything else forwards
    // it unchanged.
    let (parts, body) = request.into_parts();
    let body_bytes = if method == Method::GET {
        axum::body::Bytes::new()
    } else {
        match axum::body::to_bytes(body, state.max_body_bytes).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
                metrics::record_request(&method_str, 400, "error", start_time);
                return response::error_text(StatusCode::BAD_REQUEST, "Failed to read request body");
            }
        }
    };

    // The outgoing request carries only the JSON content type and the
    // request ID; inbound headers are not relayed.
    let mut builder = Request::builder()
        .method(method.clone())
        .uri(target.as_str())
        .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(id) = parts.headers.get(X_REQUEST_ID) {
        builder = builder.header(X_REQUEST_ID, id.clone());
    }
    let upstream_request = match builder.body(Body::from(body_bytes)) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!(request_id = %request_id, target = %target, error = %e, "Failed to build upstream request");
            metrics::record_request(&method_str, 502, "error", start_time);
            return response::bad_gateway(&e.to_string());
        }
    };

    tracing::debug!(request_id = %request_id, target = %target, "Forwarding to backend");

    match state.client.request(upstream_request).await {
        Ok(backend_response) => {
            let status = backend_response.status();
            let body = Body::new(backend_response.into_body());
            match axum::body::to_bytes(body, usize::MAX).await {
                Ok(bytes) => {
                    metrics::record_request(&method_str, status.as_u16(), "forward", start_time);
                    response::relay(status, bytes)
                }
                Err(e) => {
                    tracing::error!(request_id = %request_id, error = %e, "Backend response read failed");
                    metrics::record_request(&method_str, 502, "error", start_time);
                    response::bad_gateway(&e.to_string())
                }
            }
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, target = %target, error = %e, "Backend unreachable");
            metrics::record_request(&method_str, 502, "error", start_time);
            response::bad_gateway(&e.to_string())
        }
    }
}

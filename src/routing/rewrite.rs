//! Request classification and upstream target computation.

use axum::http::{Method, Uri};

use crate::config::schema::UpstreamConfig;

/// Resolved upstream settings used for target computation.
///
/// Built once from configuration (and rebuilt on hot reload); the origin is
/// normalized so the rewrite below can concatenate without double slashes.
#[derive(Debug, Clone)]
pub struct Upstream {
    origin: String,
    prefix: String,
}

impl Upstream {
    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self {
            origin: config.origin.trim_end_matches('/').to_string(),
            prefix: config.public_prefix.clone(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Compute the forwarding target for a public path, or `None` when the
    /// path is outside the public prefix.
    ///
    /// `/api/room/foo?limit=5` becomes `<origin>/room/foo?limit=5`.
    pub fn target_for(&self, path: &str, query: Option<&str>) -> Option<String> {
        let rest = path.strip_prefix(&self.prefix)?;
        let mut target = format!("{}/{}", self.origin, rest);
        if let Some(query) = query {
            target.push('?');
            target.push_str(query);
        }
        Some(target)
    }
}

/// Outcome of classifying one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// CORS preflight; answered locally, nothing is forwarded.
    Preflight,
    /// Forward to the computed upstream target.
    Forward(String),
    /// Outside the public namespace; answered with the fixed service note.
    Fallback,
}

/// Classify a request into one of the three handling branches.
pub fn classify(method: &Method, uri: &Uri, upstream: &Upstream) -> RouteDecision {
    if method == Method::OPTIONS {
        return RouteDecision::Preflight;
    }
    match upstream.target_for(uri.path(), uri.query()) {
        Some(target) => RouteDecision::Forward(target),
        None => RouteDecision::Fallback,
    }
}

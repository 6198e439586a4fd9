//! The server collaborator: the surface routes are registered on, plus an
//! in-memory implementation that can dispatch requests through its bound
//! chains for tests and demos.

use crate::chain::HookChain;
use crate::error::{RequestError, RequestResult};
use crate::http::{Method, Request, Response};
use std::collections::HashMap;
use tracing::trace;

/// Where bound routes land. Real transports implement this; `supports`
/// lets a legacy surface opt out of the standard delete verb.
pub trait ServerAdapter {
    fn register(&mut self, method: Method, path: &str, chain: HookChain);

    fn supports(&self, _method: Method) -> bool {
        true
    }
}

/// A registration target holding routes in memory.
///
/// Dispatch resolves static paths first, then `:param` patterns in
/// registration order, filling `Request::params` from the matched segments.
/// The two delete verbs are aliases at dispatch time.
pub struct InMemoryServer {
    routes: HashMap<String, HashMap<Method, HookChain>>,
    dynamic_routes: Vec<String>,
    bindings: Vec<(Method, String)>,
    standard_delete: bool,
}

impl InMemoryServer {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            dynamic_routes: Vec::new(),
            bindings: Vec::new(),
            standard_delete: true,
        }
    }

    /// A server surface that predates the standard delete verb.
    pub fn legacy() -> Self {
        Self {
            standard_delete: false,
            ..Self::new()
        }
    }

    /// Every registration made against this server, in order.
    pub fn bindings(&self) -> &[(Method, String)] {
        &self.bindings
    }

    /// Runs a request through the chain bound for its method and path.
    pub async fn dispatch(&self, mut req: Request) -> RequestResult<Response> {
        if let Some(routes) = self.routes.get(&req.path) {
            if let Some(chain) = Self::chain_for(routes, req.method) {
                trace!(path = %req.path, "dispatching static route");
                return chain.handle(req).await;
            }
        }

        for pattern in &self.dynamic_routes {
            if let Some(params) = Self::match_dynamic_path(pattern, &req.path) {
                if let Some(routes) = self.routes.get(pattern) {
                    if let Some(chain) = Self::chain_for(routes, req.method) {
                        trace!(pattern = %pattern, path = %req.path, "dispatching dynamic route");
                        req.params = params;
                        return chain.handle(req).await;
                    }
                }
            }
        }

        Err(RequestError::NotFound)
    }

    fn chain_for(routes: &HashMap<Method, HookChain>, method: Method) -> Option<&HookChain> {
        routes.get(&method).or_else(|| match method {
            Method::Delete => routes.get(&Method::Del),
            Method::Del => routes.get(&Method::Delete),
            _ => None,
        })
    }

    fn match_dynamic_path(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
        let pattern_parts: Vec<&str> = pattern.split('/').collect();
        let path_parts: Vec<&str> = path.split('/').collect();

        if pattern_parts.len() != path_parts.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (pattern_part, path_part) in pattern_parts.iter().zip(path_parts.iter()) {
            if let Some(name) = pattern_part.strip_prefix(':') {
                params.insert(name.to_string(), path_part.to_string());
            } else if pattern_part != path_part {
                return None;
            }
        }

        Some(params)
    }
}

impl Default for InMemoryServer {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerAdapter for InMemoryServer {
    fn register(&mut self, method: Method, path: &str, chain: HookChain) {
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };
        if path.contains(':') && !self.dynamic_routes.iter().any(|p| p == path) {
            self.dynamic_routes.push(path.to_string());
        }
        self.routes
            .entry(path.to_string())
            .or_default()
            .insert(method, chain);
        self.bindings.push((method, path.to_string()));
    }

    fn supports(&self, method: Method) -> bool {
        method != Method::Delete || self.standard_delete
    }
}

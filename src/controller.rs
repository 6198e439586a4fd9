//! Controllers: named bundles of action handlers with optional lifecycle
//! hooks, plus the registry they are looked up from at bind time.

use crate::hook::{Handler, HookSpec, IntoResponse, Middleware};
use crate::http::Request;
use std::collections::HashMap;
use std::sync::Arc;

/// A named bundle of actions and lifecycle hooks.
///
/// Lookups return `Option` on purpose: a route whose action is absent is
/// silently skipped at bind time, so "this controller may not implement
/// that action" is part of the contract rather than a dynamic-access trick.
pub trait Controller: Send + Sync {
    /// The handler for `name`, if this controller implements it.
    fn find_action(&self, name: &str) -> Option<Box<dyn Handler>>;

    /// The middleware behind a `before`/`after` hook name.
    fn find_hook(&self, _name: &str) -> Option<Box<dyn Middleware>> {
        None
    }

    /// Middleware to run unconditionally before everything else on every
    /// bound route of this controller.
    fn pre(&self) -> Option<Box<dyn Middleware>> {
        None
    }

    /// Authentication middleware for `action`, if the action needs any.
    fn auth(&self, _action: &str) -> Option<Box<dyn Middleware>> {
        None
    }

    /// Ordered `before` filter entries.
    fn before(&self) -> &[HookSpec] {
        &[]
    }

    /// Ordered `after` filter entries.
    fn after(&self) -> &[HookSpec] {
        &[]
    }
}

type AuthFn = dyn Fn(&str) -> Option<Box<dyn Middleware>> + Send + Sync;

/// A closure-backed [`Controller`], built up method by method.
///
/// ```
/// use resourceful::{FnController, Response};
///
/// let bananas = FnController::new()
///     .action("index", |_req| async { Response::ok(&["cavendish", "plantain"]) })
///     .action("show", |req| async move {
///         Response::ok(&format!("banana {}", req.param("id").unwrap_or("?")))
///     });
/// ```
#[derive(Default)]
pub struct FnController {
    actions: HashMap<String, Box<dyn Handler>>,
    hooks: HashMap<String, Box<dyn Middleware>>,
    pre: Option<Box<dyn Middleware>>,
    auth: Option<Box<AuthFn>>,
    before: Vec<HookSpec>,
    after: Vec<HookSpec>,
}

impl FnController {
    pub fn new() -> FnController {
        FnController::default()
    }

    pub fn action<F, R>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(Request) -> R + Send + Sync + Clone + 'static,
        R: IntoResponse + 'static,
    {
        self.actions.insert(name.to_string(), Box::new(handler));
        self
    }

    pub fn hook(mut self, name: &str, middleware: impl Middleware) -> Self {
        self.hooks.insert(name.to_string(), Box::new(middleware));
        self
    }

    pub fn pre(mut self, middleware: impl Middleware) -> Self {
        self.pre = Some(Box::new(middleware));
        self
    }

    pub fn auth<F>(mut self, auth: F) -> Self
    where
        F: Fn(&str) -> Option<Box<dyn Middleware>> + Send + Sync + 'static,
    {
        self.auth = Some(Box::new(auth));
        self
    }

    pub fn before(mut self, spec: HookSpec) -> Self {
        self.before.push(spec);
        self
    }

    pub fn after(mut self, spec: HookSpec) -> Self {
        self.after.push(spec);
        self
    }
}

impl Controller for FnController {
    fn find_action(&self, name: &str) -> Option<Box<dyn Handler>> {
        self.actions.get(name).cloned()
    }

    fn find_hook(&self, name: &str) -> Option<Box<dyn Middleware>> {
        self.hooks.get(name).cloned()
    }

    fn pre(&self) -> Option<Box<dyn Middleware>> {
        self.pre.clone()
    }

    fn auth(&self, action: &str) -> Option<Box<dyn Middleware>> {
        self.auth.as_ref().and_then(|auth| auth(action))
    }

    fn before(&self) -> &[HookSpec] {
        &self.before
    }

    fn after(&self) -> &[HookSpec] {
        &self.after
    }
}

/// Controller lookup table, keyed by `name` or `name:version`.
pub type ControllerRegistry = HashMap<String, Arc<dyn Controller>>;

/// The registry key for a controller name, qualified by version when one
/// applies. Under versioning only qualified keys exist; there is no plain
/// fallback.
pub fn registry_key(name: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{}:{}", name, version),
        None => name.to_string(),
    }
}

/// Where controllers come from. Directory walking (the historical
/// "read every controller file under a path" collaborator) lives behind
/// this seam, outside the crate; [`StaticControllers`] covers in-process
/// registration.
pub trait ControllerSource {
    /// Produces the registry, with version-qualified keys when `versioned`.
    fn load(&self, versioned: bool) -> ControllerRegistry;
}

/// In-memory [`ControllerSource`]: controllers registered by name, with
/// optional version qualifiers for versioned routers.
#[derive(Default)]
pub struct StaticControllers {
    plain: Vec<(String, Arc<dyn Controller>)>,
    versioned: Vec<(String, String, Arc<dyn Controller>)>,
}

impl StaticControllers {
    pub fn new() -> StaticControllers {
        StaticControllers::default()
    }

    pub fn controller(mut self, name: &str, controller: impl Controller + 'static) -> Self {
        self.plain.push((name.to_string(), Arc::new(controller)));
        self
    }

    pub fn versioned_controller(
        mut self,
        name: &str,
        version: &str,
        controller: impl Controller + 'static,
    ) -> Self {
        self.versioned
            .push((name.to_string(), version.to_string(), Arc::new(controller)));
        self
    }
}

impl ControllerSource for StaticControllers {
    fn load(&self, versioned: bool) -> ControllerRegistry {
        let mut registry = ControllerRegistry::new();
        if versioned {
            for (name, version, controller) in &self.versioned {
                registry.insert(registry_key(name, Some(version)), controller.clone());
            }
        } else {
            for (name, controller) in &self.plain {
                registry.insert(registry_key(name, None), controller.clone());
            }
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Response;

    #[test]
    fn absent_actions_are_none() {
        let controller =
            FnController::new().action("index", |_req| async { Ok(Response::no_content()) });
        assert!(controller.find_action("index").is_some());
        assert!(controller.find_action("destroy").is_none());
    }

    #[test]
    fn registry_keys_qualify_by_version() {
        assert_eq!(registry_key("bananas", None), "bananas");
        assert_eq!(registry_key("bananas", Some("2")), "bananas:2");
    }

    #[test]
    fn versioned_load_exposes_only_qualified_keys() {
        let source = StaticControllers::new()
            .controller(
                "bananas",
                FnController::new().action("index", |_req| async { Ok(Response::no_content()) }),
            )
            .versioned_controller(
                "bananas",
                "1",
                FnController::new().action("index", |_req| async { Ok(Response::no_content()) }),
            );

        let plain = source.load(false);
        assert!(plain.contains_key("bananas"));
        assert!(!plain.contains_key("bananas:1"));

        let versioned = source.load(true);
        assert!(versioned.contains_key("bananas:1"));
        assert!(!versioned.contains_key("bananas"));
    }
}

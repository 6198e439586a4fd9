//! The router: loads controllers, runs the route declaration callback, and
//! binds each declared route to the target server with its hook chain and
//! reverse path helper.

use crate::chain::{self, CallbackAdapter, Identity};
use crate::controller::{registry_key, ControllerRegistry, ControllerSource};
use crate::error::{BindError, PathError};
use crate::http::Method;
use crate::path::{PathTemplate, ToPath};
use crate::resolve::{expand_resource, parse_action_ref, Options, RouteSpec};
use crate::server::ServerAdapter;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Behavioral knobs, passed in rather than subclassed.
#[derive(Clone)]
pub struct RouterConfig {
    /// Qualify every controller lookup by `options.version`. Versioned
    /// registries hold only qualified keys, so version-less declarations
    /// bind nothing.
    pub versioned: bool,
    /// Reject `before`/`after` entries carrying both `only` and `except`
    /// at bind time instead of applying the historical inclusive-or.
    pub strict_filters: bool,
    /// Wraps every action handler as it goes into its chain.
    pub adapter: Arc<dyn CallbackAdapter>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            versioned: false,
            strict_filters: false,
            adapter: Arc::new(Identity),
        }
    }
}

impl RouterConfig {
    pub fn versioned() -> Self {
        Self {
            versioned: true,
            ..Self::default()
        }
    }
}

/// Binds declared routes onto a [`ServerAdapter`] and records reverse path
/// helpers as it goes.
///
/// ```
/// use resourceful::{
///     FnController, InMemoryServer, Response, Router, RouterConfig, StaticControllers,
/// };
///
/// let controllers = StaticControllers::new().controller(
///     "bananas",
///     FnController::new()
///         .action("index", |_req| async { Response::ok(&["cavendish"]) })
///         .action("show", |_req| async { Response::ok(&"cavendish") }),
/// );
///
/// let router = Router::new(
///     InMemoryServer::new(),
///     &controllers,
///     RouterConfig::default(),
///     |router| {
///         router.resources("bananas", Default::default())?;
///         router.get("/peel", "bananas#peel") // absent action, silently skipped
///     },
/// )
/// .unwrap();
///
/// assert_eq!(router.path("bananaPath", &[&7]).unwrap(), "/bananas/7/");
/// ```
pub struct Router<S: ServerAdapter> {
    server: S,
    controllers: ControllerRegistry,
    helpers: HashMap<String, PathTemplate>,
    config: RouterConfig,
}

impl<S: ServerAdapter> std::fmt::Debug for Router<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<S: ServerAdapter> Router<S> {
    /// Loads the registry from `source`, then invokes `routes` exactly once,
    /// synchronously, with the router itself as the declaration surface.
    pub fn new<F>(
        server: S,
        source: &dyn ControllerSource,
        config: RouterConfig,
        routes: F,
    ) -> Result<Router<S>, BindError>
    where
        F: FnOnce(&mut Router<S>) -> Result<(), BindError>,
    {
        let controllers = source.load(config.versioned);
        let mut router = Router {
            server,
            controllers,
            helpers: HashMap::new(),
            config,
        };
        routes(&mut router)?;
        Ok(router)
    }

    /// Declares the seven conventional routes for a resource. Each binds iff
    /// the controller implements the corresponding action.
    pub fn resources(&mut self, resource: &str, options: Options) -> Result<(), BindError> {
        let standard_delete = self.server.supports(Method::Delete);
        for spec in expand_resource(resource, &options, standard_delete) {
            self.bind_spec(&spec)?;
        }
        Ok(())
    }

    pub fn get(&mut self, path: &str, target: &str) -> Result<(), BindError> {
        self.route(Method::Get, path, target, Options::default())
    }

    pub fn post(&mut self, path: &str, target: &str) -> Result<(), BindError> {
        self.route(Method::Post, path, target, Options::default())
    }

    pub fn put(&mut self, path: &str, target: &str) -> Result<(), BindError> {
        self.route(Method::Put, path, target, Options::default())
    }

    pub fn patch(&mut self, path: &str, target: &str) -> Result<(), BindError> {
        self.route(Method::Patch, path, target, Options::default())
    }

    /// The legacy delete verb.
    pub fn del(&mut self, path: &str, target: &str) -> Result<(), BindError> {
        self.route(Method::Del, path, target, Options::default())
    }

    /// The standard delete verb.
    pub fn delete(&mut self, path: &str, target: &str) -> Result<(), BindError> {
        self.route(Method::Delete, path, target, Options::default())
    }

    /// Declares one explicit route from a `"controller#action"` reference.
    pub fn route(
        &mut self,
        method: Method,
        path: &str,
        target: &str,
        options: Options,
    ) -> Result<(), BindError> {
        let (controller, action) = parse_action_ref(target)?;
        self.bind_spec(&RouteSpec {
            method,
            path: path.to_string(),
            controller: controller.to_string(),
            action: action.to_string(),
            alias: options.alias.clone(),
            version: options.version,
        })
    }

    fn bind_spec(&mut self, spec: &RouteSpec) -> Result<(), BindError> {
        let key = if self.config.versioned {
            registry_key(&spec.controller, spec.version.as_deref())
        } else {
            if spec.version.is_some() {
                debug!(
                    controller = %spec.controller,
                    "version option ignored by an unversioned router"
                );
            }
            registry_key(&spec.controller, None)
        };

        let Some(controller) = self.controllers.get(&key) else {
            debug!(
                method = spec.method.as_str(),
                path = %spec.path,
                controller = %key,
                "skipping route, no such controller"
            );
            return Ok(());
        };
        let Some(action) = controller.find_action(&spec.action) else {
            debug!(
                method = spec.method.as_str(),
                path = %spec.path,
                controller = %key,
                action = %spec.action,
                "skipping route, controller does not implement the action"
            );
            return Ok(());
        };

        let chain = chain::build(
            controller.as_ref(),
            &spec.controller,
            &spec.action,
            action,
            &self.config,
        )?;
        self.server.register(spec.method, &spec.path, chain);
        debug!(
            method = spec.method.as_str(),
            path = %spec.path,
            controller = %key,
            action = %spec.action,
            "bound route"
        );

        if let Some(alias) = &spec.alias {
            // Last declaration wins; declaration order matters.
            self.helpers
                .insert(format!("{}Path", alias), PathTemplate::compile(&spec.path));
        }
        Ok(())
    }

    /// The compiled template behind a helper name such as `"bananaPath"`.
    pub fn helper(&self, name: &str) -> Option<&PathTemplate> {
        self.helpers.get(name)
    }

    /// Renders a named path helper with positional values.
    pub fn path(&self, helper: &str, values: &[&dyn ToPath]) -> Result<String, PathError> {
        let template = self
            .helpers
            .get(helper)
            .ok_or_else(|| PathError::UnknownHelper(helper.to_string()))?;
        Ok(template.render(values)?)
    }

    /// The bound server, for dispatching or inspection.
    pub fn server(&self) -> &S {
        &self.server
    }

    pub fn into_server(self) -> S {
        self.server
    }
}

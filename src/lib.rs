//! # Resourceful
//!
//! Convention-driven route binding: declare resources and
//! `"controller#action"` routes, and let the binder wire HTTP verbs and
//! paths to controller actions on an underlying server, with lifecycle
//! hooks, request tagging, and reverse path helpers.
//!
//! ## Features
//!
//! - Resource declarations expanding to the seven conventional CRUD routes
//! - Explicit verb routes resolved from `"controller#action"` references
//! - Per-route hook chains: `pre`, filtered `before`/`after` hooks, `auth`
//! - Reverse path helpers (`bananaPath`) generated from route aliases
//! - Versioned controller registries with strictly qualified lookups
//! - Pluggable callback adapter and controller-loading strategy
//!
//! ## Quick Start
//!
//! ```rust
//! use resourceful::{
//!     FnController, InMemoryServer, Response, Router, RouterConfig, StaticControllers,
//! };
//!
//! let controllers = StaticControllers::new().controller(
//!     "bananas",
//!     FnController::new()
//!         .action("index", |_req| async { Response::ok(&["cavendish", "plantain"]) })
//!         .action("show", |req| async move {
//!             Response::ok(&format!("banana {}", req.param("id").unwrap_or("?")))
//!         }),
//! );
//!
//! let router = Router::new(
//!     InMemoryServer::new(),
//!     &controllers,
//!     RouterConfig::default(),
//!     |router| {
//!         router.resources("bananas", Default::default())?;
//!         router.get("/peel", "bananas#peel") // no such action: skipped
//!     },
//! )
//! .unwrap();
//!
//! assert_eq!(router.path("bananaPath", &[&7]).unwrap(), "/bananas/7/");
//! ```
//!
//! ## Lifecycle hooks
//!
//! Controllers can carry a `pre` middleware, an `auth(action)` factory, and
//! ordered `before`/`after` filter entries. Each bound route gets the chain
//! `pre → before → auth → context tag → action → after`, assembled and
//! validated once at bind time.

pub mod chain;
pub mod controller;
pub mod error;
pub mod hook;
pub mod http;
pub mod path;
pub mod resolve;
pub mod router;
pub mod server;

pub use chain::{CallbackAdapter, HookChain, Identity};
pub use controller::{
    registry_key, Controller, ControllerRegistry, ControllerSource, FnController,
    StaticControllers,
};
pub use error::{ArityError, BindError, PathError, RequestError, RequestResult};
pub use hook::{Handler, HandlerResult, HookResult, HookSpec, IntoResponse, Middleware, Next};
pub use http::{Body, Method, Request, Response, RouteContext};
pub use path::{PathTemplate, ToPath};
pub use resolve::{Options, RouteSpec};
pub use router::{Router, RouterConfig};
pub use server::{InMemoryServer, ServerAdapter};

// Reexport serde_json
pub use serde_json::{json, Value};

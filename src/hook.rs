//! Handler and middleware plumbing plus the filter entries that decide
//! which lifecycle hooks apply to which actions.

use crate::error::RequestResult;
use crate::http::{Request, Response};
use futures::future::BoxFuture;
use std::future::Future;

pub type HandlerResult = RequestResult<Response>;

pub trait IntoResponse {
    fn into_response_future(self) -> BoxFuture<'static, HandlerResult>;
}

impl<F: Future<Output = HandlerResult> + Send + 'static> IntoResponse for F {
    fn into_response_future(self) -> BoxFuture<'static, HandlerResult> {
        Box::pin(self)
    }
}

/// A terminal request handler: a controller action, or the composed tail of
/// a hook chain.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, req: Request) -> BoxFuture<'static, HandlerResult>;

    fn dyn_clone<'s>(&self) -> Box<dyn Handler + 's>
    where
        Self: 's;
}

impl Clone for Box<dyn Handler> {
    fn clone(&self) -> Box<dyn Handler> {
        self.dyn_clone()
    }
}

impl<F, R> Handler for F
where
    F: Fn(Request) -> R + Send + Sync + Clone + 'static,
    R: IntoResponse,
{
    fn handle(&self, req: Request) -> BoxFuture<'static, HandlerResult> {
        (self)(req).into_response_future()
    }

    fn dyn_clone<'s>(&self) -> Box<dyn Handler + 's>
    where
        Self: 's,
    {
        Box::new((*self).clone())
    }
}

/// The continuation a middleware advances when it is done with the request.
#[derive(Clone)]
pub struct Next {
    handler: Box<dyn Handler>,
}

impl Next {
    pub fn new<F, R>(handler: F) -> Self
    where
        F: Fn(Request) -> R + Send + Sync + Clone + 'static,
        R: IntoResponse,
    {
        Self {
            handler: Box::new(handler),
        }
    }

    pub(crate) fn new_handler(handler: Box<dyn Handler>) -> Self {
        Self { handler }
    }

    pub async fn handle(&self, req: Request) -> HandlerResult {
        self.handler.handle(req).await
    }
}

pub type HookResult = BoxFuture<'static, HandlerResult>;

/// One link in a hook chain. Hooks that run before the action do their work
/// and then call `next`; hooks that run after it await `next` first and act
/// on the response.
pub trait Middleware: Send + Sync + 'static {
    fn call(&self, req: Request, next: Next) -> HookResult;
    fn clone_box(&self) -> Box<dyn Middleware>;
}

impl Clone for Box<dyn Middleware> {
    fn clone(&self) -> Box<dyn Middleware> {
        self.clone_box()
    }
}

impl<F> Middleware for F
where
    F: Fn(Request, Next) -> HookResult + Send + Sync + Clone + 'static,
{
    fn call(&self, req: Request, next: Next) -> HookResult {
        (self)(req, next)
    }

    fn clone_box(&self) -> Box<dyn Middleware> {
        Box::new(self.clone())
    }
}

/// One `before`/`after` filter entry on a controller: a hook name plus an
/// optional `only` or `except` action filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSpec {
    pub hook: String,
    pub only: Option<Vec<String>>,
    pub except: Option<Vec<String>>,
}

impl HookSpec {
    /// An unfiltered entry: applies to every action.
    pub fn new(hook: &str) -> HookSpec {
        HookSpec {
            hook: hook.to_string(),
            only: None,
            except: None,
        }
    }

    pub fn only<I, S>(mut self, actions: I) -> HookSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(actions.into_iter().map(Into::into).collect());
        self
    }

    pub fn except<I, S>(mut self, actions: I) -> HookSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = Some(actions.into_iter().map(Into::into).collect());
        self
    }

    /// Whether this entry applies to `action`.
    ///
    /// Both filters are evaluated independently; an entry carrying both is
    /// admitted by whichever passes. Strict routers reject such entries at
    /// bind time instead (see `RouterConfig::strict_filters`).
    pub fn applies_to(&self, action: &str) -> bool {
        match (&self.only, &self.except) {
            (None, None) => true,
            (Some(only), None) => only.iter().any(|a| a == action),
            (None, Some(except)) => !except.iter().any(|a| a == action),
            (Some(only), Some(except)) => {
                only.iter().any(|a| a == action) || !except.iter().any(|a| a == action)
            }
        }
    }

    pub fn has_conflicting_filters(&self) -> bool {
        self.only.is_some() && self.except.is_some()
    }
}

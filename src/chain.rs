//! Hook-chain assembly: the ordered middleware stack built for each bound
//! route, from pre-processing through the action to post-processing.

use crate::controller::Controller;
use crate::error::BindError;
use crate::hook::{HandlerResult, Handler, HookResult, HookSpec, Middleware, Next};
use crate::http::{Request, RouteContext};
use crate::router::RouterConfig;

/// Wraps the action handler as it goes into the chain.
///
/// The default [`Identity`] uses the handler as-is. A custom adapter can
/// interpose transport glue instead, keeping controllers ignorant of the
/// server: stamping headers, translating results, collecting timings.
pub trait CallbackAdapter: Send + Sync {
    fn adapt(&self, action: Box<dyn Handler>) -> Box<dyn Handler>;
}

/// The default adapter: the action handler is used unchanged.
pub struct Identity;

impl CallbackAdapter for Identity {
    fn adapt(&self, action: Box<dyn Handler>) -> Box<dyn Handler> {
        action
    }
}

/// Tags the in-flight request with the controller and action it resolved to,
/// then continues the chain.
#[derive(Clone)]
struct ContextTag {
    controller: String,
    action: String,
}

impl Middleware for ContextTag {
    fn call(&self, mut req: Request, next: Next) -> HookResult {
        req.context = Some(RouteContext {
            controller: self.controller.clone(),
            action: self.action.clone(),
        });
        Box::pin(async move { next.handle(req).await })
    }

    fn clone_box(&self) -> Box<dyn Middleware> {
        Box::new(self.clone())
    }
}

/// The middleware stack and terminal handler bound for one route.
pub struct HookChain {
    middlewares: Vec<Box<dyn Middleware>>,
    handler: Box<dyn Handler>,
}

impl std::fmt::Debug for HookChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookChain")
            .field("depth", &self.middlewares.len())
            .finish()
    }
}

impl HookChain {
    /// Runs the request through the stack and into the handler. Each
    /// middleware receives the next link as its continuation.
    pub async fn handle(&self, req: Request) -> HandlerResult {
        let mut next = Next::new_handler(self.handler.clone());
        let mut index = self.middlewares.len();
        while index > 0 {
            index -= 1;
            let middleware = self.middlewares[index].clone();
            next = Next::new_handler(Box::new(move |req| middleware.call(req, next.clone())));
        }
        next.handle(req).await
    }

    /// How many middlewares sit in front of the handler.
    pub fn depth(&self) -> usize {
        self.middlewares.len()
    }
}

/// Builds the chain for one `(controller, action)` pair:
/// `pre` → applicable `before` entries → `auth` → context tag → adapted
/// action → applicable `after` entries.
///
/// Every named hook is resolved here, filtered-out entries included, so a
/// misnamed hook fails the bind instead of a request.
pub(crate) fn build(
    controller: &dyn Controller,
    controller_name: &str,
    action_name: &str,
    action: Box<dyn Handler>,
    config: &RouterConfig,
) -> Result<HookChain, BindError> {
    let mut stack: Vec<Box<dyn Middleware>> = Vec::new();

    if let Some(pre) = controller.pre() {
        stack.push(pre);
    }

    for hook in applicable_hooks(controller, controller_name, action_name, controller.before(), config)? {
        stack.push(hook);
    }

    if let Some(auth) = controller.auth(action_name) {
        stack.push(auth);
    }

    stack.push(Box::new(ContextTag {
        controller: controller_name.to_string(),
        action: action_name.to_string(),
    }));

    // After hooks act on the response once their continuation returns. They
    // go innermost, reversed, so their post-continuation work runs in
    // declared order right after the action.
    let mut after =
        applicable_hooks(controller, controller_name, action_name, controller.after(), config)?;
    after.reverse();
    stack.extend(after);

    Ok(HookChain {
        middlewares: stack,
        handler: config.adapter.adapt(action),
    })
}

fn applicable_hooks(
    controller: &dyn Controller,
    controller_name: &str,
    action_name: &str,
    specs: &[HookSpec],
    config: &RouterConfig,
) -> Result<Vec<Box<dyn Middleware>>, BindError> {
    let mut hooks = Vec::new();
    for spec in specs {
        if config.strict_filters && spec.has_conflicting_filters() {
            return Err(BindError::ConflictingFilter {
                controller: controller_name.to_string(),
                hook: spec.hook.clone(),
            });
        }
        let hook = controller
            .find_hook(&spec.hook)
            .ok_or_else(|| BindError::UnknownHook {
                controller: controller_name.to_string(),
                hook: spec.hook.clone(),
            })?;
        if spec.applies_to(action_name) {
            hooks.push(hook);
        }
    }
    Ok(hooks)
}

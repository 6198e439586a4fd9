//! End-to-end binding and dispatch: declare routes against in-memory
//! controllers, then drive requests through the bound chains.

use resourceful::{
    json, CallbackAdapter, FnController, Handler, HookResult, HookSpec, InMemoryServer, Method,
    Next, Options, Request, Response, Router, RouterConfig, StaticControllers, Value,
};
use std::sync::Arc;

/// A controller close to the classic fixture: before filters stamp request
/// data, actions echo what they saw.
fn foo_controller() -> FnController {
    FnController::new()
        .hook("stamp_id", |mut req: Request, next: Next| -> HookResult {
            Box::pin(async move {
                req.set_data("id", 123);
                next.handle(req).await
            })
        })
        .hook("stamp_name", |mut req: Request, next: Next| -> HookResult {
            Box::pin(async move {
                req.set_data("name", "foo");
                next.handle(req).await
            })
        })
        .hook("stamp_foo", |mut req: Request, next: Next| -> HookResult {
            Box::pin(async move {
                req.set_data("foo", "bar");
                next.handle(req).await
            })
        })
        .before(HookSpec::new("stamp_id"))
        .before(HookSpec::new("stamp_foo").except(["destroy"]))
        .before(HookSpec::new("stamp_name").only(["create", "update"]))
        .action("index", |req: Request| async move {
            let context = req.context.as_ref().expect("context tag ran");
            Response::ok(&json!({
                "requestId": req.get_data("id"),
                "controller": context.controller,
                "action": context.action,
                "name": req.get_data("name"),
                "foo": req.get_data("foo"),
            }))
        })
        .action("show", |req: Request| async move {
            Response::ok(&json!({
                "requestId": req.get_data("id"),
                "name": req.get_data("name"),
                "foo": req.get_data("foo"),
                "id": req.param("id"),
            }))
        })
        .action("create", |req: Request| async move {
            Response::ok(&json!({
                "requestId": req.get_data("id"),
                "name": req.get_data("name"),
                "foo": req.get_data("foo"),
            }))
        })
        .action("update", |req: Request| async move {
            Response::ok(&json!({
                "name": req.get_data("name"),
            }))
        })
        .action("destroy", |req: Request| async move {
            Response::ok(&json!({
                "foo": req.get_data("foo"),
            }))
        })
}

fn bar_controller() -> FnController {
    FnController::new().action("baz", |_req| async { Response::ok(&json!({ "bar": "baz" })) })
}

fn body_json(res: &Response) -> Value {
    serde_json::from_str(&res.body).expect("JSON body")
}

fn bind() -> Router<InMemoryServer> {
    let controllers = StaticControllers::new()
        .controller("foo", foo_controller())
        .controller("bar", bar_controller());
    Router::new(
        InMemoryServer::new(),
        &controllers,
        RouterConfig::default(),
        |router| {
            router.resources("foo", Options::default())?;
            router.get("/bar/baz", "bar#baz")
        },
    )
    .unwrap()
}

#[tokio::test]
async fn resources_and_explicit_routes_dispatch() {
    let router = bind();
    let server = router.server();

    let res = server
        .dispatch(Request::new(Method::Get, "/foo"))
        .await
        .unwrap();
    let body = body_json(&res);
    assert_eq!(body["requestId"], 123);
    assert_eq!(body["controller"], "foo");
    assert_eq!(body["action"], "index");
    assert_eq!(body["foo"], "bar");
    assert_eq!(body["name"], Value::Null);

    let res = server
        .dispatch(Request::new(Method::Get, "/bar/baz"))
        .await
        .unwrap();
    assert_eq!(body_json(&res)["bar"], "baz");
}

#[tokio::test]
async fn before_filters_follow_only_and_except() {
    let router = bind();
    let server = router.server();

    let res = server
        .dispatch(Request::new(Method::Post, "/foo"))
        .await
        .unwrap();
    let body = body_json(&res);
    assert_eq!(body["name"], "foo"); // only: [create, update]
    assert_eq!(body["foo"], "bar");

    let res = server
        .dispatch(Request::new(Method::Delete, "/foo/1"))
        .await
        .unwrap();
    // except: [destroy] kept the stamp off this action.
    assert_eq!(body_json(&res)["foo"], Value::Null);
}

#[tokio::test]
async fn path_params_reach_the_action() {
    let router = bind();
    let res = router
        .server()
        .dispatch(Request::new(Method::Get, "/foo/42"))
        .await
        .unwrap();
    assert_eq!(body_json(&res)["id"], "42");
}

#[tokio::test]
async fn absent_actions_skip_their_bindings() {
    let router = bind();
    let foo_bindings: Vec<_> = router
        .server()
        .bindings()
        .iter()
        .filter(|(_, path)| path.starts_with("/foo"))
        .collect();
    // index, show, create, update, destroy under Del and Delete; new/edit
    // are not implemented and never bind.
    assert_eq!(foo_bindings.len(), 6);
}

#[tokio::test]
async fn auth_middleware_runs_between_before_and_action() {
    let controllers = StaticControllers::new().controller(
        "vault",
        FnController::new()
            .auth(|action: &str| -> Option<Box<dyn resourceful::Middleware>> {
                if action == "show" {
                    Some(Box::new(|req: Request, next: Next| -> HookResult {
                        Box::pin(async move {
                            if req.get_header("authorization").is_some() {
                                next.handle(req).await
                            } else {
                                Err(resourceful::RequestError::Unauthorized(
                                    "missing credentials".to_string(),
                                ))
                            }
                        })
                    }))
                } else {
                    None
                }
            })
            .action("show", |_req| async { Response::ok(&json!({ "secret": 1 })) })
            .action("index", |_req| async { Response::ok(&json!([])) }),
    );
    let router = Router::new(
        InMemoryServer::new(),
        &controllers,
        RouterConfig::default(),
        |router| router.resources("vault", Options::default()),
    )
    .unwrap();
    let server = router.server();

    let err = server
        .dispatch(Request::new(Method::Get, "/vault/1"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 401);

    let ok = server
        .dispatch(Request::new(Method::Get, "/vault/1").header("Authorization", "let me in"))
        .await
        .unwrap();
    assert_eq!(body_json(&ok)["secret"], 1);

    // index has no auth middleware at all.
    assert!(server
        .dispatch(Request::new(Method::Get, "/vault"))
        .await
        .is_ok());
}

/// The historical `buildCallback` extension: a custom adapter wraps every
/// action so controllers stay ignorant of the transport.
struct Stamping;

impl CallbackAdapter for Stamping {
    fn adapt(&self, action: Box<dyn Handler>) -> Box<dyn Handler> {
        Box::new(move |req: Request| {
            let action = action.clone();
            async move {
                let mut res = action.handle(req).await?;
                res.header("X-Handled-By", "resourceful");
                Ok(res)
            }
        })
    }
}

#[tokio::test]
async fn callback_adapter_wraps_every_action() {
    let controllers = StaticControllers::new().controller("foo", foo_controller());
    let config = RouterConfig {
        adapter: Arc::new(Stamping),
        ..RouterConfig::default()
    };
    let router = Router::new(InMemoryServer::new(), &controllers, config, |router| {
        router.resources("foo", Options::default())
    })
    .unwrap();

    let res = router
        .server()
        .dispatch(Request::new(Method::Get, "/foo"))
        .await
        .unwrap();
    assert_eq!(
        res.headers.get("X-Handled-By").map(|s| s.as_str()),
        Some("resourceful")
    );
}

#[tokio::test]
async fn versioned_routers_dispatch_only_qualified_declarations() {
    let controllers = StaticControllers::new()
        .versioned_controller("foo", "1", foo_controller())
        .versioned_controller("foo", "2", bar_controller());

    let router = Router::new(
        InMemoryServer::new(),
        &controllers,
        RouterConfig::versioned(),
        |router| {
            router.resources("foo", Options::default().version("1"))?;
            // No version: resolves an unqualified key, binds nothing.
            router.resources("bar", Options::default())
        },
    )
    .unwrap();
    let server = router.server();

    assert!(server
        .dispatch(Request::new(Method::Get, "/foo"))
        .await
        .is_ok());
    assert_eq!(
        server
            .dispatch(Request::new(Method::Get, "/bar"))
            .await
            .unwrap_err()
            .status_code(),
        404
    );
}

#[tokio::test]
async fn prefixed_resources_bind_under_the_prefix() {
    let controllers = StaticControllers::new().controller("foo", foo_controller());
    let router = Router::new(
        InMemoryServer::new(),
        &controllers,
        RouterConfig::default(),
        |router| router.resources("foo", Options::default().prefix("/api")),
    )
    .unwrap();
    let server = router.server();

    assert!(server
        .dispatch(Request::new(Method::Get, "/api/foo"))
        .await
        .is_ok());
    assert_eq!(
        server
            .dispatch(Request::new(Method::Get, "/foo"))
            .await
            .unwrap_err()
            .status_code(),
        404
    );
    assert_eq!(router.path("fooPath", &[]).unwrap(), "/api/foo/");
}

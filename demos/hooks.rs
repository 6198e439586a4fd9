//! Lifecycle hooks demo
//!
//! A controller with a `pre` middleware, filtered before/after hooks, and an
//! auth factory, showing the order the chain runs in.

use resourceful::{
    json, FnController, HookResult, HookSpec, InMemoryServer, Method, Middleware, Next, Options,
    Request, RequestError, Response, Router, RouterConfig, StaticControllers,
};

fn announce(name: &'static str) -> impl Fn(Request, Next) -> HookResult + Clone {
    move |req: Request, next: Next| -> HookResult {
        Box::pin(async move {
            println!("  -> {}", name);
            next.handle(req).await
        })
    }
}

fn articles() -> FnController {
    FnController::new()
        .pre(announce("pre: every route of this controller"))
        .hook("load_article", announce("before: load_article"))
        .hook("audit", |req: Request, next: Next| -> HookResult {
            Box::pin(async move {
                let res = next.handle(req).await;
                println!("  <- after: audit");
                res
            })
        })
        .before(HookSpec::new("load_article").only(["show", "edit"]))
        .after(HookSpec::new("audit").except(["index"]))
        .auth(|action: &str| -> Option<Box<dyn Middleware>> {
            if action == "destroy" {
                Some(Box::new(
                    |req: Request, next: Next| -> HookResult {
                        Box::pin(async move {
                            match req.get_header("authorization") {
                                Some(_) => next.handle(req).await,
                                None => Err(RequestError::Unauthorized(
                                    "destroying takes credentials".to_string(),
                                )),
                            }
                        })
                    },
                ))
            } else {
                None
            }
        })
        .action("index", |_req| async { Response::ok(&json!([])) })
        .action("show", |req: Request| async move {
            let ctx = req.context.expect("tagged");
            Response::ok(&json!({ "controller": ctx.controller, "action": ctx.action }))
        })
        .action("destroy", |_req| async { Ok(Response::no_content()) })
}

#[tokio::main]
async fn main() {
    let controllers = StaticControllers::new().controller("articles", articles());
    let router = Router::new(
        InMemoryServer::new(),
        &controllers,
        RouterConfig::default(),
        |router| router.resources("articles", Options::default()),
    )
    .expect("routes bind");
    let server = router.server();

    println!("GET /articles/1");
    let res = server
        .dispatch(Request::new(Method::Get, "/articles/1"))
        .await
        .unwrap();
    println!("  {} {}", res.status, res.body);

    println!("DELETE /articles/1 (no credentials)");
    let err = server
        .dispatch(Request::new(Method::Delete, "/articles/1"))
        .await
        .unwrap_err();
    println!("  {} {}", err.status_code(), err);

    println!("DELETE /articles/1 (authorized)");
    let res = server
        .dispatch(Request::new(Method::Delete, "/articles/1").header("Authorization", "token"))
        .await
        .unwrap();
    println!("  {}", res.status);
}

//! Resource routing demo
//!
//! Declares a conventional resource plus one explicit route, then drives a
//! few requests through the in-memory server and prints what comes back.

use resourceful::{
    json, FnController, InMemoryServer, Method, Options, Request, Response, Router, RouterConfig,
    StaticControllers,
};

fn bananas() -> FnController {
    FnController::new()
        .action("index", |_req| async {
            Response::ok(&json!([
                { "id": 1, "name": "cavendish" },
                { "id": 2, "name": "plantain" },
            ]))
        })
        .action("show", |req: Request| async move {
            Response::ok(&json!({ "id": req.param("id"), "ripe": true }))
        })
        .action("create", |req: Request| async move {
            let body: Option<resourceful::Value> = req.body.json();
            Response::created(&json!({ "created": body }))
        })
        .action("destroy", |_req| async { Ok(Response::no_content()) })
}

#[tokio::main]
async fn main() {
    let controllers = StaticControllers::new()
        .controller("bananas", bananas())
        .controller(
            "status",
            FnController::new().action("ping", |_req| async { Ok(Response::text("pong")) }),
        );

    let router = Router::new(
        InMemoryServer::new(),
        &controllers,
        RouterConfig::default(),
        |router| {
            router.resources("bananas", Options::default())?;
            router.get("/ping", "status#ping")
        },
    )
    .expect("routes bind");

    println!("bound routes:");
    for (method, path) in router.server().bindings() {
        println!("  {:6} {}", method.as_str(), path);
    }

    println!("\nshow helper: {}", router.path("bananaPath", &[&2]).unwrap());

    for target in ["/bananas", "/bananas/2", "/ping"] {
        let res = router
            .server()
            .dispatch(Request::new(Method::Get, target))
            .await
            .expect("route dispatches");
        println!("GET {} -> {} {}", target, res.status, res.body);
    }
}

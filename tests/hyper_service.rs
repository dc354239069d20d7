#![cfg(feature = "hyper-service")]

use regex_router::{BoxHandler, HttpRouterBuilder, Method, Params, RouterService};

use std::convert::Infallible;
use std::io;

use hyper::header::{ALLOW, HOST};
use hyper::service::Service;
use hyper::{Body, Request, Response, StatusCode};

async fn show_user(_: Request<Body>, params: Params) -> Result<Response<Body>, Infallible> {
    let id = params.get("id").unwrap_or_default();
    Ok(Response::new(Body::from(format!("user {}", id))))
}

async fn tenant_home(_: Request<Body>, params: Params) -> Result<Response<Body>, Infallible> {
    let tenant = params.get("tenant").unwrap_or_default();
    Ok(Response::new(Body::from(format!("home of {}", tenant))))
}

fn service() -> RouterService {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut builder: HttpRouterBuilder<BoxHandler> = HttpRouterBuilder::new();
    builder.get("/users/{id:[0-9]+}", show_user);
    builder.get("/", tenant_home).host("{tenant}.example.com");
    builder.route(
        Method::DELETE,
        "/users/{id:[0-9]+}",
        |_: Request<Body>, _: Params| async {
            Err::<Response<Body>, _>(io::Error::new(io::ErrorKind::Other, "boom"))
        },
    );
    builder.into_service().unwrap()
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_of(res: Response<Body>) -> String {
    let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn dispatches_with_params() {
    let mut svc = service();
    let res = svc.call(request(Method::GET, "/users/42")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_of(res).await, "user 42");
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let mut svc = service();
    let res = svc.call(request(Method::GET, "/users/abc")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_of(res).await, "404 Not Found");
}

#[tokio::test]
async fn wrong_method_lists_allowed() {
    let mut svc = service();
    let res = svc.call(request(Method::PUT, "/users/42")).await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()[ALLOW], "GET, DELETE");
}

#[tokio::test]
async fn handler_errors_propagate() {
    let mut svc = service();
    let err = svc
        .call(request(Method::DELETE, "/users/42"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "boom");
}

#[tokio::test]
async fn host_header_selects_routes() {
    let mut svc = service();
    let req = Request::builder()
        .uri("/")
        .header(HOST, "acme.example.com:8080")
        .body(Body::empty())
        .unwrap();
    let res = svc.call(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_of(res).await, "home of acme");

    let res = svc.call(request(Method::GET, "/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn custom_fallback() {
    let mut builder: HttpRouterBuilder<BoxHandler> = HttpRouterBuilder::new();
    builder.route(Method::GET, "/users/{id:[0-9]+}", show_user);
    let mut svc = builder
        .with_default(|_: Request<Body>, _: Params| async {
            let mut res = Response::new(Body::from("teapot"));
            *res.status_mut() = StatusCode::IM_A_TEAPOT;
            Ok::<_, Infallible>(res)
        })
        .unwrap();

    let res = svc.call(request(Method::GET, "/missing")).await.unwrap();
    assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(body_of(res).await, "teapot");
}

#[test]
fn route_list_names_each_handler() {
    let mut builder: HttpRouterBuilder<BoxHandler> = HttpRouterBuilder::new();
    builder.get("/users/{id:[0-9]+}", show_user);
    builder
        .group("/tenants")
        .post("/home", tenant_home)
        .name("tenants.home");
    builder.route(Method::PUT, "/users/{id:[0-9]+}", show_user);
    let router = builder.mount().unwrap();

    let list = router.route_list();
    assert_eq!(list.len(), 3);
    assert!(list[0].handler.ends_with("show_user"), "{}", list[0].handler);
    assert_eq!(list[1].path, "/tenants/home");
    assert_eq!(list[1].methods, &[Method::POST]);
    assert!(list[1].handler.ends_with("tenant_home"), "{}", list[1].handler);
    assert!(list[2].handler.ends_with("show_user"), "{}", list[2].handler);
    assert_ne!(list[0].handler, list[1].handler);
}

use super::handler::{BoxHandler, Handler, HandlerFuture};
use super::params::Params;
use super::{BoxError, Request, Response};
use crate::http_router::{DispatchError, HttpRouter, HttpRouterBuilder, Method, MountError, Route};

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::header::{HeaderValue, ALLOW, HOST};
use http::StatusCode;
use hyper::service::Service;
use hyper::Body;
use tracing::debug;

/// Serves a mounted [`HttpRouter`] as a hyper service.
///
/// Unknown paths go to the fallback handler; paths known under other
/// methods get `405 Method Not Allowed` with an `Allow` header.
#[derive(Clone)]
pub struct RouterService {
    router: Arc<HttpRouter<BoxHandler>>,
    fallback: Arc<BoxHandler>,
}

enum Outcome {
    Found(Arc<Route<BoxHandler>>, Params),
    NotAllowed(Vec<Method>),
    NotFound,
}

impl Service<Request> for RouterService {
    type Response = Response;
    type Error = BoxError;
    type Future = HandlerFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let outcome = {
            let path = req.uri().path();
            let host = request_host(&req);
            match self.router.route(req.method(), host, path) {
                Ok(matched) => {
                    Outcome::Found(Arc::clone(matched.route()), Params::from(matched.params()))
                }
                Err(DispatchError::MethodNotAllowed(_)) => {
                    Outcome::NotAllowed(self.router.allowed_methods(host, path))
                }
                Err(DispatchError::NotFound) => Outcome::NotFound,
            }
        };

        match outcome {
            Outcome::Found(route, params) => Handler::call(route.handler(), req, params),
            Outcome::NotAllowed(allowed) => {
                debug!(method = %req.method(), path = req.uri().path(), "method not allowed");
                Box::pin(async move { Ok::<_, BoxError>(method_not_allowed(&allowed)) })
            }
            Outcome::NotFound => {
                debug!(method = %req.method(), path = req.uri().path(), "route not found");
                Handler::call(&**self.fallback, req, Params::default())
            }
        }
    }
}

impl RouterService {
    pub fn new(router: HttpRouter<BoxHandler>) -> Self {
        Self::from_router(router, Box::new(not_found))
    }

    pub fn from_router(router: HttpRouter<BoxHandler>, default: BoxHandler) -> Self {
        Self {
            router: Arc::new(router),
            fallback: Arc::new(default),
        }
    }

    pub fn router(&self) -> &HttpRouter<BoxHandler> {
        &self.router
    }
}

impl HttpRouterBuilder<BoxHandler> {
    pub fn into_service(self) -> Result<RouterService, MountError> {
        Ok(RouterService::new(self.mount()?))
    }

    pub fn with_default<F>(self, default: F) -> Result<RouterService, MountError>
    where
        F: Handler + Send + Sync + 'static,
    {
        Ok(RouterService::from_router(self.mount()?, Box::new(default)))
    }
}

/// The `Host` header (or URI authority) without its port.
fn request_host(req: &Request) -> Option<&str> {
    let host = req.uri().host().or_else(|| {
        req.headers()
            .get(HOST)
            .and_then(|v| v.to_str().ok())
    })?;
    if host.ends_with(']') {
        return Some(host);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => Some(name),
        _ => Some(host),
    }
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let mut res = Response::new(Body::from("405 Method Not Allowed"));
    *res.status_mut() = StatusCode::METHOD_NOT_ALLOWED;
    let allow = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if let Ok(value) = HeaderValue::from_str(&allow) {
        res.headers_mut().insert(ALLOW, value);
    }
    res
}

async fn not_found(_: Request, _: Params) -> Result<Response, Infallible> {
    let mut res = Response::new(Body::from("404 Not Found"));
    *res.status_mut() = StatusCode::NOT_FOUND;
    Ok(res)
}

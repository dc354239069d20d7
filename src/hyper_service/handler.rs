use super::params::Params;
use super::{BoxError, BoxFuture, Future, Request, Response, StdError};

pub type HandlerFuture = BoxFuture<'static, Result<Response, BoxError>>;

/// An endpoint reached through a [`RouterService`](super::RouterService).
///
/// Implemented for every `Fn(Request, Params) -> impl Future` whose error
/// converts into a boxed error.
pub trait Handler {
    fn call(&self, req: Request, params: Params) -> HandlerFuture;
}

pub type BoxHandler = Box<dyn Handler + Send + Sync>;

impl Handler for BoxHandler {
    fn call(&self, req: Request, params: Params) -> HandlerFuture {
        Handler::call(&**self, req, params)
    }
}

impl<F, E, Fut> Handler for F
where
    F: Fn(Request, Params) -> Fut,
    E: StdError + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, E>> + Send + 'static,
{
    fn call(&self, req: Request, params: Params) -> HandlerFuture {
        let fut = self(req, params);
        Box::pin(async move { fut.await.map_err(|e| Box::new(e) as BoxError) })
    }
}

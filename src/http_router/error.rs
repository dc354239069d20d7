use super::route::Route;
use crate::router::{Captures, RouterError};

use std::fmt;
use std::sync::Arc;

use http::Method;

#[derive(Debug, thiserror::Error)]
pub enum DeclareError {
    #[error("http method set can not be empty: path = {path:?}")]
    InvalidMethodArgument { path: String },

    #[error("middleware must name exactly one middleware: declaration = {declaration:?}")]
    MiddlewareShape { declaration: String },
}

/// One route that could not be indexed during [`mount`](super::HttpRouterBuilder::mount).
#[derive(Debug)]
pub struct MountFailure {
    pub method: Option<Method>,
    pub host: Option<String>,
    pub error: RouterError,
}

impl fmt::Display for MountFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(method) = &self.method {
            write!(f, "[{}] ", method)?;
        }
        if let (Some(host), Some(_)) = (&self.host, &self.method) {
            write!(f, "{} ", host)?;
        }
        match self.error.signature() {
            Some(signature) => f.write_str(signature),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Every conflict found while mounting, reported at once.
#[derive(Debug, thiserror::Error)]
#[error("duplicate route [{}] occurred", join(.failures))]
pub struct MountError {
    failures: Vec<MountFailure>,
}

impl MountError {
    pub(super) fn new(failures: Vec<MountFailure>) -> Self {
        Self { failures }
    }

    pub fn failures(&self) -> &[MountFailure] {
        &self.failures
    }
}

fn join(failures: &[MountFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|")
}

/// A resolved route and its parameters, host parameters first.
pub struct Matched<'a, H> {
    pub(super) route: &'a Arc<Route<H>>,
    pub(super) params: Captures<'a>,
}

impl<'a, H> Matched<'a, H> {
    pub fn route(&self) -> &'a Arc<Route<H>> {
        self.route
    }

    pub fn params(&self) -> &Captures<'a> {
        &self.params
    }

    pub fn into_parts(self) -> (&'a Arc<Route<H>>, Captures<'a>) {
        (self.route, self.params)
    }
}

impl<H> fmt::Debug for Matched<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matched")
            .field("route", &**self.route)
            .field("params", &self.params)
            .finish()
    }
}

#[derive(thiserror::Error)]
pub enum DispatchError<'a, H> {
    #[error("route not found")]
    NotFound,

    /// The path resolves under another method.
    #[error("method not allowed")]
    MethodNotAllowed(Matched<'a, H>),
}

impl<H> fmt::Debug for DispatchError<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("NotFound"),
            Self::MethodNotAllowed(m) => f.debug_tuple("MethodNotAllowed").field(m).finish(),
        }
    }
}

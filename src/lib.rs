//! A router resolving request paths against patterns with named,
//! regex-constrained and optional parameters.
//!
//! ```
//! use regex_router::Router;
//!
//! let mut router: Router<usize> = Router::new();
//! router
//!     .insert("/books/{name}_description", 1)
//!     .insert("/archives/{id:[0-9]+?}", 2);
//!
//! let (data, params) = router.find("/books/rust_description").unwrap();
//! assert_eq!(*data, 1);
//! assert_eq!(params.get("name"), Some("rust"));
//!
//! let (data, params) = router.find("/archives").unwrap();
//! assert_eq!(*data, 2);
//! assert_eq!(params.get("id"), Some(""));
//! ```

#![deny(unsafe_code)]

mod router;

pub use self::router::{Captures, Router, RouterError};

#[cfg(feature = "http-router")]
pub mod http_router;

#[cfg(feature = "http-router")]
pub use self::http_router::{
    DeclareError, DispatchError, HttpRouter, HttpRouterBuilder, Matched, Method, Middleware,
    MountError, MountFailure, Route, RouteEntry, RouteGroup,
};

#[cfg(feature = "hyper-service")]
pub mod hyper_service;

#[cfg(feature = "hyper-service")]
pub use self::hyper_service::{BoxHandler, Handler, HandlerFuture, Params, RouterService};

use super::middleware::Middleware;

use std::any::type_name;
use std::fmt;

use http::Method;

/// One declared endpoint.
///
/// Setters are only reachable through the `&mut Route` handed out during
/// declaration; once mounted a route is shared behind an `Arc` and frozen.
pub struct Route<H> {
    methods: Vec<Method>,
    path: String,
    host: Option<String>,
    middlewares: Vec<Middleware>,
    handler: H,
    handler_name: &'static str,
    name: Option<String>,
}

impl<H> Route<H> {
    pub(super) fn new(methods: Vec<Method>, path: String, handler: H) -> Self {
        Self {
            methods,
            path,
            host: None,
            middlewares: Vec::new(),
            handler,
            handler_name: type_name::<H>(),
            name: None,
        }
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn host(&mut self, host: impl Into<String>) -> &mut Self {
        self.host = Some(host.into());
        self
    }

    pub fn middleware(&mut self, middleware: Middleware) -> &mut Self {
        self.middlewares.push(middleware);
        self
    }

    pub fn middlewares<I>(&mut self, middlewares: I) -> &mut Self
    where
        I: IntoIterator<Item = Middleware>,
    {
        self.middlewares.extend(middlewares);
        self
    }

    /// Overrides the handler identity shown in route listings.
    pub fn handler_name(&mut self, name: &'static str) -> &mut Self {
        self.handler_name = name;
        self
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn host_pattern(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn route_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn middleware_list(&self) -> &[Middleware] {
        &self.middlewares
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_identity(&self) -> &'static str {
        self.handler_name
    }

    pub(super) fn set_path(&mut self, path: String) {
        self.path = path;
    }

    pub(super) fn inherit(&mut self, host: Option<&str>, middlewares: &[Middleware]) {
        if self.host.is_none() {
            self.host = host.map(String::from);
        }
        if !middlewares.is_empty() {
            let own = std::mem::take(&mut self.middlewares);
            self.middlewares = middlewares.iter().cloned().chain(own).collect();
        }
    }
}

impl<H> fmt::Debug for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("methods", &self.methods)
            .field("path", &self.path)
            .field("host", &self.host)
            .field("name", &self.name)
            .field("handler", &self.handler_name)
            .field("middlewares", &self.middlewares)
            .finish()
    }
}

/// A read-only row describing one mounted route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry<'a> {
    pub methods: &'a [Method],
    pub path: &'a str,
    pub host: Option<&'a str>,
    pub name: Option<&'a str>,
    pub handler: &'static str,
    pub middlewares: Vec<&'a str>,
}

impl<'a, H> From<&'a Route<H>> for RouteEntry<'a> {
    fn from(route: &'a Route<H>) -> Self {
        Self {
            methods: &route.methods,
            path: &route.path,
            host: route.host_pattern(),
            name: route.route_name(),
            handler: route.handler_name,
            middlewares: route.middlewares.iter().map(Middleware::alias).collect(),
        }
    }
}

use super::error::DeclareError;
use super::middleware::Middleware;
use super::route::Route;
use super::{collect_methods, normalize_path};

use http::Method;

/// A prefix and middleware scope for routes declared through it.
///
/// Nested groups concatenate prefixes and inherit middleware and host.
#[derive(Debug)]
pub struct RouteGroup<H> {
    prefix: String,
    host: Option<String>,
    middlewares: Vec<Middleware>,
    routes: Vec<Route<H>>,
    groups: Vec<RouteGroup<H>>,
}

impl<H> RouteGroup<H> {
    pub(super) fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.into(),
            host: None,
            middlewares: Vec::new(),
            routes: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn host(&mut self, host: impl Into<String>) -> &mut Self {
        self.host = Some(host.into());
        self
    }

    pub fn middleware(&mut self, middleware: Middleware) -> &mut Self {
        self.middlewares.push(middleware);
        self
    }

    pub fn group(&mut self, prefix: &str) -> &mut RouteGroup<H> {
        self.groups.push(RouteGroup::new(prefix));
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    pub fn add(&mut self, method: Method, path: &str, handler: H) -> &mut Route<H> {
        self.push(Route::new(vec![method], path.into(), handler))
    }

    pub fn add_methods<I>(&mut self, methods: I, path: &str, handler: H) -> &mut Route<H>
    where
        I: IntoIterator<Item = Method>,
    {
        match self.try_add_methods(methods, path, handler) {
            Ok(route) => route,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_add_methods<I>(
        &mut self,
        methods: I,
        path: &str,
        handler: H,
    ) -> Result<&mut Route<H>, DeclareError>
    where
        I: IntoIterator<Item = Method>,
    {
        let methods = collect_methods(methods, path)?;
        Ok(self.push(Route::new(methods, path.into(), handler)))
    }

    /// Flattens the group: own routes first, then each subgroup in order.
    pub fn into_routes(self) -> Vec<Route<H>> {
        let mut out = Vec::new();
        self.flatten("", None, &[], &mut out);
        out
    }

    fn push(&mut self, route: Route<H>) -> &mut Route<H> {
        self.routes.push(route);
        let last = self.routes.len() - 1;
        &mut self.routes[last]
    }

    fn flatten(
        self,
        parent_prefix: &str,
        parent_host: Option<&str>,
        parent_middlewares: &[Middleware],
        out: &mut Vec<Route<H>>,
    ) {
        let prefix = format!("{}{}", parent_prefix, self.prefix);
        let host = self.host.as_deref().or(parent_host);
        let middlewares: Vec<Middleware> = parent_middlewares
            .iter()
            .chain(&self.middlewares)
            .cloned()
            .collect();

        for mut route in self.routes {
            let path = normalize_path(&format!("{}{}", prefix, route.path()));
            route.set_path(path);
            route.inherit(host, &middlewares);
            out.push(route);
        }
        for group in self.groups {
            group.flatten(&prefix, host, &middlewares, out);
        }
    }
}

#![forbid(unsafe_code)]

mod error;
mod group;
mod middleware;
mod route;
mod router_macro;
mod table;

pub use self::error::{DeclareError, DispatchError, Matched, MountError, MountFailure};
pub use self::group::RouteGroup;
pub use self::middleware::Middleware;
pub use self::route::{Route, RouteEntry};

use self::table::MethodTable;
use crate::router::{normalize, Router};

use std::sync::Arc;

pub use http::Method;
use tracing::{debug, info, trace, warn};

/// Collects route declarations until [`mount`](HttpRouterBuilder::mount).
#[derive(Debug)]
pub struct HttpRouterBuilder<H> {
    routes: Vec<Route<H>>,
    groups: Vec<RouteGroup<H>>,
    middlewares: Vec<Middleware>,
}

/// A mounted, read-only method/host/path dispatch table.
#[derive(Debug)]
pub struct HttpRouter<H> {
    routes: Vec<Arc<Route<H>>>,
    methods: MethodTable<H>,
    hosts: Router<MethodTable<H>>,
    known_methods: Vec<Method>,
    middlewares: Vec<Middleware>,
}

impl<H> Default for HttpRouterBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> HttpRouterBuilder<H> {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            groups: Vec::new(),
            middlewares: Vec::new(),
        }
    }

    pub fn add(&mut self, method: Method, path: &str, handler: H) -> &mut Route<H> {
        self.push(Route::new(vec![method], normalize_path(path), handler))
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
        Ok(self.push(Route::new(methods, normalize_path(path), handler)))
    }

    pub fn group(&mut self, prefix: &str) -> &mut RouteGroup<H> {
        self.groups.push(RouteGroup::new(prefix));
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    /// Registers router-wide middleware. It is exposed by
    /// [`HttpRouter::middlewares`] and not copied into routes.
    pub fn use_middleware(&mut self, middleware: Middleware) -> &mut Self {
        self.middlewares.push(middleware);
        self
    }

    /// Indexes every declared route, including all group routes.
    ///
    /// All conflicts are collected before failing so a single attempt reports
    /// every duplicate.
    pub fn mount(self) -> Result<HttpRouter<H>, MountError> {
        let mut declared = self.routes;
        for group in self.groups {
            declared.extend(group.into_routes());
        }
        let routes: Vec<Arc<Route<H>>> = declared.into_iter().map(Arc::new).collect();

        let mut methods: MethodTable<H> = MethodTable::new();
        let mut host_tables: Vec<(String, MethodTable<H>)> = Vec::new();
        let mut known_methods: Vec<Method> = Vec::new();
        let mut failures: Vec<MountFailure> = Vec::new();

        for route in &routes {
            let table = match route.host_pattern() {
                Some(host) => host_table(&mut host_tables, host),
                None => &mut methods,
            };
            for method in route.methods() {
                if !known_methods.contains(method) {
                    known_methods.push(method.clone());
                }
                match table
                    .access_router(method)
                    .try_insert(route.path(), Arc::clone(route))
                {
                    Ok(signature) => debug!(
                        method = %method,
                        host = route.host_pattern().unwrap_or(""),
                        signature = %signature,
                        "route indexed"
                    ),
                    Err(error) => {
                        warn!(
                            method = %method,
                            host = route.host_pattern().unwrap_or(""),
                            path = route.path(),
                            error = %error,
                            "route rejected"
                        );
                        failures.push(MountFailure {
                            method: Some(method.clone()),
                            host: route.host_pattern().map(String::from),
                            error,
                        });
                    }
                }
            }
        }

        let host_count = host_tables.len();
        let mut hosts: Router<MethodTable<H>> = Router::new();
        for (host, table) in host_tables {
            if let Err(error) = hosts.try_insert(&host, table) {
                warn!(host = %host, error = %error, "host rejected");
                failures.push(MountFailure {
                    method: None,
                    host: Some(host),
                    error,
                });
            }
        }

        if !failures.is_empty() {
            warn!(conflicts = failures.len(), "mount failed");
            return Err(MountError::new(failures));
        }

        info!(routes = routes.len(), hosts = host_count, "routes mounted");

        Ok(HttpRouter {
            routes,
            methods,
            hosts,
            known_methods,
            middlewares: self.middlewares,
        })
    }

    fn push(&mut self, route: Route<H>) -> &mut Route<H> {
        self.routes.push(route);
        let last = self.routes.len() - 1;
        &mut self.routes[last]
    }
}

impl<H> HttpRouter<H> {
    /// Resolves a request.
    ///
    /// Host-scoped routes are tried before host-less ones. When the path only
    /// resolves under another method the result is
    /// [`DispatchError::MethodNotAllowed`] carrying that route.
    pub fn route<'a>(
        &'a self,
        method: &Method,
        host: Option<&'a str>,
        path: &'a str,
    ) -> Result<Matched<'a, H>, DispatchError<'a, H>> {
        if let Some(matched) = self.resolve(method, host, path) {
            return Ok(matched);
        }
        for other in self.known_methods.iter().filter(|m| *m != method) {
            if let Some(matched) = self.resolve(other, host, path) {
                trace!(method = %method, allowed = %other, path, "method not allowed");
                return Err(DispatchError::MethodNotAllowed(matched));
            }
        }
        trace!(method = %method, host = host.unwrap_or(""), path, "route not found");
        Err(DispatchError::NotFound)
    }

    /// [`route`](Self::route) without a host.
    pub fn find<'a>(
        &'a self,
        method: &Method,
        path: &'a str,
    ) -> Result<Matched<'a, H>, DispatchError<'a, H>> {
        self.route(method, None, path)
    }

    /// Every method under which the request resolves, in registration order.
    pub fn allowed_methods(&self, host: Option<&str>, path: &str) -> Vec<Method> {
        self.known_methods
            .iter()
            .filter(|m| self.resolve(m, host, path).is_some())
            .cloned()
            .collect()
    }

    /// Mounted routes in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route<H>>> {
        self.routes.iter()
    }

    /// Router-wide middleware.
    pub fn middlewares(&self) -> &[Middleware] {
        &self.middlewares
    }

    /// One row per mounted route, in declaration order.
    pub fn route_list(&self) -> Vec<RouteEntry<'_>> {
        self.routes.iter().map(|r| RouteEntry::from(&**r)).collect()
    }

    fn resolve<'a>(
        &'a self,
        method: &Method,
        host: Option<&'a str>,
        path: &'a str,
    ) -> Option<Matched<'a, H>> {
        if let (Some(host), false) = (host, self.hosts.is_empty()) {
            if let Ok((table, mut params)) = self.hosts.find(host) {
                if let Some(Ok((route, captures))) = table.get(method).map(|r| r.find(path)) {
                    params.extend(captures);
                    return Some(Matched { route, params });
                }
            }
        }
        let (route, params) = self.methods.get(method)?.find(path).ok()?;
        Some(Matched { route, params })
    }
}

/// Ensures a leading `/` and drops a trailing one, except for the root.
pub(crate) fn normalize_path(path: &str) -> String {
    let path = normalize(path);
    if path.starts_with('/') {
        path.into()
    } else {
        format!("/{}", path)
    }
}

fn collect_methods<I>(methods: I, path: &str) -> Result<Vec<Method>, DeclareError>
where
    I: IntoIterator<Item = Method>,
{
    let mut out: Vec<Method> = Vec::new();
    for method in methods {
        if !out.contains(&method) {
            out.push(method);
        }
    }
    if out.is_empty() {
        return Err(DeclareError::InvalidMethodArgument { path: path.into() });
    }
    Ok(out)
}

fn host_table<'a, H>(
    tables: &'a mut Vec<(String, MethodTable<H>)>,
    host: &str,
) -> &'a mut MethodTable<H> {
    let idx = match tables.iter().position(|(h, _)| h == host) {
        Some(i) => i,
        None => {
            tables.push((host.into(), MethodTable::new()));
            tables.len() - 1
        }
    };
    &mut tables[idx].1
}

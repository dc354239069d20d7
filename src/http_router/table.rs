use super::route::Route;
use crate::router::Router;

use std::sync::Arc;

use http::Method;

pub(super) type RouteRouter<H> = Router<Arc<Route<H>>>;

/// One path router per method, in registration order.
#[derive(Debug)]
pub(super) struct MethodTable<H> {
    routers: Vec<(Method, RouteRouter<H>)>,
}

impl<H> MethodTable<H> {
    pub fn new() -> Self {
        Self {
            routers: Vec::new(),
        }
    }

    pub fn get(&self, method: &Method) -> Option<&RouteRouter<H>> {
        self.routers
            .iter()
            .find_map(|(m, r)| if m == method { Some(r) } else { None })
    }

    pub fn access_router(&mut self, method: &Method) -> &mut RouteRouter<H> {
        let idx = match self.routers.iter().position(|(m, _)| m == method) {
            Some(i) => i,
            None => {
                self.routers.push((method.clone(), Router::new()));
                self.routers.len() - 1
            }
        };
        &mut self.routers[idx].1
    }
}

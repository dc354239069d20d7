use super::handler::{BoxHandler, Handler};
use crate::http_router::{HttpRouterBuilder, Method, Route, RouteGroup};

use std::any::type_name;

macro_rules! define_method {
    ($name:ident, $method:ident) => {
        pub fn $name<F>(&mut self, path: &str, h: F) -> &mut Route<BoxHandler>
        where
            F: Handler + Send + Sync + 'static,
        {
            self.route(Method::$method, path, h)
        }
    };
}

macro_rules! impl_declare {
    ($ty:ty) => {
        impl $ty {
            /// Boxes `h` and records its type as the route's handler identity.
            pub fn route<F>(&mut self, method: Method, path: &str, h: F) -> &mut Route<BoxHandler>
            where
                F: Handler + Send + Sync + 'static,
            {
                self.add(method, path, Box::new(h))
                    .handler_name(type_name::<F>())
            }

            define_method!(get, GET);
            define_method!(head, HEAD);
            define_method!(post, POST);
            define_method!(put, PUT);
            define_method!(patch, PATCH);
            define_method!(delete, DELETE);
            define_method!(connect, CONNECT);
            define_method!(options, OPTIONS);
            define_method!(trace, TRACE);
        }
    };
}

impl_declare!(HttpRouterBuilder<BoxHandler>);
impl_declare!(RouteGroup<BoxHandler>);

/// Declares routes on a new [`HttpRouterBuilder`](crate::HttpRouterBuilder).
///
/// ```
/// use regex_router::{http_router, Method};
///
/// let router = http_router! {
///     GET "/users/{id:[0-9]+}" => 1,
///     POST "/users" => 2,
/// }
/// .mount()
/// .unwrap();
///
/// let matched = router.find(&Method::GET, "/users/42").unwrap();
/// assert_eq!(*matched.route().handler(), 1);
/// assert_eq!(matched.params().get("id"), Some("42"));
/// ```
#[macro_export]
macro_rules! http_router {
    {$($method:ident $pattern:expr => $data:expr),+ $(,)?} => {{
        let mut __router = $crate::HttpRouterBuilder::new();
        $($crate::http_router!(@entry __router, $method, $pattern, $data);)+
        __router
    }};

    {@entry $router:expr, $method:ident, $pattern:expr, $data:expr} => {
        $router.add($crate::Method::$method, $pattern, $data)
    };
}

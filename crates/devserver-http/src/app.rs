//! The wrapped application boundary.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;

use crate::body::ResponseBody;
use crate::response::not_found;

/// Future returned by [`AppHandler::call`].
pub type AppFuture =
    Pin<Box<dyn Future<Output = Result<http::Response<ResponseBody>, Infallible>> + Send>>;

/// The application wrapped by the dev server.
///
/// It is an opaque capability: given a request it produces a response. The
/// router never inspects or modifies it, and `script` routes forward requests
/// to it verbatim.
pub trait AppHandler<B>: Send + Sync + 'static {
    /// Handle a request.
    fn call(&self, req: http::Request<B>) -> AppFuture;
}

/// Application answering every request with the fixed 404 response.
///
/// Used when the server runs without an application of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFoundApp;

impl<B: Send + 'static> AppHandler<B> for NotFoundApp {
    fn call(&self, _req: http::Request<B>) -> AppFuture {
        Box::pin(async { Ok(not_found()) })
    }
}

/// Adapter turning a closure into an [`AppHandler`].
///
/// ```
/// use devserver_http::{AppHandler, FnApp, ResponseBody};
///
/// let app = FnApp::new(|req: http::Request<()>| {
///     http::Response::new(ResponseBody::from_string(req.uri().path().to_owned()))
/// });
/// let _fut = app.call(http::Request::new(()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnApp<F>(F);

impl<F> FnApp<F> {
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<B, F> AppHandler<B> for FnApp<F>
where
    B: Send + 'static,
    F: Fn(http::Request<B>) -> http::Response<ResponseBody> + Send + Sync + 'static,
{
    fn call(&self, req: http::Request<B>) -> AppFuture {
        let resp = (self.0)(req);
        Box::pin(async move { Ok(resp) })
    }
}

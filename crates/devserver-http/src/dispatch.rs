//! Request dispatch over the route table.
//!
//! The request path is percent-decoded once, then matched against each route
//! in order. The first matching route handles the request; nothing after it
//! is consulted. When no route matches, the fixed 404 response is returned
//! and the wrapped application is never called.

use std::fmt;
use std::sync::Arc;

use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::body::ResponseBody;
use crate::error::ServeResult;
use crate::files::{serve_dir, serve_file};
use crate::response::not_found;
use crate::route::{RouteHandler, RouteTable};

/// Routes requests through an immutable [`RouteTable`].
///
/// Cheap to clone; clones share the table.
pub struct Dispatcher<B> {
    table: Arc<RouteTable<B>>,
}

impl<B> fmt::Debug for Dispatcher<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("table", &self.table)
            .finish()
    }
}

impl<B> Clone for Dispatcher<B> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<B: Send + 'static> Dispatcher<B> {
    /// Create a dispatcher over `table`.
    #[must_use]
    pub fn new(table: RouteTable<B>) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// The route table requests are matched against.
    #[must_use]
    pub fn table(&self) -> &RouteTable<B> {
        &self.table
    }

    /// Route `req` to the first matching handler.
    ///
    /// Delegated requests reach the wrapped application unmodified. Static
    /// routes answer with the file, or 404 if it does not exist. Only
    /// filesystem faults other than a missing file surface as errors.
    pub async fn dispatch(
        &self,
        req: http::Request<B>,
    ) -> ServeResult<http::Response<ResponseBody>> {
        let path = percent_decode_str(req.uri().path())
            .decode_utf8_lossy()
            .into_owned();

        for (index, route) in self.table.routes().iter().enumerate() {
            let pattern = route.pattern();
            match route.handler() {
                RouteHandler::Delegate(app) => {
                    if pattern.is_match(&path) {
                        debug!(index, url = pattern.url(), %path, "delegating to app");
                        let resp = app.call(req).await.unwrap_or_else(|never| match never {});
                        return Ok(resp);
                    }
                }
                RouteHandler::StaticDir(dir) => {
                    if let Some(remainder) = pattern.remainder(&path) {
                        debug!(index, url = pattern.url(), %path, "matched static_dir");
                        return serve_dir(dir, remainder).await;
                    }
                }
                RouteHandler::StaticFiles(template) => {
                    if let Some(captures) = pattern.captures(&path) {
                        debug!(index, url = pattern.url(), %path, "matched static_files");
                        return serve_file(template, &captures).await;
                    }
                }
            }
        }

        debug!(%path, "no route matched");
        Ok(not_found())
    }
}

//! The environment gate in front of the router.
//!
//! On the hosting platform static assets are served by the platform itself,
//! so the wrapper steps aside and hands back the application untouched. Off
//! the platform the application is wrapped in a [`Dispatcher`] built from the
//! handler list.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use devserver_core::{ConfigResult, HandlerConfig};
use tracing::{debug, error};

use crate::app::{AppFuture, AppHandler};
use crate::body::ResponseBody;
use crate::dispatch::Dispatcher;
use crate::response::internal_error;
use crate::route::build_routes;

/// The HTTP application produced by [`wrap`].
pub enum Gate<B> {
    /// Hosted mode: every request goes straight to the original application.
    Passthrough(Arc<dyn AppHandler<B>>),
    /// Local mode: requests are routed through the handler table.
    Dispatch(Dispatcher<B>),
}

impl<B> Clone for Gate<B> {
    fn clone(&self) -> Self {
        match self {
            Self::Passthrough(app) => Self::Passthrough(Arc::clone(app)),
            Self::Dispatch(dispatcher) => Self::Dispatch(dispatcher.clone()),
        }
    }
}

impl<B> fmt::Debug for Gate<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passthrough(_) => f.write_str("Passthrough(..)"),
            Self::Dispatch(dispatcher) => f.debug_tuple("Dispatch").field(dispatcher).finish(),
        }
    }
}

/// Wrap `app` so requests are routed per `handlers`.
///
/// When `hosted` is set, `app` is returned as is: the handler list is neither
/// validated nor compiled, and no route table exists. Otherwise the table is
/// built up front and any configuration error is returned before a single
/// request is served.
pub fn wrap<B: Send + 'static>(
    app: Arc<dyn AppHandler<B>>,
    handlers: &[HandlerConfig],
    hosted: bool,
) -> ConfigResult<Gate<B>> {
    if hosted {
        return Ok(Gate::Passthrough(app));
    }

    let table = build_routes(handlers, &app)?;
    debug!(routes = table.len(), "static routing enabled");
    Ok(Gate::Dispatch(Dispatcher::new(table)))
}

impl<B: Send + 'static> Gate<B> {
    /// Returns `true` if this gate forwards everything to the application.
    #[must_use]
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough(_))
    }

    /// Handle one request, turning serving faults into a 500 response.
    pub async fn handle(&self, req: http::Request<B>) -> http::Response<ResponseBody> {
        match self {
            Self::Passthrough(app) => app.call(req).await.unwrap_or_else(|never| match never {}),
            Self::Dispatch(dispatcher) => {
                let method = req.method().clone();
                let uri = req.uri().clone();
                match dispatcher.dispatch(req).await {
                    Ok(resp) => resp,
                    Err(e) => {
                        error!(%method, %uri, error = %e, "failed to serve request");
                        internal_error()
                    }
                }
            }
        }
    }
}

impl<B: Send + 'static> AppHandler<B> for Gate<B> {
    fn call(&self, req: http::Request<B>) -> AppFuture {
        let gate = self.clone();
        Box::pin(async move { Ok(gate.handle(req).await) })
    }
}

impl<B: Send + 'static> hyper::service::Service<http::Request<B>> for Gate<B> {
    type Response = http::Response<ResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        AppHandler::call(self, req)
    }
}

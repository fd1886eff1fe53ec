//! Route table construction.
//!
//! Each validated handler descriptor becomes one [`Route`]: a compiled url
//! pattern paired with what to do on a match. Routes keep the order of the
//! descriptors, which is their match priority.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use devserver_core::{
    ConfigError, ConfigResult, HandlerConfig, HandlerDescriptor, validate_handlers,
};

use crate::app::AppHandler;
use crate::pattern::UrlPattern;

/// What a route does with a matching request.
pub enum RouteHandler<B> {
    /// Forward to the wrapped application.
    Delegate(Arc<dyn AppHandler<B>>),
    /// Serve the path remainder from this directory.
    StaticDir(PathBuf),
    /// Serve the file named by this backreference template.
    StaticFiles(String),
}

impl<B> RouteHandler<B> {
    /// Short name of the handler kind, as used in `app.yaml`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Delegate(_) => "script",
            Self::StaticDir(_) => "static_dir",
            Self::StaticFiles(_) => "static_files",
        }
    }
}

impl<B> fmt::Debug for RouteHandler<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delegate(_) => f.write_str("Delegate(..)"),
            Self::StaticDir(dir) => f.debug_tuple("StaticDir").field(dir).finish(),
            Self::StaticFiles(template) => f.debug_tuple("StaticFiles").field(template).finish(),
        }
    }
}

/// An immutable (pattern, handler) pair.
pub struct Route<B> {
    pattern: UrlPattern,
    handler: RouteHandler<B>,
}

impl<B> Route<B> {
    /// The compiled url pattern.
    #[must_use]
    pub fn pattern(&self) -> &UrlPattern {
        &self.pattern
    }

    /// The handler invoked on a match.
    #[must_use]
    pub fn handler(&self) -> &RouteHandler<B> {
        &self.handler
    }
}

impl<B> fmt::Debug for Route<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("handler", &self.handler)
            .finish()
    }
}

/// Ordered, read-only sequence of routes.
pub struct RouteTable<B> {
    routes: Vec<Route<B>>,
}

impl<B> fmt::Debug for RouteTable<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.routes).finish()
    }
}

impl<B> RouteTable<B> {
    /// Routes in priority order.
    #[must_use]
    pub fn routes(&self) -> &[Route<B>] {
        &self.routes
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Build the route table for `handlers`, delegating `script` routes to `app`.
///
/// Every handler is validated and every pattern compiled before the table
/// exists; one bad entry fails the whole build.
pub fn build_routes<B>(
    handlers: &[HandlerConfig],
    app: &Arc<dyn AppHandler<B>>,
) -> ConfigResult<RouteTable<B>> {
    let descriptors = validate_handlers(handlers)?;

    let routes = descriptors
        .into_iter()
        .enumerate()
        .map(|(index, descriptor)| compile_route(index, descriptor, app))
        .collect::<ConfigResult<Vec<_>>>()?;

    Ok(RouteTable { routes })
}

fn compile_route<B>(
    index: usize,
    descriptor: HandlerDescriptor,
    app: &Arc<dyn AppHandler<B>>,
) -> ConfigResult<Route<B>> {
    let invalid = |url: &str, err: regex::Error| ConfigError::InvalidPattern {
        index,
        url: url.to_owned(),
        reason: err.to_string(),
    };

    let route = match descriptor {
        HandlerDescriptor::Delegate { url } => Route {
            pattern: UrlPattern::prefix(&url).map_err(|e| invalid(&url, e))?,
            handler: RouteHandler::Delegate(Arc::clone(app)),
        },
        HandlerDescriptor::StaticDir { url, dir } => Route {
            pattern: UrlPattern::prefix_with_remainder(&url).map_err(|e| invalid(&url, e))?,
            handler: RouteHandler::StaticDir(dir),
        },
        HandlerDescriptor::StaticFiles { url, template } => Route {
            pattern: UrlPattern::prefix(&url).map_err(|e| invalid(&url, e))?,
            handler: RouteHandler::StaticFiles(template),
        },
    };

    tracing::debug!(
        index,
        url = route.pattern.url(),
        kind = route.handler.kind(),
        "compiled route",
    );

    Ok(route)
}

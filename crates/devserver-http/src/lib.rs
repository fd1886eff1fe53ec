//! HTTP layer for devserver.
//!
//! Wraps an application so that requests are routed the way the App Engine
//! standard environment routes them, using the `handlers` declared in
//! `app.yaml`:
//!
//! ```text
//! request ─> Gate ─┬─ hosted ─────────────────────────────> app
//!                  └─ local ─> Dispatcher ─> first matching route
//!                                              ├─ script       ─> app
//!                                              ├─ static_dir   ─> files::serve_dir
//!                                              ├─ static_files ─> files::serve_file
//!                                              └─ (none)       ─> 404 Not Found
//! ```
//!
//! Requests are matched in handler order and the first match wins. A static
//! route that matches but finds no file answers 404 and does not fall through.

pub mod app;
pub mod body;
pub mod dispatch;
pub mod error;
pub mod files;
pub mod gate;
pub mod pattern;
pub mod response;
pub mod route;
pub mod server;

pub use app::{AppFuture, AppHandler, FnApp, NotFoundApp};
pub use body::ResponseBody;
pub use dispatch::Dispatcher;
pub use error::{ServeError, ServeResult};
pub use gate::{Gate, wrap};
pub use pattern::UrlPattern;
pub use route::{Route, RouteHandler, RouteTable, build_routes};
pub use server::serve;

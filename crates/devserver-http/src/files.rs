//! Static file serving.
//!
//! Both entry points resolve a filesystem path and hand it to [`serve_path`],
//! which owns the existence check, header computation, and streaming:
//!
//! ```text
//! static_dir:   base_dir + remainder.trim_start('/')  ─┐
//!                                                      ├─> serve_path ─> 200 | 404 | ServeError
//! static_files: template with \N from url captures   ─┘
//! ```
//!
//! Paths never leave the configured location through `..`: any remainder or
//! captured group containing a parent-directory segment is answered with 404.
//! The same goes for a NUL byte, which no filesystem path may contain.

use std::path::{Component, Path, PathBuf};

use regex::Captures;
use tokio::fs::File;
use tracing::{debug, warn};

use crate::body::ResponseBody;
use crate::error::{ServeError, ServeResult, is_not_found};
use crate::pattern::expand_template;
use crate::response::{CACHE_CONTROL, http_date, http_date_from_system, not_found};

/// Serve `remainder` from below `base_dir`.
///
/// Leading slashes are trimmed from `remainder` first, so `""` and `"/"` both
/// resolve to `base_dir` itself, which, being a directory, is a 404.
pub async fn serve_dir(
    base_dir: &Path,
    remainder: &str,
) -> ServeResult<http::Response<ResponseBody>> {
    let relative = remainder.trim_start_matches('/');
    if is_unsafe_fragment(relative) {
        warn!(
            base_dir = %base_dir.display(),
            remainder,
            "rejected remainder with parent-directory segment or NUL byte",
        );
        return Ok(not_found());
    }

    serve_path(&base_dir.join(relative)).await
}

/// Serve the file named by substituting `captures` into `template`.
pub async fn serve_file(
    template: &str,
    captures: &Captures<'_>,
) -> ServeResult<http::Response<ResponseBody>> {
    let traversal = captures
        .iter()
        .skip(1)
        .flatten()
        .any(|m| is_unsafe_fragment(m.as_str()));
    if traversal {
        warn!(
            template,
            path = &captures[0],
            "rejected capture with parent-directory segment or NUL byte",
        );
        return Ok(not_found());
    }

    let path = PathBuf::from(expand_template(template, captures));
    serve_path(&path).await
}

/// Serve the regular file at `path` with status 200, or 404 if it is absent.
///
/// The response carries `Date`, `Content-Type`, `Content-Length`,
/// `Last-Modified` and `Cache-Control: public`. The body streams from the
/// opened handle.
pub async fn serve_path(path: &Path) -> ServeResult<http::Response<ResponseBody>> {
    let io_error = |source| ServeError::Io {
        path: path.to_owned(),
        source,
    };

    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if is_not_found(&e) => {
            debug!(path = %path.display(), "static file not found");
            return Ok(not_found());
        }
        Err(e) => return Err(io_error(e)),
    };

    if !metadata.is_file() {
        debug!(path = %path.display(), "static path is not a regular file");
        return Ok(not_found());
    }

    let file = match File::open(path).await {
        Ok(file) => file,
        Err(e) if is_not_found(&e) => return Ok(not_found()),
        Err(e) => return Err(io_error(e)),
    };
    let modified = metadata.modified().map_err(io_error)?;
    let len = metadata.len();

    debug!(path = %path.display(), size = len, "serving static file");

    let response = http::Response::builder()
        .status(http::StatusCode::OK)
        .header(http::header::DATE, http_date(chrono::Utc::now()))
        .header(http::header::CONTENT_TYPE, guess_content_type(path))
        .header(http::header::CONTENT_LENGTH, len)
        .header(http::header::LAST_MODIFIED, http_date_from_system(modified))
        .header(http::header::CACHE_CONTROL, CACHE_CONTROL)
        .body(ResponseBody::from_file(file, len))
        .expect("static file response should be valid");

    Ok(response)
}

/// Guess the content type from the file extension, falling back to `text/plain`.
#[must_use]
pub fn guess_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .unwrap_or(mime::TEXT_PLAIN)
        .to_string()
}

fn is_unsafe_fragment(path: &str) -> bool {
    path.contains('\0') || has_parent_segment(path)
}

fn has_parent_segment(path: &str) -> bool {
    Path::new(path)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
}

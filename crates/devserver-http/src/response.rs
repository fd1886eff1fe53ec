//! Fixed responses and header formatting.

use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::body::ResponseBody;

/// Body of every 404 response produced by this crate.
pub const NOT_FOUND_BODY: &str = "Not Found";

/// Body of the 500 response sent when serving a file fails.
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// `Cache-Control` value for static files.
pub const CACHE_CONTROL: &str = "public";

const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// Format a timestamp as an HTTP-date (RFC 7231 IMF-fixdate).
#[must_use]
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Format a filesystem timestamp as an HTTP-date.
#[must_use]
pub fn http_date_from_system(time: SystemTime) -> String {
    http_date(DateTime::<Utc>::from(time))
}

/// The fixed 404 response.
#[must_use]
pub fn not_found() -> http::Response<ResponseBody> {
    text_response(http::StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

/// The fixed 500 response; details are logged, never sent.
#[must_use]
pub fn internal_error() -> http::Response<ResponseBody> {
    text_response(http::StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY)
}

fn text_response(status: http::StatusCode, body: &'static str) -> http::Response<ResponseBody> {
    http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, TEXT_PLAIN_UTF8)
        .header(http::header::CONTENT_LENGTH, body.len())
        .body(ResponseBody::from_string(body))
        .expect("static text response should be valid")
}

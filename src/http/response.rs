//! HTTP response building module.
//!
//! Provides builders for each response shape the server produces. Header
//! assembly failures fall back to a bare response instead of panicking.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build a 200 response carrying file content.
///
/// HEAD requests get the same headers with an empty body.
pub fn build_file_response(
    content: Vec<u8>,
    content_type: &'static str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the generic 404 Not Found response
pub fn build_404_response(is_head: bool) -> Response<Full<Bytes>> {
    const MESSAGE: &str = "404 Not Found";
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(MESSAGE)
    };

    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .header("Content-Length", MESSAGE.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from(MESSAGE)))
        })
}

/// Build a 404 response carrying the custom error page verbatim.
pub fn build_custom_404_response(content: Vec<u8>, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(404)
        .header("Content-Type", "text/html")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the 301 redirect to the subsite mount. No body is served.
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(301)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    const MESSAGE: &str = "405 Method Not Allowed";

    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Content-Length", MESSAGE.len())
        .header("Allow", "GET, HEAD")
        .body(Full::new(Bytes::from(MESSAGE)))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from(MESSAGE)))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

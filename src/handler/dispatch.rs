//! Request dispatch module.
//!
//! Entry point for request processing: method gate, subsite redirect gate,
//! then static serving with the custom 404 page applied as an explicit
//! post-processing branch.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use tokio::fs;

use crate::config::ServerConfig;
use crate::handler::static_files;
use crate::http;
use crate::logger;

/// Request context encapsulating what the dispatcher needs.
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling.
///
/// The error type is `Infallible`: every outcome, including filesystem
/// failures, maps to a response, so one request can never tear down its
/// connection loop.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    config: Arc<ServerConfig>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let ctx = RequestContext {
        method: req.method(),
        path: req.uri().path(),
        is_head: *req.method() == Method::HEAD,
    };

    let response = respond(&ctx, &config).await;

    logger::log_access(
        &peer_addr,
        ctx.method.as_str(),
        ctx.path,
        req.version(),
        response.status().as_u16(),
        response.body().size_hint().exact().unwrap_or(0),
    );

    Ok(response)
}

/// Dispatch a request to a response.
///
/// Split from the hyper wrapper so the decision logic is directly
/// testable without a live connection.
pub async fn respond(ctx: &RequestContext<'_>, config: &ServerConfig) -> Response<Full<Bytes>> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(ctx.method) {
        return resp;
    }

    // 2. Redirect gate: bare root on a subsite mount, before any file lookup
    if let Some(subsite) = config.subsite.as_deref() {
        if ctx.path == "/" && ctx.method == Method::GET {
            return http::build_redirect_response(subsite);
        }
    }

    // 3. Serve, then substitute the custom page on a 404 outcome
    let response = static_files::serve(ctx.path, config, ctx.is_head).await;
    if response.status() == StatusCode::NOT_FOUND {
        if let Some(custom) = custom_not_found(config, ctx.is_head).await {
            return custom;
        }
    }
    response
}

/// Check HTTP method and return an early response for anything but GET/HEAD
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Serve `<root>/404.html` verbatim when present.
///
/// The page is read fresh on every 404 so it can be created or edited
/// while the server runs. The lookup always targets the configured root,
/// never the subsite-stripped path. Read failures degrade to the generic
/// response.
async fn custom_not_found(config: &ServerConfig, is_head: bool) -> Option<Response<Full<Bytes>>> {
    let page = config.root_dir.join("404.html");
    match fs::read(&page).await {
        Ok(content) => Some(http::build_custom_404_response(content, is_head)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            logger::log_warning(&format!("Failed to read '{}': {e}", page.display()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::fs as std_fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

    /// Throwaway root directory for a single test.
    struct TestRoot {
        dir: PathBuf,
    }

    impl TestRoot {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!(
                "devserve-dispatch-{}-{}",
                std::process::id(),
                DIR_SEQ.fetch_add(1, Ordering::SeqCst)
            ));
            std_fs::create_dir_all(&dir).expect("create test root");
            Self { dir }
        }

        fn write(&self, name: &str, content: &str) {
            std_fs::write(self.dir.join(name), content).expect("write test file");
        }

        fn config(&self, subsite: Option<&str>) -> ServerConfig {
            ServerConfig {
                root_dir: self.dir.clone(),
                subsite: subsite.map(String::from),
                port: 8000,
            }
        }
    }

    impl Drop for TestRoot {
        fn drop(&mut self) {
            let _ = std_fs::remove_dir_all(&self.dir);
        }
    }

    fn get(path: &str) -> RequestContext<'_> {
        RequestContext {
            method: &Method::GET,
            path,
            is_head: false,
        }
    }

    async fn body_of(response: Response<Full<Bytes>>) -> Bytes {
        response
            .into_body()
            .collect()
            .await
            .expect("infallible body")
            .to_bytes()
    }

    #[tokio::test]
    async fn test_serves_existing_file() {
        let root = TestRoot::new();
        root.write("index.html", "<h1>hello</h1>");
        let config = root.config(None);

        let response = respond(&get("/index.html"), &config).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["Content-Type"],
            "text/html; charset=utf-8"
        );
        assert_eq!(body_of(response).await, "<h1>hello</h1>");
    }

    #[tokio::test]
    async fn test_root_serves_directory_index() {
        let root = TestRoot::new();
        root.write("index.html", "<h1>home</h1>");
        let config = root.config(None);

        let response = respond(&get("/"), &config).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_of(response).await, "<h1>home</h1>");
    }

    #[tokio::test]
    async fn test_custom_404_page_served_verbatim() {
        let root = TestRoot::new();
        root.write("404.html", "<h1>missing</h1>");
        let config = root.config(None);

        let response = respond(&get("/nope.txt"), &config).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["Content-Type"], "text/html");
        assert_eq!(body_of(response).await, "<h1>missing</h1>");
    }

    #[tokio::test]
    async fn test_generic_404_without_custom_page() {
        let root = TestRoot::new();
        let config = root.config(None);

        let response = respond(&get("/nope.txt"), &config).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_of(response).await;
        assert!(!body.is_empty());
    }

    #[tokio::test]
    async fn test_subsite_root_redirects() {
        let root = TestRoot::new();
        let config = root.config(Some("/docs"));

        let response = respond(&get("/"), &config).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()["Location"], "/docs");
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_redirect_gate_runs_before_file_lookup() {
        let root = TestRoot::new();
        // An index exists at the root, but the mount redirect must win
        root.write("index.html", "<h1>home</h1>");
        let config = root.config(Some("/docs"));

        let response = respond(&get("/"), &config).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    }

    #[tokio::test]
    async fn test_subsite_prefix_stripped_before_lookup() {
        let root = TestRoot::new();
        root.write("guide.html", "<p>guide</p>");
        let config = root.config(Some("/docs"));

        let response = respond(&get("/docs/guide.html"), &config).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_of(response).await, "<p>guide</p>");
    }

    #[tokio::test]
    async fn test_without_subsite_root_is_not_redirected() {
        let root = TestRoot::new();
        let config = root.config(None);

        let response = respond(&get("/"), &config).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_traversal_yields_not_found() {
        let root = TestRoot::new();
        let config = root.config(None);

        let response = respond(&get("/../../etc/passwd"), &config).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_is_rejected() {
        let root = TestRoot::new();
        root.write("index.html", "<h1>home</h1>");
        let config = root.config(None);

        let ctx = RequestContext {
            method: &Method::POST,
            path: "/index.html",
            is_head: false,
        };
        let response = respond(&ctx, &config).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_head_gets_headers_without_body() {
        let root = TestRoot::new();
        root.write("index.html", "<h1>hello</h1>");
        let config = root.config(None);

        let ctx = RequestContext {
            method: &Method::HEAD,
            path: "/index.html",
            is_head: true,
        };
        let response = respond(&ctx, &config).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Length"], "14");
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_custom_404_lookup_ignores_subsite() {
        let root = TestRoot::new();
        root.write("404.html", "<h1>missing</h1>");
        let config = root.config(Some("/docs"));

        // Request outside the mount still gets the root's custom page
        let response = respond(&get("/docs/nope.txt"), &config).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await, "<h1>missing</h1>");
    }
}

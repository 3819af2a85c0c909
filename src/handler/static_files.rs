//! Static file serving module.
//!
//! Loads the resolved target from disk with index file support and a
//! filesystem-level containment check, then builds the success response.

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::ServerConfig;
use crate::handler::resolve;
use crate::http::{self, mime};
use crate::logger;

/// Index files tried when the target is a directory.
const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Serve the file the request path resolves to.
///
/// Any outcome that is not a readable file inside the root collapses to
/// the generic 404 response; the dispatcher may substitute a custom page
/// afterwards.
pub async fn serve(path: &str, config: &ServerConfig, is_head: bool) -> Response<Full<Bytes>> {
    match load(path, config).await {
        Some((content, content_type)) => http::build_file_response(content, content_type, is_head),
        None => http::build_404_response(is_head),
    }
}

/// Load the target's bytes and content type, or `None` for any not-found
/// outcome (missing file, directory without index, traversal escape,
/// unreadable file).
async fn load(path: &str, config: &ServerConfig) -> Option<(Vec<u8>, &'static str)> {
    let mut target = resolve::resolve(path, config)?;

    if target.is_dir() {
        target = find_index(&target)?;
    }

    // Security: the canonicalized target must stay inside the root
    let target = contained_target(&target, &config.root_dir)?;

    match fs::read(&target).await {
        Ok(content) => {
            let content_type =
                mime::content_type_for(target.extension().and_then(|e| e.to_str()));
            Some((content, content_type))
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read '{}': {e}", target.display()));
            None
        }
    }
}

/// First existing index file inside a directory target.
fn find_index(dir: &Path) -> Option<PathBuf> {
    INDEX_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Canonicalize the target and verify it did not leave the root.
fn contained_target(target: &Path, root: &Path) -> Option<PathBuf> {
    let root = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Root directory not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    // A missing target is the common 404 case, not worth a log line
    let target = target.canonicalize().ok()?;
    if !target.starts_with(&root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {}",
            target.display()
        ));
        return None;
    }
    Some(target)
}

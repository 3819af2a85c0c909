//! Request path resolution.
//!
//! Maps an incoming URL path to a filesystem path under the configured
//! root: subsite prefix stripping, percent-decoding, and defensive `.`/`..`
//! handling so a request can never walk above the root.

use std::path::PathBuf;

use crate::config::ServerConfig;

/// Resolve a request path to a filesystem path under the configured root.
///
/// Returns `None` when the path walks above the root; callers treat that
/// the same as a file that does not exist. Resolution itself never fails,
/// and the same path with the same configuration always yields the same
/// result.
pub fn resolve(request_path: &str, config: &ServerConfig) -> Option<PathBuf> {
    let path = strip_subsite(request_path, config.subsite.as_deref());
    let path = strip_query_and_fragment(path);
    let decoded = percent_decode(path);

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                // Popping past the root is an escape attempt.
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    let mut target = config.root_dir.clone();
    for segment in segments {
        target.push(segment);
    }
    Some(target)
}

/// Strip the subsite prefix when configured and present.
///
/// Left-anchored, case-sensitive byte match; non-matching paths pass
/// through unchanged.
fn strip_subsite<'a>(path: &'a str, subsite: Option<&str>) -> &'a str {
    match subsite {
        Some(prefix) => path.strip_prefix(prefix).unwrap_or(path),
        None => path,
    }
}

fn strip_query_and_fragment(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Decode `%xx` escapes. Malformed escapes are kept literally rather than
/// rejected, matching conventional static-server behavior.
fn percent_decode(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.bytes();

    while let Some(b) = bytes.next() {
        if b == b'%' {
            let hi = bytes.next();
            let lo = bytes.next();
            match (hi.and_then(hex_value), lo.and_then(hex_value)) {
                (Some(h), Some(l)) => out.push((h << 4) | l),
                _ => {
                    out.push(b'%');
                    out.extend(hi);
                    out.extend(lo);
                }
            }
        } else {
            out.push(b);
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

//! Static file serving module
//!
//! Maps request paths onto the serve root and builds the file, listing,
//! redirect, and conditional responses.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{cache, mime, response};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Where a request path leads inside the serve root
#[derive(Debug, PartialEq, Eq)]
pub enum Resolved {
    /// A regular file to read and send
    File(PathBuf),
    /// A directory reached without a trailing slash; redirect target
    Redirect(String),
    /// A directory with no index file; render a listing
    Listing(PathBuf),
    NotFound,
}

/// Map a decoded URL path onto the serve root.
///
/// The root must already be canonicalized; the resolved path is
/// canonicalized too, so traversal sequences cannot escape the root.
pub fn resolve(
    root: &Path,
    url_path: &str,
    raw_path: &str,
    index_files: &[String],
    directory_listing: bool,
) -> Resolved {
    let relative = url_path.trim_start_matches('/');
    let candidate = root.join(relative);

    // Missing files are the common 404 case, not worth a log line
    let Ok(canonical) = candidate.canonicalize() else {
        return Resolved::NotFound;
    };

    if !canonical.starts_with(root) {
        logger::log_warning(&format!("Path traversal attempt blocked: {url_path}"));
        return Resolved::NotFound;
    }

    if canonical.is_file() {
        return Resolved::File(canonical);
    }

    // Directory: redirect to the slashed form, then index files, then listing
    if !raw_path.ends_with('/') {
        return Resolved::Redirect(format!("{raw_path}/"));
    }

    for index in index_files {
        let index_path = canonical.join(index);
        if index_path.is_file() {
            return Resolved::File(index_path);
        }
    }

    if directory_listing {
        return Resolved::Listing(canonical);
    }

    Resolved::NotFound
}

/// Serve a request against the configured root
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match resolve(
        &state.serve_root,
        ctx.path,
        ctx.raw_path,
        &state.config.serve.index_files,
        state.config.serve.directory_listing,
    ) {
        Resolved::File(path) => serve_file(ctx, &path).await,
        Resolved::Redirect(target) => response::build_redirect_response(&target),
        Resolved::Listing(dir) => serve_listing(ctx, &dir).await,
        Resolved::NotFound => response::build_404_response(),
    }
}

async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return response::build_404_response();
        }
    };

    let etag = cache::generate_etag(&content);
    if cache::etag_matches(ctx.if_none_match.as_deref(), &etag) {
        return response::build_304_response(&etag);
    }

    let content_type = mime::content_type_for(path.extension().and_then(|e| e.to_str()));
    response::build_file_response(content, content_type, &etag, ctx.is_head)
}

async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    match render_listing(dir, ctx.path).await {
        Ok(html) => response::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            response::build_404_response()
        }
    }
}

/// Render an HTML directory listing, name-sorted, directories slash-suffixed
pub async fn render_listing(dir: &Path, url_path: &str) -> io::Result<String> {
    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    let title = format!("Directory listing for {url_path}");
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n<hr>\n<ul>\n", escape_html(&title)));
    for name in &names {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            encode_href(name),
            escape_html(name)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

/// Percent-encode a single path segment, preserving a trailing slash
fn encode_href(name: &str) -> String {
    match name.strip_suffix('/') {
        Some(stem) => format!("{}/", urlencoding::encode(stem)),
        None => urlencoding::encode(name).into_owned(),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn index_files() -> Vec<String> {
        vec!["index.html".to_string(), "index.htm".to_string()]
    }

    fn write_file(path: &Path, content: &str) {
        let mut file = File::create(path).expect("create file");
        file.write_all(content.as_bytes()).expect("write file");
    }

    #[test]
    fn test_resolve_plain_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().canonicalize().expect("canonical");
        write_file(&root.join("app.html"), "<html>app</html>");

        let resolved = resolve(&root, "/app.html", "/app.html", &index_files(), true);
        assert_eq!(resolved, Resolved::File(root.join("app.html")));
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().canonicalize().expect("canonical");

        let resolved = resolve(&root, "/missing.html", "/missing.html", &index_files(), true);
        assert_eq!(resolved, Resolved::NotFound);
    }

    #[test]
    fn test_resolve_blocks_traversal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root_dir = dir.path().join("public");
        std::fs::create_dir(&root_dir).expect("mkdir");
        let root = root_dir.canonicalize().expect("canonical");
        // A real file one level above the root
        write_file(&dir.path().join("secret.txt"), "secret");

        let resolved = resolve(
            &root,
            "/../secret.txt",
            "/../secret.txt",
            &index_files(),
            true,
        );
        assert_eq!(resolved, Resolved::NotFound);
    }

    #[test]
    fn test_resolve_directory_redirect() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().canonicalize().expect("canonical");
        std::fs::create_dir(root.join("docs")).expect("mkdir");

        let resolved = resolve(&root, "/docs", "/docs", &index_files(), true);
        assert_eq!(resolved, Resolved::Redirect("/docs/".to_string()));
    }

    #[test]
    fn test_resolve_directory_index() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().canonicalize().expect("canonical");
        std::fs::create_dir(root.join("docs")).expect("mkdir");
        write_file(&root.join("docs/index.html"), "<html>docs</html>");

        let resolved = resolve(&root, "/docs/", "/docs/", &index_files(), true);
        assert_eq!(resolved, Resolved::File(root.join("docs/index.html")));
    }

    #[test]
    fn test_resolve_directory_listing_toggle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().canonicalize().expect("canonical");

        let listed = resolve(&root, "/", "/", &index_files(), true);
        assert_eq!(listed, Resolved::Listing(root.clone()));

        let denied = resolve(&root, "/", "/", &index_files(), false);
        assert_eq!(denied, Resolved::NotFound);
    }

    #[tokio::test]
    async fn test_render_listing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().canonicalize().expect("canonical");
        write_file(&root.join("app.html"), "app");
        write_file(&root.join("a & b.txt"), "data");
        std::fs::create_dir(root.join("assets")).expect("mkdir");

        let html = render_listing(&root, "/").await.expect("listing");
        assert!(html.contains("Directory listing for /"));
        assert!(html.contains("<a href=\"app.html\">app.html</a>"));
        // Directory entries carry a trailing slash
        assert!(html.contains("<a href=\"assets/\">assets/</a>"));
        // Names are escaped in text and encoded in hrefs
        assert!(html.contains("a &amp; b.txt"));
        assert!(html.contains("href=\"a%20%26%20b.txt\""));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}

//! HTML index for directories without an `index.html`.

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use std::{
    io,
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tracing::debug;

const HREF: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Replaces the file service's 404 for an existing directory with a listing
/// of its entries.
pub async fn directory_listing(
    State(root): State<Arc<PathBuf>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;

    if response.status() != StatusCode::NOT_FOUND
        || !(method == Method::GET || method == Method::HEAD)
        || !path.ends_with('/')
    {
        return response;
    }

    let Some(dir) = resolve(&root, &path) else {
        return response;
    };

    match tokio::fs::metadata(&dir).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return response,
    }

    match render(&dir).await {
        Ok(html) => ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response(),
        Err(err) => {
            debug!(%err, dir = %dir.display(), "unable to list directory");
            response
        }
    }
}

/// Maps a URL path onto `root`. Anything that could escape it yields `None`.
fn resolve(root: &Path, url_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(url_path).decode_utf8().ok()?;
    let mut dir = root.to_path_buf();

    for segment in decoded.split('/').filter(|s| !s.is_empty()) {
        if segment.contains('\\') {
            return None;
        }
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => dir.push(part),
            _ => return None,
        }
    }
    Some(dir)
}

async fn render(dir: &Path) -> io::Result<String> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    let mut html = String::from(
        "<!doctype html>\n<meta name=\"viewport\" content=\"width=device-width\">\n<pre>\n",
    );
    for name in &names {
        // "a:b" would otherwise read as a URL scheme
        let prefix = if name.contains(':') { "./" } else { "" };
        html.push_str(&format!(
            "<a href=\"{}{}\">{}</a>\n",
            prefix,
            utf8_percent_encode(name, HREF),
            escape_html(name)
        ));
    }
    html.push_str("</pre>\n");
    Ok(html)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_inside_root() {
        let root = Path::new("/srv/site");
        assert_eq!(resolve(root, "/"), Some(PathBuf::from("/srv/site")));
        assert_eq!(
            resolve(root, "/a%20b/c/"),
            Some(PathBuf::from("/srv/site/a b/c"))
        );
    }

    #[test]
    fn refuses_to_leave_root() {
        let root = Path::new("/srv/site");
        assert_eq!(resolve(root, "/../"), None);
        assert_eq!(resolve(root, "/sub/%2e%2e/%2e%2e/"), None);
        assert_eq!(resolve(root, "/a%5cb/"), None);
    }

    #[tokio::test]
    async fn renders_sorted_escaped_links() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b <x>.txt"), "").unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let html = render(dir.path()).await.unwrap();

        let a = html.find("a.txt").unwrap();
        let b = html.find("b%20%3Cx%3E.txt").unwrap();
        let sub = html.find("<a href=\"sub/\">sub/</a>").unwrap();
        assert!(a < b && b < sub, "{html}");
        assert!(html.contains(">b &lt;x&gt;.txt</a>"), "{html}");
    }
}

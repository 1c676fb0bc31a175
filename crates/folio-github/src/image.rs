//! README thumbnail discovery.

use std::sync::LazyLock;

use regex::Regex;

/// `<img class="blog" src="...">` marks the image meant for listings.
static BLOG_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class\s*=\s*"blog"\s*src\s*=\s*"(.+?)""#).unwrap());

/// Markdown image: `![alt](url)`.
static MARKDOWN_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[.*?\]\((.*?)\)").unwrap());

/// Any `src="..."` attribute.
static SRC_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"src\s*=\s*"(.+?)""#).unwrap());

/// Pick the thumbnail URL for a repository from its README.
///
/// Patterns are tried in order: an image tagged `class="blog"`, the first
/// markdown image, then the first `src="..."` attribute. Absolute `http(s)`
/// URLs are returned unchanged. Anything else is treated as a path inside the
/// repository and resolved against `raw.githubusercontent.com` on `branch`.
///
/// ```
/// use folio_github::readme_image_url;
///
/// let readme = "# Demo\n\n![screenshot](/docs/shot.png)";
/// assert_eq!(
///     readme_image_url(readme, "octocat", "demo", "main").as_deref(),
///     Some("https://raw.githubusercontent.com/octocat/demo/main/docs/shot.png")
/// );
/// ```
#[must_use]
pub fn readme_image_url(content: &str, owner: &str, repo: &str, branch: &str) -> Option<String> {
    let raw = [&*BLOG_IMAGE, &*MARKDOWN_IMAGE, &*SRC_ATTR]
        .into_iter()
        .find_map(|pattern| pattern.captures(content))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())?;

    // Drop an optional markdown title: ![alt](url "title")
    let url = raw.split_whitespace().next()?;

    if url.starts_with("http://") || url.starts_with("https://") {
        return Some(url.to_owned());
    }

    let path = url.trim_start_matches('/');
    Some(format!(
        "https://raw.githubusercontent.com/{owner}/{repo}/{branch}/{path}"
    ))
}

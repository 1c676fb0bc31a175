//! HTML page templates for the blog and portfolio.
//!
//! Every page shares the same head (charset, viewport, title, stylesheet,
//! favicons) and a site header linking back to `index.html`.

use std::fmt::Write;

use folio_renderer::{DEFAULT_CONTAINER_CLOSE, DEFAULT_CONTAINER_OPEN, escape_html};

/// Site-wide values every page needs.
pub(crate) struct Layout<'a> {
    pub site_title: &'a str,
    pub stylesheet: &'a str,
}

/// A rendered blog post.
pub(crate) struct PostPage<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Post container produced by [`post_content`].
    pub content: &'a str,
}

/// An entry on the blog index.
pub(crate) struct IndexEntry<'a> {
    pub title: &'a str,
    pub href: &'a str,
    pub description: &'a str,
}

/// A repository card on the portfolio page.
pub(crate) struct PortfolioCard<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub stars: u64,
    pub html_url: &'a str,
    pub thumbnail: &'a str,
}

/// Wrap rendered markdown in the post container.
///
/// The close marker sits just inside the wrapping `</div>`, so description
/// extraction never looks past the post body.
pub(crate) fn post_content(body: &str) -> String {
    format!("{DEFAULT_CONTAINER_OPEN}\n{body}\n{DEFAULT_CONTAINER_CLOSE}\n</div>")
}

/// Render a complete post page.
pub(crate) fn render_post(layout: &Layout<'_>, page: &PostPage<'_>) -> String {
    let mut html = String::with_capacity(page.content.len() + 2048);
    let title = format!("{} | {}", page.title, layout.site_title);
    render_head(&mut html, layout, &title, Some(page.description));
    render_header(&mut html, layout);
    html.push_str("<main class=\"post\">\n");
    html.push_str(page.content);
    html.push_str("\n</main>\n");
    html.push_str("</body>\n</html>\n");
    html
}

/// Render the blog index listing.
pub(crate) fn render_index(layout: &Layout<'_>, entries: &[IndexEntry<'_>]) -> String {
    let mut html = String::with_capacity(2048 + entries.len() * 512);
    render_head(&mut html, layout, layout.site_title, None);
    render_header(&mut html, layout);
    html.push_str("<main class=\"post-list\">\n");
    for entry in entries {
        html.push_str("<article class=\"post-summary\">\n");
        let _ = writeln!(
            html,
            "<h2><a href=\"{}\">{}</a></h2>",
            escape_html(entry.href),
            escape_html(entry.title)
        );
        if !entry.description.is_empty() {
            let _ = writeln!(
                html,
                "<p class=\"post-description\">{}</p>",
                escape_html(entry.description)
            );
        }
        html.push_str("</article>\n");
    }
    html.push_str("</main>\n");
    html.push_str("</body>\n</html>\n");
    html
}

/// Render the portfolio grid.
pub(crate) fn render_portfolio(layout: &Layout<'_>, cards: &[PortfolioCard<'_>]) -> String {
    let mut html = String::with_capacity(2048 + cards.len() * 512);
    let title = format!("{} | Portfolio", layout.site_title);
    render_head(&mut html, layout, &title, None);
    render_header(&mut html, layout);
    html.push_str("<div class=\"portfolio-grid\">\n");
    for card in cards {
        html.push_str("<div class=\"portfolio-item\">\n");
        let _ = writeln!(
            html,
            "<a href=\"{}\" target=\"_blank\">",
            escape_html(card.html_url)
        );
        let _ = writeln!(
            html,
            "<div class=\"portfolio-thumb\"><img src=\"{}\" alt=\"{} thumbnail\"></div>",
            escape_html(card.thumbnail),
            escape_html(card.name)
        );
        let _ = writeln!(
            html,
            "<div class=\"portfolio-title\">{}</div>",
            escape_html(card.name)
        );
        let _ = writeln!(
            html,
            "<div class=\"portfolio-desc\">{}</div>",
            escape_html(card.description)
        );
        let _ = writeln!(html, "<div class=\"portfolio-stars\">★ {}</div>", card.stars);
        html.push_str("</a>\n</div>\n");
    }
    html.push_str("</div>\n");
    html.push_str("</body>\n</html>\n");
    html
}

fn render_head(html: &mut String, layout: &Layout<'_>, title: &str, description: Option<&str>) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape_html(description)
        );
    }
    let _ = writeln!(
        html,
        "<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\">",
        escape_html(layout.stylesheet)
    );
    html.push_str("<link rel=\"apple-touch-icon\" sizes=\"180x180\" href=\"/apple-touch-icon.png\">\n");
    html.push_str("<link rel=\"icon\" type=\"image/png\" sizes=\"32x32\" href=\"/favicon-32x32.png\">\n");
    html.push_str("<link rel=\"icon\" type=\"image/png\" sizes=\"16x16\" href=\"/favicon-16x16.png\">\n");
    html.push_str("<link rel=\"manifest\" href=\"/site.webmanifest\">\n");
    html.push_str("</head>\n<body>\n");
}

fn render_header(html: &mut String, layout: &Layout<'_>) {
    let _ = writeln!(
        html,
        "<a href=\"index.html\" class=\"h1link\"><h1>{}</h1></a>",
        escape_html(layout.site_title)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: Layout<'static> = Layout {
        site_title: "Notes",
        stylesheet: "../styles.css",
    };

    #[test]
    fn post_content_wraps_body_in_container() {
        let content = post_content("<p>Hi</p>");
        assert!(content.starts_with(r#"<div class="post-content">"#));
        assert!(content.ends_with("<!-- /post-content -->\n</div>"));
        assert!(content.contains("<p>Hi</p>"));
    }

    #[test]
    fn render_post_contains_content_and_meta() {
        let content = post_content("<p>Body</p>");
        let html = render_post(
            &LAYOUT,
            &PostPage {
                title: "First Post",
                description: "A \"quoted\" summary",
                content: &content,
            },
        );
        assert!(html.contains("<title>First Post | Notes</title>"));
        assert!(html.contains(r#"<meta name="description" content="A &quot;quoted&quot; summary">"#));
        assert!(html.contains(r#"href="../styles.css""#));
        assert!(html.contains("<p>Body</p>"));
    }

    #[test]
    fn render_post_without_description_has_no_meta() {
        let html = render_post(
            &LAYOUT,
            &PostPage {
                title: "Empty",
                description: "",
                content: "",
            },
        );
        assert!(!html.contains("name=\"description\""));
    }

    #[test]
    fn render_index_lists_entries() {
        let html = render_index(
            &LAYOUT,
            &[
                IndexEntry {
                    title: "Rust & You",
                    href: "rust.html",
                    description: "Why <b> matters",
                },
                IndexEntry {
                    title: "Bare",
                    href: "bare.html",
                    description: "",
                },
            ],
        );
        assert!(html.contains(r#"<h2><a href="rust.html">Rust &amp; You</a></h2>"#));
        assert!(html.contains("Why &lt;b&gt; matters"));
        assert_eq!(html.matches("post-description").count(), 1);
    }

    #[test]
    fn render_portfolio_cards() {
        let html = render_portfolio(
            &LAYOUT,
            &[PortfolioCard {
                name: "folio",
                description: "Static site toolkit",
                stars: 42,
                html_url: "https://github.com/octocat/folio",
                thumbnail: "placeholder.jpg",
            }],
        );
        assert!(html.contains(r#"<div class="portfolio-grid">"#));
        assert!(html.contains(r#"<a href="https://github.com/octocat/folio" target="_blank">"#));
        assert!(html.contains(r#"<img src="placeholder.jpg" alt="folio thumbnail">"#));
        assert!(html.contains("★ 42"));
        assert!(html.contains("<title>Notes | Portfolio</title>"));
    }
}

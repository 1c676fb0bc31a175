//! Blog generation.
//!
//! Every `*.md` file in the source directory becomes `<stem>.html` in the
//! output directory, and `index.html` lists all posts in file name order.

use std::fs;
use std::path::{Path, PathBuf};

use folio_config::{BlogConfig, Config, SiteConfig};
use folio_renderer::DescriptionExtractor;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::BuildError;
use crate::page::PageRenderer;
use crate::template::{self, IndexEntry, Layout, PostPage};

/// Index page file name; a post with the same stem would be overwritten.
const INDEX_FILE: &str = "index.html";

/// A generated post as listed on the index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostSummary {
    /// Post title (first H1, else the file stem).
    pub title: String,
    /// Page file name relative to the output directory.
    pub href: String,
    /// Short description for the index card.
    pub description: String,
}

/// Result of a blog build.
#[derive(Debug)]
pub struct BlogSummary {
    /// Posts in index order.
    pub posts: Vec<PostSummary>,
    /// Path of the written index page.
    pub index_path: PathBuf,
}

/// Builds the blog from a directory of markdown posts.
pub struct BlogBuilder {
    source_dir: PathBuf,
    output_dir: PathBuf,
    site_title: String,
    stylesheet: String,
    summary_length: usize,
    meta_description_length: usize,
    renderer: PageRenderer,
}

impl BlogBuilder {
    /// Create a builder with default site settings and description budgets.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let site = SiteConfig::default();
        let blog = BlogConfig::default();
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            site_title: site.title,
            stylesheet: site.stylesheet,
            summary_length: blog.summary_length,
            meta_description_length: blog.meta_description_length,
            renderer: PageRenderer::new(),
        }
    }

    /// Create a builder from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let blog = &config.blog_resolved;
        Self::new(&blog.source_dir, &blog.output_dir)
            .with_site(&config.site.title, &config.site.stylesheet)
            .with_description_lengths(blog.summary_length, blog.meta_description_length)
    }

    /// Set the site title and stylesheet href.
    #[must_use]
    pub fn with_site(mut self, title: &str, stylesheet: &str) -> Self {
        title.clone_into(&mut self.site_title);
        stylesheet.clone_into(&mut self.stylesheet);
        self
    }

    /// Set the character budgets for index summaries and meta descriptions.
    #[must_use]
    pub fn with_description_lengths(mut self, summary: usize, meta: usize) -> Self {
        self.summary_length = summary;
        self.meta_description_length = meta;
        self
    }

    /// Render every post and the index page.
    ///
    /// Posts are rendered in parallel. The first failure aborts the build.
    pub fn build(&self) -> Result<BlogSummary, BuildError> {
        let sources = self.collect_sources()?;
        info!(
            "Building {} posts from {}",
            sources.len(),
            self.source_dir.display()
        );

        fs::create_dir_all(&self.output_dir).map_err(BuildError::io(&self.output_dir))?;

        let posts = sources
            .par_iter()
            .map(|path| self.build_post(path))
            .collect::<Result<Vec<_>, _>>()?;

        let index_path = self.output_dir.join(INDEX_FILE);
        let entries: Vec<IndexEntry<'_>> = posts
            .iter()
            .map(|post| IndexEntry {
                title: &post.title,
                href: &post.href,
                description: &post.description,
            })
            .collect();
        let html = template::render_index(&self.layout(), &entries);
        fs::write(&index_path, html).map_err(BuildError::io(&index_path))?;

        info!("Wrote {}", index_path.display());
        Ok(BlogSummary { posts, index_path })
    }

    /// Markdown files in the source directory, sorted by file name.
    fn collect_sources(&self) -> Result<Vec<PathBuf>, BuildError> {
        if !self.source_dir.is_dir() {
            return Err(BuildError::SourceNotFound(self.source_dir.clone()));
        }

        let entries = fs::read_dir(&self.source_dir).map_err(BuildError::io(&self.source_dir))?;
        let mut sources = Vec::new();
        for entry in entries {
            let path = entry.map_err(BuildError::io(&self.source_dir))?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            if path.file_stem().is_some_and(|stem| stem == "index") {
                warn!(
                    "Skipping {}: index.html is reserved for the post list",
                    path.display()
                );
                continue;
            }
            sources.push(path);
        }
        sources.sort();
        Ok(sources)
    }

    /// Render one post to disk and summarize it for the index.
    fn build_post(&self, path: &Path) -> Result<PostSummary, BuildError> {
        let markdown = fs::read_to_string(path).map_err(BuildError::io(path))?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let post = self.renderer.render(&markdown);
        let title = post.title.unwrap_or_else(|| stem.clone());
        let content = template::post_content(&post.html);

        let meta_description = DescriptionExtractor::new()
            .with_max_chars(self.meta_description_length)
            .extract(&content);
        let page = template::render_post(
            &self.layout(),
            &PostPage {
                title: &title,
                description: &meta_description,
                content: &content,
            },
        );

        let href = format!("{stem}.html");
        let output = self.output_dir.join(&href);
        fs::write(&output, &page).map_err(BuildError::io(&output))?;
        debug!("Rendered {} -> {}", path.display(), output.display());

        let description = DescriptionExtractor::new()
            .with_max_chars(self.summary_length)
            .extract(&page);

        Ok(PostSummary {
            title,
            href,
            description,
        })
    }

    fn layout(&self) -> Layout<'_> {
        Layout {
            site_title: &self.site_title,
            stylesheet: &self.stylesheet,
        }
    }
}

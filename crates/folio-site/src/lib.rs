//! Blog and portfolio page generation for Folio.
//!
//! - [`BlogBuilder`] renders a directory of markdown posts into HTML pages
//!   plus an `index.html` listing them with short descriptions.
//! - [`PortfolioBuilder`] renders a grid of GitHub repositories, each with a
//!   thumbnail taken from its README.
//!
//! Both write plain HTML files; styling comes from the configured stylesheet.

mod blog;
mod error;
mod page;
mod portfolio;
mod template;

pub use blog::{BlogBuilder, BlogSummary, PostSummary};
pub use error::BuildError;
pub use page::{PageRenderer, RenderedPost};
pub use portfolio::{PortfolioBuilder, PortfolioEntry};

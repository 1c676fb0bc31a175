//! GitHub repository listing for Folio.
//!
//! The portfolio page is built from public repository metadata and the first
//! image found in each README. This crate provides:
//!
//! - [`RepoSource`] trait with `list_repositories()` and `readme()` methods
//! - [`GitHubClient`] implementation against the GitHub REST API
//! - [`readme_image_url`] to pick a thumbnail out of README content
//! - [`MockRepoSource`] for testing (behind `mock` feature flag)

mod client;
mod error;
mod image;
#[cfg(feature = "mock")]
mod mock;
mod source;
mod types;

pub use client::GitHubClient;
pub use error::GitHubError;
pub use image::readme_image_url;
#[cfg(feature = "mock")]
pub use mock::MockRepoSource;
pub use source::RepoSource;
pub use types::Repository;

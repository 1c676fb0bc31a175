//! CLI command implementations.

pub(crate) mod blog;
pub(crate) mod portfolio;

pub(crate) use blog::BlogArgs;
pub(crate) use portfolio::PortfolioArgs;

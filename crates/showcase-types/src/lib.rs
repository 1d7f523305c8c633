//! Common types used throughout `showcase`.
//!
//! This crate provides the repository record served by the proxy and consumed
//! by the view layer, plus the small geometry type used for hover placement.

mod geometry;
mod repository;

pub use geometry::Rect;
pub use repository::{LanguageMap, Repository, RepositoryId};

//! Core rendering abstractions for artifact export.
//!
//! This crate provides the pieces every output backend shares:
//! - `RenderBlock`, the backend-agnostic vocabulary of headings, paragraphs,
//!   bullets, tables and outline lines
//! - `render`, which walks a strict artifact shape and emits blocks in the
//!   exported document's visible order
//! - `DocumentRenderer`, the trait output backends implement
//! - Shared utilities for column sizing

mod error;
mod render;
mod traits;
mod types;
pub mod utils;

pub use error::RenderError;
pub use render::render;
pub use traits::{DocumentRenderer, write_document};
pub use types::RenderBlock;

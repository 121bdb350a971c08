//! Flowing PDF renderer using lopdf.
//!
//! Blocks are laid out top to bottom on US Letter pages with the standard
//! Helvetica faces, so no font files are embedded.

mod helpers;
mod metrics;
mod renderer;

pub use helpers::{to_win_ansi, truncate_to_width, wrap_text};
pub use metrics::{FontFace, text_width};
pub use renderer::LopdfRenderer;

//! Word (`.docx`) renderer.
//!
//! Block content is written as WordprocessingML with `quick-xml` and packed
//! together with styles, numbering and core properties into an OOXML zip.

mod package;
mod parts;
mod renderer;
mod xml;

pub use renderer::DocxRenderer;

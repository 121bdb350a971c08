use pmforge_render_core::RenderError;
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn archive_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Archive(e.to_string())
}

/// Packs `(path, bytes)` parts into a deflated zip container.
///
/// `[Content_Types].xml` should come first so that tools which sniff the
/// first entry recognise the package.
pub(crate) fn write_package(parts: &[(&str, Vec<u8>)]) -> Result<Vec<u8>, RenderError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (path, bytes) in parts {
        zip.start_file(*path, options).map_err(archive_err)?;
        zip.write_all(bytes)?;
    }
    let cursor = zip.finish().map_err(archive_err)?;
    Ok(cursor.into_inner())
}

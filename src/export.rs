use pmforge_render_core::{DocumentRenderer, RenderError, render, write_document};
use pmforge_render_docx::DocxRenderer;
use pmforge_render_lopdf::LopdfRenderer;
use pmforge_types::{ArtifactContent, ArtifactType, ExportFormat, export_filename};

/// A rendered artifact ready to be written or served.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub fn renderer_for(format: ExportFormat) -> Box<dyn DocumentRenderer> {
    match format {
        ExportFormat::Docx => Box::new(DocxRenderer::new()),
        ExportFormat::Pdf => Box::new(LopdfRenderer::new()),
    }
}

/// Renders strict artifact content into a document of `format`.
pub fn export_artifact(
    kind: ArtifactType,
    content: &ArtifactContent,
    format: ExportFormat,
) -> Result<ExportedFile, RenderError> {
    let blocks = render(kind, content);
    let bytes = write_document(renderer_for(format), kind.title(), &blocks)?;
    let file_name = export_filename(kind, format);
    log::info!("Exported {} as {} ({} bytes)", kind, file_name, bytes.len());
    Ok(ExportedFile {
        file_name,
        content_type: format.content_type(),
        bytes,
    })
}

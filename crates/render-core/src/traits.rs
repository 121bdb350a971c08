use crate::error::RenderError;
use crate::types::RenderBlock;

/// An output backend that turns render blocks into a finished document.
///
/// Backends are driven strictly in order: `begin_document` once, then
/// `render_block` for every block, then `finish`.
pub trait DocumentRenderer {
    /// Short backend name used in log lines.
    fn name(&self) -> &'static str;

    fn begin_document(&mut self, title: &str) -> Result<(), RenderError>;

    fn render_block(&mut self, block: &RenderBlock) -> Result<(), RenderError>;

    /// Consumes the renderer and returns the serialized document.
    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError>;
}

/// Drives `renderer` over `blocks` and returns the document bytes.
///
/// Tables whose rows disagree with their header count are rejected before
/// any backend sees them.
pub fn write_document(
    mut renderer: Box<dyn DocumentRenderer>,
    title: &str,
    blocks: &[RenderBlock],
) -> Result<Vec<u8>, RenderError> {
    for block in blocks {
        check_table(block)?;
    }

    log::debug!(
        "Rendering '{}' with {} ({} blocks)",
        title,
        renderer.name(),
        blocks.len()
    );
    renderer.begin_document(title)?;
    for block in blocks {
        renderer.render_block(block)?;
    }
    let bytes = renderer.finish()?;
    log::debug!("Rendered '{}' into {} bytes", title, bytes.len());
    Ok(bytes)
}

fn check_table(block: &RenderBlock) -> Result<(), RenderError> {
    if let RenderBlock::Table { headers, rows } = block {
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != headers.len())
        {
            return Err(RenderError::RaggedTable {
                row,
                cells: cells.len(),
                headers: headers.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl DocumentRenderer for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn begin_document(&mut self, title: &str) -> Result<(), RenderError> {
            self.events.push(format!("begin {title}"));
            Ok(())
        }

        fn render_block(&mut self, block: &RenderBlock) -> Result<(), RenderError> {
            self.events.push(format!("{block:?}"));
            Ok(())
        }

        fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
            Ok(self.events.join("\n").into_bytes())
        }
    }

    #[test]
    fn test_blocks_forwarded_in_order() {
        let blocks = vec![
            RenderBlock::heading("Title", 1),
            RenderBlock::Paragraph("Body".into()),
        ];
        let bytes = write_document(Box::new(Recorder::default()), "Doc", &blocks).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "begin Doc");
        assert!(lines[1].contains("Title"));
        assert!(lines[2].contains("Body"));
    }

    #[test]
    fn test_ragged_table_rejected() {
        let blocks = vec![RenderBlock::Table {
            headers: vec!["A".into(), "B".into()],
            rows: vec![vec!["1".into(), "2".into()], vec!["3".into()]],
        }];
        let err = write_document(Box::new(Recorder::default()), "Doc", &blocks).unwrap_err();
        assert!(matches!(
            err,
            RenderError::RaggedTable { row: 1, cells: 1, headers: 2 }
        ));
    }
}

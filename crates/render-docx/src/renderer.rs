use crate::package::write_package;
use crate::parts::{self, BULLET_NUM_ID, NS_R, NS_W};
use crate::xml::XmlBuilder;
use chrono::{SecondsFormat, Utc};
use pmforge_render_core::utils::{column_weights, continues_list, distribute};
use pmforge_render_core::{DocumentRenderer, RenderBlock, RenderError};

const PAGE_WIDTH_TWIPS: u32 = 12240;
const PAGE_HEIGHT_TWIPS: u32 = 15840;
const MARGIN_TWIPS: u32 = 1440;
const CONTENT_WIDTH_TWIPS: u32 = PAGE_WIDTH_TWIPS - 2 * MARGIN_TWIPS;
const TREE_INDENT_TWIPS: usize = 720;
const HEADER_SHADING: &str = "D9E2F3";

/// A WordprocessingML renderer producing a `.docx` package in memory.
pub struct DocxRenderer {
    title: String,
    body: Option<XmlBuilder>,
    previous: Option<RenderBlock>,
}

impl Default for DocxRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct RunStyle {
    bold: bool,
}

impl DocxRenderer {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            body: None,
            previous: None,
        }
    }

    fn body(&mut self) -> Result<&mut XmlBuilder, RenderError> {
        self.body
            .as_mut()
            .ok_or_else(|| RenderError::Other("Document not started".into()))
    }

    fn heading(&mut self, text: &str, level: u8) -> Result<(), RenderError> {
        let style = if level <= 1 { "Heading1" } else { "Heading2" };
        let xml = self.body()?;
        xml.start("w:p", &[])?;
        xml.start("w:pPr", &[])?;
        xml.empty("w:pStyle", &[("w:val", style)])?;
        xml.end("w:pPr")?;
        run(xml, text, RunStyle::default())?;
        xml.end("w:p")
    }

    fn paragraph(&mut self, text: &str) -> Result<(), RenderError> {
        let xml = self.body()?;
        xml.start("w:p", &[])?;
        run(xml, text, RunStyle::default())?;
        xml.end("w:p")
    }

    fn bullet(&mut self, text: &str, first_in_list: bool) -> Result<(), RenderError> {
        let xml = self.body()?;
        xml.start("w:p", &[])?;
        xml.start("w:pPr", &[])?;
        xml.empty("w:pStyle", &[("w:val", "ListParagraph")])?;
        xml.start("w:numPr", &[])?;
        xml.empty("w:ilvl", &[("w:val", "0")])?;
        xml.empty("w:numId", &[("w:val", BULLET_NUM_ID)])?;
        xml.end("w:numPr")?;
        if first_in_list {
            xml.empty("w:spacing", &[("w:before", "60"), ("w:after", "60")])?;
        }
        xml.end("w:pPr")?;
        run(xml, text, RunStyle::default())?;
        xml.end("w:p")
    }

    fn tree_line(&mut self, depth: usize, label: &str, emphasis: bool) -> Result<(), RenderError> {
        let indent = (depth * TREE_INDENT_TWIPS).to_string();
        let xml = self.body()?;
        xml.start("w:p", &[])?;
        xml.start("w:pPr", &[])?;
        xml.empty("w:spacing", &[("w:after", "40")])?;
        xml.empty("w:ind", &[("w:left", indent.as_str())])?;
        xml.end("w:pPr")?;
        run(xml, label, RunStyle { bold: emphasis })?;
        xml.end("w:p")
    }

    fn table(&mut self, headers: &[String], rows: &[Vec<String>]) -> Result<(), RenderError> {
        if headers.is_empty() {
            return Ok(());
        }
        let widths: Vec<String> = distribute(CONTENT_WIDTH_TWIPS, &column_weights(headers, rows))
            .into_iter()
            .map(|w| w.to_string())
            .collect();
        let total = CONTENT_WIDTH_TWIPS.to_string();

        let xml = self.body()?;
        xml.start("w:tbl", &[])?;
        xml.start("w:tblPr", &[])?;
        xml.empty("w:tblW", &[("w:w", total.as_str()), ("w:type", "dxa")])?;
        xml.start("w:tblBorders", &[])?;
        for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
            xml.empty(
                edge,
                &[("w:val", "single"), ("w:sz", "4"), ("w:space", "0"), ("w:color", "808080")],
            )?;
        }
        xml.end("w:tblBorders")?;
        xml.empty("w:tblLayout", &[("w:type", "fixed")])?;
        xml.end("w:tblPr")?;

        xml.start("w:tblGrid", &[])?;
        for width in &widths {
            xml.empty("w:gridCol", &[("w:w", width.as_str())])?;
        }
        xml.end("w:tblGrid")?;

        table_row(xml, headers, &widths, true)?;
        for row in rows {
            table_row(xml, row, &widths, false)?;
        }
        xml.end("w:tbl")?;

        // Word needs a paragraph between a table and whatever follows it.
        xml.empty("w:p", &[])
    }

    fn section_properties(xml: &mut XmlBuilder) -> Result<(), RenderError> {
        let margin = MARGIN_TWIPS.to_string();
        let (width, height) = (PAGE_WIDTH_TWIPS.to_string(), PAGE_HEIGHT_TWIPS.to_string());
        xml.start("w:sectPr", &[])?;
        xml.empty("w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
        xml.empty(
            "w:pgMar",
            &[
                ("w:top", margin.as_str()),
                ("w:right", margin.as_str()),
                ("w:bottom", margin.as_str()),
                ("w:left", margin.as_str()),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ],
        )?;
        xml.end("w:sectPr")
    }
}

fn run(xml: &mut XmlBuilder, text: &str, style: RunStyle) -> Result<(), RenderError> {
    xml.start("w:r", &[])?;
    if style.bold {
        xml.start("w:rPr", &[])?;
        xml.empty("w:b", &[])?;
        xml.end("w:rPr")?;
    }
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            xml.empty("w:br", &[])?;
        }
        xml.element("w:t", &[("xml:space", "preserve")], line.trim_end_matches('\r'))?;
    }
    xml.end("w:r")
}

fn table_row(
    xml: &mut XmlBuilder,
    cells: &[String],
    widths: &[String],
    header: bool,
) -> Result<(), RenderError> {
    xml.start("w:tr", &[])?;
    if header {
        xml.start("w:trPr", &[])?;
        xml.empty("w:tblHeader", &[])?;
        xml.end("w:trPr")?;
    }
    for (cell, width) in cells.iter().zip(widths) {
        xml.start("w:tc", &[])?;
        xml.start("w:tcPr", &[])?;
        xml.empty("w:tcW", &[("w:w", width.as_str()), ("w:type", "dxa")])?;
        if header {
            xml.empty("w:shd", &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", HEADER_SHADING)])?;
        }
        xml.end("w:tcPr")?;
        xml.start("w:p", &[])?;
        xml.start("w:pPr", &[])?;
        xml.empty("w:spacing", &[("w:after", "0")])?;
        xml.end("w:pPr")?;
        run(xml, cell, RunStyle { bold: header })?;
        xml.end("w:p")?;
        xml.end("w:tc")?;
    }
    xml.end("w:tr")
}

impl DocumentRenderer for DocxRenderer {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn begin_document(&mut self, title: &str) -> Result<(), RenderError> {
        self.title = title.to_string();
        let mut xml = XmlBuilder::part()?;
        xml.start("w:document", &[("xmlns:w", NS_W), ("xmlns:r", NS_R)])?;
        xml.start("w:body", &[])?;
        self.body = Some(xml);
        Ok(())
    }

    fn render_block(&mut self, block: &RenderBlock) -> Result<(), RenderError> {
        match block {
            RenderBlock::Heading { text, level } => self.heading(text, *level)?,
            RenderBlock::Paragraph(text) => self.paragraph(text)?,
            RenderBlock::BulletItem(text) => {
                let first = !continues_list(self.previous.as_ref(), block);
                self.bullet(text, first)?
            }
            RenderBlock::Table { headers, rows } => self.table(headers, rows)?,
            RenderBlock::TreeLine { depth, label, emphasis } => {
                self.tree_line(*depth, label, *emphasis)?
            }
        }
        self.previous = Some(block.clone());
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        let renderer = *self;
        let mut body = renderer
            .body
            .ok_or_else(|| RenderError::Other("Document was never started with begin_document".into()))?;
        Self::section_properties(&mut body)?;
        body.end("w:body")?;
        body.end("w:document")?;

        let created = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let parts = [
            ("[Content_Types].xml", parts::content_types()?),
            ("_rels/.rels", parts::package_rels()?),
            ("word/document.xml", body.finish()),
            ("word/_rels/document.xml.rels", parts::document_rels()?),
            ("word/styles.xml", parts::styles()?),
            ("word/numbering.xml", parts::numbering()?),
            ("docProps/core.xml", parts::core_properties(&renderer.title, &created)?),
        ];
        let bytes = write_package(&parts)?;
        log::debug!("Packed DOCX with {} parts", parts.len());
        Ok(bytes)
    }
}

use crate::helpers::{to_win_ansi, truncate_to_width, wrap_text};
use crate::metrics::FontFace;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use pmforge_render_core::utils::column_weights;
use pmforge_render_core::{DocumentRenderer, RenderBlock, RenderError};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 50.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_SIZE: f32 = 18.0;
const SECTION_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 9.0;
const TREE_TOP_SIZE: f32 = 11.0;

const LINE_SPACING: f32 = 1.3;
const BULLET_INDENT: f32 = 14.0;
const TREE_INDENT: f32 = 18.0;
const CELL_PADDING: f32 = 3.0;
const ROW_HEIGHT: f32 = TABLE_SIZE * 1.8;

/// A PDF renderer that flows blocks down US Letter pages.
///
/// Pages are accumulated as content streams and the object graph is built in
/// `finish`.
pub struct LopdfRenderer {
    title: String,
    pages: Vec<Content>,
    current: Content,
    /// Distance from the top edge to the next free baseline area.
    cursor: f32,
    state: PageRenderState,
}

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<FontFace>,
    font_size: f32,
}

impl Default for LopdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LopdfRenderer {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            pages: Vec::new(),
            current: Content { operations: vec![] },
            cursor: MARGIN,
            state: PageRenderState::default(),
        }
    }

    fn new_page(&mut self) {
        let finished = std::mem::replace(&mut self.current, Content { operations: vec![] });
        self.pages.push(finished);
        self.cursor = MARGIN;
        self.state = PageRenderState::default();
    }

    /// Starts a new page unless `height` more points fit on this one.
    fn ensure_room(&mut self, height: f32) {
        let page_has_content = !self.current.operations.is_empty();
        if page_has_content && self.cursor + height > PAGE_HEIGHT - MARGIN {
            self.new_page();
        }
    }

    fn skip(&mut self, points: f32) {
        if !self.current.operations.is_empty() {
            self.cursor += points;
        }
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.state.font != Some(face) || self.state.font_size != size {
            self.current.operations.push(Operation::new(
                "Tf",
                vec![Object::Name(face.resource_name().as_bytes().to_vec()), size.into()],
            ));
            self.state.font = Some(face);
            self.state.font_size = size;
        }
    }

    /// Draws one line of text whose top edge sits at the cursor.
    fn draw_text(&mut self, text: &str, x: f32, face: FontFace, size: f32) {
        if text.trim().is_empty() {
            return;
        }
        let baseline = self.cursor + size * 0.8;
        self.current.operations.push(Operation::new("BT", vec![]));
        self.set_font(face, size);
        self.current.operations.push(Operation::new(
            "Td",
            vec![x.into(), (PAGE_HEIGHT - baseline).into()],
        ));
        self.current.operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        self.current.operations.push(Operation::new("ET", vec![]));
    }

    /// Wraps `text` to the width left of `x` and flows it line by line.
    fn flow(&mut self, text: &str, x: f32, face: FontFace, size: f32) {
        let line_height = size * LINE_SPACING;
        for line in wrap_text(text, face, size, PAGE_WIDTH - MARGIN - x) {
            self.ensure_room(line_height);
            self.draw_text(&line, x, face, size);
            self.cursor += line_height;
        }
    }

    fn heading(&mut self, text: &str, level: u8) {
        let size = if level <= 1 { TITLE_SIZE } else { SECTION_SIZE };
        self.skip(if level <= 1 { 0.0 } else { size * 0.8 });
        // Keep a heading with at least one following line.
        self.ensure_room(size * LINE_SPACING + BODY_SIZE * LINE_SPACING);
        self.flow(text, MARGIN, FontFace::Bold, size);
        self.cursor += size * 0.3;
    }

    fn paragraph(&mut self, text: &str) {
        self.flow(text, MARGIN, FontFace::Regular, BODY_SIZE);
        self.cursor += BODY_SIZE * 0.5;
    }

    fn bullet(&mut self, text: &str) {
        let line_height = BODY_SIZE * LINE_SPACING;
        self.ensure_room(line_height);
        let top = self.cursor;
        self.draw_text("\u{2022}", MARGIN + 2.0, FontFace::Regular, BODY_SIZE);
        self.cursor = top;
        self.flow(text, MARGIN + BULLET_INDENT, FontFace::Regular, BODY_SIZE);
        if self.cursor == top {
            self.cursor += line_height;
        }
        self.cursor += BODY_SIZE * 0.2;
    }

    fn tree_line(&mut self, depth: usize, label: &str, emphasis: bool) {
        let (face, size) = if emphasis {
            (FontFace::Bold, TREE_TOP_SIZE)
        } else {
            (FontFace::Regular, BODY_SIZE)
        };
        // Deep outlines stop indenting once half the content width is used.
        let indent = (depth as f32 * TREE_INDENT).min(CONTENT_WIDTH / 2.0);
        if emphasis {
            self.skip(size * 0.4);
        }
        self.flow(label, MARGIN + indent, face, size);
    }

    fn table(&mut self, headers: &[String], rows: &[Vec<String>]) {
        if headers.is_empty() {
            return;
        }
        let widths: Vec<f32> = column_weights(headers, rows)
            .into_iter()
            .map(|w| w * CONTENT_WIDTH)
            .collect();

        self.skip(BODY_SIZE * 0.3);
        self.ensure_room(ROW_HEIGHT * 2.0);
        self.table_row(headers, &widths, FontFace::Bold, true);
        for row in rows {
            if self.cursor + ROW_HEIGHT > PAGE_HEIGHT - MARGIN {
                self.new_page();
                self.table_row(headers, &widths, FontFace::Bold, true);
            }
            self.table_row(row, &widths, FontFace::Regular, false);
        }
        self.cursor += BODY_SIZE * 0.6;
    }

    fn table_row(&mut self, cells: &[String], widths: &[f32], face: FontFace, header: bool) {
        let top = self.cursor;
        let y = PAGE_HEIGHT - top - ROW_HEIGHT;
        let mut x = MARGIN;

        if header {
            self.current.operations.push(Operation::new("q", vec![]));
            self.current
                .operations
                .push(Operation::new("rg", vec![0.9_f32.into(), 0.9_f32.into(), 0.9_f32.into()]));
            self.current.operations.push(Operation::new(
                "re",
                vec![MARGIN.into(), y.into(), CONTENT_WIDTH.into(), ROW_HEIGHT.into()],
            ));
            self.current.operations.push(Operation::new("f", vec![]));
            self.current.operations.push(Operation::new("Q", vec![]));
        }

        self.current.operations.push(Operation::new("w", vec![0.5_f32.into()]));
        for (cell, width) in cells.iter().zip(widths) {
            self.current.operations.push(Operation::new(
                "re",
                vec![x.into(), y.into(), (*width).into(), ROW_HEIGHT.into()],
            ));
            self.current.operations.push(Operation::new("S", vec![]));

            let fitted = truncate_to_width(cell, face, TABLE_SIZE, width - 2.0 * CELL_PADDING);
            self.cursor = top + (ROW_HEIGHT - TABLE_SIZE) / 2.0;
            self.draw_text(&fitted, x + CELL_PADDING, face, TABLE_SIZE);
            x += width;
        }
        self.cursor = top + ROW_HEIGHT;
    }

    fn build(mut self) -> Result<Vec<u8>, RenderError> {
        if !self.current.operations.is_empty() || self.pages.is_empty() {
            self.new_page();
        }

        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();

        let mut font_dict = Dictionary::new();
        for face in FontFace::ALL {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            font_dict.set(face.resource_name(), font_id);
        }
        let resources_id = document.add_object(dictionary! { "Font" => font_dict });

        let mut page_ids: Vec<ObjectId> = Vec::with_capacity(self.pages.len());
        for content in &self.pages {
            let encoded = content
                .encode()
                .map_err(|e| RenderError::Pdf(e.to_string()))?;
            let content_id = document.add_object(Stream::new(Dictionary::new(), encoded));
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            page_ids.push(page_id);
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => page_ids.len() as i64,
        };
        document
            .objects
            .insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let info_id = document.add_object(dictionary! {
            "Title" => Object::String(to_win_ansi(&self.title), StringFormat::Literal),
            "Producer" => Object::string_literal("pmforge"),
        });
        document.trailer.set("Info", info_id);

        log::debug!("Writing PDF with {} page(s)", page_ids.len());
        let mut bytes = Vec::new();
        document
            .save_to(&mut bytes)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        Ok(bytes)
    }
}

impl DocumentRenderer for LopdfRenderer {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn begin_document(&mut self, title: &str) -> Result<(), RenderError> {
        self.title = title.to_string();
        Ok(())
    }

    fn render_block(&mut self, block: &RenderBlock) -> Result<(), RenderError> {
        match block {
            RenderBlock::Heading { text, level } => self.heading(text, *level),
            RenderBlock::Paragraph(text) => self.paragraph(text),
            RenderBlock::BulletItem(text) => self.bullet(text),
            RenderBlock::Table { headers, rows } => self.table(headers, rows),
            RenderBlock::TreeLine { depth, label, emphasis } => {
                self.tree_line(*depth, label, *emphasis)
            }
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        (*self).build()
    }
}

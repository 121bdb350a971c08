/// One abstract formatting instruction.
///
/// Consecutive `BulletItem`s form a single visual list. Every row of a
/// `Table` has exactly as many cells as there are headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderBlock {
    /// Level 1 is the document title, level 2 a section title.
    Heading { text: String, level: u8 },
    Paragraph(String),
    BulletItem(String),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// One outline line; `depth` drives indentation and `emphasis` marks
    /// top-level lines.
    TreeLine {
        depth: usize,
        label: String,
        emphasis: bool,
    },
}

impl RenderBlock {
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        RenderBlock::Heading { text: text.into(), level }
    }

    pub fn table<const N: usize>(headers: [&str; N], rows: Vec<[String; N]>) -> Self {
        RenderBlock::Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows.into_iter().map(Vec::from).collect(),
        }
    }
}

use pmforge_render_core::RenderError;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Thin event writer over an in-memory buffer.
pub(crate) struct XmlBuilder {
    writer: Writer<Vec<u8>>,
}

fn xml_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Xml(e.to_string())
}

impl XmlBuilder {
    /// Starts a standalone UTF-8 part.
    pub fn part() -> Result<Self, RenderError> {
        let mut builder = Self { writer: Writer::new(Vec::new()) };
        builder.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(builder)
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        self.writer.write_event(event).map_err(xml_err)
    }

    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), RenderError> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Start(element))
    }

    pub fn end(&mut self, name: &str) -> Result<(), RenderError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), RenderError> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Empty(element))
    }

    /// Escaped character data. Characters XML 1.0 cannot carry are dropped.
    pub fn text(&mut self, text: &str) -> Result<(), RenderError> {
        let clean: String = text
            .chars()
            .filter(|&c| is_xml_char(c))
            .collect();
        self.write(Event::Text(BytesText::new(&clean)))
    }

    /// `<name attrs>text</name>` in one call.
    pub fn element(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> Result<(), RenderError> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    pub fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{FFFE}' | '\u{FFFF}' => false,
        c => !c.is_control(),
    }
}

//! The fixed package parts that surround `word/document.xml`.

use crate::xml::XmlBuilder;
use pmforge_render_core::RenderError;

pub(crate) const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const NS_R: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";

/// Font size in half-points.
pub(crate) const BODY_HALF_POINTS: &str = "24";
/// Numbering instance shared by every bullet item.
pub(crate) const BULLET_NUM_ID: &str = "1";

pub(crate) fn content_types() -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlBuilder::part()?;
    xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    for (part, content_type) in [
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/word/numbering.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
    ] {
        xml.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }
    xml.end("Types")?;
    Ok(xml.finish())
}

fn relationships(rels: &[(&str, &str, &str)]) -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlBuilder::part()?;
    xml.start("Relationships", &[("xmlns", NS_PACKAGE_RELS)])?;
    for &(id, kind, target) in rels {
        xml.empty("Relationship", &[("Id", id), ("Type", kind), ("Target", target)])?;
    }
    xml.end("Relationships")?;
    Ok(xml.finish())
}

pub(crate) fn package_rels() -> Result<Vec<u8>, RenderError> {
    relationships(&[
        ("rId1", REL_OFFICE_DOCUMENT, "word/document.xml"),
        ("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
    ])
}

pub(crate) fn document_rels() -> Result<Vec<u8>, RenderError> {
    relationships(&[
        ("rId1", REL_STYLES, "styles.xml"),
        ("rId2", REL_NUMBERING, "numbering.xml"),
    ])
}

fn paragraph_style(
    xml: &mut XmlBuilder,
    id: &str,
    name: &str,
    half_points: &str,
    outline_level: &str,
) -> Result<(), RenderError> {
    xml.start("w:style", &[("w:type", "paragraph"), ("w:styleId", id)])?;
    xml.empty("w:name", &[("w:val", name)])?;
    xml.empty("w:basedOn", &[("w:val", "Normal")])?;
    xml.empty("w:next", &[("w:val", "Normal")])?;
    xml.empty("w:qFormat", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:keepNext", &[])?;
    xml.empty("w:spacing", &[("w:before", "240"), ("w:after", "120")])?;
    xml.empty("w:outlineLvl", &[("w:val", outline_level)])?;
    xml.end("w:pPr")?;
    xml.start("w:rPr", &[])?;
    xml.empty("w:b", &[])?;
    xml.empty("w:sz", &[("w:val", half_points)])?;
    xml.empty("w:szCs", &[("w:val", half_points)])?;
    xml.end("w:rPr")?;
    xml.end("w:style")
}

pub(crate) fn styles() -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlBuilder::part()?;
    xml.start("w:styles", &[("xmlns:w", NS_W)])?;

    xml.start("w:docDefaults", &[])?;
    xml.start("w:rPrDefault", &[])?;
    xml.start("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[("w:ascii", "Arial"), ("w:hAnsi", "Arial"), ("w:cs", "Arial"), ("w:eastAsia", "Arial")],
    )?;
    xml.empty("w:sz", &[("w:val", BODY_HALF_POINTS)])?;
    xml.empty("w:szCs", &[("w:val", BODY_HALF_POINTS)])?;
    xml.end("w:rPr")?;
    xml.end("w:rPrDefault")?;
    xml.start("w:pPrDefault", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:spacing", &[("w:after", "120"), ("w:line", "264"), ("w:lineRule", "auto")])?;
    xml.end("w:pPr")?;
    xml.end("w:pPrDefault")?;
    xml.end("w:docDefaults")?;

    xml.start("w:style", &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")])?;
    xml.empty("w:name", &[("w:val", "Normal")])?;
    xml.empty("w:qFormat", &[])?;
    xml.end("w:style")?;

    paragraph_style(&mut xml, "Heading1", "heading 1", "32", "0")?;
    paragraph_style(&mut xml, "Heading2", "heading 2", "26", "1")?;

    xml.start("w:style", &[("w:type", "paragraph"), ("w:styleId", "ListParagraph")])?;
    xml.empty("w:name", &[("w:val", "List Paragraph")])?;
    xml.empty("w:basedOn", &[("w:val", "Normal")])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:spacing", &[("w:after", "60")])?;
    xml.empty("w:ind", &[("w:left", "720")])?;
    xml.end("w:pPr")?;
    xml.end("w:style")?;

    xml.start("w:style", &[("w:type", "table"), ("w:default", "1"), ("w:styleId", "TableNormal")])?;
    xml.empty("w:name", &[("w:val", "Normal Table")])?;
    xml.start("w:tblPr", &[])?;
    xml.start("w:tblCellMar", &[])?;
    xml.empty("w:left", &[("w:w", "108"), ("w:type", "dxa")])?;
    xml.empty("w:right", &[("w:w", "108"), ("w:type", "dxa")])?;
    xml.end("w:tblCellMar")?;
    xml.end("w:tblPr")?;
    xml.end("w:style")?;

    xml.end("w:styles")?;
    Ok(xml.finish())
}

pub(crate) fn numbering() -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlBuilder::part()?;
    xml.start("w:numbering", &[("xmlns:w", NS_W)])?;
    xml.start("w:abstractNum", &[("w:abstractNumId", "0")])?;
    xml.empty("w:multiLevelType", &[("w:val", "singleLevel")])?;
    xml.start("w:lvl", &[("w:ilvl", "0")])?;
    xml.empty("w:start", &[("w:val", "1")])?;
    xml.empty("w:numFmt", &[("w:val", "bullet")])?;
    xml.empty("w:lvlText", &[("w:val", "\u{2022}")])?;
    xml.empty("w:lvlJc", &[("w:val", "left")])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:ind", &[("w:left", "720"), ("w:hanging", "360")])?;
    xml.end("w:pPr")?;
    xml.end("w:lvl")?;
    xml.end("w:abstractNum")?;
    xml.start("w:num", &[("w:numId", BULLET_NUM_ID)])?;
    xml.empty("w:abstractNumId", &[("w:val", "0")])?;
    xml.end("w:num")?;
    xml.end("w:numbering")?;
    Ok(xml.finish())
}

/// Core properties carrying the document title and creation time.
pub(crate) fn core_properties(title: &str, created: &str) -> Result<Vec<u8>, RenderError> {
    let mut xml = XmlBuilder::part()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.element("dc:title", &[], title)?;
    xml.element("dc:creator", &[], "pmforge")?;
    xml.element("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], created)?;
    xml.element("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], created)?;
    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

//! OOXML presentation writer.
//!
//! Produces a minimal but complete `.pptx` package: one OOXML slide master,
//! a blank layout for slides without a master, and one layout per [`Master`]
//! carrying that master's background and objects. Master objects are written
//! once on their layout; the slide-number object becomes a `slidenum` field
//! so every slide shows its own number.

use super::engine::DeckEngine;
use super::error::DeckError;
use super::layout::{Align, Deck, Frame, Master, Slide, SlideObject, TextStyle};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use tracing::{debug, instrument};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const EMU_PER_INCH: f64 = 914_400.0;
const EMU_PER_POINT: f64 = 12_700.0;
const SLIDE_CX: i64 = 9_144_000;
const SLIDE_CY: i64 = 6_858_000;

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;
const REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const MASTER_ID: u64 = 2_147_483_648;
const FIRST_SLIDE_ID: u64 = 256;
const SLIDENUM_FIELD_ID: &str = "{B6F15528-21DE-4FAA-801E-634DDDAF4B2B}";

/// Writes decks as PowerPoint files.
#[derive(Debug, Clone, Default)]
pub struct PptxEngine {
    created: Option<DateTime<Utc>>,
}

impl PptxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the document timestamps instead of using the current time.
    pub fn created_at(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

#[async_trait]
impl DeckEngine for PptxEngine {
    fn name(&self) -> &'static str {
        "pptx"
    }

    #[instrument(skip(self, deck), fields(slides = deck.slides.len()))]
    async fn serialize(&self, deck: &Deck) -> Result<Vec<u8>, DeckError> {
        let dangling = deck.dangling_masters();
        if !dangling.is_empty() {
            return Err(DeckError::Serialization(format!(
                "slides refer to undefined masters: {}",
                dangling.join(", ")
            )));
        }

        let parts = Package::new(deck, self.created.unwrap_or_else(Utc::now)).parts();
        debug!(parts = parts.len(), "Packaging");

        tokio::task::spawn_blocking(move || write_zip(parts))
            .await
            .map_err(|e| DeckError::Serialization(e.to_string()))?
    }
}

fn write_zip(parts: Vec<(String, String)>) -> Result<Vec<u8>, DeckError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (path, body) in parts {
        zip.start_file(path, options)?;
        zip.write_all(body.as_bytes())?;
    }
    Ok(zip.finish()?.into_inner())
}

/// Maps a deck onto package part names and renders each part.
struct Package<'a> {
    deck: &'a Deck,
    created: DateTime<Utc>,
    /// Layout number (1-based) for each master name. Layout 1 is blank.
    layouts: HashMap<&'a str, usize>,
}

impl<'a> Package<'a> {
    fn new(deck: &'a Deck, created: DateTime<Utc>) -> Self {
        let layouts = deck
            .masters
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name.as_str(), i + 2))
            .collect();
        Self {
            deck,
            created,
            layouts,
        }
    }

    fn layout_count(&self) -> usize {
        self.deck.masters.len() + 1
    }

    fn layout_for(&self, slide: &Slide) -> usize {
        slide
            .master
            .as_deref()
            .and_then(|name| self.layouts.get(name).copied())
            .unwrap_or(1)
    }

    fn parts(&self) -> Vec<(String, String)> {
        let mut parts = vec![
            ("[Content_Types].xml".to_string(), self.content_types()),
            ("_rels/.rels".to_string(), root_rels()),
            ("docProps/core.xml".to_string(), self.core_props()),
            ("docProps/app.xml".to_string(), self.app_props()),
            ("ppt/presentation.xml".to_string(), self.presentation()),
            ("ppt/_rels/presentation.xml.rels".to_string(), self.presentation_rels()),
            ("ppt/presProps.xml".to_string(), format!("{XML_DECL}<p:presentationPr {NS}/>")),
            ("ppt/viewProps.xml".to_string(), format!("{XML_DECL}<p:viewPr {NS}/>")),
            ("ppt/tableStyles.xml".to_string(), table_styles()),
            ("ppt/theme/theme1.xml".to_string(), THEME.to_string()),
            ("ppt/slideMasters/slideMaster1.xml".to_string(), self.slide_master()),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
                self.slide_master_rels(),
            ),
        ];

        parts.push(("ppt/slideLayouts/slideLayout1.xml".to_string(), layout_xml("Blank", None)));
        for (i, master) in self.deck.masters.iter().enumerate() {
            parts.push((format!("ppt/slideLayouts/slideLayout{}.xml", i + 2), layout_xml(&master.name, Some(master))));
        }
        for n in 1..=self.layout_count() {
            parts.push((
                format!("ppt/slideLayouts/_rels/slideLayout{n}.xml.rels"),
                rels(&[(1, "slideMaster", "../slideMasters/slideMaster1.xml".to_string())]),
            ));
        }

        for (i, slide) in self.deck.slides.iter().enumerate() {
            let n = i + 1;
            parts.push((format!("ppt/slides/slide{n}.xml"), slide_xml(slide)));
            parts.push((
                format!("ppt/slides/_rels/slide{n}.xml.rels"),
                rels(&[(
                    1,
                    "slideLayout",
                    format!("../slideLayouts/slideLayout{}.xml", self.layout_for(slide)),
                )]),
            ));
        }
        parts
    }

    fn content_types(&self) -> String {
        const PML: &str = "application/vnd.openxmlformats-officedocument.presentationml";
        let mut xml = format!(
            "{XML_DECL}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
             <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
             <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
             <Override PartName=\"/ppt/presentation.xml\" ContentType=\"{PML}.presentation.main+xml\"/>\
             <Override PartName=\"/ppt/presProps.xml\" ContentType=\"{PML}.presProps+xml\"/>\
             <Override PartName=\"/ppt/viewProps.xml\" ContentType=\"{PML}.viewProps+xml\"/>\
             <Override PartName=\"/ppt/tableStyles.xml\" ContentType=\"{PML}.tableStyles+xml\"/>\
             <Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>\
             <Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"{PML}.slideMaster+xml\"/>\
             <Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>\
             <Override PartName=\"/docProps/app.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>"
        );
        for n in 1..=self.layout_count() {
            xml.push_str(&format!(
                "<Override PartName=\"/ppt/slideLayouts/slideLayout{n}.xml\" ContentType=\"{PML}.slideLayout+xml\"/>"
            ));
        }
        for n in 1..=self.deck.slides.len() {
            xml.push_str(&format!(
                "<Override PartName=\"/ppt/slides/slide{n}.xml\" ContentType=\"{PML}.slide+xml\"/>"
            ));
        }
        xml.push_str("</Types>");
        xml
    }

    fn core_props(&self) -> String {
        let meta = &self.deck.metadata;
        let stamp = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);
        format!(
            "{XML_DECL}<cp:coreProperties \
             xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
             xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:dcterms=\"http://purl.org/dc/terms/\" \
             xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
             <dc:title>{}</dc:title><dc:subject>{}</dc:subject><dc:creator>{}</dc:creator>\
             <cp:lastModifiedBy>{}</cp:lastModifiedBy><cp:revision>1</cp:revision>\
             <dcterms:created xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:created>\
             <dcterms:modified xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:modified>\
             </cp:coreProperties>",
            escape(&meta.title),
            escape(&meta.subject),
            escape(&meta.author),
            escape(&meta.author),
        )
    }

    fn app_props(&self) -> String {
        format!(
            "{XML_DECL}<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" \
             xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">\
             <Application>{}</Application><Slides>{}</Slides><Company>{}</Company></Properties>",
            env!("CARGO_PKG_NAME"),
            self.deck.slides.len(),
            escape(&self.deck.metadata.company),
        )
    }

    fn presentation(&self) -> String {
        let slide_ids: String = (0..self.deck.slides.len())
            .map(|i| format!("<p:sldId id=\"{}\" r:id=\"rId{}\"/>", FIRST_SLIDE_ID + i as u64, i + 2))
            .collect();
        format!(
            "{XML_DECL}<p:presentation {NS} saveSubsetFonts=\"1\">\
             <p:sldMasterIdLst><p:sldMasterId id=\"{MASTER_ID}\" r:id=\"rId1\"/></p:sldMasterIdLst>\
             <p:sldIdLst>{slide_ids}</p:sldIdLst>\
             <p:sldSz cx=\"{SLIDE_CX}\" cy=\"{SLIDE_CY}\"/><p:notesSz cx=\"{SLIDE_CY}\" cy=\"{SLIDE_CX}\"/>\
             </p:presentation>"
        )
    }

    fn presentation_rels(&self) -> String {
        let mut entries = vec![(1, "slideMaster", "slideMasters/slideMaster1.xml".to_string())];
        let count = self.deck.slides.len();
        for n in 1..=count {
            entries.push((n + 1, "slide", format!("slides/slide{n}.xml")));
        }
        entries.push((count + 2, "presProps", "presProps.xml".to_string()));
        entries.push((count + 3, "viewProps", "viewProps.xml".to_string()));
        entries.push((count + 4, "theme", "theme/theme1.xml".to_string()));
        entries.push((count + 5, "tableStyles", "tableStyles.xml".to_string()));
        rels(&entries)
    }

    fn slide_master(&self) -> String {
        let layout_ids: String = (1..=self.layout_count())
            .map(|n| format!("<p:sldLayoutId id=\"{}\" r:id=\"rId{n}\"/>", MASTER_ID + n as u64))
            .collect();
        format!(
            "{XML_DECL}<p:sldMaster {NS}><p:cSld>{}{}</p:cSld>\
             <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" \
             accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
             <p:sldLayoutIdLst>{layout_ids}</p:sldLayoutIdLst></p:sldMaster>",
            background("FFFFFF"),
            shape_tree(&[]),
        )
    }

    fn slide_master_rels(&self) -> String {
        let mut entries: Vec<_> = (1..=self.layout_count())
            .map(|n| (n, "slideLayout", format!("../slideLayouts/slideLayout{n}.xml")))
            .collect();
        entries.push((self.layout_count() + 1, "theme", "../theme/theme1.xml".to_string()));
        rels(&entries)
    }
}

fn root_rels() -> String {
    format!(
        "{XML_DECL}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"{REL}/officeDocument\" Target=\"ppt/presentation.xml\"/>\
         <Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>\
         <Relationship Id=\"rId3\" Type=\"{REL}/extended-properties\" Target=\"docProps/app.xml\"/>\
         </Relationships>"
    )
}

fn rels(entries: &[(usize, &str, String)]) -> String {
    let body: String = entries
        .iter()
        .map(|(id, kind, target)| format!("<Relationship Id=\"rId{id}\" Type=\"{REL}/{kind}\" Target=\"{target}\"/>"))
        .collect();
    format!(
        "{XML_DECL}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{body}</Relationships>"
    )
}

fn table_styles() -> String {
    format!(
        "{XML_DECL}<a:tblStyleLst xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
         def=\"{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}\"/>"
    )
}

fn layout_xml(name: &str, master: Option<&Master>) -> String {
    let (bg, objects) = match master {
        Some(m) => (background(&m.background), shape_tree(&m.objects)),
        None => (String::new(), shape_tree(&[])),
    };
    format!(
        "{XML_DECL}<p:sldLayout {NS} preserve=\"1\" userDrawn=\"1\"><p:cSld name=\"{}\">{bg}{objects}</p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>",
        escape(name)
    )
}

fn slide_xml(slide: &Slide) -> String {
    let bg = slide.background.as_deref().map(background).unwrap_or_default();
    format!(
        "{XML_DECL}<p:sld {NS}><p:cSld>{bg}{}</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>",
        shape_tree(&slide.objects)
    )
}

fn background(color: &str) -> String {
    format!(
        "<p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>",
        escape(color)
    )
}

fn shape_tree(objects: &[SlideObject]) -> String {
    let mut xml = String::from(
        "<p:spTree><p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
         <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>",
    );
    for (i, object) in objects.iter().enumerate() {
        xml.push_str(&shape(i + 2, object));
    }
    xml.push_str("</p:spTree>");
    xml
}

fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

fn xfrm(frame: &Frame) -> String {
    format!(
        "<a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>",
        emu(frame.x_in()),
        emu(frame.y_in()),
        emu(frame.w_in()),
        emu(frame.h_in()),
    )
}

fn shape(id: usize, object: &SlideObject) -> String {
    match object {
        SlideObject::Text { text, frame, style } => {
            let paragraphs: String = text.split('\n').map(|line| paragraph(style, &run(style, line))).collect();
            text_box(id, "TextBox", frame, &paragraphs)
        }
        SlideObject::SlideNumber { frame, style } => {
            let field = format!(
                "<a:fld id=\"{SLIDENUM_FIELD_ID}\" type=\"slidenum\">{}<a:t>&#8249;#&#8250;</a:t></a:fld>",
                run_props(style)
            );
            text_box(id, "Slide Number", frame, &paragraph(style, &field))
        }
        SlideObject::Rect { frame, fill } => format!(
            "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Rectangle {id}\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>\
             <p:spPr>{}<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>\
             <a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill><a:ln><a:noFill/></a:ln></p:spPr></p:sp>",
            xfrm(frame),
            escape(fill),
        ),
        SlideObject::Line { frame, color, width_pt } => format!(
            "<p:cxnSp><p:nvCxnSpPr><p:cNvPr id=\"{id}\" name=\"Line {id}\"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr>\
             <p:spPr>{}<a:prstGeom prst=\"line\"><a:avLst/></a:prstGeom>\
             <a:ln w=\"{}\"><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill></a:ln></p:spPr></p:cxnSp>",
            xfrm(frame),
            (width_pt * EMU_PER_POINT).round() as i64,
            escape(color),
        ),
    }
}

fn text_box(id: usize, label: &str, frame: &Frame, paragraphs: &str) -> String {
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{label} {id}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
         <p:spPr>{}<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>\
         <p:txBody><a:bodyPr wrap=\"square\" rtlCol=\"0\"/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>",
        xfrm(frame)
    )
}

fn paragraph(style: &TextStyle, body: &str) -> String {
    let algn = match style.align {
        Align::Left => "l",
        Align::Center => "ctr",
        Align::Right => "r",
        Align::Justify => "just",
    };
    format!("<a:p><a:pPr algn=\"{algn}\"/>{body}</a:p>")
}

fn run(style: &TextStyle, text: &str) -> String {
    format!("<a:r>{}<a:t>{}</a:t></a:r>", run_props(style), escape(text))
}

fn run_props(style: &TextStyle) -> String {
    let mut attrs = format!("lang=\"en-US\" sz=\"{}\"", style.font_size * 100);
    if style.bold {
        attrs.push_str(" b=\"1\"");
    }
    if style.italic {
        attrs.push_str(" i=\"1\"");
    }
    let face = style
        .font_face
        .as_deref()
        .map(|f| format!("<a:latin typeface=\"{}\"/>", escape(f)))
        .unwrap_or_default();
    format!(
        "<a:rPr {attrs} dirty=\"0\"><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>{face}</a:rPr>",
        escape(&style.color)
    )
}

/// Escapes markup and drops characters XML 1.0 cannot carry at all.
fn escape(text: &str) -> String {
    let legal: String = text.chars().filter(|&c| is_xml_char(c)).collect();
    quick_xml::escape::escape(legal.as_str()).into_owned()
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="0F172A"/></a:dk2><a:lt2><a:srgbClr val="F8FAFC"/></a:lt2><a:accent1><a:srgbClr val="1E3A8A"/></a:accent1><a:accent2><a:srgbClr val="334155"/></a:accent2><a:accent3><a:srgbClr val="64748B"/></a:accent3><a:accent4><a:srgbClr val="94A3B8"/></a:accent4><a:accent5><a:srgbClr val="CBD5E1"/></a:accent5><a:accent6><a:srgbClr val="E2E8F0"/></a:accent6><a:hlink><a:srgbClr val="1D4ED8"/></a:hlink><a:folHlink><a:srgbClr val="6D28D9"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Times New Roman"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#;

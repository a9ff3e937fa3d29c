//! PPTX file parser implementation.

use deckcheck_core::{Error, Fragment, Presentation, Result, SlideTextRecord};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

const SLIDE_REL_SUFFIX: &str = "/relationships/slide";
const NOTES_SLIDE_REL_SUFFIX: &str = "/relationships/notesSlide";

/// Placeholder types that mark a slide title.
const TITLE_PLACEHOLDERS: &[&str] = &["title", "ctrTitle", "vertTitle"];

/// Parser for PPTX (Office Open XML) files.
#[derive(Debug, Clone, Default)]
pub struct PptxParser {
    /// Log each slide's captured text.
    debug: bool,
}

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether each slide's text is logged at debug level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Open and parse a PPTX file from disk.
    pub fn parse_file(&self, path: &Path) -> Result<Presentation> {
        log::info!("Extracting text from PPTX: {}", path.display());

        let file = File::open(path)
            .map_err(|e| Error::DocumentRead(format!("{}: {}", path.display(), e)))?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");

        self.parse(BufReader::new(file), filename)
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<Presentation> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::DocumentRead(format!("not a valid PPTX archive: {}", e)))?;

        let mut presentation = Presentation::new(filename);

        let slide_order = self.get_slide_order(&mut archive)?;

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let number = idx + 1;
            if self.debug {
                log::debug!("Processing slide {}", number);
            }

            let slide = self.parse_slide(&mut archive, slide_path, number)?;

            if self.debug {
                let text = slide.text();
                if !text.trim().is_empty() {
                    log::debug!("Slide {} text:\n{}\n{}", number, text, "-".repeat(40));
                }
            }

            presentation.add_slide(slide);
        }

        Ok(presentation)
    }

    /// Get the ordered list of slide part paths.
    ///
    /// Uses the `sldIdLst` of `presentation.xml`; when that list is absent the
    /// slide relationships are ordered by their numeric suffix instead.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = self.read_file_from_archive(archive, PRESENTATION_RELS_PART)?;
        let slide_rels: Vec<Relationship> = parse_relationships(&rels_content)?
            .into_iter()
            .filter(|r| r.rel_type.ends_with(SLIDE_REL_SUFFIX))
            .collect();

        let presentation_xml = self.read_file_from_archive(archive, PRESENTATION_PART)?;
        let listed_ids = parse_slide_id_list(&presentation_xml)?;

        if !listed_ids.is_empty() {
            let mut paths = Vec::with_capacity(listed_ids.len());
            for rel_id in &listed_ids {
                match slide_rels.iter().find(|r| &r.id == rel_id) {
                    Some(rel) => paths.push(resolve_target("ppt", &rel.target)),
                    None => log::warn!("Slide id {} has no relationship, skipping", rel_id),
                }
            }
            return Ok(paths);
        }

        log::debug!("No slide id list in presentation.xml, ordering by relationship");

        let mut slides: Vec<(String, Option<usize>)> = slide_rels
            .into_iter()
            .map(|rel| {
                let order_num = extract_slide_number(&rel.target)
                    .or_else(|| extract_slide_number(&rel.id));
                (resolve_target("ppt", &rel.target), order_num)
            })
            .collect();

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Parse a single slide, including its notes, from the archive.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<SlideTextRecord> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let shapes = extract_shapes_from_xml(&content);
        let mut slide = SlideTextRecord::new(slide_number);

        let title = shapes
            .iter()
            .find(|s| {
                s.placeholder
                    .as_deref()
                    .is_some_and(|ph| TITLE_PLACEHOLDERS.contains(&ph))
            })
            .map(|s| s.frame_text())
            .unwrap_or_default();
        if !title.is_empty() {
            slide.push(Fragment::Title(title));
        }

        for shape in shapes.iter().filter(|s| s.has_text_frame) {
            for paragraph in &shape.paragraphs {
                if !paragraph.runs.trim().is_empty() {
                    slide.push(Fragment::Body(paragraph.runs.clone()));
                }
            }
        }

        if let Some(notes) = self.read_notes(archive, slide_path)? {
            slide.push(Fragment::Notes(notes));
        }

        Ok(slide)
    }

    /// Read the trimmed notes text linked from a slide, if any.
    fn read_notes<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
    ) -> Result<Option<String>> {
        let (slide_dir, slide_file) = slide_path.rsplit_once('/').unwrap_or(("", slide_path));
        let rels_path = format!("{}/_rels/{}.rels", slide_dir, slide_file);

        let Some(rels_content) = self.read_optional_file(archive, &rels_path)? else {
            return Ok(None);
        };

        let Some(notes_rel) = parse_relationships(&rels_content)?
            .into_iter()
            .find(|r| r.rel_type.ends_with(NOTES_SLIDE_REL_SUFFIX))
        else {
            return Ok(None);
        };

        let notes_path = resolve_target(slide_dir, &notes_rel.target);
        let Some(notes_xml) = self.read_optional_file(archive, &notes_path)? else {
            log::warn!("Notes part '{}' referenced but missing", notes_path);
            return Ok(None);
        };

        let notes = extract_shapes_from_xml(&notes_xml)
            .into_iter()
            .find(|s| s.has_text_frame && s.placeholder.as_deref() == Some("body"))
            .map(|s| s.frame_text().trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(notes)
    }

    /// Read a required file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        self.read_optional_file(archive, path)?
            .ok_or_else(|| Error::DocumentRead(format!("missing part '{}'", path)))
    }

    /// Read a file from the ZIP archive, returning `None` if it does not exist.
    fn read_optional_file<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<Option<String>> {
        let mut file = match archive.by_name(path) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(Error::ZipError(format!("Failed to open '{}': {}", path, e)));
            }
        };

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(Some(content))
    }
}

/// A relationship entry from a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

/// One paragraph of a text frame.
#[derive(Debug, Default, Clone)]
struct ParagraphText {
    /// Concatenated run text only.
    runs: String,
    /// Runs, fields and line breaks, as the frame's full text sees them.
    full: String,
}

/// A shape read from slide XML.
#[derive(Debug, Default)]
struct ShapeInfo {
    placeholder: Option<String>,
    has_text_frame: bool,
    paragraphs: Vec<ParagraphText>,
}

impl ShapeInfo {
    /// Whole text-frame text, paragraphs joined by newlines.
    fn frame_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.full.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse the relationships of a `.rels` part.
fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut relationships = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut rel = Relationship {
                    id: String::new(),
                    rel_type: String::new(),
                    target: String::new(),
                };

                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).to_string();
                    match attr.key.as_ref() {
                        b"Id" => rel.id = value,
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = value,
                        _ => {}
                    }
                }

                relationships.push(rel);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(relationships)
}

/// Collect the relationship ids of `p:sldId` entries, in list order.
fn parse_slide_id_list(xml: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                if let Some(id) = relationship_id_attr(e) {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation.xml: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// The namespaced `r:id` attribute of an element (not the plain `id`).
fn relationship_id_attr(e: &BytesStart) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        let key = attr.key.as_ref();
        if key.contains(&b':') && local_name(key) == b"id" {
            Some(String::from_utf8_lossy(&attr.value).to_string())
        } else {
            None
        }
    })
}

/// Extract shapes with their placeholder type and paragraphs from slide XML.
///
/// Only top-level shapes of the shape tree are collected: shapes nested in a
/// group and table cells are skipped.
fn extract_shapes_from_xml(xml_content: &str) -> Vec<ShapeInfo> {
    let mut shapes = Vec::new();
    let mut reader = Reader::from_str(xml_content);
    // Run text keeps its surrounding spaces.
    reader.trim_text(false);

    let mut current_shape: Option<ShapeInfo> = None;
    let mut group_depth = 0usize;
    let mut current_paragraph: Option<ParagraphText> = None;
    let mut in_text_body = false;
    let mut in_run = false;
    let mut in_field = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"grpSp" => group_depth += 1,
                b"sp" if group_depth == 0 => {
                    current_shape = Some(ShapeInfo::default());
                }
                b"ph" => set_placeholder(&mut current_shape, e),
                b"txBody" if current_shape.is_some() => {
                    in_text_body = true;
                    if let Some(ref mut shape) = current_shape {
                        shape.has_text_frame = true;
                    }
                }
                b"p" if in_text_body => {
                    current_paragraph = Some(ParagraphText::default());
                }
                b"r" => in_run = true,
                b"fld" => in_field = true,
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"ph" => set_placeholder(&mut current_shape, e),
                b"br" => {
                    if let Some(ref mut paragraph) = current_paragraph {
                        paragraph.full.push('\n');
                    }
                }
                b"txBody" => {
                    if let Some(ref mut shape) = current_shape {
                        shape.has_text_frame = true;
                    }
                }
                b"p" if in_text_body => {
                    if let Some(ref mut shape) = current_shape {
                        shape.paragraphs.push(ParagraphText::default());
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_text && (in_run || in_field) {
                    if let Some(ref mut paragraph) = current_paragraph {
                        let text = e.unescape().unwrap_or_default();
                        paragraph.full.push_str(&text);
                        if in_run {
                            paragraph.runs.push_str(&text);
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"grpSp" => group_depth = group_depth.saturating_sub(1),
                b"sp" => {
                    if let Some(shape) = current_shape.take() {
                        shapes.push(shape);
                    }
                    current_paragraph = None;
                    in_text_body = false;
                }
                b"txBody" => in_text_body = false,
                b"p" => {
                    if let (Some(paragraph), Some(shape)) =
                        (current_paragraph.take(), current_shape.as_mut())
                    {
                        shape.paragraphs.push(paragraph);
                    }
                }
                b"r" => in_run = false,
                b"fld" => in_field = false,
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!(
                    "XML parsing error at position {}, keeping text read so far: {}",
                    reader.buffer_position(),
                    e
                );
                break;
            }
            _ => {}
        }
    }

    shapes
}

/// Record the placeholder type of the current shape.
///
/// A placeholder without a `type` attribute is an object placeholder.
fn set_placeholder(shape: &mut Option<ShapeInfo>, e: &BytesStart) {
    if let Some(shape) = shape {
        let ph_type = e
            .attributes()
            .flatten()
            .find(|attr| attr.key.as_ref() == b"type")
            .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
            .unwrap_or_else(|| "obj".to_string());
        shape.placeholder = Some(ph_type);
    }
}

/// Resolve a relationship target against the directory of its source part.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slides/slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;
    const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    fn shape(ph: Option<&str>, paragraphs: &[&str]) -> String {
        let ph = ph
            .map(|t| format!(r#"<p:nvPr><p:ph type="{}"/></p:nvPr>"#, t))
            .unwrap_or_else(|| "<p:nvPr/>".to_string());
        let paras: String = paragraphs
            .iter()
            .map(|p| format!("<a:p><a:r><a:rPr/><a:t>{}</a:t></a:r></a:p>", p))
            .collect();
        format!(
            "<p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"s\"/><p:cNvSpPr/>{}</p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/>{}</p:txBody></p:sp>",
            ph, paras
        )
    }

    fn slide_xml(shapes: &[String]) -> String {
        format!(
            "<?xml version=\"1.0\"?><p:sld {}><p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>",
            NS,
            shapes.concat()
        )
    }

    /// Build a PPTX where slide part `slideN.xml` is listed at position
    /// `order[i]`, with optional notes per part.
    fn build_pptx(slides: &[(String, Option<&str>)], order: &[usize]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();

        let mut rels = String::from("<?xml version=\"1.0\"?><Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">");
        rels.push_str(&format!(
            r#"<Relationship Id="rId1" Type="{}/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
            REL_BASE
        ));
        for idx in 0..slides.len() {
            rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="{}/slide" Target="slides/slide{}.xml"/>"#,
                idx + 2,
                REL_BASE,
                idx + 1
            ));
        }
        rels.push_str("</Relationships>");

        let ids: String = order
            .iter()
            .enumerate()
            .map(|(pos, part)| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + pos, part + 2))
            .collect();
        let presentation = format!(
            "<?xml version=\"1.0\"?><p:presentation {}><p:sldIdLst>{}</p:sldIdLst></p:presentation>",
            NS, ids
        );

        zip.start_file("ppt/presentation.xml", options).unwrap();
        zip.write_all(presentation.as_bytes()).unwrap();
        zip.start_file("ppt/_rels/presentation.xml.rels", options).unwrap();
        zip.write_all(rels.as_bytes()).unwrap();

        for (idx, (xml, notes)) in slides.iter().enumerate() {
            let n = idx + 1;
            zip.start_file(format!("ppt/slides/slide{}.xml", n), options).unwrap();
            zip.write_all(xml.as_bytes()).unwrap();

            let mut slide_rels = String::from("<?xml version=\"1.0\"?><Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">");
            slide_rels.push_str(&format!(
                r#"<Relationship Id="rId1" Type="{}/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#,
                REL_BASE
            ));
            if let Some(notes) = notes {
                slide_rels.push_str(&format!(
                    r#"<Relationship Id="rId2" Type="{}/notesSlide" Target="../notesSlides/notesSlide{}.xml"/>"#,
                    REL_BASE, n
                ));
                let notes_xml = format!(
                    "<?xml version=\"1.0\"?><p:notes {}><p:cSld><p:spTree>{}{}</p:spTree></p:cSld></p:notes>",
                    NS,
                    shape(Some("sldImg"), &[]),
                    shape(Some("body"), &[notes])
                );
                zip.start_file(format!("ppt/notesSlides/notesSlide{}.xml", n), options)
                    .unwrap();
                zip.write_all(notes_xml.as_bytes()).unwrap();
            }
            slide_rels.push_str("</Relationships>");
            zip.start_file(format!("ppt/slides/_rels/slide{}.xml.rels", n), options)
                .unwrap();
            zip.write_all(slide_rels.as_bytes()).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }

    fn parse(bytes: Vec<u8>) -> Presentation {
        PptxParser::new().parse(Cursor::new(bytes), "deck.pptx").unwrap()
    }

    #[test]
    fn test_title_body_and_notes() {
        let xml = slide_xml(&[
            shape(Some("title"), &["Quarterly Review"]),
            shape(None, &["Revenue grew 12%", "   ", "Margin 30%"]),
        ]);
        let presentation = parse(build_pptx(&[(xml, Some("  Stress the margin  "))], &[0]));

        assert_eq!(presentation.slides.len(), 1);
        let slide = &presentation.slides[0];
        assert_eq!(slide.number, 1);
        assert_eq!(
            slide.fragments,
            vec![
                Fragment::Title("Quarterly Review".into()),
                Fragment::Body("Quarterly Review".into()),
                Fragment::Body("Revenue grew 12%".into()),
                Fragment::Body("Margin 30%".into()),
                Fragment::Notes("Stress the margin".into()),
            ]
        );
        assert_eq!(
            slide.text(),
            "Title: Quarterly Review\nQuarterly Review\nRevenue grew 12%\nMargin 30%\nNotes: Stress the margin"
        );
    }

    #[test]
    fn test_one_record_per_slide_in_list_order() {
        let slides = vec![
            (slide_xml(&[shape(None, &["part one"])]), None),
            (slide_xml(&[shape(None, &["part two"])]), None),
            (slide_xml(&[]), None),
        ];
        // Listed order: part 2, part 3 (empty), part 1.
        let presentation = parse(build_pptx(&slides, &[1, 2, 0]));

        let texts: Vec<String> = presentation.slides.iter().map(|s| s.text()).collect();
        assert_eq!(texts, vec!["part two", "", "part one"]);
        let numbers: Vec<usize> = presentation.slides.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_runs_concatenate_with_spaces() {
        let xml = slide_xml(&[
            "<p:sp><p:nvSpPr><p:nvPr/></p:nvSpPr><p:txBody><a:p><a:r><a:t>Sales </a:t></a:r><a:r><a:t>doubled</a:t></a:r><a:fld id=\"x\" type=\"slidenum\"><a:t>3</a:t></a:fld></a:p></p:txBody></p:sp>".to_string(),
        ]);
        let presentation = parse(build_pptx(&[(xml, None)], &[0]));

        assert_eq!(
            presentation.slides[0].fragments,
            vec![Fragment::Body("Sales doubled".into())]
        );
    }

    #[test]
    fn test_group_shapes_and_tables_skipped() {
        let group = format!(
            "<p:grpSp><p:nvGrpSpPr/><p:grpSpPr/>{}<p:grpSp>{}</p:grpSp></p:grpSp>",
            shape(None, &["grouped"]),
            shape(None, &["nested group"])
        );
        let table = "<p:graphicFrame><a:graphic><a:graphicData><a:tbl><a:tr><a:tc><a:txBody><a:p><a:r><a:t>cell</a:t></a:r></a:p></a:txBody></a:tc></a:tr></a:tbl></a:graphicData></a:graphic></p:graphicFrame>".to_string();
        let after = shape(None, &["top level"]);
        let presentation = parse(build_pptx(
            &[(slide_xml(&[group, table, after]), None)],
            &[0],
        ));

        assert_eq!(presentation.slides[0].text(), "top level");
    }

    #[test]
    fn test_shapes_inside_group_not_collected() {
        let xml = "<p:sld xmlns:a=\"a\" xmlns:p=\"p\"><p:cSld><p:spTree><p:grpSp><p:sp><p:txBody><a:p><a:r><a:t>inside group</a:t></a:r></a:p></p:txBody></p:sp></p:grpSp><p:sp><p:txBody><a:p><a:r><a:t>outside</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>";

        let shapes = extract_shapes_from_xml(xml);

        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].paragraphs[0].runs, "outside");
    }

    #[test]
    fn test_center_title_with_line_break() {
        let title = "<p:sp><p:nvSpPr><p:nvPr><p:ph type=\"ctrTitle\"/></p:nvPr></p:nvSpPr><p:txBody><a:p><a:r><a:t>Plan</a:t></a:r><a:br/><a:r><a:t>2025</a:t></a:r></a:p></p:txBody></p:sp>".to_string();
        let presentation = parse(build_pptx(&[(slide_xml(&[title]), None)], &[0]));

        assert_eq!(
            presentation.slides[0].fragments[0],
            Fragment::Title("Plan\n2025".into())
        );
    }

    #[test]
    fn test_blank_notes_omitted() {
        let xml = slide_xml(&[shape(None, &["body"])]);
        let presentation = parse(build_pptx(&[(xml, Some("   "))], &[0]));

        assert_eq!(presentation.slides[0].text(), "body");
    }

    #[test]
    fn test_invalid_archive_is_document_error() {
        let result = PptxParser::new().parse(Cursor::new(b"not a zip".to_vec()), "bad.pptx");
        assert!(matches!(result, Err(Error::DocumentRead(_))));
    }

    #[test]
    fn test_missing_file_is_document_error() {
        let result = PptxParser::new().parse_file(Path::new("/nonexistent/deck.pptx"));
        assert!(matches!(result, Err(Error::DocumentRead(_))));
    }

    #[test]
    fn test_parse_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        let xml = slide_xml(&[shape(Some("title"), &["Hello"])]);
        std::fs::write(&path, build_pptx(&[(xml, None)], &[0])).unwrap();

        let presentation = PptxParser::new().with_debug(true).parse_file(&path).unwrap();

        assert_eq!(presentation.filename, "deck.pptx");
        assert_eq!(presentation.slides[0].text(), "Title: Hello\nHello");
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("ppt", "slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(
            resolve_target("ppt/slides", "../notesSlides/notesSlide2.xml"),
            "ppt/notesSlides/notesSlide2.xml"
        );
        assert_eq!(resolve_target("ppt", "/ppt/slides/slide9.xml"), "ppt/slides/slide9.xml");
    }

    #[test]
    fn test_extract_slide_number() {
        assert_eq!(extract_slide_number("rId1"), Some(1));
        assert_eq!(extract_slide_number("rId12"), Some(12));
        assert_eq!(extract_slide_number("slides/slide123.xml"), Some(123));
        assert_eq!(extract_slide_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }
}

use std::path::Path;

use tracing::{info, warn};

use deckforge_core::models::slide::SlideRecord;
use deckforge_core::models::style::{normalize_color, ElementRole, TextAlign, TextStyle};

use crate::error::ExportError;
use crate::images::{embed_image, ImageSource};
use crate::layout::{plan_slide, Placement, SlideElement, EMU_PER_INCH, SLIDE_HEIGHT_IN, SLIDE_WIDTH_IN};
use crate::package::{
    self, escape_xml, push_fmt, PackageWriter, Relationships, REL_CORE_PROPERTIES,
    REL_EXTENDED_PROPERTIES, REL_IMAGE, REL_OFFICE_DOCUMENT, REL_SLIDE, REL_SLIDE_LAYOUT,
    REL_SLIDE_MASTER, REL_THEME,
};
use crate::styles::{DeckTheme, DEFAULT_BACKGROUND};

pub const DEFAULT_FILE_NAME: &str = "generated_presentation.pptx";

/// Outcome of a successful export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub bytes: Vec<u8>,
    pub slides: usize,
    pub images_embedded: usize,
    /// URLs of images that could not be fetched or decoded and were left out.
    pub images_skipped: Vec<String>,
}

/// Generate a PPTX package from slide records.
///
/// Each record is laid out by its template (see [`plan_slide`]). Text is
/// styled from the record's explicit styles over `theme`. Images are
/// fetched one after another; an image that fails to load is logged and
/// omitted without affecting the rest of the slide.
pub fn generate_pptx(
    slides: &[SlideRecord],
    theme: &DeckTheme,
    images: &dyn ImageSource,
) -> Result<ExportReport, ExportError> {
    let mut pkg = PackageWriter::new();
    let mut media_count = 0usize;
    let mut images_skipped = Vec::new();

    pkg.add_part("[Content_Types].xml", package::content_types_xml(slides.len())?.as_bytes())?;

    let mut root_rels = Relationships::default();
    root_rels.add(REL_OFFICE_DOCUMENT, "ppt/presentation.xml");
    root_rels.add(REL_CORE_PROPERTIES, "docProps/core.xml");
    root_rels.add(REL_EXTENDED_PROPERTIES, "docProps/app.xml");
    pkg.add_part("_rels/.rels", root_rels.to_xml()?.as_bytes())?;

    let deck_title = slides
        .iter()
        .map(|s| s.title.as_str())
        .find(|t| !t.is_empty())
        .unwrap_or("Presentation");
    pkg.add_part(
        "docProps/core.xml",
        package::core_properties_xml(deck_title, jiff::Timestamp::now()).as_bytes(),
    )?;
    pkg.add_part("docProps/app.xml", package::app_properties_xml(slides.len()).as_bytes())?;

    let mut pres_rels = Relationships::default();
    let master_rel = pres_rels.add(REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml");
    pres_rels.add(REL_THEME, "theme/theme1.xml");

    let background = normalize_color(&theme.background_color).unwrap_or_else(|e| {
        warn!(error = %e, "falling back to default background color");
        DEFAULT_BACKGROUND.to_string()
    });

    let mut slide_rel_ids = Vec::with_capacity(slides.len());
    for (index, record) in slides.iter().enumerate() {
        let n = index + 1;
        let mut slide_rels = Relationships::default();
        slide_rels.add(REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");

        let mut xml = package::slide_open(&background);
        let mut shape_id = 2u32;

        for element in plan_slide(record) {
            match element {
                SlideElement::Text {
                    role,
                    text,
                    placement,
                } => {
                    let style = theme.resolve(role, &record.style.get(role));
                    write_text_shape(&mut xml, shape_id, role, &text, placement, &style, theme)?;
                    shape_id += 1;
                }
                SlideElement::Image { url, placement } => match embed_image(images, &url) {
                    Ok(image) => {
                        media_count += 1;
                        let media_name = format!("image{media_count}.png");
                        pkg.add_part(&format!("ppt/media/{media_name}"), &image.png)?;
                        let rel_id = slide_rels.add(REL_IMAGE, format!("../media/{media_name}"));
                        write_picture(&mut xml, shape_id, &rel_id, placement)?;
                        shape_id += 1;
                    }
                    Err(e) => {
                        warn!(slide = n, error = %e, "image omitted from export");
                        images_skipped.push(url);
                    }
                },
            }
        }

        xml.push_str(package::SLIDE_CLOSE);
        pkg.add_part(&format!("ppt/slides/slide{n}.xml"), xml.as_bytes())?;
        pkg.add_part(
            &format!("ppt/slides/_rels/slide{n}.xml.rels"),
            slide_rels.to_xml()?.as_bytes(),
        )?;
        slide_rel_ids.push(pres_rels.add(REL_SLIDE, format!("slides/slide{n}.xml")));
    }

    let width_emu = (SLIDE_WIDTH_IN * EMU_PER_INCH) as i64;
    let height_emu = (SLIDE_HEIGHT_IN * EMU_PER_INCH) as i64;
    pkg.add_part(
        "ppt/presentation.xml",
        package::presentation_xml(&master_rel, &slide_rel_ids, width_emu, height_emu)?.as_bytes(),
    )?;
    pkg.add_part("ppt/_rels/presentation.xml.rels", pres_rels.to_xml()?.as_bytes())?;

    let mut master_rels = Relationships::default();
    let layout_rel = master_rels.add(REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
    master_rels.add(REL_THEME, "../theme/theme1.xml");
    pkg.add_part(
        "ppt/slideMasters/slideMaster1.xml",
        package::slide_master_xml(&layout_rel).as_bytes(),
    )?;
    pkg.add_part(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        master_rels.to_xml()?.as_bytes(),
    )?;

    let mut layout_rels = Relationships::default();
    layout_rels.add(REL_SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
    pkg.add_part("ppt/slideLayouts/slideLayout1.xml", package::slide_layout_xml().as_bytes())?;
    pkg.add_part(
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        layout_rels.to_xml()?.as_bytes(),
    )?;
    pkg.add_part("ppt/theme/theme1.xml", package::theme_xml(&theme.font_face).as_bytes())?;

    let bytes = pkg.finish()?;

    info!(
        slides = slides.len(),
        images_embedded = media_count,
        images_skipped = images_skipped.len(),
        bytes = bytes.len(),
        "presentation generated"
    );

    Ok(ExportReport {
        bytes,
        slides: slides.len(),
        images_embedded: media_count,
        images_skipped,
    })
}

/// Generate a presentation and write it to `path`.
///
/// The file is written next to its destination and renamed into place, so
/// a failed export never leaves a truncated file behind.
pub fn write_pptx(
    path: &Path,
    slides: &[SlideRecord],
    theme: &DeckTheme,
    images: &dyn ImageSource,
) -> Result<ExportReport, ExportError> {
    let report = generate_pptx(slides, theme, images)?;

    let tmp_path = path.with_extension("pptx.tmp");
    let written = std::fs::write(&tmp_path, &report.bytes)
        .and_then(|()| std::fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    info!(path = %path.display(), "presentation written");
    Ok(report)
}

fn write_text_shape(
    xml: &mut String,
    shape_id: u32,
    role: ElementRole,
    text: &str,
    placement: Placement,
    style: &TextStyle,
    theme: &DeckTheme,
) -> Result<(), ExportError> {
    let (x, y, cx, cy) = placement.to_emu();
    let name = match role {
        ElementRole::Title => "Title",
        ElementRole::Description => "Description",
        ElementRole::Column(_) => "Column",
        ElementRole::CardHeading(_) => "Heading",
        ElementRole::CardDescription(_) => "Card Description",
    };

    push_fmt(
        xml,
        format_args!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{shape_id}" name="{name} {shape_id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#
        ),
    )?;
    push_fmt(
        xml,
        format_args!(
            r#"<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#
        ),
    )?;
    xml.push_str(r#"<p:txBody><a:bodyPr wrap="square" rtlCol="0" anchor="t"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#);

    let run_props = run_properties(style, theme)?;
    let algn = match style.align.unwrap_or_default() {
        TextAlign::Left => "l",
        TextAlign::Center => "ctr",
        TextAlign::Right => "r",
        TextAlign::Justify => "just",
    };

    for line in text.lines() {
        push_fmt(xml, format_args!(r#"<a:p><a:pPr algn="{algn}"/>"#))?;
        if !line.is_empty() {
            push_fmt(
                xml,
                format_args!("<a:r>{run_props}<a:t>{}</a:t></a:r>", escape_xml(line)),
            )?;
        }
        xml.push_str("</a:p>");
    }

    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn run_properties(style: &TextStyle, theme: &DeckTheme) -> Result<String, ExportError> {
    let mut props = String::from(r#"<a:rPr lang="en-US" dirty="0""#);

    if let Some(size) = style.font_size {
        let sz = (size * 100.0).round().clamp(100.0, 400_000.0) as u32;
        push_fmt(&mut props, format_args!(r#" sz="{sz}""#))?;
    }
    if style.bold == Some(true) {
        props.push_str(r#" b="1""#);
    }
    if style.italic == Some(true) {
        props.push_str(r#" i="1""#);
    }
    if style.underline == Some(true) {
        props.push_str(r#" u="sng""#);
    }
    props.push('>');

    let raw_color = style.color.as_deref().unwrap_or(&theme.text_color);
    let color = normalize_color(raw_color).unwrap_or_else(|e| {
        warn!(error = %e, "falling back to theme text color");
        theme.text_color.clone()
    });
    push_fmt(
        &mut props,
        format_args!(r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, escape_xml(&color)),
    )?;

    let font = style.font_face.as_deref().unwrap_or(&theme.font_face);
    push_fmt(
        &mut props,
        format_args!(r#"<a:latin typeface="{}"/>"#, escape_xml(font)),
    )?;

    props.push_str("</a:rPr>");
    Ok(props)
}

fn write_picture(
    xml: &mut String,
    shape_id: u32,
    rel_id: &str,
    placement: Placement,
) -> Result<(), ExportError> {
    let (x, y, cx, cy) = placement.to_emu();
    push_fmt(
        xml,
        format_args!(
            r#"<p:pic><p:nvPicPr><p:cNvPr id="{shape_id}" name="Picture {shape_id}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#
        ),
    )?;
    push_fmt(
        xml,
        format_args!(
            r#"<p:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#
        ),
    )?;
    push_fmt(
        xml,
        format_args!(
            r#"<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#
        ),
    )?;
    Ok(())
}

use std::io::{Cursor, Read};

use deckforge_core::models::slide::{Card, SlideRecord, SlideType};
use deckforge_core::models::style::{ElementRole, TextAlign, TextStyle};
use deckforge_export::error::ExportError;
use deckforge_export::images::ImageSource;
use deckforge_export::pptx::{generate_pptx, write_pptx, DEFAULT_FILE_NAME};
use deckforge_export::styles::DeckTheme;

/// Serves a tiny PNG for every URL except those containing "broken".
struct FakeImages;

impl ImageSource for FakeImages {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ExportError> {
        if url.contains("broken") {
            return Err(ExportError::ImageFetch {
                url: url.to_string(),
                reason: "404".to_string(),
            });
        }
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 128, 255, 255]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        Ok(out)
    }
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

fn part_names(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

fn card(n: u8, image: &str) -> Card {
    Card {
        image: Some(image.to_string()),
        heading: format!("Heading {n}"),
        description: format!("Body {n}"),
    }
}

#[test]
fn failed_card_image_is_omitted_and_export_continues() {
    let slides = vec![SlideRecord {
        slide_type: SlideType::ThreeImgCard,
        title: "Cards".to_string(),
        cards: vec![
            card(1, "https://example.com/one.png"),
            card(2, "https://example.com/broken.png"),
            card(3, "https://example.com/three.png"),
        ],
        ..SlideRecord::default()
    }];

    let report = generate_pptx(&slides, &DeckTheme::default(), &FakeImages).unwrap();

    assert_eq!(report.images_embedded, 2);
    assert_eq!(report.images_skipped, vec!["https://example.com/broken.png"]);

    let slide = read_part(&report.bytes, "ppt/slides/slide1.xml");
    assert_eq!(slide.matches("<p:pic>").count(), 2);
    assert!(slide.contains("Heading 2"));
    assert!(slide.contains("Body 2"));

    let names = part_names(&report.bytes);
    assert!(names.contains(&"ppt/media/image1.png".to_string()));
    assert!(names.contains(&"ppt/media/image2.png".to_string()));
    assert!(!names.contains(&"ppt/media/image3.png".to_string()));

    let rels = read_part(&report.bytes, "ppt/slides/_rels/slide1.xml.rels");
    assert!(rels.contains(r#"Target="../slideLayouts/slideLayout1.xml""#));
    assert!(rels.contains(r#"Target="../media/image2.png""#));
}

#[test]
fn every_slide_gets_the_theme_background() {
    let slides = vec![
        SlideRecord {
            title: "One".to_string(),
            ..SlideRecord::default()
        },
        SlideRecord {
            title: "Two".to_string(),
            ..SlideRecord::default()
        },
    ];

    let report = generate_pptx(&slides, &DeckTheme::default(), &FakeImages).unwrap();
    assert_eq!(report.slides, 2);

    for n in 1..=2 {
        let slide = read_part(&report.bytes, &format!("ppt/slides/slide{n}.xml"));
        assert!(slide.contains(r#"<a:srgbClr val="342C4E"/>"#));
    }

    let presentation = read_part(&report.bytes, "ppt/presentation.xml");
    assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="5143500"/>"#));
    assert_eq!(presentation.matches("<p:sldId ").count(), 2);

    let types = read_part(&report.bytes, "[Content_Types].xml");
    assert!(types.contains("/ppt/slides/slide2.xml"));
}

#[test]
fn default_slide_text_uses_theme_defaults() {
    let slides = vec![SlideRecord {
        slide_type: SlideType::from_tag("somethingElse"),
        title: "Fallback <Title>".to_string(),
        description: Some("First line\nSecond line".to_string()),
        ..SlideRecord::default()
    }];

    let report = generate_pptx(&slides, &DeckTheme::default(), &FakeImages).unwrap();
    let slide = read_part(&report.bytes, "ppt/slides/slide1.xml");

    assert!(slide.contains("Fallback &lt;Title&gt;"));
    assert!(slide.contains(r#"sz="2800" b="1""#));
    assert!(slide.contains(r#"sz="1400""#));
    assert!(slide.contains(r#"<a:latin typeface="Arial"/>"#));
    assert!(slide.contains(r#"<a:srgbClr val="FFFFFF"/>"#));
    assert!(slide.contains("<a:t>First line</a:t>"));
    assert!(slide.contains("<a:t>Second line</a:t>"));
}

#[test]
fn explicit_styles_override_the_theme() {
    let mut record = SlideRecord {
        title: "Styled".to_string(),
        ..SlideRecord::default()
    };
    record.style.set(
        ElementRole::Title,
        TextStyle {
            font_size: Some(40.0),
            color: Some("rgb(255, 0, 0)".to_string()),
            italic: Some(true),
            underline: Some(true),
            align: Some(TextAlign::Center),
            font_face: Some("Georgia".to_string()),
            ..TextStyle::default()
        },
    );

    let report = generate_pptx(&[record], &DeckTheme::default(), &FakeImages).unwrap();
    let slide = read_part(&report.bytes, "ppt/slides/slide1.xml");

    assert!(slide.contains(r#"<a:pPr algn="ctr"/>"#));
    assert!(slide.contains(r#"sz="4000" b="1" i="1" u="sng""#));
    assert!(slide.contains(r#"<a:srgbClr val="FF0000"/>"#));
    assert!(slide.contains(r#"<a:latin typeface="Georgia"/>"#));
}

#[test]
fn unparseable_colour_falls_back_to_theme_text_colour() {
    let mut record = SlideRecord {
        title: "Odd colour".to_string(),
        ..SlideRecord::default()
    };
    record.style.set(
        ElementRole::Title,
        TextStyle {
            color: Some("chartreuse-ish".to_string()),
            ..TextStyle::default()
        },
    );

    let report = generate_pptx(&[record], &DeckTheme::default(), &FakeImages).unwrap();
    let slide = read_part(&report.bytes, "ppt/slides/slide1.xml");
    assert!(slide.contains(r#"<a:srgbClr val="FFFFFF"/>"#));
}

#[test]
fn write_pptx_creates_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_FILE_NAME);
    let slides = vec![SlideRecord {
        title: "Saved".to_string(),
        ..SlideRecord::default()
    }];

    let report = write_pptx(&path, &slides, &DeckTheme::default(), &FakeImages).unwrap();

    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk, report.bytes);
    assert!(!path.with_extension("pptx.tmp").exists());
}

#[test]
fn css_style_background_is_written_as_bare_hex() {
    let slides = vec![SlideRecord {
        title: "One".to_string(),
        ..SlideRecord::default()
    }];
    let theme = DeckTheme {
        background_color: "#342c4e".to_string(),
        ..DeckTheme::default()
    };

    let report = generate_pptx(&slides, &theme, &FakeImages).unwrap();
    let slide = read_part(&report.bytes, "ppt/slides/slide1.xml");
    assert!(slide.contains(r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="342C4E"/>"#));
    assert!(!slide.contains("#342c4e"));
}

#[test]
fn unparseable_background_falls_back_to_default() {
    let slides = vec![SlideRecord::default()];
    let theme = DeckTheme {
        background_color: "purple-ish".to_string(),
        ..DeckTheme::default()
    };

    let report = generate_pptx(&slides, &theme, &FakeImages).unwrap();
    let slide = read_part(&report.bytes, "ppt/slides/slide1.xml");
    assert!(slide.contains(r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="342C4E"/>"#));
}

#[test]
fn failed_write_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.pptx");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep.txt"), b"x").unwrap();
    let slides = vec![SlideRecord {
        title: "Blocked".to_string(),
        ..SlideRecord::default()
    }];

    let err = write_pptx(&path, &slides, &DeckTheme::default(), &FakeImages).unwrap_err();
    assert!(matches!(err, ExportError::Io(_)));
    assert!(path.is_dir());
    assert!(!path.with_extension("pptx.tmp").exists());
}

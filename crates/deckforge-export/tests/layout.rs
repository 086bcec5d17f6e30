use deckforge_core::models::slide::{Card, Column, SlideRecord, SlideType};
use deckforge_core::models::style::ElementRole;
use deckforge_export::layout::{plan_slide, Length, Placement, SlideElement, EMU_PER_INCH};

fn text_roles(plan: &[SlideElement]) -> Vec<ElementRole> {
    plan.iter()
        .filter_map(|e| match e {
            SlideElement::Text { role, .. } => Some(*role),
            SlideElement::Image { .. } => None,
        })
        .collect()
}

fn placement_of(plan: &[SlideElement], wanted: ElementRole) -> Placement {
    plan.iter()
        .find_map(|e| match e {
            SlideElement::Text {
                role, placement, ..
            } if *role == wanted => Some(*placement),
            _ => None,
        })
        .unwrap()
}

#[test]
fn accent_image_places_text_left_and_image_right() {
    let record = SlideRecord {
        slide_type: SlideType::AccentImage,
        title: "Sunlight".to_string(),
        description: Some("Photons".to_string()),
        image: Some("https://example.com/sun.png".to_string()),
        ..SlideRecord::default()
    };

    let plan = plan_slide(&record);
    assert_eq!(plan.len(), 3);

    let title = placement_of(&plan, ElementRole::Title);
    assert_eq!(title.w, Length::Percent(50.0));
    assert_eq!(title.to_emu(), (457_200, 457_200, 4_572_000, 914_400));

    match &plan[2] {
        SlideElement::Image { url, placement } => {
            assert_eq!(url, "https://example.com/sun.png");
            assert_eq!(placement.x, 5.5);
            assert_eq!(placement.w.to_inches(), 4.0);
        }
        other => panic!("expected image, got {other:?}"),
    }
}

#[test]
fn empty_text_and_missing_images_are_skipped() {
    let record = SlideRecord {
        slide_type: SlideType::ImageCardText,
        title: "Only a title".to_string(),
        image: Some("   ".to_string()),
        ..SlideRecord::default()
    };

    let plan = plan_slide(&record);
    assert_eq!(text_roles(&plan), vec![ElementRole::Title]);
    assert_eq!(plan.len(), 1);
}

#[test]
fn two_column_places_columns_side_by_side() {
    let record = SlideRecord {
        slide_type: SlideType::TwoColumn,
        title: "Compare".to_string(),
        columns: vec![
            Column {
                content: "Solar".to_string(),
            },
            Column {
                content: "Wind".to_string(),
            },
        ],
        ..SlideRecord::default()
    };

    let plan = plan_slide(&record);
    assert_eq!(
        text_roles(&plan),
        vec![ElementRole::Title, ElementRole::Column(0), ElementRole::Column(1)]
    );
    assert_eq!(placement_of(&plan, ElementRole::Column(0)).x, 0.5);
    assert_eq!(placement_of(&plan, ElementRole::Column(1)).x, 5.5);
    assert_eq!(
        placement_of(&plan, ElementRole::Column(1)).w.to_inches(),
        4.5
    );
}

#[test]
fn cards_step_across_the_slide() {
    let card = |n: u8| Card {
        image: Some(format!("https://example.com/{n}.jpg")),
        heading: format!("Heading {n}"),
        description: format!("Body {n}"),
    };
    let record = SlideRecord {
        slide_type: SlideType::ThreeImgCard,
        title: "Three".to_string(),
        cards: vec![card(1), card(2), card(3)],
        ..SlideRecord::default()
    };

    let plan = plan_slide(&record);
    // title + 3 × (image, heading, description)
    assert_eq!(plan.len(), 10);

    let third = placement_of(&plan, ElementRole::CardHeading(2));
    assert!((third.x - 7.1).abs() < 1e-9);
    assert_eq!(third.y, 3.5);
    assert_eq!(placement_of(&plan, ElementRole::CardDescription(0)).y, 4.0);
}

#[test]
fn default_slide_uses_full_width_body() {
    let record = SlideRecord {
        title: "Plain".to_string(),
        description: Some("Text".to_string()),
        ..SlideRecord::default()
    };

    let plan = plan_slide(&record);
    let body = placement_of(&plan, ElementRole::Description);
    assert_eq!(body.w.to_inches(), 9.0);
    assert_eq!(body.to_emu().3, (4.0 * EMU_PER_INCH) as i64);
}

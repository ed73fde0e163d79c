use super::common::*;

use crate::design::catalog::SectionKind;
use crate::design::document::{DesignDocument, GlobalStyle};
use crate::design::ordering::set_visibility;
use crate::design::profile::StoreProfile;
use crate::design::reconcile::reconcile;
use crate::design::render::fields::{SalaryAmount, NEGOTIABLE_LABEL};
use crate::design::render::{render, BlockContent, ContentBlock};

fn profile() -> StoreProfile {
    StoreProfile::from_value(&profile_payload())
}

fn block<'a>(blocks: &'a [ContentBlock], id: &str) -> &'a ContentBlock {
    blocks
        .iter()
        .find(|block| block.section_id == id)
        .unwrap_or_else(|| panic!("{id} rendered"))
}

#[test]
fn renders_visible_sections_in_page_order() {
    let document = set_visibility(&default_document(), "gallery", false).expect("hide");
    let blocks = render(&document, &profile());

    assert_eq!(blocks.len(), document.sections.len() - 1);
    assert_eq!(blocks[0].kind, Some(SectionKind::Header));
    assert!(blocks.iter().all(|block| block.section_id != "gallery"));
    assert_eq!(
        blocks.last().map(|block| block.kind),
        Some(Some(SectionKind::Footer))
    );
}

#[test]
fn salary_lines_derive_hourly_and_negotiable_values() {
    let blocks = render(&default_document(), &profile());
    let BlockContent::Salary(salary) = &block(&blocks, "salary").content else {
        panic!("salary content");
    };

    assert_eq!(salary.lines.len(), 2);
    assert_eq!(salary.lines[0].amount, SalaryAmount::Currency { value: 30000 });
    assert_eq!(salary.lines[0].display, "30,000円");
    assert_eq!(salary.lines[0].hourly_equivalent, Some(5000));

    assert_eq!(salary.lines[1].amount, SalaryAmount::Negotiable);
    assert_eq!(salary.lines[1].display, NEGOTIABLE_LABEL);
    assert_ne!(salary.lines[1].display, "0円");
    assert_eq!(salary.lines[1].hourly_equivalent, None);
}

#[test]
fn schedule_normalizes_days_and_hours() {
    let blocks = render(&default_document(), &profile());
    let BlockContent::Schedule(schedule) = &block(&blocks, "schedule").content else {
        panic!("schedule content");
    };

    assert_eq!(schedule.days, vec!["月", "火", "水"]);
    assert!(!schedule.every_day);
    assert_eq!(schedule.business_hours.as_deref(), Some("10:00-22:00"));
}

#[test]
fn contact_unions_legacy_scalar_into_the_list() {
    let blocks = render(&default_document(), &profile());
    let BlockContent::Contact(contact) = &block(&blocks, "contact").content else {
        panic!("contact content");
    };

    assert_eq!(contact.phones.len(), 1);
    assert_eq!(contact.phones[0].value, "03-1234-5678");
    assert!(contact.phones[0].primary);
    assert_eq!(contact.emails.len(), 1);
    assert_eq!(contact.emails[0].href, "mailto:info@aurora.example");
}

#[test]
fn empty_profile_still_renders_every_block() {
    let blocks = render(&default_document(), &StoreProfile::default());
    assert_eq!(blocks.len(), default_document().sections.len());

    let BlockContent::Salary(salary) = &block(&blocks, "salary").content else {
        panic!("salary content");
    };
    assert_eq!(salary.lines.len(), 1);
    assert_eq!(salary.lines[0].amount, SalaryAmount::Negotiable);

    let BlockContent::Schedule(schedule) = &block(&blocks, "schedule").content else {
        panic!("schedule content");
    };
    assert!(schedule.every_day);
}

#[test]
fn unknown_sections_render_placeholders() {
    let mut stored = default_document();
    stored.sections.push(section("seasonal_banner", 99));
    let document = reconcile(Some(stored));

    let blocks = render(&document, &profile());
    let placeholder = block(&blocks, "seasonal_banner");
    assert_eq!(placeholder.kind, None);
    assert_eq!(
        placeholder.content,
        BlockContent::Unsupported {
            section_id: "seasonal_banner".to_string()
        }
    );
}

#[test]
fn legacy_aliases_render_as_their_current_kind() {
    let document = DesignDocument {
        sections: vec![section("hero", 1)],
        ..DesignDocument::default()
    };
    let blocks = render(&document, &profile());
    assert_eq!(blocks[0].kind, Some(SectionKind::MainVisual));
}

#[test]
fn hidden_titles_and_page_chrome_carry_no_title() {
    let blocks = render(&default_document(), &profile());
    assert_eq!(block(&blocks, "header").title, None);
    assert_eq!(block(&blocks, "footer").title, None);
    assert_eq!(
        block(&blocks, "benefits").title.as_deref(),
        Some(SectionKind::Benefits.default_title())
    );

    let mut document = default_document();
    document.global_settings = GlobalStyle {
        hide_section_titles: true,
        ..GlobalStyle::default()
    };
    let blocks = render(&document, &profile());
    assert!(blocks.iter().all(|block| block.title.is_none()));
}

#[test]
fn blocks_resolve_styles_against_global_settings() {
    let mut document = default_document();
    document.global_settings.main_color = "#123456".to_string();
    let blocks = render(&document, &profile());

    let benefits = block(&blocks, "benefits");
    assert_eq!(benefits.style.title_color, "#123456");
    assert_eq!(block(&blocks, "footer").style.background_color, "#222222");
}

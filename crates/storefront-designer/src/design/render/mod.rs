mod blocks;
pub mod fields;

pub use blocks::{
    AccessBlock, BlockContent, BlogBlock, CatchphraseBlock, ContactBlock, FooterBlock,
    GalleryBlock, HeaderBlock, ListBlock, MainVisualBlock, OffersBlock, PostExcerpt,
    RequirementsBlock, SalaryBlock, SalaryLine, ScheduleBlock, SocialBlock,
    BLOG_EXCERPT_CHARS, BLOG_EXCERPT_LIMIT, DEFAULT_MINIMUM_AGE, DEFAULT_PRIVACY_MEASURES,
};

use serde::Serialize;
use tracing::debug;

use super::catalog::{Catalog, SectionKind};
use super::document::{DesignDocument, Section};
use super::profile::StoreProfile;
use super::style::{resolve, ResolvedStyle};

/// One laid-out section; the only structure handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBlock {
    pub section_id: String,
    /// `None` for sections the renderer does not recognise.
    pub kind: Option<SectionKind>,
    pub title: Option<String>,
    pub style: ResolvedStyle,
    pub content: BlockContent,
}

/// Projects the document and profile into the ordered list of visible blocks.
/// Never fails: unknown ids become placeholder blocks.
pub fn render(document: &DesignDocument, profile: &StoreProfile) -> Vec<ContentBlock> {
    let catalog = Catalog::standard();

    let mut visible: Vec<&Section> = document
        .sections
        .iter()
        .filter(|section| section.visible)
        .collect();
    visible.sort_by_key(|section| section.order);

    visible
        .into_iter()
        .map(|section| render_section(catalog, section, document, profile))
        .collect()
}

fn render_section(
    catalog: &Catalog,
    section: &Section,
    document: &DesignDocument,
    profile: &StoreProfile,
) -> ContentBlock {
    let style = resolve(section, &document.global_settings);
    let kind = catalog.kind_for(&section.id);

    let content = match kind {
        Some(kind) => content_for(kind, profile),
        None => {
            debug!(section_id = %section.id, "rendering placeholder for unsupported section");
            BlockContent::Unsupported {
                section_id: section.id.clone(),
            }
        }
    };

    ContentBlock {
        section_id: section.id.clone(),
        kind,
        title: block_title(kind, section, &style),
        style,
        content,
    }
}

fn content_for(kind: SectionKind, profile: &StoreProfile) -> BlockContent {
    match kind {
        SectionKind::Header => blocks::header(profile),
        SectionKind::MainVisual => blocks::main_visual(profile),
        SectionKind::Catchphrase => blocks::catchphrase(profile),
        SectionKind::Gallery => blocks::gallery(profile),
        SectionKind::Benefits => blocks::benefits(profile),
        SectionKind::Salary => blocks::salary(profile),
        SectionKind::Schedule => blocks::schedule(profile),
        SectionKind::SpecialOffers => blocks::special_offers(profile),
        SectionKind::Access => blocks::access(profile),
        SectionKind::Contact => blocks::contact(profile),
        SectionKind::SocialLinks => blocks::social_links(profile),
        SectionKind::Security => blocks::security(profile),
        SectionKind::Requirements => blocks::requirements(profile),
        SectionKind::Blog => blocks::blog(profile),
        SectionKind::Footer => blocks::footer(profile),
    }
}

/// Page chrome (header, main visual, footer) never carries a title.
fn block_title(
    kind: Option<SectionKind>,
    section: &Section,
    style: &ResolvedStyle,
) -> Option<String> {
    if !style.show_title {
        return None;
    }
    match kind {
        Some(SectionKind::Header | SectionKind::MainVisual | SectionKind::Footer) => None,
        Some(kind) if section.title.trim().is_empty() => Some(kind.default_title().to_string()),
        _ if section.title.trim().is_empty() => None,
        _ => Some(section.title.clone()),
    }
}

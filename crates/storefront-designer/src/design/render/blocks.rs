use serde::Serialize;

use super::fields::{
    display_date, email_entries, excerpt, hourly_equivalent, normalize_business_hours,
    normalize_days, phone_entries, ContactEntry, SalaryAmount, EVERY_DAY,
};
use crate::design::profile::{
    SocialLink, SpecialOffer, StoreProfile, DEFAULT_GUARANTEE_LABEL,
};

pub const BLOG_EXCERPT_LIMIT: usize = 3;
pub const BLOG_EXCERPT_CHARS: usize = 80;
pub const DEFAULT_MINIMUM_AGE: u32 = 18;
pub const DEFAULT_PRIVACY_MEASURES: [&str; 3] = [
    "顔出しなしで勤務できます",
    "個人情報は厳重に管理します",
    "身バレ対策もご相談ください",
];

/// Payload of a rendered section, one variant per content kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockContent {
    Header(HeaderBlock),
    MainVisual(MainVisualBlock),
    Catchphrase(CatchphraseBlock),
    Gallery(GalleryBlock),
    Benefits(ListBlock),
    Salary(SalaryBlock),
    Schedule(ScheduleBlock),
    SpecialOffers(OffersBlock),
    Access(AccessBlock),
    Contact(ContactBlock),
    SocialLinks(SocialBlock),
    Security(ListBlock),
    Requirements(RequirementsBlock),
    Blog(BlogBlock),
    Footer(FooterBlock),
    Unsupported { section_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderBlock {
    pub store_name: String,
    pub logo_url: Option<String>,
    pub area: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MainVisualBlock {
    pub image_url: Option<String>,
    pub headline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatchphraseBlock {
    pub headline: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryBlock {
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListBlock {
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryLine {
    pub label: String,
    pub amount: SalaryAmount,
    pub display: String,
    pub hourly_equivalent: Option<u64>,
    pub hourly_display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryBlock {
    pub lines: Vec<SalaryLine>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleBlock {
    pub days: Vec<String>,
    pub every_day: bool,
    pub business_hours: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffersBlock {
    pub offers: Vec<SpecialOffer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessBlock {
    pub address: Option<String>,
    pub nearest_station: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactBlock {
    pub phones: Vec<ContactEntry>,
    pub emails: Vec<ContactEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialBlock {
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementsBlock {
    pub minimum_age: u32,
    pub age_label: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostExcerpt {
    pub title: String,
    pub excerpt: String,
    pub date: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogBlock {
    pub posts: Vec<PostExcerpt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterBlock {
    pub store_name: String,
    pub copyright: String,
}

pub(crate) fn header(profile: &StoreProfile) -> BlockContent {
    BlockContent::Header(HeaderBlock {
        store_name: profile.store_name.clone(),
        logo_url: profile.logo_url.clone(),
        area: profile.area.clone(),
    })
}

pub(crate) fn main_visual(profile: &StoreProfile) -> BlockContent {
    BlockContent::MainVisual(MainVisualBlock {
        image_url: profile.main_image_url.clone(),
        headline: profile
            .catchphrase
            .clone()
            .unwrap_or_else(|| profile.store_name.clone()),
    })
}

pub(crate) fn catchphrase(profile: &StoreProfile) -> BlockContent {
    BlockContent::Catchphrase(CatchphraseBlock {
        headline: profile.catchphrase.clone(),
        body: profile.description.clone(),
    })
}

pub(crate) fn gallery(profile: &StoreProfile) -> BlockContent {
    let mut images = profile.gallery_images.clone();
    if images.is_empty() {
        images.extend(profile.main_image_url.clone());
    }
    BlockContent::Gallery(GalleryBlock { images })
}

pub(crate) fn benefits(profile: &StoreProfile) -> BlockContent {
    BlockContent::Benefits(ListBlock {
        items: profile.benefits.clone(),
    })
}

/// Each guarantee becomes one line; a profile without guarantees still shows a
/// single negotiable line.
pub(crate) fn salary(profile: &StoreProfile) -> BlockContent {
    let mut lines: Vec<SalaryLine> = profile
        .salary_guarantees
        .iter()
        .map(|term| {
            let amount = SalaryAmount::from_amount(term.amount);
            let hourly = match amount {
                SalaryAmount::Currency { .. } => hourly_equivalent(term.amount, term.hours),
                SalaryAmount::Negotiable => None,
            };
            SalaryLine {
                label: term.label.clone(),
                amount,
                display: amount.display(),
                hourly_equivalent: hourly,
                hourly_display: hourly.map(|value| {
                    format!("時給換算 {}", SalaryAmount::Currency { value }.display())
                }),
            }
        })
        .collect();

    if lines.is_empty() {
        lines.push(SalaryLine {
            label: DEFAULT_GUARANTEE_LABEL.to_string(),
            amount: SalaryAmount::Negotiable,
            display: SalaryAmount::Negotiable.display(),
            hourly_equivalent: None,
            hourly_display: None,
        });
    }

    BlockContent::Salary(SalaryBlock {
        lines,
        note: profile.salary_note.clone(),
    })
}

pub(crate) fn schedule(profile: &StoreProfile) -> BlockContent {
    let days = normalize_days(profile.days_available.as_deref());
    let every_day = EVERY_DAY
        .iter()
        .all(|day| days.iter().any(|candidate| candidate == day));

    BlockContent::Schedule(ScheduleBlock {
        days,
        every_day,
        business_hours: profile
            .business_hours
            .as_deref()
            .map(normalize_business_hours),
    })
}

pub(crate) fn special_offers(profile: &StoreProfile) -> BlockContent {
    BlockContent::SpecialOffers(OffersBlock {
        offers: profile.special_offers.clone(),
    })
}

pub(crate) fn access(profile: &StoreProfile) -> BlockContent {
    BlockContent::Access(AccessBlock {
        address: profile.address.clone(),
        nearest_station: profile.nearest_station.clone(),
        note: profile.access_note.clone(),
    })
}

pub(crate) fn contact(profile: &StoreProfile) -> BlockContent {
    BlockContent::Contact(ContactBlock {
        phones: phone_entries(&profile.phone_numbers, profile.contact_phone.as_deref()),
        emails: email_entries(&profile.emails, profile.contact_email.as_deref()),
    })
}

pub(crate) fn social_links(profile: &StoreProfile) -> BlockContent {
    BlockContent::SocialLinks(SocialBlock {
        links: profile.social_links.clone(),
    })
}

pub(crate) fn security(profile: &StoreProfile) -> BlockContent {
    let items = if profile.privacy_measures.is_empty() {
        DEFAULT_PRIVACY_MEASURES
            .iter()
            .map(|measure| measure.to_string())
            .collect()
    } else {
        profile.privacy_measures.clone()
    };
    BlockContent::Security(ListBlock { items })
}

pub(crate) fn requirements(profile: &StoreProfile) -> BlockContent {
    let minimum_age = profile.minimum_age.unwrap_or(DEFAULT_MINIMUM_AGE);
    BlockContent::Requirements(RequirementsBlock {
        minimum_age,
        age_label: format!("{minimum_age}歳以上"),
        items: profile.requirements.clone(),
    })
}

pub(crate) fn blog(profile: &StoreProfile) -> BlockContent {
    let posts = profile
        .recent_posts
        .iter()
        .take(BLOG_EXCERPT_LIMIT)
        .map(|post| PostExcerpt {
            title: post.title.clone(),
            excerpt: excerpt(&post.body, BLOG_EXCERPT_CHARS),
            date: post.published_at.as_deref().and_then(display_date),
            url: post.url.clone(),
        })
        .collect();
    BlockContent::Blog(BlogBlock { posts })
}

pub(crate) fn footer(profile: &StoreProfile) -> BlockContent {
    BlockContent::Footer(FooterBlock {
        store_name: profile.store_name.clone(),
        copyright: format!("© {}", profile.store_name).trim_end().to_string(),
    })
}

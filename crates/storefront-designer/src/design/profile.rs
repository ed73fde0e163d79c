//! Canonical view of the external store profile.
//!
//! Profiles arrive with drifting field shapes: lists stored as arrays, as
//! JSON-encoded strings or as comma separated text, objects stored as JSON
//! strings, numbers stored as formatted text. Every field is coerced here once
//! so the render variants only ever see one shape.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

const LIST_DELIMITERS: [char; 3] = [',', '，', '、'];
const SOCIAL_PLATFORMS: [&str; 6] = ["x", "twitter", "instagram", "tiktok", "line", "youtube"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreProfile {
    pub store_name: String,
    pub logo_url: Option<String>,
    pub area: Option<String>,
    pub main_image_url: Option<String>,
    pub catchphrase: Option<String>,
    pub description: Option<String>,
    pub gallery_images: Vec<String>,
    pub benefits: Vec<String>,
    pub salary_guarantees: Vec<GuaranteeTerm>,
    pub salary_note: Option<String>,
    /// `None` when the profile never specified working days.
    pub days_available: Option<Vec<String>>,
    pub business_hours: Option<String>,
    pub special_offers: Vec<SpecialOffer>,
    pub address: Option<String>,
    pub nearest_station: Option<String>,
    pub access_note: Option<String>,
    pub phone_numbers: Vec<String>,
    pub contact_phone: Option<String>,
    pub emails: Vec<String>,
    pub contact_email: Option<String>,
    pub social_links: Vec<SocialLink>,
    pub privacy_measures: Vec<String>,
    pub requirements: Vec<String>,
    pub minimum_age: Option<u32>,
    pub recent_posts: Vec<PostSummary>,
}

/// A pay guarantee as entered by the store; amounts are already numeric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuaranteeTerm {
    pub label: String,
    pub amount: Option<f64>,
    pub hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialOffer {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub body: String,
    pub published_at: Option<String>,
    pub url: Option<String>,
}

pub const DEFAULT_GUARANTEE_LABEL: &str = "最低保証";

impl StoreProfile {
    /// Coerces a raw profile payload. Never fails: anything unreadable becomes
    /// the field default and is logged.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => Self::from_map(&map),
                _ => {
                    warn!("store profile payload is not a JSON object; using empty profile");
                    Self::default()
                }
            },
            Value::Null => Self::default(),
            _ => {
                warn!("store profile payload is not a JSON object; using empty profile");
                Self::default()
            }
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let mut salary_guarantees = guarantees(map);
        if salary_guarantees.is_empty() {
            let amount = map.get("guarantee_amount").and_then(parse_amount);
            let hours = map.get("guarantee_hours").and_then(parse_amount);
            if map.contains_key("guarantee_amount") {
                salary_guarantees.push(GuaranteeTerm {
                    label: DEFAULT_GUARANTEE_LABEL.to_string(),
                    amount,
                    hours,
                });
            }
        }

        let days = list(map, "days_available");

        Self {
            store_name: text(map, "store_name")
                .or_else(|| text(map, "name"))
                .unwrap_or_default(),
            logo_url: text(map, "logo_url"),
            area: text(map, "area"),
            main_image_url: text(map, "main_image_url"),
            catchphrase: text(map, "catchphrase"),
            description: text(map, "description"),
            gallery_images: list(map, "gallery_images"),
            benefits: list(map, "benefits"),
            salary_guarantees,
            salary_note: text(map, "salary_note"),
            days_available: if days.is_empty() { None } else { Some(days) },
            business_hours: text(map, "business_hours"),
            special_offers: special_offers(map),
            address: text(map, "address"),
            nearest_station: text(map, "nearest_station"),
            access_note: text(map, "access_note"),
            phone_numbers: list(map, "phone_numbers"),
            contact_phone: text(map, "contact_phone"),
            emails: list(map, "emails"),
            contact_email: text(map, "contact_email"),
            social_links: social_links(map),
            privacy_measures: list(map, "privacy_measures"),
            requirements: list(map, "requirements"),
            minimum_age: map
                .get("minimum_age")
                .and_then(parse_amount)
                .filter(|age| *age >= 0.0)
                .map(|age| age as u32),
            recent_posts: recent_posts(map),
        }
    }
}

/// Parses a money or count value stored as a number or as text such as
/// `"30,000円"`. Non-finite results are discarded.
pub(crate) fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|amount| amount.is_finite()),
        Value::String(raw) => {
            let cleaned: String = raw
                .chars()
                .filter(|c| !matches!(c, ',' | '，' | '円' | '¥' | '￥') && !c.is_whitespace())
                .collect();
            cleaned
                .parse::<f64>()
                .ok()
                .filter(|amount| amount.is_finite())
        }
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) if !raw.trim().is_empty() => Some(raw.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(scalar_text)
}

/// Reads a field that should hold structured JSON, unwrapping JSON-encoded text.
fn structured(map: &Map<String, Value>, key: &str) -> Option<Value> {
    match map.get(key)? {
        Value::Null => None,
        Value::String(raw) if raw.trim().is_empty() => None,
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(field = key, error = %err, "profile field holds undecodable JSON text");
                None
            }
        },
        other => Some(other.clone()),
    }
}

fn list(map: &Map<String, Value>, key: &str) -> Vec<String> {
    match map.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(raw)) => {
            let trimmed = raw.trim();
            if trimmed.starts_with('[') {
                match serde_json::from_str::<Vec<Value>>(trimmed) {
                    Ok(items) => return items.iter().filter_map(scalar_text).collect(),
                    Err(err) => {
                        warn!(field = key, error = %err, "list field holds undecodable JSON text; splitting raw text");
                    }
                }
            }
            trimmed
                .split(LIST_DELIMITERS)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        }
        Some(other) => scalar_text(other).into_iter().collect(),
    }
}

fn object_list(map: &Map<String, Value>, key: &str) -> Vec<Value> {
    match structured(map, key) {
        Some(Value::Array(items)) => items,
        Some(object @ Value::Object(_)) => vec![object],
        Some(_) => {
            warn!(field = key, "profile field is not a list; ignoring it");
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn guarantees(map: &Map<String, Value>) -> Vec<GuaranteeTerm> {
    object_list(map, "salary_guarantees")
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(entry) => Some(GuaranteeTerm {
                label: text(&entry, "label").unwrap_or_else(|| DEFAULT_GUARANTEE_LABEL.to_string()),
                amount: entry.get("amount").and_then(parse_amount),
                hours: entry.get("hours").and_then(parse_amount),
            }),
            _ => None,
        })
        .collect()
}

fn special_offers(map: &Map<String, Value>) -> Vec<SpecialOffer> {
    let items = match map.get("special_offers") {
        Some(Value::String(raw)) if !raw.trim_start().starts_with(['[', '{']) => {
            vec![Value::String(raw.clone())]
        }
        _ => object_list(map, "special_offers"),
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(entry) => text(&entry, "title").map(|title| SpecialOffer {
                title,
                description: text(&entry, "description"),
            }),
            other => scalar_text(&other).map(|title| SpecialOffer {
                title,
                description: None,
            }),
        })
        .collect()
}

fn social_links(map: &Map<String, Value>) -> Vec<SocialLink> {
    let links = match structured(map, "sns_links") {
        Some(Value::Object(links)) => links,
        Some(_) => {
            warn!(field = "sns_links", "social links are not an object; ignoring them");
            return Vec::new();
        }
        None => return Vec::new(),
    };

    let mut known: Vec<SocialLink> = SOCIAL_PLATFORMS
        .iter()
        .filter_map(|platform| {
            text(&links, platform).map(|url| SocialLink {
                platform: platform.to_string(),
                url,
            })
        })
        .collect();

    let others = links
        .iter()
        .filter(|(platform, _)| !SOCIAL_PLATFORMS.contains(&platform.as_str()))
        .filter_map(|(platform, url)| {
            scalar_text(url).map(|url| SocialLink {
                platform: platform.clone(),
                url,
            })
        });
    known.extend(others);
    known
}

fn recent_posts(map: &Map<String, Value>) -> Vec<PostSummary> {
    object_list(map, "recent_posts")
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(entry) => text(&entry, "title").map(|title| PostSummary {
                title,
                body: text(&entry, "body")
                    .or_else(|| text(&entry, "excerpt"))
                    .unwrap_or_default(),
                published_at: text(&entry, "published_at"),
                url: text(&entry, "url"),
            }),
            _ => None,
        })
        .collect()
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use super::catalog::{CatalogEntry, HEADER_ID};

/// The unit of load and save: global style plus every section of the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    #[serde(default)]
    pub global_settings: GlobalStyle,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl DesignDocument {
    /// Decodes a stored payload. `null` means no document was ever saved; a
    /// payload that is not a document at all is an error so the caller can fall
    /// back to defaults. Individual malformed sections are dropped.
    pub fn from_value(value: &Value) -> Result<Option<Self>, DocumentError> {
        Self::decode(value).map(|(document, _)| document)
    }

    /// Like [`DesignDocument::from_value`], also listing every part of the
    /// payload that was discarded or reset to defaults on the way in.
    pub fn decode(value: &Value) -> Result<(Option<Self>, DecodeReport), DocumentError> {
        match value {
            Value::Null => Ok((None, DecodeReport::default())),
            Value::String(raw) if raw.trim().is_empty() => Ok((None, DecodeReport::default())),
            Value::String(raw) => {
                let decoded: Value =
                    serde_json::from_str(raw).map_err(DocumentError::EncodedPayload)?;
                match decoded {
                    Value::String(_) => Err(DocumentError::NotAnObject),
                    other => Self::decode(&other),
                }
            }
            Value::Object(map) => {
                let mut report = DecodeReport::default();
                let global_settings = match map.get("globalSettings") {
                    None | Some(Value::Null) => GlobalStyle::default(),
                    Some(raw) => GlobalStyle::deserialize(raw).unwrap_or_else(|err| {
                        warn!(error = %err, "discarding malformed global settings");
                        report.global_settings_reset = true;
                        GlobalStyle::default()
                    }),
                };

                let sections = match map.get("sections") {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Array(items)) => decode_sections(items, &mut report),
                    Some(_) => return Err(DocumentError::SectionsNotAList),
                };

                Ok((
                    Some(Self {
                        global_settings,
                        sections,
                    }),
                    report,
                ))
            }
            _ => Err(DocumentError::NotAnObject),
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn header(&self) -> Option<&Section> {
        self.section(HEADER_ID)
    }

    /// Non-header sections sorted by their order field.
    pub fn orderable(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self
            .sections
            .iter()
            .filter(|section| !section.is_header())
            .collect();
        sections.sort_by_key(|section| section.order);
        sections
    }
}

fn decode_sections(items: &[Value], report: &mut DecodeReport) -> Vec<Section> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match Section::deserialize(item) {
            Ok(section) => {
                if matches!(item.get("settings"), Some(raw) if !raw.is_object() && !raw.is_null())
                {
                    warn!(index, section_id = %section.id, "resetting malformed section settings");
                    report.reset_settings.push(section.id.clone());
                }
                Some(section)
            }
            Err(err) => {
                warn!(index, error = %err, "dropping malformed section entry");
                report.dropped_entries.push(index);
                None
            }
        })
        .collect()
}

/// What a lenient decode had to throw away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Positions in the stored `sections` array that could not be read at all.
    pub dropped_entries: Vec<usize>,
    /// Sections kept with their style overrides reset.
    pub reset_settings: Vec<String>,
    pub global_settings_reset: bool,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.dropped_entries.is_empty()
            && self.reset_settings.is_empty()
            && !self.global_settings_reset
    }

    /// Short description for logs and user notices.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.global_settings_reset {
            parts.push("global settings reset".to_string());
        }
        if !self.reset_settings.is_empty() {
            parts.push(format!(
                "settings reset for {}",
                self.reset_settings.join(", ")
            ));
        }
        if !self.dropped_entries.is_empty() {
            let positions: Vec<String> = self
                .dropped_entries
                .iter()
                .map(ToString::to_string)
                .collect();
            parts.push(format!(
                "unreadable section entries at {}",
                positions.join(", ")
            ));
        }
        parts.join("; ")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("design payload is not a JSON object")]
    NotAnObject,
    #[error("design payload sections are not a list")]
    SectionsNotAList,
    #[error("design payload holds undecodable JSON text: {0}")]
    EncodedPayload(#[source] serde_json::Error),
}

/// One content section of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_order")]
    pub order: u32,
    #[serde(default = "default_visible", deserialize_with = "lenient_visible")]
    pub visible: bool,
    #[serde(default, deserialize_with = "lenient_settings")]
    pub settings: SectionStyleOverride,
}

impl Section {
    pub fn from_entry(entry: &CatalogEntry, order: u32) -> Self {
        Self {
            id: entry.id.to_string(),
            title: entry.default_title.to_string(),
            order,
            visible: true,
            settings: entry.default_style.clone(),
        }
    }

    pub fn is_header(&self) -> bool {
        self.id == HEADER_ID
    }
}

fn default_visible() -> bool {
    true
}

/// Product-wide style defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawGlobalStyle")]
pub struct GlobalStyle {
    pub main_color: String,
    pub sub_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub font_family: String,
    pub border_radius: u32,
    pub max_width: u32,
    pub hide_section_titles: bool,
}

impl Default for GlobalStyle {
    fn default() -> Self {
        Self {
            main_color: "#3b82f6".to_string(),
            sub_color: "#64748b".to_string(),
            accent_color: "#f59e0b".to_string(),
            background_color: "#ffffff".to_string(),
            font_family: "sans-serif".to_string(),
            border_radius: 8,
            max_width: 1200,
            hide_section_titles: false,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGlobalStyle {
    #[serde(default, deserialize_with = "lenient_color")]
    main_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_color")]
    sub_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_color")]
    accent_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_color")]
    background_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_color")]
    font_family: Option<String>,
    #[serde(default, deserialize_with = "lenient_px")]
    border_radius: Option<u32>,
    #[serde(default, deserialize_with = "lenient_px")]
    max_width: Option<u32>,
    #[serde(default, deserialize_with = "lenient_flag")]
    hide_section_titles: Option<bool>,
}

impl From<RawGlobalStyle> for GlobalStyle {
    fn from(raw: RawGlobalStyle) -> Self {
        let defaults = GlobalStyle::default();
        Self {
            main_color: raw.main_color.unwrap_or(defaults.main_color),
            sub_color: raw.sub_color.unwrap_or(defaults.sub_color),
            accent_color: raw.accent_color.unwrap_or(defaults.accent_color),
            background_color: raw.background_color.unwrap_or(defaults.background_color),
            font_family: raw.font_family.unwrap_or(defaults.font_family),
            border_radius: raw.border_radius.unwrap_or(defaults.border_radius),
            max_width: raw.max_width.unwrap_or(defaults.max_width),
            hide_section_titles: raw
                .hide_section_titles
                .unwrap_or(defaults.hide_section_titles),
        }
    }
}

/// Per-section style fields; anything left unset falls back during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStyleOverride {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_color"
    )]
    pub background_color: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_color"
    )]
    pub text_color: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_color"
    )]
    pub title_color: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_color"
    )]
    pub border_color: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_px"
    )]
    pub font_size: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_px"
    )]
    pub padding: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_px"
    )]
    pub border_radius: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_px"
    )]
    pub border_width: Option<u32>,
}

/// Interprets a pixel value stored as a number, `"16"` or `"16px"`.
pub(crate) fn parse_px(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|float| float.is_finite() && *float >= 0.0)
                    .map(|float| float.round() as u64)
            })
            .and_then(|raw| u32::try_from(raw).ok()),
        Value::String(raw) => {
            let trimmed = raw.trim();
            let digits = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
            digits.parse::<u32>().ok()
        }
        _ => None,
    }
}

fn lenient_px<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_px(&value))
}

fn lenient_color<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(raw) if !raw.trim().is_empty() => Some(raw.trim().to_string()),
        _ => None,
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(flag) => Some(flag),
        Value::Number(number) => number.as_i64().map(|raw| raw != 0),
        Value::String(raw) => match raw.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn lenient_visible<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_flag(deserializer)?.unwrap_or(true))
}

fn lenient_order<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_px(&value).unwrap_or(0))
}

fn lenient_settings<'de, D>(deserializer: D) -> Result<SectionStyleOverride, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(_) => SectionStyleOverride::deserialize(&value).unwrap_or_default(),
        _ => SectionStyleOverride::default(),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(raw) => raw,
        _ => String::new(),
    })
}

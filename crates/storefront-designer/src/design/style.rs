use serde::Serialize;

use super::document::{GlobalStyle, Section};

pub const DEFAULT_SECTION_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_TEXT_COLOR: &str = "#333333";
pub const DEFAULT_BORDER_COLOR: &str = "#e5e5e5";
pub const DEFAULT_FONT_SIZE: u32 = 16;
pub const DEFAULT_PADDING: u32 = 24;
pub const DEFAULT_BORDER_WIDTH: u32 = 0;

/// Fully resolved style for one section; every field carries a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStyle {
    pub background_color: String,
    pub text_color: String,
    pub title_color: String,
    pub border_color: String,
    pub accent_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub padding: u32,
    pub border_radius: u32,
    pub border_width: u32,
    pub max_width: u32,
    pub show_title: bool,
}

/// Cascades the section override over the documented defaults.
///
/// | field              | fallback                    |
/// |--------------------|-----------------------------|
/// | `background_color` | `#ffffff`                   |
/// | `text_color`       | `#333333`                   |
/// | `title_color`      | `global.main_color`         |
/// | `border_color`     | `#e5e5e5`                   |
/// | `font_size`        | 16                          |
/// | `padding`          | 24                          |
/// | `border_radius`    | `global.border_radius`      |
/// | `border_width`     | 0                           |
///
/// `accent_color`, `font_family` and `max_width` always come from the global
/// style, and titles are shown unless `hide_section_titles` is set.
pub fn resolve(section: &Section, global: &GlobalStyle) -> ResolvedStyle {
    let settings = &section.settings;

    ResolvedStyle {
        background_color: settings
            .background_color
            .clone()
            .unwrap_or_else(|| DEFAULT_SECTION_BACKGROUND.to_string()),
        text_color: settings
            .text_color
            .clone()
            .unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string()),
        title_color: settings
            .title_color
            .clone()
            .unwrap_or_else(|| global.main_color.clone()),
        border_color: settings
            .border_color
            .clone()
            .unwrap_or_else(|| DEFAULT_BORDER_COLOR.to_string()),
        accent_color: global.accent_color.clone(),
        font_family: global.font_family.clone(),
        font_size: settings.font_size.unwrap_or(DEFAULT_FONT_SIZE),
        padding: settings.padding.unwrap_or(DEFAULT_PADDING),
        border_radius: settings.border_radius.unwrap_or(global.border_radius),
        border_width: settings.border_width.unwrap_or(DEFAULT_BORDER_WIDTH),
        max_width: global.max_width,
        show_title: !global.hide_section_titles,
    }
}

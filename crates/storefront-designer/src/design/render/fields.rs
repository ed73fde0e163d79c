//! Derived display fields computed from profile values.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

pub const NEGOTIABLE_LABEL: &str = "応相談";
pub const EVERY_DAY: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];

const RANGE_SEPARATORS: [char; 9] = ['-', '~', '〜', '～', '－', '−', '‐', '–', '—'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SalaryAmount {
    Currency { value: u64 },
    Negotiable,
}

impl SalaryAmount {
    /// Only positive numeric amounts are shown as money.
    pub fn from_amount(amount: Option<f64>) -> Self {
        match amount.filter(|amount| *amount > 0.0).map(|amount| amount.round() as u64) {
            Some(value) if value > 0 => Self::Currency { value },
            _ => Self::Negotiable,
        }
    }

    pub fn display(self) -> String {
        match self {
            Self::Currency { value } => format_yen(value),
            Self::Negotiable => NEGOTIABLE_LABEL.to_string(),
        }
    }
}

/// `30000` becomes `30,000円`.
pub fn format_yen(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push('円');
    grouped
}

/// Hourly equivalent of a guarantee, rounded to the nearest yen. Requires a
/// positive amount and a positive number of hours.
pub fn hourly_equivalent(amount: Option<f64>, hours: Option<f64>) -> Option<u64> {
    let amount = amount.filter(|amount| *amount > 0.0)?;
    let hours = hours.filter(|hours| *hours > 0.0)?;
    Some((amount / hours).round() as u64)
}

/// Canonical day labels. Absent or empty input means every day.
pub fn normalize_days(days: Option<&[String]>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for raw in days.unwrap_or_default() {
        let Some(day) = day_label(raw) else {
            continue;
        };
        if !normalized.iter().any(|existing| existing == &day) {
            normalized.push(day);
        }
    }

    if normalized.is_empty() {
        EVERY_DAY.iter().map(|day| day.to_string()).collect()
    } else {
        normalized
    }
}

fn day_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let stripped = trimmed
        .strip_suffix("曜日")
        .or_else(|| trimmed.strip_suffix('曜'))
        .unwrap_or(trimmed)
        .trim();
    if stripped.is_empty() {
        return None;
    }

    let english = match stripped.to_ascii_lowercase().as_str() {
        "mon" | "monday" => Some("月"),
        "tue" | "tues" | "tuesday" => Some("火"),
        "wed" | "wednesday" => Some("水"),
        "thu" | "thur" | "thurs" | "thursday" => Some("木"),
        "fri" | "friday" => Some("金"),
        "sat" | "saturday" => Some("土"),
        "sun" | "sunday" => Some("日"),
        _ => None,
    };
    Some(english.map(str::to_string).unwrap_or_else(|| stripped.to_string()))
}

/// Rewrites `10時` as `10:00` (and `10時30分` as `10:30`, `10時半` as
/// `10:30`) and unifies tilde and wave-dash range separators into `-`.
pub fn normalize_business_hours(raw: &str) -> String {
    let chars: Vec<char> = raw.trim().chars().map(halfwidth_digit).collect();
    let mut normalized = String::with_capacity(raw.len());
    let mut index = 0;

    while index < chars.len() {
        let current = chars[index];

        if current.is_ascii_digit() {
            let start = index;
            while index < chars.len() && chars[index].is_ascii_digit() {
                index += 1;
            }
            let hour: String = chars[start..index].iter().collect();
            normalized.push_str(&hour);

            if chars.get(index) != Some(&'時') {
                continue;
            }
            index += 1;

            let minute_start = index;
            let mut minute_end = index;
            while minute_end < chars.len() && chars[minute_end].is_ascii_digit() {
                minute_end += 1;
            }

            if minute_end > minute_start && chars.get(minute_end) == Some(&'分') {
                let minutes: String = chars[minute_start..minute_end].iter().collect();
                normalized.push_str(&format!(":{minutes:0>2}"));
                index = minute_end + 1;
            } else if chars.get(index) == Some(&'半') {
                normalized.push_str(":30");
                index += 1;
            } else {
                normalized.push_str(":00");
            }
            continue;
        }

        if RANGE_SEPARATORS.contains(&current) {
            let kept = normalized.trim_end().len();
            normalized.truncate(kept);
            normalized.push('-');
            index += 1;
            while index < chars.len() && chars[index].is_whitespace() {
                index += 1;
            }
            continue;
        }

        normalized.push(current);
        index += 1;
    }

    normalized
}

fn halfwidth_digit(c: char) -> char {
    match c {
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactEntry {
    pub value: String,
    pub href: String,
    pub primary: bool,
}

/// Unions the list field with the legacy scalar (list entries first),
/// dropping blanks and duplicates. The first surviving entry is primary.
pub fn phone_entries(numbers: &[String], legacy: Option<&str>) -> Vec<ContactEntry> {
    union_contacts(numbers, legacy, phone_key, |value| {
        format!("tel:{}", phone_key(value))
    })
}

pub fn email_entries(emails: &[String], legacy: Option<&str>) -> Vec<ContactEntry> {
    union_contacts(emails, legacy, |value| value.to_lowercase(), |value| {
        format!("mailto:{value}")
    })
}

fn phone_key(value: &str) -> String {
    value
        .chars()
        .map(halfwidth_digit)
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

fn union_contacts(
    values: &[String],
    legacy: Option<&str>,
    key: impl Fn(&str) -> String,
    href: impl Fn(&str) -> String,
) -> Vec<ContactEntry> {
    let mut seen: Vec<String> = Vec::new();
    let mut entries = Vec::new();

    for raw in values.iter().map(String::as_str).chain(legacy) {
        let value = raw.trim();
        if value.is_empty() {
            continue;
        }
        let identity = key(value);
        if seen.contains(&identity) {
            continue;
        }
        seen.push(identity);
        entries.push(ContactEntry {
            value: value.to_string(),
            href: href(value),
            primary: entries.is_empty(),
        });
    }

    entries
}

/// Plain-text excerpt of at most `max_chars` characters, markup removed.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    let mut plain = String::with_capacity(body.len());
    let mut in_tag = false;
    for c in body.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                plain.push(' ');
            }
            _ if !in_tag => plain.push(c),
            _ => {}
        }
    }

    let collapsed = plain.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let mut truncated: String = collapsed.chars().take(max_chars).collect();
        truncated.push('…');
        truncated
    }
}

/// Formats a stored publication timestamp as `YYYY.MM.DD`.
pub fn display_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|stamp| stamp.date())
        })
        .ok()?;
    Some(date.format("%Y.%m.%d").to_string())
}

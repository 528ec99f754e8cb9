//! Display formatting for post metadata and previews.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

pub const UNKNOWN_DATE: &str = "Unknown Date";
pub const UNTITLED_POST: &str = "Untitled Post";
pub const EXCERPT_CHARS: usize = 150;

/// Format a server timestamp as `Month D, YYYY`.
///
/// RFC 3339 timestamps are rendered in UTC. A bare or zone-less timestamp
/// is formatted from its date part; anything else falls back to the raw
/// text before the `T`.
#[must_use]
pub fn format_post_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return UNKNOWN_DATE.to_owned();
    };
    let date_part = raw.split('T').next().unwrap_or(raw);
    let date = OffsetDateTime::parse(raw, &Rfc3339)
        .map(OffsetDateTime::date)
        .or_else(|_| Date::parse(date_part, format_description!("[year]-[month]-[day]")));
    date.ok().and_then(long_date).unwrap_or_else(|| date_part.to_owned())
}

fn long_date(date: Date) -> Option<String> {
    date.format(format_description!("[month repr:long] [day padding:none], [year]")).ok()
}

/// Title for display, substituting a placeholder for a blank title.
#[must_use]
pub fn display_title(title: &str) -> &str {
    if title.trim().is_empty() { UNTITLED_POST } else { title }
}

/// Remove `<...>` tags, keeping the text between them.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) if close > 0 => rest = &after[close + 1..],
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Plain-text preview of an HTML body, cut to `max_chars` with `...`.
#[must_use]
pub fn excerpt(html: &str, max_chars: usize) -> String {
    let text = strip_tags(html);
    if text.chars().count() <= max_chars {
        return text;
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

use chrono::{DateTime, Utc};
use kinship::EntityRef;

/// Format an optional timestamp, `-` when unknown
pub fn format_datetime(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Collapse whitespace and cut `text` to `max` characters
pub fn truncate(text: &str, max: usize) -> String {
    let compact = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.chars().count() <= max {
        return compact;
    }
    let cut: String = compact.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Display name of a reference, falling back to its id
pub fn author_label(author: Option<&EntityRef>) -> String {
    match author {
        Some(author) => author
            .display_name()
            .map(str::to_string)
            .or_else(|| author.id().ok())
            .unwrap_or_else(|| "unknown".to_string()),
        None => "unknown".to_string(),
    }
}

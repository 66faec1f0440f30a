/// Utilities for date and time formatting
///
/// Display formats for tables and detail views, and the reverse direction:
/// turning API timestamps into values `<input type="date|time">` accepts.
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}.{}.{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Optional date column: "—" when absent
pub fn format_date_opt(date_str: Option<&str>) -> String {
    match date_str {
        Some(d) if !d.trim().is_empty() => format_date(d),
        _ => "—".to_string(),
    }
}

/// Value for `<input type="date">`: "2024-03-15T14:02:26Z" -> "2024-03-15"
pub fn input_date(value: &str) -> String {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return dt.date().format("%Y-%m-%d").to_string();
    }
    let date_part = value.get(..10).unwrap_or(value);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(d) => d.format("%Y-%m-%d").to_string(),
        Err(_) => String::new(),
    }
}

/// Value for `<input type="time">`: "09:30:00" or "2024-03-15T09:30:00Z" -> "09:30"
pub fn input_time(value: &str) -> String {
    let value = value.trim();
    let time_part = value.split_once('T').map(|(_, t)| t).unwrap_or(value);
    let time_part = time_part.get(..8).unwrap_or(time_part);
    NaiveTime::parse_from_str(time_part, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time_part, "%H:%M"))
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

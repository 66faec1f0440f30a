//! Declarative validation rules for form drafts
//!
//! Rules run on the client before any request is made. Each entity declares
//! its rule list; `validate` returns one message per field, the first failing
//! rule for that field wins.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::form::{DraftRecord, FieldErrors, FormMode};

pub const END_DATE_BEFORE_START: &str = "End date cannot be before start date";
pub const END_TIME_NOT_AFTER_START: &str = "End time must be after start time";

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(localhost|[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+)(:\d{1,5})?([/?#]\S*)?$")
        .expect("valid url regex")
});

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid color regex"));

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required {
        field: &'static str,
        label: &'static str,
    },
    /// Required in create mode only (the value cannot change after creation)
    RequiredOnCreate {
        field: &'static str,
        label: &'static str,
    },
    MaxLength {
        field: &'static str,
        label: &'static str,
        max: usize,
    },
    NumberRange {
        field: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
    },
    /// `end` must not be before `start` (YYYY-MM-DD)
    DateNotBefore {
        start: &'static str,
        end: &'static str,
    },
    /// `end` strictly after `start` (HH:MM), at least `min_minutes` apart
    TimeAfter {
        start: &'static str,
        end: &'static str,
        min_minutes: i64,
    },
    Url {
        field: &'static str,
        label: &'static str,
    },
    ColorToken {
        field: &'static str,
        label: &'static str,
    },
}

impl Rule {
    pub const fn required(field: &'static str, label: &'static str) -> Self {
        Rule::Required { field, label }
    }

    pub const fn max_length(field: &'static str, label: &'static str, max: usize) -> Self {
        Rule::MaxLength { field, label, max }
    }

    /// Field that receives the error message
    pub fn field(&self) -> &'static str {
        match self {
            Rule::Required { field, .. }
            | Rule::RequiredOnCreate { field, .. }
            | Rule::MaxLength { field, .. }
            | Rule::NumberRange { field, .. }
            | Rule::Url { field, .. }
            | Rule::ColorToken { field, .. } => field,
            Rule::DateNotBefore { end, .. } | Rule::TimeAfter { end, .. } => end,
        }
    }

    /// Optional fields are only checked when filled in.
    pub fn check(&self, draft: &DraftRecord, mode: FormMode) -> Option<String> {
        match self {
            Rule::Required { field, label } => draft
                .value(field)
                .is_none()
                .then(|| format!("{} is required", label)),
            Rule::RequiredOnCreate { field, label } => (mode == FormMode::Create
                && draft.value(field).is_none())
            .then(|| format!("{} is required", label)),
            Rule::MaxLength { field, label, max } => {
                let len = draft.get(field).trim().chars().count();
                (len > *max).then(|| format!("{} must be at most {} characters", label, max))
            }
            Rule::NumberRange {
                field,
                label,
                min,
                max,
            } => {
                let raw = draft.value(field)?;
                match raw.parse::<f64>() {
                    Ok(v) if v.is_finite() && v >= *min && v <= *max => None,
                    Ok(_) => Some(format!("{} must be between {} and {}", label, min, max)),
                    Err(_) => Some(format!("{} must be a number", label)),
                }
            }
            Rule::DateNotBefore { start, end } => {
                let start = parse_date(draft.value(start)?)?;
                let end = parse_date(draft.value(end)?)?;
                (end < start).then(|| END_DATE_BEFORE_START.to_string())
            }
            Rule::TimeAfter {
                start,
                end,
                min_minutes,
            } => {
                let start = parse_time(draft.value(start)?)?;
                let end = parse_time(draft.value(end)?)?;
                if end <= start {
                    Some(END_TIME_NOT_AFTER_START.to_string())
                } else if (end - start).num_minutes() < *min_minutes {
                    Some(format!("Duration must be at least {} minutes", min_minutes))
                } else {
                    None
                }
            }
            Rule::Url { field, label } => {
                let raw = draft.value(field)?;
                (!URL_RE.is_match(raw)).then(|| format!("{} must be a valid URL", label))
            }
            Rule::ColorToken { field, label } => {
                let raw = draft.value(field)?;
                (!COLOR_RE.is_match(raw))
                    .then(|| format!("{} must be a hex color like #1A2B3C", label))
            }
        }
    }
}

/// Accepts `YYYY-MM-DD` and full ISO timestamps
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Accepts `HH:MM` and `HH:MM:SS`
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

pub fn validate(draft: &DraftRecord, rules: &[Rule], mode: FormMode) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for rule in rules {
        let field = rule.field();
        if errors.contains(field) {
            continue;
        }
        if let Some(message) = rule.check(draft, mode) {
            errors.set(field, message);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle_rules() -> Vec<Rule> {
        vec![
            Rule::required("name", "Name"),
            Rule::max_length("name", "Name", 10),
            Rule::required("cycle_start", "Start date"),
            Rule::required("cycle_end", "End date"),
            Rule::DateNotBefore {
                start: "cycle_start",
                end: "cycle_end",
            },
        ]
    }

    #[test]
    fn test_end_before_start() {
        let draft = DraftRecord::from_pairs([
            ("name", "Q1"),
            ("cycle_start", "2024-02-10"),
            ("cycle_end", "2024-02-01"),
        ]);
        let errors = validate(&draft, &cycle_rules(), FormMode::Create);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("cycle_end"), Some(END_DATE_BEFORE_START));
    }

    #[test]
    fn test_same_day_is_allowed() {
        let draft = DraftRecord::from_pairs([
            ("name", "Q1"),
            ("cycle_start", "2024-02-10"),
            ("cycle_end", "2024-02-10T00:00:00Z"),
        ]);
        assert!(validate(&draft, &cycle_rules(), FormMode::Create).is_empty());
    }

    #[test]
    fn test_first_failing_rule_per_field_wins() {
        let draft = DraftRecord::from_pairs([("name", "   ")]);
        let errors = validate(&draft, &cycle_rules(), FormMode::Create);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("cycle_end"), Some("End date is required"));

        let draft = DraftRecord::from_pairs([("name", "Quarter one review")]);
        let errors = validate(&draft, &cycle_rules(), FormMode::Create);
        assert_eq!(errors.get("name"), Some("Name must be at most 10 characters"));
    }

    #[test]
    fn test_required_on_create_skipped_in_edit() {
        let rules = [Rule::RequiredOnCreate {
            field: "job_id",
            label: "Job",
        }];
        let draft = DraftRecord::new();
        assert_eq!(
            validate(&draft, &rules, FormMode::Create).get("job_id"),
            Some("Job is required")
        );
        assert!(validate(&draft, &rules, FormMode::Edit).is_empty());
    }

    #[test]
    fn test_time_order_and_duration() {
        let rules = [Rule::TimeAfter {
            start: "start_time",
            end: "end_time",
            min_minutes: 15,
        }];
        let check = |start: &str, end: &str| {
            let draft = DraftRecord::from_pairs([("start_time", start), ("end_time", end)]);
            validate(&draft, &rules, FormMode::Create)
                .get("end_time")
                .map(str::to_string)
        };
        assert_eq!(check("10:00", "10:00").as_deref(), Some(END_TIME_NOT_AFTER_START));
        assert_eq!(check("10:00", "09:30").as_deref(), Some(END_TIME_NOT_AFTER_START));
        assert_eq!(
            check("10:00", "10:10").as_deref(),
            Some("Duration must be at least 15 minutes")
        );
        assert_eq!(check("10:00", "10:15:00"), None);
    }

    #[test]
    fn test_number_range() {
        let rules = [Rule::NumberRange {
            field: "budget",
            label: "Budget",
            min: 0.0,
            max: 1000.0,
        }];
        let check = |v: &str| {
            let draft = DraftRecord::from_pairs([("budget", v)]);
            validate(&draft, &rules, FormMode::Create)
                .get("budget")
                .map(str::to_string)
        };
        assert_eq!(check(""), None);
        assert_eq!(check("250.5"), None);
        assert_eq!(check("-1").as_deref(), Some("Budget must be between 0 and 1000"));
        assert_eq!(check("abc").as_deref(), Some("Budget must be a number"));
    }

    #[test]
    fn test_url_and_color_formats() {
        let rules = [
            Rule::Url {
                field: "link",
                label: "Link",
            },
            Rule::ColorToken {
                field: "color",
                label: "Color",
            },
        ];
        let ok = DraftRecord::from_pairs([
            ("link", "https://meet.example.com/abc-def?pwd=1"),
            ("color", "#1a2B3c"),
        ]);
        assert!(validate(&ok, &rules, FormMode::Create).is_empty());

        let bad = DraftRecord::from_pairs([("link", "meet.example.com"), ("color", "blue")]);
        let errors = validate(&bad, &rules, FormMode::Create);
        assert_eq!(errors.get("link"), Some("Link must be a valid URL"));
        assert_eq!(errors.get("color"), Some("Color must be a hex color like #1A2B3C"));

        let short = DraftRecord::from_pairs([("link", "http://localhost:8080"), ("color", "#fff")]);
        assert!(validate(&short, &rules, FormMode::Create).is_empty());
    }
}

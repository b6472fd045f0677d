//! Query-string normalization shared by the API and widget handlers.
//!
//! Everything here is forgiving: unknown views and themes fall back to their
//! defaults, only a malformed date is an error the caller sees.

use lunchboard_menu::dates;
use time::Date;

use crate::error::AppError;

/// The views a consumer can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Week,
    Remainder,
    Today,
    Tomorrow,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::Week => "week",
            View::Remainder => "remainder",
            View::Today => "today",
            View::Tomorrow => "tomorrow",
        }
    }
}

/// Unknown or missing views mean "week".
pub fn normalize_view(raw: Option<&str>) -> View {
    match raw.unwrap_or("week").trim().to_lowercase().as_str() {
        "remainder" => View::Remainder,
        "today" => View::Today,
        "tomorrow" => View::Tomorrow,
        _ => View::Week,
    }
}

/// Widget color themes; unknown or missing means dark.
pub fn normalize_theme(raw: Option<&str>) -> &'static str {
    match raw.unwrap_or("dark").trim().to_lowercase().as_str() {
        "light" => "light",
        "transparent" => "transparent",
        _ => "dark",
    }
}

/// A handful of spellings turn a flag off; everything else leaves it on.
pub fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    match raw {
        None => default,
        Some(v) => !matches!(
            v.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off" | "disable" | "disabled"
        ),
    }
}

/// `YYYY-MM-DD`, or today in the configured timezone when absent. A present
/// but malformed date is the caller's mistake and maps to a 400.
pub fn resolve_date(raw: Option<&str>, timezone: &str) -> Result<Date, AppError> {
    match raw.filter(|s| !s.is_empty()) {
        Some(s) => dates::parse_date(s).map_err(|_| AppError::BadDate(s.to_string())),
        None => Ok(dates::today_in(timezone)),
    }
}

/// `days_ahead` as the widget reads it: absent stays `None` so the caller
/// can branch, unparseable becomes 0, negatives are clamped to 0.
pub fn parse_days_ahead(raw: Option<&str>) -> Option<i32> {
    let raw = raw.filter(|s| !s.is_empty())?;
    Some(raw.trim().parse::<i32>().map_or(0, |n| n.max(0)))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn views_normalize_with_week_fallback() {
        assert_eq!(normalize_view(None), View::Week);
        assert_eq!(normalize_view(Some("WEEK")), View::Week);
        assert_eq!(normalize_view(Some(" remainder ")), View::Remainder);
        assert_eq!(normalize_view(Some("today")), View::Today);
        assert_eq!(normalize_view(Some("tomorrow")), View::Tomorrow);
        assert_eq!(normalize_view(Some("brunch")), View::Week);
    }

    #[test]
    fn themes_normalize_with_dark_fallback() {
        assert_eq!(normalize_theme(None), "dark");
        assert_eq!(normalize_theme(Some("Light")), "light");
        assert_eq!(normalize_theme(Some("transparent")), "transparent");
        assert_eq!(normalize_theme(Some("neon")), "dark");
    }

    #[test]
    fn bool_flags_only_turn_off_for_known_spellings() {
        assert!(parse_bool(None, true));
        assert!(!parse_bool(None, false));
        for off in ["0", "false", "No", " OFF ", "disable", "disabled"] {
            assert!(!parse_bool(Some(off), true), "{off:?}");
        }
        assert!(parse_bool(Some("1"), true));
        assert!(parse_bool(Some("yes"), true));
        assert!(parse_bool(Some("maybe"), true));
    }

    #[test]
    fn explicit_dates_parse_and_bad_ones_are_errors() {
        assert_eq!(
            resolve_date(Some("2026-03-02"), "America/Chicago").unwrap(),
            date!(2026 - 03 - 02),
        );
        assert!(resolve_date(Some("03/02/2026"), "America/Chicago").is_err());
    }

    #[test]
    fn missing_date_defaults_to_today() {
        let today = resolve_date(None, "UTC").unwrap();
        assert!((today - dates::today_in("UTC")).whole_days().abs() <= 1);
    }

    #[test]
    fn days_ahead_parses_clamps_and_defaults() {
        assert_eq!(parse_days_ahead(None), None);
        assert_eq!(parse_days_ahead(Some("")), None);
        assert_eq!(parse_days_ahead(Some("3")), Some(3));
        assert_eq!(parse_days_ahead(Some("-2")), Some(0));
        assert_eq!(parse_days_ahead(Some("soon")), Some(0));
    }
}

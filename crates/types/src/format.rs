//! Display formatting shared by the PDF and print renderers.

use chrono::NaiveDate;
use std::fmt;

pub const THEME_TBD: &str = "Theme TBD";

/// "March 3, 2025".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// "March 3, 2025 → March 7, 2025".
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} \u{2192} {}", format_date(start), format_date(end))
}

/// Maps a day code to its English name. Unknown codes are returned unchanged.
pub fn format_day_of_week(code: &str) -> String {
    match DayOfWeek::from_code(code) {
        Some(day) => day.to_string(),
        None => code.to_string(),
    }
}

/// A week's title, or "Theme TBD" when the title is missing or blank.
pub fn theme_or_default(title: Option<&str>) -> &str {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => THEME_TBD,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];

    /// Accepts the stored codes (`MON`..`SUN`) and full names, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL.into_iter().find(|day| {
            code.eq_ignore_ascii_case(day.code()) || code.eq_ignore_ascii_case(day.name())
        })
    }

    pub fn code(self) -> &'static str {
        match self {
            DayOfWeek::Mon => "MON",
            DayOfWeek::Tue => "TUE",
            DayOfWeek::Wed => "WED",
            DayOfWeek::Thu => "THU",
            DayOfWeek::Fri => "FRI",
            DayOfWeek::Sat => "SAT",
            DayOfWeek::Sun => "SUN",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Mon => "Monday",
            DayOfWeek::Tue => "Tuesday",
            DayOfWeek::Wed => "Wednesday",
            DayOfWeek::Thu => "Thursday",
            DayOfWeek::Fri => "Friday",
            DayOfWeek::Sat => "Saturday",
            DayOfWeek::Sun => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_long_month_without_padding() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(format_date(date), "March 3, 2025");
        let end = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        assert_eq!(format_date_range(date, end), "March 3, 2025 \u{2192} March 17, 2025");
    }

    #[test]
    fn day_codes_map_to_names() {
        assert_eq!(format_day_of_week("MON"), "Monday");
        assert_eq!(format_day_of_week("sun"), "Sunday");
        assert_eq!(format_day_of_week("friday"), "Friday");
    }

    #[test]
    fn unknown_day_code_passes_through() {
        assert_eq!(format_day_of_week("HOLIDAY"), "HOLIDAY");
        assert_eq!(format_day_of_week(""), "");
    }

    #[test]
    fn blank_theme_falls_back() {
        assert_eq!(theme_or_default(None), THEME_TBD);
        assert_eq!(theme_or_default(Some("   ")), THEME_TBD);
        assert_eq!(theme_or_default(Some("Ocean Life")), "Ocean Life");
    }
}

//! Non-fatal problems found while exporting. They never stop a render; they are logged
//! and handed back next to the finished document.

use plansheet_layout::LayoutWarning;
use plansheet_types::DailyEntry;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ExportWarning {
    /// A day's activity map is not keyed by exactly the canonical slot set, or has slot
    /// values that are not lists of activities. Present slots were rendered and the rest
    /// show the empty-slot placeholder.
    MalformedActivityMap {
        day_id: String,
        missing: Vec<String>,
        unknown: Vec<String>,
        malformed: Vec<String>,
    },
    Layout(LayoutWarning),
}

impl fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportWarning::MalformedActivityMap {
                day_id,
                missing,
                unknown,
                malformed,
            } => write!(
                f,
                "activity map of day '{}' is malformed: {} missing slot(s), unknown keys {:?}, unreadable slots {:?}",
                day_id,
                missing.len(),
                unknown,
                malformed
            ),
            ExportWarning::Layout(w) => write!(f, "layout: {}", w),
        }
    }
}

impl From<LayoutWarning> for ExportWarning {
    fn from(w: LayoutWarning) -> Self {
        ExportWarning::Layout(w)
    }
}

/// Checks every day's activity map against the canonical slots and logs each deviation.
pub fn check_activity_maps<'a, I>(days: I) -> Vec<ExportWarning>
where
    I: IntoIterator<Item = &'a DailyEntry>,
{
    days.into_iter()
        .filter_map(|day| {
            let report = day.activities.conformance();
            if report.is_conforming() {
                return None;
            }
            let warning = ExportWarning::MalformedActivityMap {
                day_id: day.id.clone(),
                missing: report.missing.iter().map(|s| s.to_string()).collect(),
                unknown: report.unknown,
                malformed: report.malformed,
            };
            log::warn!("{}", warning);
            Some(warning)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use plansheet_types::{Activity, ActivityMap, TIME_SLOTS};

    fn day(id: &str, activities: ActivityMap) -> DailyEntry {
        DailyEntry {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            day_of_week: "MON".to_string(),
            activities,
            reflections: None,
        }
    }

    #[test]
    fn full_and_empty_maps_are_clean() {
        let full: ActivityMap = TIME_SLOTS
            .iter()
            .map(|slot| (*slot, vec![Activity::new("Care", "Routine")]))
            .collect();
        let days = [day("full", full), day("empty", ActivityMap::new())];
        assert!(check_activity_maps(&days).is_empty());
    }

    #[test]
    fn unknown_key_is_reported_per_day() {
        let map = ActivityMap::new().with("Lunch", vec![Activity::new("Care", "Eat")]);
        let days = [day("d7", map)];
        let warnings = check_activity_maps(&days);
        assert_eq!(warnings.len(), 1);
        let ExportWarning::MalformedActivityMap { day_id, missing, unknown, .. } = &warnings[0] else {
            panic!("unexpected warning {:?}", warnings[0]);
        };
        assert_eq!(day_id, "d7");
        assert_eq!(missing.len(), 12);
        assert_eq!(unknown, &vec!["Lunch".to_string()]);
    }
}

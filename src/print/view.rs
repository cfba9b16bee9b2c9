//! Template view models.
//!
//! The templates run in strict mode, so every field is always serialized; optional
//! values become `null` rather than disappearing.

use crate::config::ExportConfig;
use crate::projector::{FOOTER_LINES, day_heading, day_name};
use chrono::NaiveDate;
use plansheet_types::{
    DailyEntry, Goals, SLOT_COUNT, Stretch, Week, WeeklyPlan, WeeklyResources, format_date,
    format_date_range,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub size: String,
    pub margin_mm: f32,
}

impl PageView {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            size: format!(
                "{} {}",
                config.page_size.css_name(),
                config.orientation.css_name()
            ),
            margin_mm: config.margin_mm,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterView {
    pub generated_on: Option<String>,
    pub lines: Vec<&'static str>,
}

impl FooterView {
    pub fn new(generated_on: Option<NaiveDate>) -> Self {
        Self {
            generated_on: generated_on.map(format_date),
            lines: FOOTER_LINES.to_vec(),
        }
    }
}

/// Parts every printed document shares.
#[derive(Debug, Clone, Serialize)]
pub struct Chrome {
    pub doc_title: String,
    pub page: PageView,
    pub footer: FooterView,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderView {
    pub title: String,
    pub subtitle: Option<String>,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    pub heading: &'static str,
    pub rows: Vec<Field>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabeledList {
    pub label: &'static str,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalGroup {
    pub subject: &'static str,
    pub items: Vec<String>,
}

pub fn goal_groups(goals: &Goals) -> Vec<GoalGroup> {
    goals
        .non_empty()
        .map(|(subject, items)| GoalGroup {
            subject: subject.display_name(),
            items: items.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct StretchView {
    pub heading: &'static str,
    pub learning_areas: Vec<Field>,
    pub has_development: bool,
    pub motor: Vec<Field>,
    pub development: Vec<Field>,
    pub resources: Vec<LabeledList>,
}

impl StretchView {
    pub fn new(heading: &'static str, stretch: &Stretch) -> Self {
        let pairs = |entries: Vec<(&'static str, &str)>| -> Vec<Field> {
            entries.into_iter().map(|(l, t)| Field::new(l, t)).collect()
        };
        let development = [
            ("Social-Emotional", stretch.social_emotional()),
            ("Science & Inquiry", stretch.science_inquiry()),
        ]
        .into_iter()
        .filter_map(|(label, text)| text.map(|t| Field::new(label, t)))
        .collect();

        Self {
            heading,
            learning_areas: pairs(stretch.learning_areas()),
            has_development: stretch.has_development_areas(),
            motor: stretch.motor().map(|m| pairs(m.entries())).unwrap_or_default(),
            development,
            resources: stretch
                .resources()
                .map(|r| {
                    r.groups()
                        .into_iter()
                        .map(|(label, items)| LabeledList {
                            label,
                            items: items.to_vec(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotesView {
    pub text: Option<String>,
    pub resources: Vec<LabeledList>,
}

impl NotesView {
    pub fn from_plan(plan: &WeeklyPlan) -> Option<Self> {
        if !plan.has_notes_or_resources() {
            return None;
        }
        Some(Self {
            text: plan.notes().map(str::to_string),
            resources: plan.resources().map(resource_lists).unwrap_or_default(),
        })
    }
}

fn resource_lists(resources: &WeeklyResources) -> Vec<LabeledList> {
    [
        ("Links", resources.links.iter().map(|l| l.label()).collect::<Vec<_>>()),
        ("Files", resources.files.clone()),
        ("Materials", resources.materials.clone()),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .map(|(label, items)| LabeledList { label, items })
    .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityView {
    pub area: String,
    pub activity: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotRow {
    pub time: &'static str,
    pub empty: bool,
    pub activities: Vec<ActivityView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub id: String,
    pub heading: String,
    pub day_name: String,
    pub date: String,
    pub planned_slots: usize,
    pub slot_count: usize,
    pub rows: Vec<SlotRow>,
    pub reflections: Option<String>,
}

impl DayView {
    pub fn new(day: &DailyEntry) -> Self {
        let rows = day
            .activities
            .schedule()
            .map(|(time, activities)| SlotRow {
                time,
                empty: activities.is_empty(),
                activities: activities
                    .iter()
                    .map(|a| ActivityView {
                        area: a.area.clone(),
                        activity: a.activity.clone(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            id: day.id.clone(),
            heading: day_heading(day),
            day_name: day_name(day),
            date: format_date(day.date),
            planned_slots: day.activities.planned_slot_count(),
            slot_count: SLOT_COUNT,
            rows,
            reflections: day.reflections().map(str::to_string),
        }
    }
}

pub fn day_views(week: &Week) -> Vec<DayView> {
    week.days_in_order().into_iter().map(DayView::new).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekRow {
    pub number: u32,
    pub theme: String,
    pub dates: String,
    pub daily_plans: usize,
    /// "3 days planned", or "Not planned yet" for a week without days.
    pub plans: String,
}

impl WeekRow {
    pub fn new(week: &Week) -> Self {
        Self {
            number: week.number,
            theme: week.theme().to_string(),
            dates: format_date_range(week.start_date, week.end_date),
            daily_plans: week.days.len(),
            plans: match week.days.len() {
                0 => "Not planned yet".to_string(),
                1 => "1 day planned".to_string(),
                n => format!("{} days planned", n),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekDetail {
    pub number: u32,
    pub theme: String,
    pub dates: String,
    pub goals: Vec<GoalGroup>,
    pub notes: Option<NotesView>,
    pub days: Vec<DayView>,
}

impl WeekDetail {
    pub fn new(week: &Week) -> Self {
        let plan = week.weekly_plan.as_ref();
        Self {
            number: week.number,
            theme: week.theme().to_string(),
            dates: format_date_range(week.start_date, week.end_date),
            goals: plan.map(|p| goal_groups(&p.goals)).unwrap_or_default(),
            notes: plan.and_then(NotesView::from_plan),
            days: day_views(week),
        }
    }
}

// --- Page contexts, one per print scope ---

#[derive(Debug, Clone, Serialize)]
pub struct TermPage {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub header: HeaderView,
    pub panels: Vec<Panel>,
    pub weeks_overview: Vec<WeekRow>,
    pub weeks: Vec<WeekDetail>,
}

/// Shared by the week and daily scopes; the daily template ignores `stretch`.
#[derive(Debug, Clone, Serialize)]
pub struct WeekPage {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub header: HeaderView,
    pub panels: Vec<Panel>,
    pub goals: Vec<GoalGroup>,
    pub stretch: Option<StretchView>,
    pub notes: Option<NotesView>,
    pub days: Vec<DayView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SingleDayPage {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub header: HeaderView,
    pub panels: Vec<Panel>,
    pub stretch: Option<StretchView>,
    pub day: DayView,
}

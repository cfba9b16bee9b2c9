//! Print-ready HTML for the four print scopes.
//!
//! Pages are plain handlebars templates rendered over the view models in [`view`]. The
//! browser's print engine does the actual pagination, steered by two hint classes:
//! `page-break-inside-avoid` keeps headers, sections and day schedules in one piece,
//! and `page-break-after` starts the next block on a fresh page.

pub mod view;

use crate::config::ExportConfig;
use crate::diagnostics::{ExportWarning, check_activity_maps};
use crate::error::ExportError;
use crate::export::file_segment;
use crate::projector::{MAX_DAYS_PER_WEEK, day_heading, day_name};
use chrono::NaiveDate;
use handlebars::Handlebars;
use once_cell::sync::OnceCell;
use plansheet_types::{
    CurriculumTree, DayContext, SLOT_COUNT, Term, WeekContext, format_date, format_date_range,
};
use serde::Serialize;
use view::*;

/// What to print. Ids refer to the curriculum tree handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintScope {
    /// Term overview followed by every week in full.
    Term { id: String },
    /// One week with goals, stretch block, notes and all its days.
    Week { id: String },
    /// The daily schedules of one week.
    Daily { week_id: String },
    /// A single day's schedule.
    SingleDay { day_id: String },
}

/// A finished HTML document ready to hand to a print dialog.
#[derive(Debug, Clone)]
pub struct MarkupDocument {
    pub title: String,
    pub filename: String,
    pub html: String,
    pub warnings: Vec<ExportWarning>,
}

const TERM_TEMPLATE: &str = "term";
const WEEK_TEMPLATE: &str = "week";
const DAILY_TEMPLATE: &str = "daily";
const SINGLE_DAY_TEMPLATE: &str = "single_day";

const PARTIALS: [(&str, &str); 10] = [
    ("layout", include_str!("../../templates/print/layout.hbs")),
    ("styles", include_str!("../../templates/print/styles.css")),
    ("header", include_str!("../../templates/print/header.hbs")),
    ("panels", include_str!("../../templates/print/panels.hbs")),
    ("goals", include_str!("../../templates/print/goals.hbs")),
    ("stretch", include_str!("../../templates/print/stretch.hbs")),
    ("notes", include_str!("../../templates/print/notes.hbs")),
    ("day", include_str!("../../templates/print/day.hbs")),
    ("days", include_str!("../../templates/print/days.hbs")),
    ("footer", include_str!("../../templates/print/footer.hbs")),
];

const PAGES: [(&str, &str); 4] = [
    (TERM_TEMPLATE, include_str!("../../templates/print/term.hbs")),
    (WEEK_TEMPLATE, include_str!("../../templates/print/week.hbs")),
    (DAILY_TEMPLATE, include_str!("../../templates/print/daily.hbs")),
    (SINGLE_DAY_TEMPLATE, include_str!("../../templates/print/single_day.hbs")),
];

static REGISTRY: OnceCell<Handlebars<'static>> = OnceCell::new();

/// The compiled template set, built on first use and shared afterwards.
fn registry() -> Result<&'static Handlebars<'static>, ExportError> {
    REGISTRY.get_or_try_init(|| {
        let mut template_engine = Handlebars::new();
        template_engine.set_strict_mode(true);
        for (name, source) in PARTIALS {
            template_engine.register_partial(name, source)?;
        }
        for (name, source) in PAGES {
            template_engine.register_template_string(name, source)?;
        }
        log::debug!(
            "Compiled {} print templates and {} partials.",
            PAGES.len(),
            PARTIALS.len()
        );
        Ok(template_engine)
    })
}

/// Compiles the template set ahead of the first render so template errors surface early.
pub(crate) fn warm_templates() -> Result<(), ExportError> {
    registry().map(|_| ())
}

/// Renders curriculum scopes to standalone HTML documents.
#[derive(Debug, Clone)]
pub struct PrintRenderer {
    heading: String,
    page: PageView,
    generated_on: Option<NaiveDate>,
}

impl PrintRenderer {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            heading: config.heading().to_string(),
            page: PageView::from_config(config),
            generated_on: config.generated_on,
        }
    }

    fn chrome(&self, doc_title: &str) -> Chrome {
        Chrome {
            doc_title: doc_title.to_string(),
            page: self.page.clone(),
            footer: FooterView::new(self.generated_on),
        }
    }

    fn finish<T: Serialize>(
        &self,
        template: &str,
        context: &T,
        title: String,
        filename: String,
        warnings: Vec<ExportWarning>,
    ) -> Result<MarkupDocument, ExportError> {
        let html = registry()?.render(template, context)?;
        log::debug!(
            "Rendered '{}' with template '{}' ({} bytes, {} warning(s)).",
            filename,
            template,
            html.len(),
            warnings.len()
        );
        Ok(MarkupDocument {
            title,
            filename,
            html,
            warnings,
        })
    }

    pub fn render_term(
        &self,
        tree: &CurriculumTree,
        term: &Term,
    ) -> Result<MarkupDocument, ExportError> {
        let title = format!("Term Overview - {}", term.name);
        let weeks = term.weeks_in_order();

        let mut lines = Vec::new();
        let mut details = vec![Field::new("Term Name", &term.name)];
        if let Some(project) = &tree.project {
            lines.push(format!("{} - {}", project.title, project.year));
            lines.push(format!("Age Group: {}", project.age_group));
            details.push(Field::new("Project", &project.title));
            details.push(Field::new("Year", project.year));
            details.push(Field::new("Age Group", &project.age_group));
        }
        lines.push(format_date_range(term.start_date, term.end_date));

        let panels = vec![
            Panel {
                heading: "Term Details",
                rows: details,
            },
            Panel {
                heading: "Term Statistics",
                rows: vec![
                    Field::new("Total Weeks", term.weeks.len()),
                    Field::new("Weeks with Plans", term.weeks_with_plans()),
                    Field::new("Total Daily Plans", term.total_daily_plans()),
                    Field::new(
                        "Duration",
                        format!("{} weeks", (term.duration_days().max(0) + 6) / 7),
                    ),
                ],
            },
            Panel {
                heading: "Planning Status",
                rows: vec![
                    Field::new("Completion", format!("{}%", term.completion_percent())),
                    Field::new("Total Activities", term.total_activities()),
                ],
            },
        ];

        let page = TermPage {
            chrome: self.chrome(&title),
            header: HeaderView {
                title: "Term Overview".to_string(),
                subtitle: Some(term.name.clone()),
                lines,
            },
            panels,
            weeks_overview: weeks.iter().map(|w| WeekRow::new(w)).collect(),
            weeks: weeks.iter().map(|w| WeekDetail::new(w)).collect(),
        };
        let warnings = check_activity_maps(weeks.iter().flat_map(|w| w.days.iter()));
        let filename = format!("term-{}.html", file_segment(&term.name));
        self.finish(TERM_TEMPLATE, &page, title, filename, warnings)
    }

    pub fn render_week(&self, ctx: WeekContext<'_>) -> Result<MarkupDocument, ExportError> {
        let WeekContext { term, week } = ctx;
        let title = format!("{} - {} Week {}", self.heading, term.name, week.number);
        let plan = week.weekly_plan.as_ref();
        let page = WeekPage {
            chrome: self.chrome(&title),
            header: self.week_header(self.heading.clone(), ctx),
            panels: week_panels(ctx),
            goals: plan.map(|p| goal_groups(&p.goals)).unwrap_or_default(),
            stretch: plan
                .and_then(|p| p.stretch())
                .map(|s| StretchView::new("Stretch Curriculum Activities", s)),
            notes: plan.and_then(NotesView::from_plan),
            days: day_views(week),
        };
        let warnings = check_activity_maps(&week.days);
        let filename = format!("week-{}-{}.html", week.number, file_segment(&term.name));
        self.finish(WEEK_TEMPLATE, &page, title, filename, warnings)
    }

    pub fn render_daily(&self, ctx: WeekContext<'_>) -> Result<MarkupDocument, ExportError> {
        let WeekContext { term, week } = ctx;
        let title = format!("Daily Activity Plans - {} Week {}", term.name, week.number);
        let plan = week.weekly_plan.as_ref();
        let page = WeekPage {
            chrome: self.chrome(&title),
            header: self.week_header("Daily Activity Plans".to_string(), ctx),
            panels: week_panels(ctx),
            goals: plan.map(|p| goal_groups(&p.goals)).unwrap_or_default(),
            stretch: None,
            notes: plan.and_then(NotesView::from_plan),
            days: day_views(week),
        };
        let warnings = check_activity_maps(&week.days);
        let filename = format!(
            "daily-week-{}-{}.html",
            week.number,
            file_segment(&term.name)
        );
        self.finish(DAILY_TEMPLATE, &page, title, filename, warnings)
    }

    pub fn render_single_day(&self, ctx: DayContext<'_>) -> Result<MarkupDocument, ExportError> {
        let DayContext { term, week, day } = ctx;
        let title = format!("Daily Activity Plan - {}", day_heading(day));
        let panels = vec![
            Panel {
                heading: "Day Details",
                rows: vec![
                    Field::new("Day", day_name(day)),
                    Field::new("Date", format_date(day.date)),
                    Field::new("Week", week.number),
                    Field::new("Theme", week.theme()),
                ],
            },
            Panel {
                heading: "Activity Status",
                rows: vec![
                    Field::new("Total Time Slots", SLOT_COUNT),
                    Field::new("Planned Slots", day.activities.planned_slot_count()),
                    Field::new("Planned Activities", day.activities.activity_count()),
                    Field::new(
                        "Reflections",
                        if day.reflections().is_some() {
                            "Completed"
                        } else {
                            "Not added"
                        },
                    ),
                ],
            },
        ];
        let page = SingleDayPage {
            chrome: self.chrome(&title),
            header: HeaderView {
                title: "Daily Activity Plan".to_string(),
                subtitle: Some(day_heading(day)),
                lines: vec![
                    format!("{} - Week {}", term.name, week.number),
                    format!("Theme: {}", week.theme()),
                ],
            },
            panels,
            stretch: week
                .weekly_plan
                .as_ref()
                .and_then(|p| p.stretch())
                .map(|s| StretchView::new("Curriculum Framework", s)),
            day: DayView::new(day),
        };
        let warnings = check_activity_maps([day]);
        let filename = format!("day-{}-week-{}.html", day.date.format("%Y-%m-%d"), week.number);
        self.finish(SINGLE_DAY_TEMPLATE, &page, title, filename, warnings)
    }

    fn week_header(&self, title: String, ctx: WeekContext<'_>) -> HeaderView {
        let WeekContext { term, week } = ctx;
        HeaderView {
            title,
            subtitle: Some(format!("{} - Week {}", term.name, week.number)),
            lines: vec![
                format!("Theme: {}", week.theme()),
                format_date_range(week.start_date, week.end_date),
            ],
        }
    }
}

fn week_panels(ctx: WeekContext<'_>) -> Vec<Panel> {
    let WeekContext { term, week } = ctx;
    vec![
        Panel {
            heading: "Week Details",
            rows: vec![
                Field::new("Week Number", week.number),
                Field::new("Term", &term.name),
                Field::new("Theme", week.theme()),
                Field::new("Duration", format!("{} days", week.duration_days())),
            ],
        },
        Panel {
            heading: "Daily Plans Status",
            rows: vec![
                Field::new(
                    "Total Days",
                    format!("{}/{}", week.days.len(), MAX_DAYS_PER_WEEK),
                ),
                Field::new("Days with Activities", week.days_with_activities()),
                Field::new("Planned Time Slots", week.planned_slot_count()),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_set_compiles() {
        let registry = registry().unwrap();
        for (name, _) in PAGES {
            assert!(registry.has_template(name), "missing template {}", name);
        }
    }
}

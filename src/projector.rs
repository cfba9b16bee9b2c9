//! Projects one week of the curriculum tree into a block document.
//!
//! Sections always appear in the same order: title, overview, learning goals, stretch
//! activities, notes and resources, daily schedules, footer. Optional sections are
//! left out entirely when they have nothing to show.

use crate::config::DEFAULT_HEADING;
use chrono::{Datelike, NaiveDate, Weekday};
use itertools::Itertools;
use plansheet_idf::{Block, BlockDocument, HeadingLevel};
use plansheet_types::{
    DailyEntry, DayOfWeek, SLOT_COUNT, Stretch, WeekContext, WeeklyPlan, WeeklyResources,
    format_date, format_date_range, format_day_of_week,
};

pub const MAX_DAYS_PER_WEEK: usize = 5;
pub const EMPTY_AREA: &str = "No activities";
pub const EMPTY_ACTIVITY: &str = "No activities planned";
pub const NO_DAYS: &str = "No daily plans have been generated yet.";
pub const FOOTER_LINES: [&str; 2] = [
    "This document was generated from the Curriculum Builder application",
    "For questions or updates, please contact your curriculum coordinator",
];

/// Builds the weekly block document.
#[derive(Debug, Clone)]
pub struct MarkdownProjector {
    heading: String,
    generated_on: Option<NaiveDate>,
}

impl Default for MarkdownProjector {
    fn default() -> Self {
        Self {
            heading: DEFAULT_HEADING.to_string(),
            generated_on: None,
        }
    }
}

impl MarkdownProjector {
    pub fn new(heading: impl Into<String>, generated_on: Option<NaiveDate>) -> Self {
        Self {
            heading: heading.into(),
            generated_on,
        }
    }

    pub fn project(&self, ctx: WeekContext<'_>) -> BlockDocument {
        let WeekContext { term, week } = ctx;
        let mut doc = BlockDocument::new(format!(
            "{} - {} Week {}",
            self.heading, term.name, week.number
        ));

        self.title_section(&mut doc, ctx);
        overview_section(&mut doc, ctx);
        if let Some(plan) = &week.weekly_plan {
            goals_section(&mut doc, plan);
            if let Some(stretch) = plan.stretch() {
                stretch_section(&mut doc, stretch);
            }
            notes_section(&mut doc, plan);
        }
        daily_section(&mut doc, &week.days_in_order());
        footer_section(&mut doc);

        log::debug!(
            "Projected week '{}' into {} blocks.",
            week.id,
            doc.len()
        );
        doc
    }

    fn title_section(&self, doc: &mut BlockDocument, ctx: WeekContext<'_>) {
        let WeekContext { term, week } = ctx;
        doc.push(Block::heading(HeadingLevel::H1, &self.heading))
            .push(Block::BlankLine)
            .push(Block::BoldLine(format!("{} - Week {}", term.name, week.number)))
            .push(Block::BlankLine)
            .push(Block::Paragraph(format!("Theme: {}", week.theme())))
            .push(Block::BlankLine)
            .push(Block::Paragraph(format!(
                "Duration: {}",
                format_date_range(week.start_date, week.end_date)
            )))
            .push(Block::BlankLine);
        if let Some(date) = self.generated_on {
            doc.push(Block::Paragraph(format!("Generated: {}", format_date(date))))
                .push(Block::BlankLine);
        }
        doc.push(Block::Rule).push(Block::BlankLine);
    }
}

fn overview_section(doc: &mut BlockDocument, ctx: WeekContext<'_>) {
    let WeekContext { term, week } = ctx;
    doc.push(Block::heading(HeadingLevel::H2, "Week Overview"))
        .push(Block::BlankLine)
        .push(Block::header_row(["Metric", "Value"]));
    let rows = [
        ("Week Number", week.number.to_string()),
        ("Term", term.name.clone()),
        ("Theme", week.theme().to_string()),
        (
            "Duration",
            format_date_range(week.start_date, week.end_date),
        ),
        (
            "Total Days",
            format!("{}/{}", week.days.len(), MAX_DAYS_PER_WEEK),
        ),
        ("Days with Activities", week.days_with_activities().to_string()),
        ("Planned Time Slots", week.planned_slot_count().to_string()),
    ];
    doc.extend(rows.into_iter().map(|(metric, value)| Block::row([metric.to_string(), value])))
        .push(Block::BlankLine);
}

fn goals_section(doc: &mut BlockDocument, plan: &WeeklyPlan) {
    if plan.goals.is_empty() {
        return;
    }
    doc.push(Block::heading(HeadingLevel::H2, "Weekly Learning Goals"))
        .push(Block::BlankLine);
    for (subject, goals) in plan.goals.non_empty() {
        doc.push(Block::heading(HeadingLevel::H3, subject.display_name()));
        doc.extend(goals.into_iter().map(|g| Block::ListItem(g.to_string())));
        doc.push(Block::BlankLine);
    }
}

fn stretch_section(doc: &mut BlockDocument, stretch: &Stretch) {
    doc.push(Block::heading(HeadingLevel::H2, "Stretch Curriculum Activities"))
        .push(Block::BlankLine);

    let learning = stretch.learning_areas();
    if !learning.is_empty() {
        doc.push(Block::heading(HeadingLevel::H3, "Learning Areas"))
            .push(Block::BlankLine);
        for (label, text) in learning {
            doc.push(Block::Paragraph(format!("{}: {}", label, text)))
                .push(Block::BlankLine);
        }
    }

    if stretch.has_development_areas() {
        doc.push(Block::heading(HeadingLevel::H3, "Development Areas"))
            .push(Block::BlankLine);
        if let Some(motor) = stretch.motor() {
            doc.push(Block::BoldLine("Motor Skills:".to_string()));
            doc.extend(
                motor
                    .entries()
                    .into_iter()
                    .map(|(label, text)| Block::ListItem(format!("{}: {}", label, text))),
            );
            doc.push(Block::BlankLine);
        }
        if let Some(text) = stretch.social_emotional() {
            doc.push(Block::Paragraph(format!("Social-Emotional: {}", text)))
                .push(Block::BlankLine);
        }
        if let Some(text) = stretch.science_inquiry() {
            doc.push(Block::Paragraph(format!("Science & Inquiry: {}", text)))
                .push(Block::BlankLine);
        }
    }

    if let Some(resources) = stretch.resources() {
        doc.push(Block::heading(HeadingLevel::H3, "Resources & Materials"))
            .push(Block::BlankLine);
        for (label, items) in resources.groups() {
            push_labelled_list(doc, label, items.iter().map(String::as_str));
        }
    }
}

fn notes_section(doc: &mut BlockDocument, plan: &WeeklyPlan) {
    if !plan.has_notes_or_resources() {
        return;
    }
    doc.push(Block::heading(HeadingLevel::H2, "Weekly Notes & Resources"))
        .push(Block::BlankLine);
    if let Some(notes) = plan.notes() {
        for line in notes.lines() {
            let line = line.trim();
            doc.push(if line.is_empty() {
                Block::BlankLine
            } else {
                Block::Paragraph(line.to_string())
            });
        }
        doc.push(Block::BlankLine);
    }
    if let Some(resources) = plan.resources() {
        resources_lists(doc, resources);
    }
}

fn resources_lists(doc: &mut BlockDocument, resources: &WeeklyResources) {
    if !resources.links.is_empty() {
        let labels = resources.links.iter().map(|link| link.label()).collect_vec();
        push_labelled_list(doc, "Links", labels.iter().map(String::as_str));
    }
    if !resources.files.is_empty() {
        push_labelled_list(doc, "Files", resources.files.iter().map(String::as_str));
    }
    if !resources.materials.is_empty() {
        push_labelled_list(doc, "Materials", resources.materials.iter().map(String::as_str));
    }
}

fn push_labelled_list<'a>(doc: &mut BlockDocument, label: &str, items: impl Iterator<Item = &'a str>) {
    doc.push(Block::BoldLine(format!("{}:", label)));
    doc.extend(items.map(|item| Block::ListItem(item.to_string())));
    doc.push(Block::BlankLine);
}

fn daily_section(doc: &mut BlockDocument, days: &[&DailyEntry]) {
    doc.push(Block::heading(HeadingLevel::H2, "Daily Activity Plans"))
        .push(Block::BlankLine);
    if days.is_empty() {
        doc.push(Block::Paragraph(NO_DAYS.to_string()))
            .push(Block::BlankLine);
        return;
    }
    for day in days {
        day_schedule(doc, day);
    }
}

fn day_schedule(doc: &mut BlockDocument, day: &DailyEntry) {
    doc.push(Block::heading(HeadingLevel::H3, day_heading(day)))
        .push(Block::BlankLine)
        .push(Block::Paragraph(format!(
            "Planned Slots: {}/{}",
            day.activities.planned_slot_count(),
            SLOT_COUNT
        )))
        .push(Block::BlankLine)
        .push(Block::header_row([
            "Time Slot",
            "Learning Area",
            "Activity Description",
        ]));

    for (slot, activities) in day.activities.schedule() {
        let row = if activities.is_empty() {
            Block::row([slot, EMPTY_AREA, EMPTY_ACTIVITY])
        } else {
            Block::row([
                slot.to_string(),
                activities.iter().map(|a| a.area.as_str()).join("\n"),
                activities.iter().map(|a| a.activity.as_str()).join("\n"),
            ])
        };
        doc.push(row);
    }
    doc.push(Block::BlankLine);

    if let Some(reflections) = day.reflections() {
        doc.push(Block::Paragraph(format!("Daily Reflections: {}", reflections)))
            .push(Block::BlankLine);
    }
    doc.push(Block::Rule).push(Block::BlankLine);
}

fn footer_section(doc: &mut BlockDocument) {
    doc.push(Block::Rule).push(Block::BlankLine);
    doc.extend(FOOTER_LINES.iter().map(|line| Block::Paragraph(line.to_string())));
}

/// "Monday - March 3, 2025". A blank day code falls back to the date's own weekday.
pub fn day_heading(day: &DailyEntry) -> String {
    format!("{} - {}", day_name(day), format_date(day.date))
}

pub fn day_name(day: &DailyEntry) -> String {
    if day.day_of_week.trim().is_empty() {
        weekday_of(day.date).to_string()
    } else {
        format_day_of_week(&day.day_of_week)
    }
}

fn weekday_of(date: NaiveDate) -> DayOfWeek {
    match date.weekday() {
        Weekday::Mon => DayOfWeek::Mon,
        Weekday::Tue => DayOfWeek::Tue,
        Weekday::Wed => DayOfWeek::Wed,
        Weekday::Thu => DayOfWeek::Thu,
        Weekday::Fri => DayOfWeek::Fri,
        Weekday::Sat => DayOfWeek::Sat,
        Weekday::Sun => DayOfWeek::Sun,
    }
}

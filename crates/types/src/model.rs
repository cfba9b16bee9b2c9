use crate::de::{self, null_as_default};
use crate::format::theme_or_default;
use crate::slots::{TIME_SLOTS, is_canonical_slot};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Returns the trimmed text if it is non-blank. Blank strings are treated as absent.
pub fn present(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

/// A full curriculum snapshot: one project and its terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumTree {
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub terms: Vec<Term>,
}

/// A week resolved together with the term that contains it.
#[derive(Debug, Clone, Copy)]
pub struct WeekContext<'a> {
    pub term: &'a Term,
    pub week: &'a Week,
}

/// A day resolved together with its week and term.
#[derive(Debug, Clone, Copy)]
pub struct DayContext<'a> {
    pub term: &'a Term,
    pub week: &'a Week,
    pub day: &'a DailyEntry,
}

impl CurriculumTree {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn find_term(&self, id: &str) -> Option<&Term> {
        self.terms.iter().find(|term| term.id == id)
    }

    pub fn find_week(&self, id: &str) -> Option<WeekContext<'_>> {
        self.terms.iter().find_map(|term| {
            term.weeks
                .iter()
                .find(|week| week.id == id)
                .map(|week| WeekContext { term, week })
        })
    }

    pub fn find_day(&self, id: &str) -> Option<DayContext<'_>> {
        self.terms.iter().find_map(|term| {
            term.weeks.iter().find_map(|week| {
                week.days
                    .iter()
                    .find(|day| day.id == id)
                    .map(|day| DayContext { term, week, day })
            })
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub age_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub id: String,
    pub name: String,
    #[serde(with = "de::date")]
    pub start_date: NaiveDate,
    #[serde(with = "de::date")]
    pub end_date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weeks: Vec<Week>,
}

impl Term {
    /// Weeks in ascending week-number order. The sort is stable, so duplicates keep
    /// their input order.
    pub fn weeks_in_order(&self) -> Vec<&Week> {
        let mut weeks: Vec<&Week> = self.weeks.iter().collect();
        weeks.sort_by_key(|week| week.number);
        weeks
    }

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    pub fn weeks_with_plans(&self) -> usize {
        self.weeks.iter().filter(|week| !week.days.is_empty()).count()
    }

    pub fn total_daily_plans(&self) -> usize {
        self.weeks.iter().map(|week| week.days.len()).sum()
    }

    pub fn total_activities(&self) -> usize {
        self.weeks
            .iter()
            .flat_map(|week| week.days.iter())
            .map(|day| day.activities.activity_count())
            .sum()
    }

    /// Share of weeks that have at least one daily plan, rounded to a whole percent.
    pub fn completion_percent(&self) -> u32 {
        if self.weeks.is_empty() {
            return 0;
        }
        let ratio = self.weeks_with_plans() as f64 / self.weeks.len() as f64;
        (ratio * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub id: String,
    pub number: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(with = "de::date")]
    pub start_date: NaiveDate,
    #[serde(with = "de::date")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub weekly_plan: Option<WeeklyPlan>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub days: Vec<DailyEntry>,
}

impl Week {
    pub fn theme(&self) -> &str {
        theme_or_default(self.title.as_deref())
    }

    /// Days in ascending date order (stable for equal dates).
    pub fn days_in_order(&self) -> Vec<&DailyEntry> {
        let mut days: Vec<&DailyEntry> = self.days.iter().collect();
        days.sort_by_key(|day| day.date);
        days
    }

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    pub fn days_with_activities(&self) -> usize {
        self.days
            .iter()
            .filter(|day| day.activities.planned_slot_count() > 0)
            .count()
    }

    pub fn planned_slot_count(&self) -> usize {
        self.days
            .iter()
            .map(|day| day.activities.planned_slot_count())
            .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    #[serde(default, deserialize_with = "null_as_default")]
    pub goals: Goals,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub resources: Option<WeeklyResources>,
    #[serde(default)]
    pub stretch: Option<Stretch>,
}

impl WeeklyPlan {
    pub fn notes(&self) -> Option<&str> {
        present(&self.notes)
    }

    pub fn resources(&self) -> Option<&WeeklyResources> {
        self.resources.as_ref().filter(|r| !r.is_empty())
    }

    pub fn stretch(&self) -> Option<&Stretch> {
        self.stretch.as_ref().filter(|s| !s.is_empty())
    }

    pub fn has_notes_or_resources(&self) -> bool {
        self.notes().is_some() || self.resources().is_some()
    }
}

/// Fixed learning-goal subjects, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subject {
    Maths,
    Literacy,
    LifeSkills,
    Science,
    CreativeArts,
    Other,
}

impl Subject {
    pub const ALL: [Subject; 6] = [
        Subject::Maths,
        Subject::Literacy,
        Subject::LifeSkills,
        Subject::Science,
        Subject::CreativeArts,
        Subject::Other,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Subject::Maths => "maths",
            Subject::Literacy => "literacy",
            Subject::LifeSkills => "lifeSkills",
            Subject::Science => "science",
            Subject::CreativeArts => "creativeArts",
            Subject::Other => "other",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Subject::Maths => "Maths",
            Subject::Literacy => "Literacy",
            Subject::LifeSkills => "Life Skills",
            Subject::Science => "Science",
            Subject::CreativeArts => "Creative Arts",
            Subject::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goals {
    #[serde(default, deserialize_with = "null_as_default")]
    pub maths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub literacy: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub life_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub science: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creative_arts: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub other: Vec<String>,
}

impl Goals {
    pub fn for_subject(&self, subject: Subject) -> &[String] {
        match subject {
            Subject::Maths => &self.maths,
            Subject::Literacy => &self.literacy,
            Subject::LifeSkills => &self.life_skills,
            Subject::Science => &self.science,
            Subject::CreativeArts => &self.creative_arts,
            Subject::Other => &self.other,
        }
    }

    /// Subjects that carry at least one non-blank goal, in fixed subject order.
    pub fn non_empty(&self) -> impl Iterator<Item = (Subject, Vec<&str>)> + '_ {
        Subject::ALL.into_iter().filter_map(move |subject| {
            let goals: Vec<&str> = self
                .for_subject(subject)
                .iter()
                .map(|g| g.trim())
                .filter(|g| !g.is_empty())
                .collect();
            (!goals.is_empty()).then_some((subject, goals))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.non_empty().next().is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyResources {
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<ResourceLink>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub materials: Vec<String>,
}

impl WeeklyResources {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.files.is_empty() && self.materials.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLink {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
}

impl ResourceLink {
    /// "Title (url)", or just the url when untitled.
    pub fn label(&self) -> String {
        match present(&self.title) {
            Some(title) => format!("{} ({})", title, self.url),
            None => self.url.clone(),
        }
    }
}

/// Enrichment content attached to a week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stretch {
    #[serde(default)]
    pub numeracy: Option<String>,
    #[serde(default)]
    pub literacy: Option<String>,
    #[serde(default)]
    pub creative: Option<String>,
    #[serde(default)]
    pub motor: Option<MotorSkills>,
    #[serde(default)]
    pub social_emotional: Option<String>,
    #[serde(default)]
    pub science_inquiry: Option<String>,
    #[serde(default)]
    pub resources: Option<StretchResources>,
}

impl Stretch {
    /// Numeracy, literacy and creative entries that are present, with their labels.
    pub fn learning_areas(&self) -> Vec<(&'static str, &str)> {
        [
            ("Numeracy", &self.numeracy),
            ("Literacy", &self.literacy),
            ("Creative Arts", &self.creative),
        ]
        .into_iter()
        .filter_map(|(label, text)| present(text).map(|t| (label, t)))
        .collect()
    }

    pub fn motor(&self) -> Option<&MotorSkills> {
        self.motor.as_ref().filter(|m| !m.is_empty())
    }

    pub fn social_emotional(&self) -> Option<&str> {
        present(&self.social_emotional)
    }

    pub fn science_inquiry(&self) -> Option<&str> {
        present(&self.science_inquiry)
    }

    pub fn has_development_areas(&self) -> bool {
        self.motor().is_some() || self.social_emotional().is_some() || self.science_inquiry().is_some()
    }

    pub fn resources(&self) -> Option<&StretchResources> {
        self.resources.as_ref().filter(|r| !r.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.learning_areas().is_empty() && !self.has_development_areas() && self.resources().is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotorSkills {
    #[serde(default)]
    pub fine: Option<String>,
    #[serde(default)]
    pub gross: Option<String>,
    #[serde(default)]
    pub practical_life: Option<String>,
}

impl MotorSkills {
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Fine", &self.fine),
            ("Gross", &self.gross),
            ("Practical Life", &self.practical_life),
        ]
        .into_iter()
        .filter_map(|(label, text)| present(text).map(|t| (label, t)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StretchResources {
    #[serde(default, deserialize_with = "null_as_default")]
    pub books: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub songs: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub materials: Vec<String>,
}

impl StretchResources {
    /// Non-empty lists with their headings: Books, Songs, Materials.
    pub fn groups(&self) -> Vec<(&'static str, &[String])> {
        [
            ("Books", self.books.as_slice()),
            ("Songs", self.songs.as_slice()),
            ("Materials", self.materials.as_slice()),
        ]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.songs.is_empty() && self.materials.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub id: String,
    #[serde(with = "de::date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub activities: ActivityMap,
    #[serde(default)]
    pub reflections: Option<String>,
}

impl DailyEntry {
    pub fn reflections(&self) -> Option<&str> {
        present(&self.reflections)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub area: String,
    #[serde(default, alias = "plannedActivity")]
    pub activity: String,
}

impl Activity {
    pub fn new(area: impl Into<String>, activity: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            activity: activity.into(),
        }
    }
}

/// Activities keyed by time-slot label, in the order the source stored them.
///
/// Deserialization is tolerant: a slot whose value is not a list of activities is kept
/// as an empty slot and remembered in `malformed`, so renderers can degrade instead of
/// failing the whole document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityMap {
    entries: IndexMap<String, Vec<Activity>>,
    malformed: Vec<String>,
}

/// How far an activity map deviates from the canonical slot set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotConformance {
    pub missing: Vec<&'static str>,
    pub unknown: Vec<String>,
    pub malformed: Vec<String>,
}

impl SlotConformance {
    pub fn is_conforming(&self) -> bool {
        self.missing.is_empty() && self.unknown.is_empty() && self.malformed.is_empty()
    }
}

impl ActivityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: impl Into<String>, activities: Vec<Activity>) {
        self.entries.insert(slot.into(), activities);
    }

    pub fn with(mut self, slot: impl Into<String>, activities: Vec<Activity>) -> Self {
        self.insert(slot, activities);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Exact, byte-for-byte lookup. Missing slots yield an empty list.
    pub fn activities_for(&self, slot: &str) -> &[Activity] {
        self.entries.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The canonical schedule: all twelve slots in order, each with its activities.
    pub fn schedule(&self) -> impl Iterator<Item = (&'static str, &[Activity])> + '_ {
        TIME_SLOTS
            .iter()
            .map(move |slot| (*slot, self.activities_for(slot)))
    }

    /// Canonical slots that have at least one activity.
    pub fn planned_slot_count(&self) -> usize {
        self.schedule().filter(|(_, acts)| !acts.is_empty()).count()
    }

    pub fn activity_count(&self) -> usize {
        self.schedule().map(|(_, acts)| acts.len()).sum()
    }

    /// An empty map means "nothing planned yet" and conforms trivially.
    pub fn conformance(&self) -> SlotConformance {
        if self.entries.is_empty() && self.malformed.is_empty() {
            return SlotConformance::default();
        }
        SlotConformance {
            missing: TIME_SLOTS
                .iter()
                .copied()
                .filter(|slot| !self.entries.contains_key(*slot))
                .collect(),
            unknown: self
                .entries
                .keys()
                .filter(|key| !is_canonical_slot(key))
                .cloned()
                .collect(),
            malformed: self.malformed.clone(),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<Activity>)> for ActivityMap {
    fn from_iter<I: IntoIterator<Item = (S, Vec<Activity>)>>(iter: I) -> Self {
        let mut map = ActivityMap::new();
        for (slot, activities) in iter {
            map.insert(slot, activities);
        }
        map
    }
}

impl Serialize for ActivityMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ActivityMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<IndexMap<String, Value>> = Option::deserialize(deserializer)?;
        let mut map = ActivityMap::new();
        for (slot, value) in raw.unwrap_or_default() {
            match value {
                Value::Array(items) => {
                    let total = items.len();
                    let activities: Vec<Activity> = items
                        .into_iter()
                        .filter_map(|item| serde_json::from_value(item).ok())
                        .collect();
                    if activities.len() != total {
                        map.malformed.push(slot.clone());
                    }
                    map.entries.insert(slot, activities);
                }
                _ => {
                    map.malformed.push(slot.clone());
                    map.entries.insert(slot, Vec::new());
                }
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day_json(activities: Value) -> Value {
        json!({
            "id": "d1",
            "date": "2025-03-03T00:00:00.000Z",
            "dayOfWeek": "MON",
            "activities": activities,
        })
    }

    #[test]
    fn schedule_always_lists_twelve_slots() {
        let day: DailyEntry = serde_json::from_value(day_json(json!({
            (TIME_SLOTS[0]): [{ "area": "Care", "activity": "Breakfast" }]
        })))
        .unwrap();
        let schedule: Vec<_> = day.activities.schedule().collect();
        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule[0].1.len(), 1);
        assert!(schedule[1..].iter().all(|(_, acts)| acts.is_empty()));
    }

    #[test]
    fn malformed_slot_values_degrade_to_empty() {
        let day: DailyEntry = serde_json::from_value(day_json(json!({
            (TIME_SLOTS[0]): "breakfast",
            (TIME_SLOTS[1]): [{ "area": "Play", "activity": "Blocks" }, 42],
        })))
        .unwrap();
        assert!(day.activities.activities_for(TIME_SLOTS[0]).is_empty());
        assert_eq!(day.activities.activities_for(TIME_SLOTS[1]).len(), 1);

        let report = day.activities.conformance();
        assert_eq!(report.malformed, vec![TIME_SLOTS[0].to_string(), TIME_SLOTS[1].to_string()]);
        assert_eq!(report.missing.len(), 10);
    }

    #[test]
    fn unknown_keys_are_reported_not_rendered() {
        let map = ActivityMap::new().with("13h00 Nap", vec![Activity::new("Rest", "Nap")]);
        let report = map.conformance();
        assert_eq!(report.unknown, vec!["13h00 Nap".to_string()]);
        assert_eq!(map.planned_slot_count(), 0);
    }

    #[test]
    fn empty_map_conforms() {
        assert!(ActivityMap::new().conformance().is_conforming());
    }

    #[test]
    fn planned_activity_alias_is_accepted() {
        let activity: Activity =
            serde_json::from_value(json!({ "plannedActivity": "Story circle" })).unwrap();
        assert_eq!(activity, Activity::new("", "Story circle"));
    }

    #[test]
    fn goals_skip_blank_entries_and_keep_subject_order() {
        let goals: Goals = serde_json::from_value(json!({
            "science": ["Floating and sinking"],
            "maths": ["Count to 10", "  "],
            "literacy": [],
            "unknownSubject": ["ignored"],
        }))
        .unwrap();
        let subjects: Vec<Subject> = goals.non_empty().map(|(s, _)| s).collect();
        assert_eq!(subjects, vec![Subject::Maths, Subject::Science]);
        assert!(!goals.is_empty());
    }

    #[test]
    fn blank_stretch_is_empty() {
        let stretch = Stretch {
            numeracy: Some("  ".into()),
            motor: Some(MotorSkills::default()),
            resources: Some(StretchResources::default()),
            ..Default::default()
        };
        assert!(stretch.is_empty());
    }

    #[test]
    fn lookups_resolve_containment() {
        let tree: CurriculumTree = serde_json::from_value(json!({
            "terms": [{
                "id": "t1", "name": "Term 1",
                "startDate": "2025-01-13", "endDate": "2025-03-28",
                "weeks": [{
                    "id": "w1", "number": 1, "title": null,
                    "startDate": "2025-01-13", "endDate": "2025-01-17",
                    "weeklyPlan": null,
                    "days": [day_json(json!({}))]
                }]
            }]
        }))
        .unwrap();

        let ctx = tree.find_week("w1").unwrap();
        assert_eq!(ctx.term.name, "Term 1");
        assert_eq!(ctx.week.theme(), "Theme TBD");
        assert_eq!(tree.find_day("d1").unwrap().week.id, "w1");
        assert!(tree.find_week("missing").is_none());
        assert!(tree.find_term("t1").is_some());
    }
}

use plansheet_types::TIME_SLOTS;
use serde_json::{Map, Value, json};

pub const TERM_ID: &str = "term-1";
pub const FULL_WEEK_ID: &str = "week-1";
pub const BARE_WEEK_ID: &str = "week-2";
pub const EMPTY_WEEK_ID: &str = "week-3";
pub const SHARED_SLOT_DAY_ID: &str = "week-2-day-1";

const WEEKDAYS: [(&str, &str); 5] = [
    ("MON", "2025-03-03"),
    ("TUE", "2025-03-04"),
    ("WED", "2025-03-05"),
    ("THU", "2025-03-06"),
    ("FRI", "2025-03-07"),
];

pub fn activity(area: &str, text: &str) -> Value {
    json!({ "area": area, "activity": text })
}

/// An activity map with one activity in every canonical slot.
pub fn full_activities(tag: &str) -> Value {
    let map: Map<String, Value> = TIME_SLOTS
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            (
                slot.to_string(),
                json!([activity("Routine", &format!("{} activity {}", tag, i + 1))]),
            )
        })
        .collect();
    Value::Object(map)
}

pub fn day(id: &str, code: &str, date: &str, activities: Value) -> Value {
    json!({
        "id": id,
        "date": date,
        "dayOfWeek": code,
        "activities": activities,
        "reflections": null,
    })
}

/// Five weekdays, every slot filled.
pub fn full_days(week_id: &str) -> Vec<Value> {
    WEEKDAYS
        .iter()
        .map(|(code, date)| {
            day(
                &format!("{}-{}", week_id, code.to_lowercase()),
                code,
                date,
                full_activities(code),
            )
        })
        .collect()
}

pub fn weekly_plan() -> Value {
    json!({
        "goals": {
            "maths": ["Count to ten", "Sort by colour"],
            "literacy": ["Recognise the letter A"],
            "lifeSkills": [],
            "science": null,
        },
        "notes": "Bring rain boots on Wednesday.",
        "resources": {
            "links": [{ "title": "Counting song", "url": "https://example.org/song" }],
            "files": [],
            "materials": ["Crayons"],
        },
        "stretch": {
            "numeracy": "Counting games",
            "literacy": "Letter hunt",
            "motor": { "fine": "Threading beads", "gross": "" },
            "socialEmotional": "Sharing circle",
            "scienceInquiry": null,
            "resources": { "books": ["The Very Hungry Caterpillar"], "songs": [], "materials": ["Beads"] },
        },
    })
}

pub fn week(id: &str, number: u32, title: Option<&str>, plan: Option<Value>, days: Vec<Value>) -> Value {
    json!({
        "id": id,
        "number": number,
        "title": title,
        "startDate": "2025-03-03",
        "endDate": "2025-03-07",
        "weeklyPlan": plan,
        "days": days,
    })
}

/// One term with three weeks, listed out of order:
/// week 2 has no weekly plan and two sparse days (the second slot of the first day
/// holds two activities), week 1 is fully planned, week 3 is empty.
pub fn sample_tree() -> Value {
    let shared_slot = json!({
        (TIME_SLOTS[1]): [activity("Literacy", "Letter hunt"), activity("Maths", "Counting song")],
    });
    let sparse_days = vec![
        day(SHARED_SLOT_DAY_ID, "MON", "2025-03-10", shared_slot),
        day("week-2-day-2", "TUE", "2025-03-11", json!({})),
    ];
    json!({
        "project": { "title": "Little Explorers", "year": 2025, "ageGroup": "3-4 years" },
        "terms": [{
            "id": TERM_ID,
            "name": "Term 1",
            "startDate": "2025-03-03",
            "endDate": "2025-05-30",
            "weeks": [
                week(BARE_WEEK_ID, 2, None, None, sparse_days),
                week(FULL_WEEK_ID, 1, Some("Colours & Shapes"), Some(weekly_plan()), full_days(FULL_WEEK_ID)),
                week(EMPTY_WEEK_ID, 3, Some("Weather"), None, Vec::new()),
            ],
        }],
    })
}

/// A single-week tree whose weekly notes carry `notes`.
pub fn tree_with_notes(notes: &str) -> Value {
    let mut plan = weekly_plan();
    plan["notes"] = json!(notes);
    json!({
        "terms": [{
            "id": TERM_ID,
            "name": "Term 1",
            "startDate": "2025-03-03",
            "endDate": "2025-05-30",
            "weeks": [week(FULL_WEEK_ID, 1, Some("Notes"), Some(plan), Vec::new())],
        }],
    })
}

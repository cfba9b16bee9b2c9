//! Curriculum data model consumed by the rendering pipeline.
//!
//! Everything in this crate is a read-only snapshot handed over by the persistence
//! layer. Renderers borrow it immutably for the duration of a render call.

pub mod de;
pub mod format;
pub mod model;
pub mod slots;

pub use format::{DayOfWeek, format_date, format_date_range, format_day_of_week, theme_or_default};
pub use model::{
    Activity, ActivityMap, CurriculumTree, DailyEntry, DayContext, Goals, MotorSkills, Project,
    ResourceLink, SlotConformance, Stretch, StretchResources, Subject, Term, Week, WeekContext,
    WeeklyPlan, WeeklyResources,
};
pub use slots::{SLOT_COUNT, TIME_SLOTS};

//! Plain text rendering of decoded timetables, one table per day and a few days per page.
use std::fmt::Display;
use std::fmt::Formatter;

use crate::decoder::DaySchedule;
use crate::decoder::GroupSchedule;
use crate::decoder::LessonAssignment;
use crate::decoder::LessonItem;
use crate::decoder::Schedule;
use crate::domain::Slot;

/// Separates pages in the rendered text.
const PAGE_BREAK: char = '\u{c}';

const TIME_WIDTH: usize = 13;
const COLUMN_WIDTH: usize = 30;

/// The wall-clock interval of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassTime {
    pub starts_at: (u8, u8),
    pub ends_at: (u8, u8),
}

impl ClassTime {
    pub const fn new(starts_at: (u8, u8), ends_at: (u8, u8)) -> ClassTime {
        ClassTime { starts_at, ends_at }
    }
}

impl Display for ClassTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (start_hour, start_minute) = self.starts_at;
        let (end_hour, end_minute) = self.ends_at;
        write!(
            f,
            "{start_hour:02}:{start_minute:02}-{end_hour:02}:{end_minute:02}"
        )
    }
}

/// Looks up the time of every slot of a day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassTimes {
    times: Vec<ClassTime>,
}

impl ClassTimes {
    pub fn new(times: Vec<ClassTime>) -> ClassTimes {
        ClassTimes { times }
    }

    pub fn get(&self, slot: Slot) -> Option<&ClassTime> {
        self.times.get(slot.index())
    }
}

impl Default for ClassTimes {
    fn default() -> Self {
        ClassTimes::new(vec![
            ClassTime::new((8, 30), (10, 5)),
            ClassTime::new((10, 15), (11, 50)),
            ClassTime::new((12, 0), (13, 35)),
            ClassTime::new((13, 50), (15, 25)),
            ClassTime::new((15, 40), (17, 15)),
            ClassTime::new((17, 25), (19, 0)),
            ClassTime::new((19, 10), (20, 45)),
        ])
    }
}

/// Renders timetables as text tables with a time column and one column per week parity.
///
/// A lesson held every week spans both parity columns. Groups always start on a new page.
#[derive(Clone, Debug)]
pub struct TimetableRenderer {
    class_times: ClassTimes,
    days_per_page: usize,
}

impl Default for TimetableRenderer {
    fn default() -> Self {
        TimetableRenderer::new(ClassTimes::default())
    }
}

impl TimetableRenderer {
    pub fn new(class_times: ClassTimes) -> TimetableRenderer {
        TimetableRenderer {
            class_times,
            days_per_page: 3,
        }
    }

    pub fn with_days_per_page(mut self, days_per_page: usize) -> TimetableRenderer {
        self.days_per_page = days_per_page.max(1);
        self
    }

    pub fn render(&self, schedule: &Schedule) -> String {
        Rendered {
            renderer: self,
            groups: &schedule.groups,
        }
        .to_string()
    }

    pub fn render_group(&self, group: &GroupSchedule) -> String {
        Rendered {
            renderer: self,
            groups: std::slice::from_ref(group),
        }
        .to_string()
    }

    fn write_group(&self, f: &mut Formatter<'_>, group: &GroupSchedule) -> std::fmt::Result {
        writeln!(f, "Group {}", group.group)?;

        for (index, day) in group.days.iter().enumerate() {
            if index > 0 && index % self.days_per_page == 0 {
                writeln!(f, "{PAGE_BREAK}")?;
            }
            writeln!(f)?;
            self.write_day(f, day)?;
        }

        Ok(())
    }

    fn write_day(&self, f: &mut Formatter<'_>, day: &DaySchedule) -> std::fmt::Result {
        writeln!(f, "{}", day.day)?;
        writeln!(
            f,
            "{:<TIME_WIDTH$}| {:<COLUMN_WIDTH$}| Denominator",
            "Time", "Numerator"
        )?;

        for slot in Slot::all() {
            let Some(time) = self.class_times.get(slot) else {
                continue;
            };
            let time = time.to_string();

            match day.slots.get(slot.index()).and_then(Option::as_ref) {
                Some(LessonItem::Single(lesson)) => {
                    writeln!(f, "{time:<TIME_WIDTH$}| {}", describe(lesson))?;
                }
                Some(LessonItem::Pair {
                    numerator,
                    denominator,
                }) => {
                    let numerator = numerator.as_ref().map(describe).unwrap_or_default();
                    let denominator = denominator.as_ref().map(describe).unwrap_or_default();
                    writeln!(
                        f,
                        "{time:<TIME_WIDTH$}| {numerator:<COLUMN_WIDTH$}| {denominator}"
                    )?;
                }
                None => writeln!(f, "{time:<TIME_WIDTH$}|")?,
            }
        }

        Ok(())
    }
}

struct Rendered<'a> {
    renderer: &'a TimetableRenderer,
    groups: &'a [GroupSchedule],
}

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, group) in self.groups.iter().enumerate() {
            if index > 0 {
                writeln!(f, "{PAGE_BREAK}")?;
            }
            self.renderer.write_group(f, group)?;
        }

        Ok(())
    }
}

/// `(kind) subject  room  tutor`, with a dash for a lesson without a tutor.
fn describe(lesson: &LessonAssignment) -> String {
    let kind = &lesson.kind.name()[..3];
    let tutor = lesson
        .tutor
        .map_or_else(|| "\u{2014}".to_owned(), |tutor| tutor.to_string());

    format!("({kind}) {}  {}  {tutor}", lesson.subject, lesson.room)
}

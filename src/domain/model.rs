use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ports::Record;
use crate::utils::error::{EntityKind, RegistryError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, Validate,
};

pub const DEFAULT_CAPACITY: u32 = 30;

/// A slot never runs longer than one day.
pub const MAX_SLOT_DURATION: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub user_id: String,
    pub name: String,
}

impl StudentRecord {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let record = Self {
            user_id: user_id.into(),
            name: name.into(),
        };
        record.validate()?;
        Ok(record)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub user_id: String,
    pub name: String,
    pub department: String,
}

impl StaffRecord {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
    ) -> Result<Self> {
        let record = Self {
            user_id: user_id.into(),
            name: name.into(),
            department: department.into(),
        };
        record.validate()?;
        Ok(record)
    }
}

/// Weekly meeting slot. `weekday` is 1 (Monday) through 7 (Sunday) and
/// `duration` is in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub weekday: u8,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    pub duration: u32,
}

impl TimeSlot {
    pub fn new(weekday: u8, start_time: &str, duration: u32) -> Result<Self> {
        let slot = Self {
            weekday,
            start_time: hh_mm::parse(start_time).map_err(|reason| RegistryError::Validation {
                field: "time_slot.start_time".to_string(),
                value: start_time.to_string(),
                reason,
            })?,
            duration,
        };
        slot.validate()?;
        Ok(slot)
    }

    /// Minutes since midnight.
    pub fn start_minute(&self) -> u32 {
        self.start_time.hour() * 60 + self.start_time.minute()
    }

    /// Exclusive end, in minutes since midnight. Not wrapped past midnight.
    pub fn end_minute(&self) -> u32 {
        self.start_minute().saturating_add(self.duration)
    }

    /// Half-open interval overlap on the same weekday.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        if self.weekday != other.weekday {
            return false;
        }
        !(self.end_minute() <= other.start_minute() || other.end_minute() <= self.start_minute())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
        let day = match self.weekday {
            1..=7 => DAYS[usize::from(self.weekday - 1)],
            _ => "?",
        };
        write!(
            f,
            "{} {} ({} min)",
            day,
            self.start_time.format("%H:%M"),
            self.duration
        )
    }
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(value: &str) -> std::result::Result<NaiveTime, String> {
        use chrono::Timelike;
        let time = NaiveTime::parse_from_str(value, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
            .map_err(|e| format!("expected HH:MM ({})", e))?;
        NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)
            .ok_or_else(|| format!("invalid time {}", value))
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}

fn default_capacity() -> u32 {
    DEFAULT_CAPACITY
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub time_slot: Option<TimeSlot>,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    #[serde(default)]
    pub instructor_id: Option<String>,
}

impl CourseRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            time_slot: None,
            capacity: DEFAULT_CAPACITY,
            instructor_id: None,
        }
    }

    pub fn with_time_slot(mut self, time_slot: TimeSlot) -> Self {
        self.time_slot = Some(time_slot);
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_instructor(mut self, instructor_id: impl Into<String>) -> Self {
        self.instructor_id = Some(instructor_id.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    #[serde(alias = "enrolled")]
    Active,
    Dropped,
    Completed,
}

impl EnrollmentStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, EnrollmentStatus::Active)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Dropped => "dropped",
            EnrollmentStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub status: EnrollmentStatus,
    #[serde(default)]
    pub grade: Option<String>,
}

impl EnrollmentRecord {
    /// A fresh `active` enrollment with a random id.
    pub fn active(student_id: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            student_id: student_id.into(),
            course_id: course_id.into(),
            status: EnrollmentStatus::Active,
            grade: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EnrollmentStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == EnrollmentStatus::Completed
    }
}

impl Validate for StudentRecord {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("student.user_id", &self.user_id)?;
        validate_non_empty_string("student.name", &self.name)
    }
}

impl Validate for StaffRecord {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("staff.user_id", &self.user_id)?;
        validate_non_empty_string("staff.name", &self.name)?;
        validate_non_empty_string("staff.department", &self.department)
    }
}

impl Validate for TimeSlot {
    fn validate(&self) -> Result<()> {
        validate_range("time_slot.weekday", self.weekday, 1, 7)?;
        validate_range("time_slot.duration", self.duration, 1, MAX_SLOT_DURATION)
    }
}

impl Validate for CourseRecord {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("course.id", &self.id)?;
        validate_non_empty_string("course.name", &self.name)?;
        validate_positive_number("course.capacity", self.capacity, 1)?;
        if let Some(instructor_id) = &self.instructor_id {
            validate_non_empty_string("course.instructor_id", instructor_id)?;
        }
        match &self.time_slot {
            Some(slot) => slot.validate(),
            None => Ok(()),
        }
    }
}

impl Validate for EnrollmentRecord {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("enrollment.id", &self.id)?;
        validate_non_empty_string("enrollment.student_id", &self.student_id)?;
        validate_non_empty_string("enrollment.course_id", &self.course_id)?;
        match (&self.status, &self.grade) {
            (EnrollmentStatus::Completed, Some(grade)) => {
                validate_non_empty_string("enrollment.grade", grade)
            }
            (EnrollmentStatus::Completed, None) => Err(RegistryError::Validation {
                field: "enrollment.grade".to_string(),
                value: String::new(),
                reason: "A completed enrollment must carry a grade".to_string(),
            }),
            (status, Some(grade)) => Err(RegistryError::Validation {
                field: "enrollment.grade".to_string(),
                value: grade.clone(),
                reason: format!("A {} enrollment cannot carry a grade", status),
            }),
            (_, None) => Ok(()),
        }
    }
}

impl Record for StudentRecord {
    const KIND: EntityKind = EntityKind::Student;

    fn id(&self) -> &str {
        &self.user_id
    }
}

impl Record for StaffRecord {
    const KIND: EntityKind = EntityKind::Staff;

    fn id(&self) -> &str {
        &self.user_id
    }
}

impl Record for CourseRecord {
    const KIND: EntityKind = EntityKind::Course;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for EnrollmentRecord {
    const KIND: EntityKind = EntityKind::Enrollment;

    fn id(&self) -> &str {
        &self.id
    }
}

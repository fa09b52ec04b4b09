//! Relationship-resolved entities built by
//! [`StorageSystem`](crate::core::storage_system::StorageSystem).
//!
//! Entities are snapshots. They answer relationship questions without touching
//! a store, and go stale as soon as anything is written.

use crate::domain::model::{EnrollmentRecord, StaffRecord, TimeSlot};

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub user_id: String,
    pub name: String,
    /// Every enrollment referencing this student, in store order.
    pub enrollments: Vec<EnrollmentRecord>,
}

impl Student {
    pub fn is_enrolled_in(&self, course_id: &str) -> bool {
        self.enrollments
            .iter()
            .any(|e| e.course_id == course_id && e.is_active())
    }

    pub fn has_completed(&self, course_id: &str) -> bool {
        self.completed().any(|e| e.course_id == course_id)
    }

    /// Grade of the completed enrollment in `course_id`, if any.
    pub fn get_grade(&self, course_id: &str) -> Option<&str> {
        self.completed()
            .find(|e| e.course_id == course_id)
            .and_then(|e| e.grade.as_deref())
    }

    /// `(course_id, grade)` for every completed enrollment. Call again to
    /// restart.
    pub fn view_transcript(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.completed()
            .filter_map(|e| Some((e.course_id.as_str(), e.grade.as_deref()?)))
    }

    pub fn current_course_load(&self) -> usize {
        self.active_course_ids().count()
    }

    pub fn active_course_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.enrollments
            .iter()
            .filter(|e| e.is_active())
            .map(|e| e.course_id.as_str())
    }

    pub fn enrollment_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.enrollments.iter().map(|e| e.id.as_str())
    }

    fn completed(&self) -> impl Iterator<Item = &EnrollmentRecord> + '_ {
        self.enrollments.iter().filter(|e| e.is_completed())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Staff {
    pub user_id: String,
    pub name: String,
    pub department: String,
    pub assigned_course_ids: Vec<String>,
}

impl Staff {
    pub fn is_assigned_to(&self, course_id: &str) -> bool {
        self.assigned_course_ids.iter().any(|id| id == course_id)
    }

    pub fn get_course_load(&self) -> usize {
        self.assigned_course_ids.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub time_slot: Option<TimeSlot>,
    pub capacity: u32,
    pub instructor_id: Option<String>,
    /// Resolved from `instructor_id`; `None` when unset or dangling.
    pub instructor: Option<StaffRecord>,
    pub enrollments: Vec<EnrollmentRecord>,
}

impl Course {
    /// Active enrollments only; dropped and completed ones free their seat.
    pub fn current_enrollment_count(&self) -> usize {
        self.enrollments.iter().filter(|e| e.is_active()).count()
    }

    pub fn is_full(&self) -> bool {
        self.current_enrollment_count() >= self.capacity as usize
    }

    pub fn enrolled_student_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.enrollments
            .iter()
            .filter(|e| e.is_active())
            .map(|e| e.student_id.as_str())
    }

    pub fn is_student_enrolled(&self, student_id: &str) -> bool {
        self.enrolled_student_ids().any(|id| id == student_id)
    }

    pub fn enrollment_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.enrollments.iter().map(|e| e.id.as_str())
    }

    pub fn has_time_conflict(&self, other: &Course) -> bool {
        match (&self.time_slot, &other.time_slot) {
            (Some(a), Some(b)) => a.overlaps(b),
            _ => false,
        }
    }
}

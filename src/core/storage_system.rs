//! Relationship assembly over the four record stores.
//!
//! [`StorageSystem`] never caches: every read loads all record sets once,
//! indexes them by id, and joins them into [`Student`], [`Staff`] and
//! [`Course`] entities. Writes go through the stores directly (via the
//! services), so the next read always reflects them.

use crate::adapters::{JsonFileStore, MemoryStore};
use crate::domain::entities::{Course, Staff, Student};
use crate::domain::model::{CourseRecord, EnrollmentRecord, StaffRecord, StudentRecord};
use crate::domain::ports::{Record, RecordStore};
use crate::utils::error::{EntityKind, RegistryError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const STUDENTS_FILE: &str = "students.json";
pub const STAFF_FILE: &str = "staff.json";
pub const COURSES_FILE: &str = "courses.json";
pub const ENROLLMENTS_FILE: &str = "enrollments.json";

pub struct StorageSystem {
    students: Box<dyn RecordStore<StudentRecord>>,
    staff: Box<dyn RecordStore<StaffRecord>>,
    courses: Box<dyn RecordStore<CourseRecord>>,
    enrollments: Box<dyn RecordStore<EnrollmentRecord>>,
}

/// All entities assembled from a single load of the stores.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub students: Vec<Student>,
    pub staff: Vec<Staff>,
    pub courses: Vec<Course>,
    student_index: HashMap<String, usize>,
    staff_index: HashMap<String, usize>,
    course_index: HashMap<String, usize>,
}

impl Snapshot {
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.student_index.get(id).map(|&i| &self.students[i])
    }

    pub fn staff_member(&self, id: &str) -> Option<&Staff> {
        self.staff_index.get(id).map(|&i| &self.staff[i])
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.course_index.get(id).map(|&i| &self.courses[i])
    }
}

fn index_by_id<R: Record>(records: &[R]) -> HashMap<String, usize> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| (r.id().to_string(), i))
        .collect()
}

impl StorageSystem {
    pub fn new(
        students: Box<dyn RecordStore<StudentRecord>>,
        staff: Box<dyn RecordStore<StaffRecord>>,
        courses: Box<dyn RecordStore<CourseRecord>>,
        enrollments: Box<dyn RecordStore<EnrollmentRecord>>,
    ) -> Self {
        Self {
            students,
            staff,
            courses,
            enrollments,
        }
    }

    /// JSON-backed system rooted at `data_dir`, which is created if missing.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;
        debug!("Opening storage in {:?}", data_dir);

        Ok(Self::new(
            Box::new(JsonFileStore::open(data_dir.join(STUDENTS_FILE))?),
            Box::new(JsonFileStore::open(data_dir.join(STAFF_FILE))?),
            Box::new(JsonFileStore::open(data_dir.join(COURSES_FILE))?),
            Box::new(JsonFileStore::open(data_dir.join(ENROLLMENTS_FILE))?),
        ))
    }

    pub fn in_memory() -> Self {
        Self::new(
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
        )
    }

    pub fn student_store(&self) -> &dyn RecordStore<StudentRecord> {
        self.students.as_ref()
    }

    pub fn staff_store(&self) -> &dyn RecordStore<StaffRecord> {
        self.staff.as_ref()
    }

    pub fn course_store(&self) -> &dyn RecordStore<CourseRecord> {
        self.courses.as_ref()
    }

    pub fn enrollment_store(&self) -> &dyn RecordStore<EnrollmentRecord> {
        self.enrollments.as_ref()
    }

    pub fn enrollments_for_student(&self, student_id: &str) -> Result<Vec<EnrollmentRecord>> {
        let mut records = self.enrollments.get_all()?;
        records.retain(|e| e.student_id == student_id);
        Ok(records)
    }

    pub fn enrollments_for_course(&self, course_id: &str) -> Result<Vec<EnrollmentRecord>> {
        let mut records = self.enrollments.get_all()?;
        records.retain(|e| e.course_id == course_id);
        Ok(records)
    }

    /// Loads every store once and joins the records.
    ///
    /// An enrollment whose student or course cannot be resolved is an
    /// `Integrity` error. A dangling `instructor_id` only leaves the course
    /// without an instructor.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let student_records = self.students.get_all()?;
        let staff_records = self.staff.get_all()?;
        let course_records = self.courses.get_all()?;
        let enrollment_records = self.enrollments.get_all()?;

        let student_index = index_by_id(&student_records);
        let staff_index = index_by_id(&staff_records);
        let course_index = index_by_id(&course_records);

        let mut by_student = vec![Vec::new(); student_records.len()];
        let mut by_course = vec![Vec::new(); course_records.len()];
        for enrollment in enrollment_records {
            let s = *student_index
                .get(enrollment.student_id.as_str())
                .ok_or_else(|| RegistryError::Integrity {
                    message: format!(
                        "enrollment {} references unknown student {}",
                        enrollment.id, enrollment.student_id
                    ),
                })?;
            let c = *course_index
                .get(enrollment.course_id.as_str())
                .ok_or_else(|| RegistryError::Integrity {
                    message: format!(
                        "enrollment {} references unknown course {}",
                        enrollment.id, enrollment.course_id
                    ),
                })?;
            by_course[c].push(enrollment.clone());
            by_student[s].push(enrollment);
        }

        let mut by_instructor: Vec<Vec<String>> = vec![Vec::new(); staff_records.len()];
        let mut courses = Vec::with_capacity(course_records.len());
        for (record, enrollments) in course_records.into_iter().zip(by_course) {
            let instructor = match record.instructor_id.as_deref() {
                Some(staff_id) => match staff_index.get(staff_id) {
                    Some(&i) => {
                        by_instructor[i].push(record.id.clone());
                        Some(staff_records[i].clone())
                    }
                    None => {
                        warn!(
                            "Course {} references unknown instructor {}",
                            record.id, staff_id
                        );
                        None
                    }
                },
                None => None,
            };
            courses.push(Course {
                id: record.id,
                name: record.name,
                time_slot: record.time_slot,
                capacity: record.capacity,
                instructor_id: record.instructor_id,
                instructor,
                enrollments,
            });
        }

        let students = student_records
            .into_iter()
            .zip(by_student)
            .map(|(record, enrollments)| Student {
                user_id: record.user_id,
                name: record.name,
                enrollments,
            })
            .collect();

        let staff = staff_records
            .into_iter()
            .zip(by_instructor)
            .map(|(record, assigned_course_ids)| Staff {
                user_id: record.user_id,
                name: record.name,
                department: record.department,
                assigned_course_ids,
            })
            .collect();

        Ok(Snapshot {
            students,
            staff,
            courses,
            student_index,
            staff_index,
            course_index,
        })
    }

    pub fn get_student(&self, id: &str) -> Result<Student> {
        let mut snapshot = self.snapshot()?;
        match snapshot.student_index.get(id) {
            Some(&i) => Ok(snapshot.students.swap_remove(i)),
            None => Err(RegistryError::not_found(EntityKind::Student, id)),
        }
    }

    pub fn get_staff(&self, id: &str) -> Result<Staff> {
        let mut snapshot = self.snapshot()?;
        match snapshot.staff_index.get(id) {
            Some(&i) => Ok(snapshot.staff.swap_remove(i)),
            None => Err(RegistryError::not_found(EntityKind::Staff, id)),
        }
    }

    pub fn get_course(&self, id: &str) -> Result<Course> {
        let mut snapshot = self.snapshot()?;
        match snapshot.course_index.get(id) {
            Some(&i) => Ok(snapshot.courses.swap_remove(i)),
            None => Err(RegistryError::not_found(EntityKind::Course, id)),
        }
    }

    pub fn get_all_students(&self) -> Result<Vec<Student>> {
        Ok(self.snapshot()?.students)
    }

    pub fn get_all_staff(&self) -> Result<Vec<Staff>> {
        Ok(self.snapshot()?.staff)
    }

    pub fn get_all_courses(&self) -> Result<Vec<Course>> {
        Ok(self.snapshot()?.courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{EnrollmentStatus, TimeSlot};

    fn populated() -> StorageSystem {
        let system = StorageSystem::in_memory();
        system
            .student_store()
            .add(StudentRecord::new("s1001", "Alice Smith").unwrap())
            .unwrap();
        system
            .student_store()
            .add(StudentRecord::new("s1002", "Bob Johnson").unwrap())
            .unwrap();
        system
            .staff_store()
            .add(StaffRecord::new("p2001", "Dr. Emily White", "Computer Science").unwrap())
            .unwrap();
        system
            .staff_store()
            .add(StaffRecord::new("p2002", "Dr. Michael Green", "Mathematics").unwrap())
            .unwrap();

        let courses = [
            CourseRecord::new("CS101", "Programming")
                .with_time_slot(TimeSlot::new(1, "09:00", 90).unwrap())
                .with_capacity(50)
                .with_instructor("p2001"),
            CourseRecord::new("MATH101", "Calculus I")
                .with_time_slot(TimeSlot::new(2, "10:30", 60).unwrap())
                .with_capacity(60)
                .with_instructor("p2002"),
            CourseRecord::new("CS201", "Data Structures")
                .with_capacity(40)
                .with_instructor("p2001"),
        ];
        for course in courses {
            system.course_store().add(course).unwrap();
        }

        let enrollments = [
            ("enr_001", "s1001", "CS101", EnrollmentStatus::Active, None),
            ("enr_002", "s1001", "MATH101", EnrollmentStatus::Completed, Some("A")),
            ("enr_003", "s1002", "CS101", EnrollmentStatus::Active, None),
            ("enr_004", "s1002", "CS201", EnrollmentStatus::Completed, Some("B+")),
        ];
        for (id, student_id, course_id, status, grade) in enrollments {
            system
                .enrollment_store()
                .add(EnrollmentRecord {
                    id: id.to_string(),
                    student_id: student_id.to_string(),
                    course_id: course_id.to_string(),
                    status,
                    grade: grade.map(str::to_string),
                })
                .unwrap();
        }
        system
    }

    #[test]
    fn test_get_student_resolves_enrollments() {
        let system = populated();
        let student = system.get_student("s1001").unwrap();
        assert_eq!(student.name, "Alice Smith");
        assert!(student.is_enrolled_in("CS101"));
        assert_eq!(student.get_grade("MATH101"), Some("A"));
        assert_eq!(
            student.enrollment_ids().collect::<Vec<_>>(),
            vec!["enr_001", "enr_002"]
        );
    }

    #[test]
    fn test_get_staff_resolves_assigned_courses() {
        let system = populated();
        let staff = system.get_staff("p2001").unwrap();
        assert_eq!(staff.assigned_course_ids, vec!["CS101", "CS201"]);
        assert_eq!(staff.get_course_load(), 2);
    }

    #[test]
    fn test_get_course_resolves_instructor_and_students() {
        let system = populated();
        let course = system.get_course("CS101").unwrap();
        assert_eq!(
            course.instructor.as_ref().map(|s| s.name.as_str()),
            Some("Dr. Emily White")
        );
        assert_eq!(
            course.enrolled_student_ids().collect::<Vec<_>>(),
            vec!["s1001", "s1002"]
        );
        assert_eq!(course.current_enrollment_count(), 2);
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let system = populated();
        assert!(matches!(
            system.get_student("nope"),
            Err(RegistryError::NotFound {
                kind: EntityKind::Student,
                ..
            })
        ));
        assert!(matches!(
            system.get_staff("nope"),
            Err(RegistryError::NotFound {
                kind: EntityKind::Staff,
                ..
            })
        ));
        assert!(matches!(
            system.get_course("nope"),
            Err(RegistryError::NotFound {
                kind: EntityKind::Course,
                ..
            })
        ));
    }

    #[test]
    fn test_bulk_accessors_keep_insertion_order() {
        let system = populated();
        let ids: Vec<String> = system
            .get_all_courses()
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["CS101", "MATH101", "CS201"]);
        assert_eq!(system.get_all_students().unwrap().len(), 2);
        assert_eq!(system.get_all_staff().unwrap()[1].user_id, "p2002");
    }

    #[test]
    fn test_every_enrollment_is_visible_from_both_sides() {
        let system = populated();
        let snapshot = system.snapshot().unwrap();
        for enrollment in system.enrollment_store().get_all().unwrap() {
            let student = snapshot.student(&enrollment.student_id).unwrap();
            let course = snapshot.course(&enrollment.course_id).unwrap();
            assert!(student.enrollment_ids().any(|id| id == enrollment.id));
            assert!(course.enrollment_ids().any(|id| id == enrollment.id));
        }
    }

    #[test]
    fn test_orphaned_enrollment_is_integrity_error() {
        let system = populated();
        system.student_store().delete("s1002").unwrap();
        assert!(matches!(
            system.snapshot(),
            Err(RegistryError::Integrity { .. })
        ));
    }

    #[test]
    fn test_dangling_instructor_is_dropped() {
        let system = populated();
        system.staff_store().delete("p2002").unwrap();
        let course = system.get_course("MATH101").unwrap();
        assert_eq!(course.instructor_id.as_deref(), Some("p2002"));
        assert!(course.instructor.is_none());
    }
}

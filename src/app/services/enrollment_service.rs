use crate::core::{EnrollmentRecord, EnrollmentStatus, RecordStore, StorageSystem};
use crate::utils::error::{EnrollmentError, EntityKind, RegistryError, Result};
use crate::utils::validation::validate_non_empty_string;
use tracing::{debug, info};

/// Enrollment state machine: `active` → `dropped` | `completed`.
///
/// Guards run before any write, so a rejected request leaves the stores
/// untouched.
pub struct EnrollmentService<'a> {
    storage: &'a StorageSystem,
}

impl<'a> EnrollmentService<'a> {
    pub fn new(storage: &'a StorageSystem) -> Self {
        Self { storage }
    }

    /// Creates a new `active` enrollment.
    ///
    /// Guards, in order: student exists, course exists, no active enrollment
    /// for the pair, course not full, no time conflict with the student's
    /// other active courses.
    pub fn enroll(&self, student_id: &str, course_id: &str) -> Result<EnrollmentRecord> {
        let snapshot = self.storage.snapshot()?;

        let student = snapshot
            .student(student_id)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Student, student_id))?;
        let course = snapshot
            .course(course_id)
            .ok_or_else(|| EnrollmentError::CourseNotFound {
                course_id: course_id.to_string(),
            })?;

        if student.is_enrolled_in(course_id) {
            return Err(EnrollmentError::AlreadyEnrolled {
                course_id: course_id.to_string(),
            }
            .into());
        }

        if course.is_full() {
            return Err(EnrollmentError::CourseFull {
                course_id: course_id.to_string(),
            }
            .into());
        }

        for enrolled in student
            .active_course_ids()
            .filter_map(|id| snapshot.course(id))
        {
            if enrolled.has_time_conflict(course) {
                return Err(EnrollmentError::ScheduleConflict {
                    course_id: course.id.clone(),
                    conflicting_course_id: enrolled.id.clone(),
                }
                .into());
            }
        }

        let record = self
            .storage
            .enrollment_store()
            .add(EnrollmentRecord::active(student_id, course_id))?;
        info!(
            "Enrolled student {} in course {} ({})",
            student_id, course_id, record.id
        );
        Ok(record)
    }

    pub fn drop(&self, enrollment_id: &str) -> Result<EnrollmentRecord> {
        let record = self.find_enrollment(enrollment_id)?;
        self.transition(record, EnrollmentStatus::Dropped, None)
    }

    pub fn complete(&self, enrollment_id: &str, grade: &str) -> Result<EnrollmentRecord> {
        validate_non_empty_string("grade", grade)?;
        let record = self.find_enrollment(enrollment_id)?;
        self.transition(record, EnrollmentStatus::Completed, Some(grade.to_string()))
    }

    /// Drops the student's active enrollment in `course_id`.
    pub fn drop_course(&self, student_id: &str, course_id: &str) -> Result<EnrollmentRecord> {
        let record = self.find_active(student_id, course_id)?;
        self.transition(record, EnrollmentStatus::Dropped, None)
    }

    /// Completes the student's active enrollment in `course_id` with `grade`.
    pub fn complete_course(
        &self,
        student_id: &str,
        course_id: &str,
        grade: &str,
    ) -> Result<EnrollmentRecord> {
        validate_non_empty_string("grade", grade)?;
        let record = self.find_active(student_id, course_id)?;
        self.transition(record, EnrollmentStatus::Completed, Some(grade.to_string()))
    }

    pub fn get_student_enrollments(&self, student_id: &str) -> Result<Vec<EnrollmentRecord>> {
        if !self.storage.student_store().exists(student_id)? {
            return Err(RegistryError::not_found(EntityKind::Student, student_id));
        }
        self.storage.enrollments_for_student(student_id)
    }

    pub fn get_course_enrollments(&self, course_id: &str) -> Result<Vec<EnrollmentRecord>> {
        if !self.storage.course_store().exists(course_id)? {
            return Err(RegistryError::not_found(EntityKind::Course, course_id));
        }
        self.storage.enrollments_for_course(course_id)
    }

    fn find_enrollment(&self, enrollment_id: &str) -> Result<EnrollmentRecord> {
        let record = self
            .storage
            .enrollment_store()
            .find(enrollment_id)?
            .ok_or_else(|| EnrollmentError::EnrollmentNotFound {
                enrollment_id: enrollment_id.to_string(),
            })?;
        if !self.storage.course_store().exists(&record.course_id)? {
            return Err(EnrollmentError::CourseNotFound {
                course_id: record.course_id,
            }
            .into());
        }
        Ok(record)
    }

    fn find_active(&self, student_id: &str, course_id: &str) -> Result<EnrollmentRecord> {
        if !self.storage.student_store().exists(student_id)? {
            return Err(RegistryError::not_found(EntityKind::Student, student_id));
        }
        if !self.storage.course_store().exists(course_id)? {
            return Err(EnrollmentError::CourseNotFound {
                course_id: course_id.to_string(),
            }
            .into());
        }

        self.storage
            .enrollments_for_student(student_id)?
            .into_iter()
            .find(|e| e.course_id == course_id && e.is_active())
            .ok_or_else(|| {
                EnrollmentError::NotEnrolled {
                    student_id: student_id.to_string(),
                    course_id: course_id.to_string(),
                }
                .into()
            })
    }

    fn transition(
        &self,
        mut record: EnrollmentRecord,
        status: EnrollmentStatus,
        grade: Option<String>,
    ) -> Result<EnrollmentRecord> {
        if record.status.is_terminal() {
            return Err(EnrollmentError::NotActive {
                enrollment_id: record.id,
                status: record.status.to_string(),
            }
            .into());
        }

        debug!("Enrollment {}: {} -> {}", record.id, record.status, status);
        record.status = status;
        record.grade = grade;
        let record = self.storage.enrollment_store().update(record)?;
        info!(
            "Student {} {} course {}",
            record.student_id, record.status, record.course_id
        );
        Ok(record)
    }
}

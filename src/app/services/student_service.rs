use crate::core::{RecordStore, StorageSystem, Student, StudentRecord};
use crate::utils::error::{EntityKind, RegistryError, Result};
use crate::utils::validation::Validate;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub course_id: String,
    pub course_name: String,
    pub grade: String,
}

pub struct StudentService<'a> {
    storage: &'a StorageSystem,
}

impl<'a> StudentService<'a> {
    pub fn new(storage: &'a StorageSystem) -> Self {
        Self { storage }
    }

    pub fn get_all_students(&self) -> Result<Vec<Student>> {
        self.storage.get_all_students()
    }

    pub fn add_student(&self, record: StudentRecord) -> Result<Student> {
        record.validate()?;
        let store = self.storage.student_store();
        if store.exists(&record.user_id)? {
            return Err(RegistryError::already_exists(
                EntityKind::Student,
                record.user_id,
            ));
        }

        let record = store.add(record)?;
        info!("Added student {} ({})", record.user_id, record.name);
        self.storage.get_student(&record.user_id)
    }

    pub fn get_student(&self, student_id: &str) -> Result<Student> {
        self.storage.get_student(student_id)
    }

    pub fn student_exists(&self, student_id: &str) -> Result<bool> {
        self.storage.student_store().exists(student_id)
    }

    /// Removes the student together with all of their enrollments.
    pub fn remove_student(&self, student_id: &str) -> Result<()> {
        let store = self.storage.student_store();
        if !store.exists(student_id)? {
            return Err(RegistryError::not_found(EntityKind::Student, student_id));
        }

        let enrollments = self.storage.enrollments_for_student(student_id)?;
        for enrollment in &enrollments {
            self.storage.enrollment_store().delete(&enrollment.id)?;
        }
        store.delete(student_id)?;
        info!(
            "Removed student {} and {} enrollment(s)",
            student_id,
            enrollments.len()
        );
        Ok(())
    }

    /// Completed courses with their grades, in enrollment order.
    pub fn get_transcript(&self, student_id: &str) -> Result<Vec<TranscriptEntry>> {
        let snapshot = self.storage.snapshot()?;
        let student = snapshot
            .student(student_id)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Student, student_id))?;

        Ok(student
            .view_transcript()
            .map(|(course_id, grade)| TranscriptEntry {
                course_id: course_id.to_string(),
                course_name: snapshot
                    .course(course_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
                grade: grade.to_string(),
            })
            .collect())
    }
}

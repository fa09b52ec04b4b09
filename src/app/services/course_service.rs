use crate::core::{Course, CourseRecord, RecordStore, StorageSystem};
use crate::utils::error::{EntityKind, RegistryError, Result};
use crate::utils::validation::Validate;
use tracing::info;

pub struct CourseService<'a> {
    storage: &'a StorageSystem,
}

impl<'a> CourseService<'a> {
    pub fn new(storage: &'a StorageSystem) -> Self {
        Self { storage }
    }

    pub fn get_all_courses(&self) -> Result<Vec<Course>> {
        self.storage.get_all_courses()
    }

    /// Adds a course. A given `instructor_id` must name existing staff.
    pub fn add_course(&self, record: CourseRecord) -> Result<Course> {
        record.validate()?;
        let store = self.storage.course_store();
        if store.exists(&record.id)? {
            return Err(RegistryError::already_exists(EntityKind::Course, record.id));
        }
        if let Some(staff_id) = record.instructor_id.as_deref() {
            self.ensure_staff(staff_id)?;
        }

        let record = store.add(record)?;
        info!("Added course {} ({})", record.id, record.name);
        self.storage.get_course(&record.id)
    }

    pub fn get_course(&self, course_id: &str) -> Result<Course> {
        self.storage.get_course(course_id)
    }

    /// Removes the course together with all of its enrollments.
    pub fn remove_course(&self, course_id: &str) -> Result<()> {
        let store = self.storage.course_store();
        if !store.exists(course_id)? {
            return Err(RegistryError::not_found(EntityKind::Course, course_id));
        }

        let enrollments = self.storage.enrollments_for_course(course_id)?;
        for enrollment in &enrollments {
            self.storage.enrollment_store().delete(&enrollment.id)?;
        }
        store.delete(course_id)?;
        info!(
            "Removed course {} and {} enrollment(s)",
            course_id,
            enrollments.len()
        );
        Ok(())
    }

    pub fn assign_instructor(&self, course_id: &str, staff_id: &str) -> Result<Course> {
        let store = self.storage.course_store();
        let mut record = store.get_by_id(course_id)?;
        self.ensure_staff(staff_id)?;

        record.instructor_id = Some(staff_id.to_string());
        store.update(record)?;
        info!("Assigned staff {} to course {}", staff_id, course_id);
        self.storage.get_course(course_id)
    }

    fn ensure_staff(&self, staff_id: &str) -> Result<()> {
        if self.storage.staff_store().exists(staff_id)? {
            Ok(())
        } else {
            Err(RegistryError::not_found(EntityKind::Staff, staff_id))
        }
    }
}

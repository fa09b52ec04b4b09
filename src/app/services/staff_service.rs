use crate::core::{RecordStore, Staff, StaffRecord, StorageSystem};
use crate::utils::error::{EntityKind, RegistryError, Result};
use crate::utils::validation::Validate;
use tracing::info;

pub struct StaffService<'a> {
    storage: &'a StorageSystem,
}

impl<'a> StaffService<'a> {
    pub fn new(storage: &'a StorageSystem) -> Self {
        Self { storage }
    }

    pub fn get_all_staff(&self) -> Result<Vec<Staff>> {
        self.storage.get_all_staff()
    }

    pub fn add_staff(&self, record: StaffRecord) -> Result<Staff> {
        record.validate()?;
        let store = self.storage.staff_store();
        if store.exists(&record.user_id)? {
            return Err(RegistryError::already_exists(
                EntityKind::Staff,
                record.user_id,
            ));
        }

        let record = store.add(record)?;
        info!(
            "Added staff {} ({}, {})",
            record.user_id, record.name, record.department
        );
        self.storage.get_staff(&record.user_id)
    }

    pub fn get_staff(&self, staff_id: &str) -> Result<Staff> {
        self.storage.get_staff(staff_id)
    }

    pub fn staff_exists(&self, staff_id: &str) -> Result<bool> {
        self.storage.staff_store().exists(staff_id)
    }

    /// Removes the staff member; courses they taught are left unassigned.
    pub fn remove_staff(&self, staff_id: &str) -> Result<()> {
        let store = self.storage.staff_store();
        if !store.exists(staff_id)? {
            return Err(RegistryError::not_found(EntityKind::Staff, staff_id));
        }

        let courses = self.storage.course_store();
        for mut course in courses.get_all()? {
            if course.instructor_id.as_deref() == Some(staff_id) {
                course.instructor_id = None;
                info!("Unassigned staff {} from course {}", staff_id, course.id);
                courses.update(course)?;
            }
        }
        store.delete(staff_id)?;
        info!("Removed staff {}", staff_id);
        Ok(())
    }
}

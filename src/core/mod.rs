pub mod storage_system;

pub use crate::domain::entities::{Course, Staff, Student};
pub use crate::domain::model::{
    CourseRecord, EnrollmentRecord, EnrollmentStatus, StaffRecord, StudentRecord, TimeSlot,
};
pub use crate::domain::ports::{Record, RecordStore};
pub use crate::utils::error::Result;
pub use storage_system::{Snapshot, StorageSystem};

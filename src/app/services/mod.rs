pub mod course_service;
pub mod enrollment_service;
pub mod staff_service;
pub mod student_service;

pub use course_service::CourseService;
pub use enrollment_service::EnrollmentService;
pub use staff_service::StaffService;
pub use student_service::{StudentService, TranscriptEntry};

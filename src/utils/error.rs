use std::fmt;
use thiserror::Error;

/// Kind of record a lookup or uniqueness error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Student,
    Staff,
    Course,
    Enrollment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Student => "Student",
            EntityKind::Staff => "Staff",
            EntityKind::Course => "Course",
            EntityKind::Enrollment => "Enrollment",
        };
        f.write_str(name)
    }
}

/// Rule violations raised by the enrollment workflow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentError {
    #[error("Course {course_id} not found")]
    CourseNotFound { course_id: String },

    #[error("Student is already enrolled in course {course_id}")]
    AlreadyEnrolled { course_id: String },

    #[error("Course {course_id} is full and cannot accept more enrollments")]
    CourseFull { course_id: String },

    #[error("Schedule conflict: course {course_id} conflicts with course {conflicting_course_id}")]
    ScheduleConflict {
        course_id: String,
        conflicting_course_id: String,
    },

    #[error("Enrollment {enrollment_id} not found")]
    EnrollmentNotFound { enrollment_id: String },

    #[error("Enrollment {enrollment_id} is already {status}")]
    NotActive {
        enrollment_id: String,
        status: String,
    },

    #[error("Student {student_id} is not enrolled in course {course_id}")]
    NotEnrolled {
        student_id: String,
        course_id: String,
    },
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Enrollment(#[from] EnrollmentError),

    #[error("{kind} with ID {id} not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} with ID {id} already exists")]
    AlreadyExists { kind: EntityKind, id: String },

    #[error("Data integrity error: {message}")]
    Integrity { message: String },

    #[error("Invalid value for '{field}': '{value}' - {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Rule,
    Lookup,
    Input,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RegistryError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        RegistryError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn already_exists(kind: EntityKind, id: impl Into<String>) -> Self {
        RegistryError::AlreadyExists {
            kind,
            id: id.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RegistryError::Enrollment(_) => ErrorCategory::Rule,
            RegistryError::NotFound { .. } | RegistryError::AlreadyExists { .. } => {
                ErrorCategory::Lookup
            }
            RegistryError::Validation { .. } | RegistryError::Config { .. } => ErrorCategory::Input,
            RegistryError::Integrity { .. } | RegistryError::Serialization(_) => {
                ErrorCategory::Data
            }
            RegistryError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Rule => ErrorSeverity::Low,
            ErrorCategory::Lookup | ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RegistryError::Io(e) => format!("Could not access the data files: {}", e),
            RegistryError::Serialization(e) => format!("A data file is not valid JSON: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RegistryError::Enrollment(EnrollmentError::CourseFull { .. }) => {
                "Choose another course or ask for the capacity to be raised"
            }
            RegistryError::Enrollment(EnrollmentError::ScheduleConflict { .. }) => {
                "Drop the conflicting course first or pick a course at another time"
            }
            RegistryError::Enrollment(EnrollmentError::AlreadyEnrolled { .. }) => {
                "The student is already enrolled; no action is needed"
            }
            RegistryError::Enrollment(_) => "Check the student and course identifiers",
            RegistryError::NotFound { .. } => "List existing records to find the right identifier",
            RegistryError::AlreadyExists { .. } => "Use a different identifier",
            RegistryError::Validation { .. } => "Correct the highlighted value and retry",
            RegistryError::Config { .. } => "Check the configuration file and command-line flags",
            RegistryError::Integrity { .. } | RegistryError::Serialization(_) => {
                "Inspect the JSON files in the data directory for broken references"
            }
            RegistryError::Io(_) => "Check that the data directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;

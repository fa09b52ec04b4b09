use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "course-registry")]
#[command(about = "University course management: students, staff, courses and enrollments")]
pub struct CliConfig {
    /// Directory holding the JSON data files (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Commands related to students
    #[command(subcommand)]
    Student(StudentCommand),
    /// Commands related to staff
    #[command(subcommand)]
    Staff(StaffCommand),
    /// Commands related to courses
    #[command(subcommand)]
    Course(CourseCommand),
    /// Commands related to student course enrollments
    #[command(subcommand)]
    Enrollment(EnrollmentCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum StudentCommand {
    /// Add a new student
    Add { student_id: String, name: String },
    /// Show a student
    Get { student_id: String },
    /// Check whether a student exists
    Exists { student_id: String },
    /// Remove a student and their enrollments
    Delete { student_id: String },
    /// List all students
    List,
    /// Completed courses and grades
    Transcript { student_id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum StaffCommand {
    /// Add a new staff member
    Add {
        staff_id: String,
        name: String,
        department: String,
    },
    /// Show a staff member
    Get { staff_id: String },
    /// Check whether a staff member exists
    Exists { staff_id: String },
    /// Remove a staff member
    Delete { staff_id: String },
    /// List all staff
    List,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CourseCommand {
    /// Add a new course
    Add {
        course_id: String,
        name: String,
        /// Weekday number (1=Mon ... 7=Sun)
        #[arg(long, requires_all = ["start_time", "duration"])]
        weekday: Option<u8>,
        /// Start time (HH:MM)
        #[arg(long, requires_all = ["weekday", "duration"])]
        start_time: Option<String>,
        /// Duration in minutes
        #[arg(long, requires_all = ["weekday", "start_time"])]
        duration: Option<u32>,
        /// Max number of students
        #[arg(long)]
        capacity: Option<u32>,
        #[arg(long)]
        instructor_id: Option<String>,
    },
    /// Show a course
    Get { course_id: String },
    /// Delete a course and its enrollments
    Delete { course_id: String },
    /// List all courses
    List,
    /// Assign a staff member as instructor
    Assign { course_id: String, staff_id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum EnrollmentCommand {
    /// Enroll a student in a course
    Add { student_id: String, course_id: String },
    /// Drop a student from a course
    Drop { student_id: String, course_id: String },
    /// Mark a course as completed with a grade
    Complete {
        student_id: String,
        course_id: String,
        grade: String,
    },
    /// All enrollments of a student
    Student { student_id: String },
    /// All enrollments of a course
    Course { course_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_course_add_with_slot() {
        let config = CliConfig::try_parse_from([
            "course-registry",
            "--data-dir",
            "/tmp/d",
            "course",
            "add",
            "CS101",
            "Programming",
            "--weekday",
            "1",
            "--start-time",
            "09:00",
            "--duration",
            "90",
        ])
        .unwrap();

        assert_eq!(config.data_dir.as_deref(), Some("/tmp/d"));
        match config.command {
            Command::Course(CourseCommand::Add {
                weekday,
                start_time,
                duration,
                capacity,
                ..
            }) => {
                assert_eq!(weekday, Some(1));
                assert_eq!(start_time.as_deref(), Some("09:00"));
                assert_eq!(duration, Some(90));
                assert_eq!(capacity, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_partial_time_slot_is_rejected() {
        let result = CliConfig::try_parse_from([
            "course-registry",
            "course",
            "add",
            "CS101",
            "Programming",
            "--weekday",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_enrollment_complete() {
        let config = CliConfig::try_parse_from([
            "course-registry",
            "enrollment",
            "complete",
            "s1",
            "CS101",
            "A-",
            "-v",
        ])
        .unwrap();
        assert!(config.verbose);
        assert!(matches!(
            config.command,
            Command::Enrollment(EnrollmentCommand::Complete { .. })
        ));
    }
}

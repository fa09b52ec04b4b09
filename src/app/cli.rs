use crate::app::services::{CourseService, EnrollmentService, StaffService, StudentService};
use crate::config::{Command, CourseCommand, EnrollmentCommand, StaffCommand, StudentCommand};
use crate::core::{
    Course, CourseRecord, EnrollmentRecord, StaffRecord, StorageSystem, StudentRecord, TimeSlot,
};
use crate::utils::error::Result;

/// Executes parsed commands against the services and returns the lines to
/// print.
pub struct CommandRunner<'a> {
    students: StudentService<'a>,
    staff: StaffService<'a>,
    courses: CourseService<'a>,
    enrollments: EnrollmentService<'a>,
    default_capacity: u32,
}

impl<'a> CommandRunner<'a> {
    pub fn new(storage: &'a StorageSystem, default_capacity: u32) -> Self {
        Self {
            students: StudentService::new(storage),
            staff: StaffService::new(storage),
            courses: CourseService::new(storage),
            enrollments: EnrollmentService::new(storage),
            default_capacity,
        }
    }

    pub fn execute(&self, command: Command) -> Result<Vec<String>> {
        match command {
            Command::Student(cmd) => self.student(cmd),
            Command::Staff(cmd) => self.staff(cmd),
            Command::Course(cmd) => self.course(cmd),
            Command::Enrollment(cmd) => self.enrollment(cmd),
        }
    }

    fn student(&self, command: StudentCommand) -> Result<Vec<String>> {
        match command {
            StudentCommand::Add { student_id, name } => {
                let student = self
                    .students
                    .add_student(StudentRecord::new(student_id, name)?)?;
                Ok(vec![format!(
                    "Added student {} with id {}",
                    student.name, student.user_id
                )])
            }
            StudentCommand::Get { student_id } => {
                let student = self.students.get_student(&student_id)?;
                Ok(vec![format!(
                    "{} - {} ({} active course(s))",
                    student.user_id,
                    student.name,
                    student.current_course_load()
                )])
            }
            StudentCommand::Exists { student_id } => Ok(vec![format!(
                "Student exists: {}",
                self.students.student_exists(&student_id)?
            )]),
            StudentCommand::Delete { student_id } => {
                self.students.remove_student(&student_id)?;
                Ok(vec![format!("Removed student {}", student_id)])
            }
            StudentCommand::List => Ok(self
                .students
                .get_all_students()?
                .into_iter()
                .map(|s| format!("{} - {}", s.user_id, s.name))
                .collect()),
            StudentCommand::Transcript { student_id } => {
                let transcript = self.students.get_transcript(&student_id)?;
                if transcript.is_empty() {
                    return Ok(vec!["No completed courses.".to_string()]);
                }
                Ok(transcript
                    .into_iter()
                    .map(|entry| {
                        format!("{} {}: {}", entry.course_id, entry.course_name, entry.grade)
                    })
                    .collect())
            }
        }
    }

    fn staff(&self, command: StaffCommand) -> Result<Vec<String>> {
        match command {
            StaffCommand::Add {
                staff_id,
                name,
                department,
            } => {
                let staff = self
                    .staff
                    .add_staff(StaffRecord::new(staff_id, name, department)?)?;
                Ok(vec![format!(
                    "Added staff {} with ID {} and department: {}",
                    staff.name, staff.user_id, staff.department
                )])
            }
            StaffCommand::Get { staff_id } => {
                let staff = self.staff.get_staff(&staff_id)?;
                Ok(vec![format!(
                    "{} - {} ({}), teaching {} course(s)",
                    staff.user_id,
                    staff.name,
                    staff.department,
                    staff.get_course_load()
                )])
            }
            StaffCommand::Exists { staff_id } => Ok(vec![format!(
                "Staff exists: {}",
                self.staff.staff_exists(&staff_id)?
            )]),
            StaffCommand::Delete { staff_id } => {
                self.staff.remove_staff(&staff_id)?;
                Ok(vec![format!("Removed staff {}", staff_id)])
            }
            StaffCommand::List => Ok(self
                .staff
                .get_all_staff()?
                .into_iter()
                .map(|s| format!("{} - {}", s.user_id, s.name))
                .collect()),
        }
    }

    fn course(&self, command: CourseCommand) -> Result<Vec<String>> {
        match command {
            CourseCommand::Add {
                course_id,
                name,
                weekday,
                start_time,
                duration,
                capacity,
                instructor_id,
            } => {
                let mut record = CourseRecord::new(course_id, name)
                    .with_capacity(capacity.unwrap_or(self.default_capacity));
                if let (Some(weekday), Some(start_time), Some(duration)) =
                    (weekday, start_time, duration)
                {
                    record = record.with_time_slot(TimeSlot::new(weekday, &start_time, duration)?);
                }
                if let Some(instructor_id) = instructor_id.filter(|id| !id.is_empty()) {
                    record = record.with_instructor(instructor_id);
                }
                let course = self.courses.add_course(record)?;
                Ok(vec![format!("Added course {}", course.id)])
            }
            CourseCommand::Get { course_id } => {
                Ok(vec![describe_course(&self.courses.get_course(&course_id)?)])
            }
            CourseCommand::Delete { course_id } => {
                self.courses.remove_course(&course_id)?;
                Ok(vec![format!("Removed course {}", course_id)])
            }
            CourseCommand::List => Ok(self
                .courses
                .get_all_courses()?
                .into_iter()
                .map(|c| format!("{} - {}", c.id, c.name))
                .collect()),
            CourseCommand::Assign {
                course_id,
                staff_id,
            } => {
                let course = self.courses.assign_instructor(&course_id, &staff_id)?;
                Ok(vec![format!(
                    "Assigned {} to {}",
                    staff_id, course.id
                )])
            }
        }
    }

    fn enrollment(&self, command: EnrollmentCommand) -> Result<Vec<String>> {
        match command {
            EnrollmentCommand::Add {
                student_id,
                course_id,
            } => {
                self.enrollments.enroll(&student_id, &course_id)?;
                Ok(vec![format!("Enrolled {} in {}", student_id, course_id)])
            }
            EnrollmentCommand::Drop {
                student_id,
                course_id,
            } => {
                self.enrollments.drop_course(&student_id, &course_id)?;
                Ok(vec![format!("Dropped {} from {}", student_id, course_id)])
            }
            EnrollmentCommand::Complete {
                student_id,
                course_id,
                grade,
            } => {
                self.enrollments
                    .complete_course(&student_id, &course_id, &grade)?;
                Ok(vec![format!(
                    "{} completed {} with grade {}",
                    student_id, course_id, grade
                )])
            }
            EnrollmentCommand::Student { student_id } => Ok(self
                .enrollments
                .get_student_enrollments(&student_id)?
                .iter()
                .map(|e| describe_enrollment(&e.course_id, e))
                .collect()),
            EnrollmentCommand::Course { course_id } => Ok(self
                .enrollments
                .get_course_enrollments(&course_id)?
                .iter()
                .map(|e| describe_enrollment(&e.student_id, e))
                .collect()),
        }
    }
}

fn describe_course(course: &Course) -> String {
    let schedule = course
        .time_slot
        .map(|slot| slot.to_string())
        .unwrap_or_else(|| "unscheduled".to_string());
    let instructor = course
        .instructor
        .as_ref()
        .map(|s| s.name.as_str())
        .unwrap_or("none");
    format!(
        "{} - {}, {}, Enrolled: {}/{}, Instructor: {}",
        course.id,
        course.name,
        schedule,
        course.current_enrollment_count(),
        course.capacity,
        instructor
    )
}

fn describe_enrollment(subject: &str, enrollment: &EnrollmentRecord) -> String {
    format!(
        "{} - {} - {}",
        subject,
        enrollment.status,
        enrollment.grade.as_deref().unwrap_or("-")
    )
}

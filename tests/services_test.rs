use course_registry::core::{CourseRecord, RecordStore, StaffRecord, StudentRecord, TimeSlot};
use course_registry::utils::error::EntityKind;
use course_registry::{
    CourseService, EnrollmentService, RegistryError, StaffService, StorageSystem, StudentService,
};
use std::fs;
use tempfile::TempDir;

fn seeded(temp_dir: &TempDir) -> StorageSystem {
    let storage = StorageSystem::open(temp_dir.path()).unwrap();
    let students = StudentService::new(&storage);
    let staff = StaffService::new(&storage);
    let courses = CourseService::new(&storage);

    students
        .add_student(StudentRecord::new("s1001", "Alice Smith").unwrap())
        .unwrap();
    students
        .add_student(StudentRecord::new("s1002", "Bob Johnson").unwrap())
        .unwrap();
    staff
        .add_staff(StaffRecord::new("p2001", "Dr. Emily White", "Computer Science").unwrap())
        .unwrap();
    courses
        .add_course(
            CourseRecord::new("CS101", "Programming")
                .with_time_slot(TimeSlot::new(1, "09:00", 90).unwrap())
                .with_instructor("p2001"),
        )
        .unwrap();
    courses
        .add_course(CourseRecord::new("MATH101", "Calculus I").with_capacity(60))
        .unwrap();
    storage
}

#[test]
fn test_open_creates_data_files() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    StorageSystem::open(&data_dir).unwrap();

    for file in ["students.json", "staff.json", "courses.json", "enrollments.json"] {
        assert!(data_dir.join(file).exists(), "missing {}", file);
    }
}

#[test]
fn test_add_student_rejects_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let storage = seeded(&temp_dir);
    let service = StudentService::new(&storage);

    let err = service
        .add_student(StudentRecord::new("s1001", "Someone Else").unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::AlreadyExists {
            kind: EntityKind::Student,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Student with ID s1001 already exists");
    assert_eq!(service.get_all_students().unwrap().len(), 2);
}

#[test]
fn test_remove_student_cascades_enrollments() {
    let temp_dir = TempDir::new().unwrap();
    let storage = seeded(&temp_dir);
    let enrollments = EnrollmentService::new(&storage);
    enrollments.enroll("s1001", "CS101").unwrap();
    enrollments.enroll("s1002", "CS101").unwrap();

    let students = StudentService::new(&storage);
    students.remove_student("s1001").unwrap();

    assert!(!students.student_exists("s1001").unwrap());
    let course = storage.get_course("CS101").unwrap();
    assert_eq!(course.enrolled_student_ids().collect::<Vec<_>>(), vec!["s1002"]);
    assert!(matches!(
        students.remove_student("s1001"),
        Err(RegistryError::NotFound { .. })
    ));
}

#[test]
fn test_remove_course_cascades_enrollments() {
    let temp_dir = TempDir::new().unwrap();
    let storage = seeded(&temp_dir);
    EnrollmentService::new(&storage)
        .enroll("s1001", "CS101")
        .unwrap();

    let courses = CourseService::new(&storage);
    courses.remove_course("CS101").unwrap();

    assert!(storage.enrollment_store().get_all().unwrap().is_empty());
    assert!(storage.get_student("s1001").unwrap().enrollments.is_empty());
    assert!(matches!(
        courses.get_course("CS101"),
        Err(RegistryError::NotFound { .. })
    ));
    // staff no longer teaches the removed course
    assert_eq!(storage.get_staff("p2001").unwrap().get_course_load(), 0);
}

#[test]
fn test_remove_staff_unassigns_courses() {
    let temp_dir = TempDir::new().unwrap();
    let storage = seeded(&temp_dir);
    let staff = StaffService::new(&storage);
    assert_eq!(staff.get_staff("p2001").unwrap().get_course_load(), 1);

    staff.remove_staff("p2001").unwrap();

    let course = storage.get_course("CS101").unwrap();
    assert!(course.instructor_id.is_none());
    assert!(course.instructor.is_none());
    assert!(!staff.staff_exists("p2001").unwrap());
}

#[test]
fn test_add_course_requires_known_instructor() {
    let temp_dir = TempDir::new().unwrap();
    let storage = seeded(&temp_dir);
    let courses = CourseService::new(&storage);

    let err = courses
        .add_course(CourseRecord::new("PHYS101", "Physics").with_instructor("ghost"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Staff with ID ghost not found");
    assert!(!storage.course_store().exists("PHYS101").unwrap());
}

#[test]
fn test_assign_instructor_updates_course_load() {
    let temp_dir = TempDir::new().unwrap();
    let storage = seeded(&temp_dir);
    let courses = CourseService::new(&storage);

    let course = courses.assign_instructor("MATH101", "p2001").unwrap();
    assert_eq!(course.instructor.unwrap().user_id, "p2001");
    let staff = storage.get_staff("p2001").unwrap();
    assert_eq!(staff.assigned_course_ids, vec!["CS101", "MATH101"]);
}

#[test]
fn test_transcript_lists_completed_courses_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let storage = seeded(&temp_dir);
    let enrollments = EnrollmentService::new(&storage);
    enrollments.enroll("s1001", "MATH101").unwrap();
    enrollments.enroll("s1001", "CS101").unwrap();
    enrollments.complete_course("s1001", "MATH101", "A").unwrap();
    enrollments.complete_course("s1001", "CS101", "B").unwrap();

    let transcript = StudentService::new(&storage)
        .get_transcript("s1001")
        .unwrap();
    let rows: Vec<_> = transcript
        .iter()
        .map(|t| (t.course_id.as_str(), t.course_name.as_str(), t.grade.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![("MATH101", "Calculus I", "A"), ("CS101", "Programming", "B")]
    );
    assert!(StudentService::new(&storage)
        .get_transcript("s1002")
        .unwrap()
        .is_empty());
}

#[test]
fn test_legacy_data_files_load() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(
        dir.join("students.json"),
        r#"[{"user_id": "s1", "name": "Alice"}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("courses.json"),
        r#"[{"id": "CS101", "name": "Programming",
             "time_slot": {"weekday": 1, "start_time": "09:00:00", "duration": 60},
             "capacity": 30, "instructor_id": null}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("enrollments.json"),
        r#"[{"id": "e1", "student_id": "s1", "course_id": "CS101", "status": "enrolled", "grade": null}]"#,
    )
    .unwrap();

    let storage = StorageSystem::open(dir).unwrap();
    let student = storage.get_student("s1").unwrap();
    assert!(student.is_enrolled_in("CS101"));
    let course = storage.get_course("CS101").unwrap();
    assert_eq!(course.time_slot.unwrap().start_minute(), 9 * 60);
}

#[test]
fn test_orphaned_enrollment_in_file_is_integrity_error() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("students.json"), "[]").unwrap();
    fs::write(
        dir.join("courses.json"),
        r#"[{"id": "CS101", "name": "Programming"}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("enrollments.json"),
        r#"[{"id": "e1", "student_id": "gone", "course_id": "CS101", "status": "active"}]"#,
    )
    .unwrap();

    let storage = StorageSystem::open(dir).unwrap();
    let err = storage.get_all_courses().unwrap_err();
    assert!(matches!(err, RegistryError::Integrity { .. }));
    assert!(err.to_string().contains("gone"));
}

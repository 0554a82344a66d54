//! SeaORM storage tests against a temporary SQLite database

use chrono::NaiveDate;
use tempfile::TempDir;

use attendance_tracker::errors::AttendanceError;
use attendance_tracker::storage::backend::{SeaOrmStorage, infer_backend_from_url};
use attendance_tracker::storage::models::new_id;
use attendance_tracker::storage::{
    AttendanceStatus, ClassRecord, Student, StudentAttendance, StudentFilter, StudentStatus,
    Teacher, TeacherAttendance,
};

async fn create_storage() -> (TempDir, SeaOrmStorage) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("storage_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");
    (temp_dir, storage)
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

fn class(name: &str) -> ClassRecord {
    ClassRecord {
        id: new_id(),
        name: name.to_string(),
        teacher_name: String::new(),
        teacher_nip: String::new(),
        headmaster_name: String::new(),
        headmaster_nip: String::new(),
    }
}

fn student(nis: &str, name: &str, class_name: &str) -> Student {
    Student {
        id: new_id(),
        nis: nis.to_string(),
        name: name.to_string(),
        class_name: class_name.to_string(),
        status: StudentStatus::Active,
    }
}

fn mark(student_id: &str, status: AttendanceStatus, note: Option<&str>, date: NaiveDate) -> StudentAttendance {
    StudentAttendance {
        id: new_id(),
        student_id: student_id.to_string(),
        status,
        note: note.map(str::to_string),
        date,
    }
}

#[test]
fn test_infer_backend() {
    assert_eq!(infer_backend_from_url("sqlite://a.db").unwrap(), "sqlite");
    assert_eq!(infer_backend_from_url("attendance.db").unwrap(), "sqlite");
    assert_eq!(
        infer_backend_from_url("postgres://u:p@localhost/att").unwrap(),
        "postgres"
    );
    assert_eq!(
        infer_backend_from_url("mysql://u:p@localhost/att").unwrap(),
        "mysql"
    );
}

#[tokio::test]
async fn test_settings_upsert() {
    let (_dir, storage) = create_storage().await;

    assert!(storage.get_settings().await.unwrap().is_none());
    storage.upsert_settings("TK Satu").await.unwrap();
    let saved = storage.upsert_settings("TK Dua").await.unwrap();
    assert_eq!(saved.id, "1");

    let loaded = storage.get_settings().await.unwrap().unwrap();
    assert_eq!(loaded.school_name, "TK Dua");
}

#[tokio::test]
async fn test_class_unique_name() {
    let (_dir, storage) = create_storage().await;

    storage.insert_class(&class("TK A")).await.unwrap();
    let err = storage.insert_class(&class("TK A")).await.unwrap_err();
    assert!(matches!(err, AttendanceError::Conflict(_)), "{:?}", err);
    assert_eq!(storage.count_classes().await.unwrap(), 1);
}

#[tokio::test]
async fn test_class_rename_updates_students() {
    let (_dir, storage) = create_storage().await;

    let mut record = class("TK A");
    storage.insert_class(&record).await.unwrap();
    storage
        .insert_student(&student("1001", "Andi", "TK A"))
        .await
        .unwrap();

    record.name = "TK A1".to_string();
    storage.update_class(&record, "TK A").await.unwrap();

    assert_eq!(storage.count_students_in_class("TK A").await.unwrap(), 0);
    assert_eq!(storage.count_students_in_class("TK A1").await.unwrap(), 1);
}

#[tokio::test]
async fn test_student_filter_and_counts() {
    let (_dir, storage) = create_storage().await;

    for name in ["TK A", "TK B"] {
        storage.insert_class(&class(name)).await.unwrap();
    }
    storage.insert_student(&student("1001", "Zaki", "TK A")).await.unwrap();
    storage.insert_student(&student("1002", "ANDI", "TK A")).await.unwrap();
    storage.insert_student(&student("2001", "Bela", "TK B")).await.unwrap();

    let all = storage.list_students(&StudentFilter::default()).await.unwrap();
    let names: Vec<&str> = all.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["ANDI", "Bela", "Zaki"]);

    let found = storage
        .list_students(&StudentFilter {
            search: Some("andi".to_string()),
            class_name: None,
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    let counts = storage.student_counts_by_class().await.unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].class_name, "TK A");
    assert_eq!(counts[0].count, 2);

    let dup = storage
        .insert_student(&student("1001", "Other", "TK B"))
        .await
        .unwrap_err();
    assert!(matches!(dup, AttendanceError::Conflict(_)));
}

#[tokio::test]
async fn test_upsert_attendance_overwrites_same_day() {
    let (_dir, storage) = create_storage().await;

    storage.insert_class(&class("TK A")).await.unwrap();
    let andi = student("1001", "Andi", "TK A");
    storage.insert_student(&andi).await.unwrap();

    storage
        .upsert_attendance(&[mark(&andi.id, AttendanceStatus::Hadir, None, day(16))])
        .await
        .unwrap();
    storage
        .upsert_attendance(&[mark(&andi.id, AttendanceStatus::Sakit, Some("  Flu  "), day(16))])
        .await
        .unwrap();
    storage
        .upsert_attendance(&[mark(&andi.id, AttendanceStatus::Hadir, Some(""), day(15))])
        .await
        .unwrap();

    let on_16 = storage
        .attendance_on(std::slice::from_ref(&andi.id), day(16))
        .await
        .unwrap();
    assert_eq!(on_16.len(), 1);
    assert_eq!(on_16[0].status, AttendanceStatus::Sakit);
    assert_eq!(on_16[0].note.as_deref(), Some("Flu"));

    let on_15 = storage
        .attendance_on(std::slice::from_ref(&andi.id), day(15))
        .await
        .unwrap();
    assert_eq!(on_15[0].note, None);

    let between = storage.attendance_between(day(1), day(31)).await.unwrap();
    assert_eq!(between.len(), 2);
    assert!(between.iter().all(|r| r.student.name == "Andi"));

    let counts = storage.status_counts_on(day(16)).await.unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].status, "Sakit");
    assert_eq!(counts[0].count, 1);

    let present = storage
        .dates_with_status(AttendanceStatus::Hadir, day(12), day(17))
        .await
        .unwrap();
    assert_eq!(present, vec![day(15)]);
}

#[tokio::test]
async fn test_delete_student_removes_attendance() {
    let (_dir, storage) = create_storage().await;

    storage.insert_class(&class("TK A")).await.unwrap();
    let andi = student("1001", "Andi", "TK A");
    storage.insert_student(&andi).await.unwrap();
    storage
        .upsert_attendance(&[mark(&andi.id, AttendanceStatus::Alfa, None, day(16))])
        .await
        .unwrap();

    assert!(storage.delete_student(&andi.id).await.unwrap());
    assert!(!storage.delete_student(&andi.id).await.unwrap());
    assert!(
        storage
            .attendance_between(day(1), day(31))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_teacher_logs_cascade_on_delete() {
    let (_dir, storage) = create_storage().await;

    let teacher = Teacher {
        id: new_id(),
        nip: "198001".to_string(),
        name: "Bu Sari".to_string(),
        role: "Guru".to_string(),
    };
    storage.insert_teacher(&teacher).await.unwrap();

    let log = TeacherAttendance {
        id: new_id(),
        teacher_id: teacher.id.clone(),
        status: AttendanceStatus::Izin,
        note: Some("Rapat".to_string()),
        date: day(16),
    };
    storage.insert_teacher_log(&log).await.unwrap();

    let dup = TeacherAttendance {
        id: new_id(),
        ..log.clone()
    };
    let err = storage.insert_teacher_log(&dup).await.unwrap_err();
    assert!(matches!(err, AttendanceError::Conflict(_)));

    let logs = storage.teacher_logs_on(day(16)).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].teacher.name, "Bu Sari");

    assert!(storage.delete_teacher(&teacher.id).await.unwrap());
    assert!(storage.teacher_logs_on(day(16)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_point_lookups() {
    let (_dir, storage) = create_storage().await;

    storage.insert_class(&class("TK A")).await.unwrap();
    let andi = student("1001", "Andi", "TK A");
    let bela = student("1002", "Bela", "TK A");
    storage.insert_student(&andi).await.unwrap();
    storage.insert_student(&bela).await.unwrap();

    assert_eq!(
        storage.find_class_by_name("TK A").await.unwrap().unwrap().name,
        "TK A"
    );
    assert!(storage.find_class_by_name("TK Z").await.unwrap().is_none());
    assert_eq!(storage.count_students_in_class("TK A").await.unwrap(), 2);

    assert_eq!(storage.get_student(&andi.id).await.unwrap(), Some(andi.clone()));
    assert_eq!(
        storage.find_student_by_nis("1002").await.unwrap().unwrap().id,
        bela.id
    );
    assert!(storage.find_student_by_nis("9999").await.unwrap().is_none());

    let found = storage
        .students_by_ids(&[andi.id.clone(), "missing".to_string()])
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, andi.id);

    let teacher = Teacher {
        id: new_id(),
        nip: String::new(),
        name: "Pak Joko".to_string(),
        role: String::new(),
    };
    storage.insert_teacher(&teacher).await.unwrap();
    assert_eq!(storage.get_teacher(&teacher.id).await.unwrap(), Some(teacher.clone()));
    assert!(
        storage
            .find_teacher_log(&teacher.id, day(16))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let (_dir, storage) = create_storage().await;

    storage.insert_class(&class("TK A")).await.unwrap();
    storage.insert_student(&student("1001", "Andi", "TK A")).await.unwrap();
    storage
        .insert_student(&student("1002", "Nur_Aini", "TK A"))
        .await
        .unwrap();

    let search = |term: &str| StudentFilter {
        search: Some(term.to_string()),
        class_name: None,
    };

    let found = storage.list_students(&search("_")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Nur_Aini");

    assert!(storage.list_students(&search("%")).await.unwrap().is_empty());
    assert!(storage.list_students(&search("10_1")).await.unwrap().is_empty());
    assert_eq!(storage.list_students(&search("100")).await.unwrap().len(), 2);
}

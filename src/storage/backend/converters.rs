use std::str::FromStr;

use sea_orm::ActiveValue::Set;

use crate::storage::models::{
    AttendanceStatus, ClassRecord, SchoolSettings, Student, StudentAttendance, StudentStatus,
    Teacher, TeacherAttendance,
};
use migration::entities::{
    class, school_settings, student, student_attendance, teacher, teacher_attendance,
};

/// 空白备注统一存为 NULL
fn normalize_note(note: &Option<String>) -> Option<String> {
    note.as_ref()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

pub fn model_to_settings(model: school_settings::Model) -> SchoolSettings {
    SchoolSettings {
        id: model.id,
        school_name: model.school_name,
    }
}

pub fn settings_to_active_model(settings: &SchoolSettings) -> school_settings::ActiveModel {
    school_settings::ActiveModel {
        id: Set(settings.id.clone()),
        school_name: Set(settings.school_name.clone()),
    }
}

pub fn model_to_class(model: class::Model) -> ClassRecord {
    ClassRecord {
        id: model.id,
        name: model.name,
        teacher_name: model.teacher_name,
        teacher_nip: model.teacher_nip,
        headmaster_name: model.headmaster_name,
        headmaster_nip: model.headmaster_nip,
    }
}

pub fn class_to_active_model(record: &ClassRecord) -> class::ActiveModel {
    class::ActiveModel {
        id: Set(record.id.clone()),
        name: Set(record.name.clone()),
        teacher_name: Set(record.teacher_name.clone()),
        teacher_nip: Set(record.teacher_nip.clone()),
        headmaster_name: Set(record.headmaster_name.clone()),
        headmaster_nip: Set(record.headmaster_nip.clone()),
    }
}

pub fn model_to_student(model: student::Model) -> Student {
    Student {
        id: model.id,
        nis: model.nis,
        name: model.name,
        class_name: model.class_name,
        status: StudentStatus::from_str(&model.status).unwrap_or_default(),
    }
}

pub fn student_to_active_model(s: &Student) -> student::ActiveModel {
    student::ActiveModel {
        id: Set(s.id.clone()),
        nis: Set(s.nis.clone()),
        name: Set(s.name.clone()),
        class_name: Set(s.class_name.clone()),
        status: Set(s.status.to_string()),
    }
}

pub fn model_to_teacher(model: teacher::Model) -> Teacher {
    Teacher {
        id: model.id,
        nip: model.nip,
        name: model.name,
        role: model.role,
    }
}

pub fn teacher_to_active_model(t: &Teacher) -> teacher::ActiveModel {
    teacher::ActiveModel {
        id: Set(t.id.clone()),
        nip: Set(t.nip.clone()),
        name: Set(t.name.clone()),
        role: Set(t.role.clone()),
    }
}

pub fn model_to_attendance(model: student_attendance::Model) -> StudentAttendance {
    StudentAttendance {
        id: model.id,
        student_id: model.student_id,
        status: AttendanceStatus::from_db(&model.status),
        note: model.note,
        date: model.date,
    }
}

pub fn attendance_to_active_model(record: &StudentAttendance) -> student_attendance::ActiveModel {
    student_attendance::ActiveModel {
        id: Set(record.id.clone()),
        student_id: Set(record.student_id.clone()),
        status: Set(record.status.to_string()),
        note: Set(normalize_note(&record.note)),
        date: Set(record.date),
    }
}

pub fn model_to_teacher_attendance(model: teacher_attendance::Model) -> TeacherAttendance {
    TeacherAttendance {
        id: model.id,
        teacher_id: model.teacher_id,
        status: AttendanceStatus::from_db(&model.status),
        note: model.note,
        date: model.date,
    }
}

pub fn teacher_attendance_to_active_model(
    record: &TeacherAttendance,
) -> teacher_attendance::ActiveModel {
    teacher_attendance::ActiveModel {
        id: Set(record.id.clone()),
        teacher_id: Set(record.teacher_id.clone()),
        status: Set(record.status.to_string()),
        note: Set(normalize_note(&record.note)),
        date: Set(record.date),
    }
}

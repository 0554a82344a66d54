//! 学校 API 路由配置
//!
//! 将 /v1 下的路由按资源拆分。

use actix_web::web;

use super::attendance::{
    add_teacher_log, delete_teacher_log, get_roster, list_teacher_logs, save_roster,
};
use super::classes::{create_class, delete_class, get_class, list_classes, update_class};
use super::dashboard::get_dashboard;
use super::reports::{download_csv, download_pdf, get_report};
use super::settings::{get_settings, update_settings};
use super::students::{create_student, delete_student, get_student, list_students, update_student};
use super::teachers::{create_teacher, delete_teacher, get_teacher, list_teachers, update_teacher};

/// 学校设置 `/settings`
pub fn settings_routes() -> actix_web::Scope {
    web::scope("/settings")
        .route("", web::get().to(get_settings))
        .route("", web::put().to(update_settings))
}

/// 班级 `/classes`
pub fn classes_routes() -> actix_web::Scope {
    web::scope("/classes")
        .route("", web::get().to(list_classes))
        .route("", web::post().to(create_class))
        .route("/{id}", web::get().to(get_class))
        .route("/{id}", web::put().to(update_class))
        .route("/{id}", web::delete().to(delete_class))
}

/// 学生 `/students`
///
/// - GET /students?search=&class= - 列表（按姓名排序）
/// - POST /students - 新建
/// - GET/PUT/DELETE /students/{id}
pub fn students_routes() -> actix_web::Scope {
    web::scope("/students")
        .route("", web::get().to(list_students))
        .route("", web::post().to(create_student))
        .route("/{id}", web::get().to(get_student))
        .route("/{id}", web::put().to(update_student))
        .route("/{id}", web::delete().to(delete_student))
}

/// 教师 `/teachers`
pub fn teachers_routes() -> actix_web::Scope {
    web::scope("/teachers")
        .route("", web::get().to(list_teachers))
        .route("", web::post().to(create_teacher))
        .route("/{id}", web::get().to(get_teacher))
        .route("/{id}", web::put().to(update_teacher))
        .route("/{id}", web::delete().to(delete_teacher))
}

/// 出勤 `/attendance`
///
/// - GET /attendance/students?class=&date= - 班级点名表
/// - PUT /attendance/students - 批量保存点名结果
/// - GET /attendance/teachers?date= - 教师出勤记录
/// - POST /attendance/teachers - 新增教师出勤
/// - DELETE /attendance/teachers/{id}
pub fn attendance_routes() -> actix_web::Scope {
    web::scope("/attendance")
        .route("/students", web::get().to(get_roster))
        .route("/students", web::put().to(save_roster))
        .route("/teachers", web::get().to(list_teacher_logs))
        .route("/teachers", web::post().to(add_teacher_log))
        .route("/teachers/{id}", web::delete().to(delete_teacher_log))
}

/// 仪表盘 `/dashboard`
pub fn dashboard_routes() -> actix_web::Scope {
    web::scope("/dashboard").route("", web::get().to(get_dashboard))
}

/// 报表 `/reports`
pub fn reports_routes() -> actix_web::Scope {
    web::scope("/reports")
        .route("/attendance", web::get().to(get_report))
        .route("/attendance/pdf", web::get().to(download_pdf))
        .route("/attendance/csv", web::get().to(download_csv))
}

/// School API v1 路由
pub fn school_v1_routes() -> actix_web::Scope {
    web::scope("/v1")
        .service(settings_routes())
        .service(classes_routes())
        .service(students_routes())
        .service(teachers_routes())
        .service(attendance_routes())
        .service(dashboard_routes())
        .service(reports_routes())
}

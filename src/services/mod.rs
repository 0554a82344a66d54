//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the CLI commands.

mod attendance_service;
mod class_service;
mod dashboard_service;
mod report_service;
mod settings_service;
mod student_service;
mod teacher_attendance_service;
mod teacher_service;

use std::sync::Arc;

use crate::storage::SeaOrmStorage;

pub use attendance_service::*;
pub use class_service::*;
pub use dashboard_service::*;
pub use report_service::*;
pub use settings_service::*;
pub use student_service::*;
pub use teacher_attendance_service::*;
pub use teacher_service::*;

/// All services wired to one storage backend
#[derive(Clone)]
pub struct AppServices {
    pub storage: Arc<SeaOrmStorage>,
    pub settings: Arc<SettingsService>,
    pub classes: Arc<ClassService>,
    pub students: Arc<StudentService>,
    pub teachers: Arc<TeacherService>,
    pub attendance: Arc<AttendanceService>,
    pub teacher_attendance: Arc<TeacherAttendanceService>,
    pub dashboard: Arc<DashboardService>,
    pub reports: Arc<ReportService>,
}

impl AppServices {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        let settings = Arc::new(SettingsService::new(storage.clone()));
        Self {
            classes: Arc::new(ClassService::new(storage.clone())),
            students: Arc::new(StudentService::new(storage.clone())),
            teachers: Arc::new(TeacherService::new(storage.clone())),
            attendance: Arc::new(AttendanceService::new(storage.clone())),
            teacher_attendance: Arc::new(TeacherAttendanceService::new(storage.clone())),
            dashboard: Arc::new(DashboardService::new(storage.clone())),
            reports: Arc::new(ReportService::new(storage.clone(), settings.clone())),
            settings,
            storage,
        }
    }
}

//! 学生与教师出勤端点

use actix_web::{Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::trace;

use crate::errors::AttendanceError;
use crate::services::{AttendanceService, NewTeacherLog, TeacherAttendanceService};
use crate::utils::non_blank;

use super::helpers::{api_result, created_result, date_or_today, error_from_attendance};
use super::types::{DateQuery, DeletedResponse, RosterQuery, SaveRosterRequest};

/// GET /attendance/students?class=&date=
pub async fn get_roster(
    query: web::Query<RosterQuery>,
    service: web::Data<Arc<AttendanceService>>,
) -> ActixResult<impl Responder> {
    trace!("API: roster query {:?}", query);
    let date = match date_or_today(query.date.as_deref()) {
        Ok(d) => d,
        Err(e) => return Ok(error_from_attendance(&e)),
    };
    let Some(class_name) = non_blank(query.class.as_deref()) else {
        return Ok(error_from_attendance(&AttendanceError::validation(
            "Query parameter 'class' is required",
        )));
    };

    Ok(api_result(service.class_roster(&class_name, date).await))
}

/// PUT /attendance/students
pub async fn save_roster(
    body: web::Json<SaveRosterRequest>,
    service: web::Data<Arc<AttendanceService>>,
) -> ActixResult<impl Responder> {
    let SaveRosterRequest { date, entries } = body.into_inner();
    let date = match date_or_today(date.as_deref()) {
        Ok(d) => d,
        Err(e) => return Ok(error_from_attendance(&e)),
    };

    Ok(api_result(service.save_roster(date, entries).await))
}

/// GET /attendance/teachers?date=
pub async fn list_teacher_logs(
    query: web::Query<DateQuery>,
    service: web::Data<Arc<TeacherAttendanceService>>,
) -> ActixResult<impl Responder> {
    let date = match date_or_today(query.date.as_deref()) {
        Ok(d) => d,
        Err(e) => return Ok(error_from_attendance(&e)),
    };
    Ok(api_result(service.list_logs(date).await))
}

/// POST /attendance/teachers
pub async fn add_teacher_log(
    body: web::Json<NewTeacherLog>,
    service: web::Data<Arc<TeacherAttendanceService>>,
) -> ActixResult<impl Responder> {
    Ok(created_result(service.add_log(body.into_inner()).await))
}

/// DELETE /attendance/teachers/{id}
pub async fn delete_teacher_log(
    path: web::Path<String>,
    service: web::Data<Arc<TeacherAttendanceService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let result = service
        .delete_log(&id)
        .await
        .map(|_| DeletedResponse { id });
    Ok(api_result(result))
}
